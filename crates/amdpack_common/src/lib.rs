mod bundler_options;
mod module;
mod reporter;
mod types;

pub use crate::{
  bundler_options::{
    BundlerOptions,
    compress_options::{CompressOptions, RawCompressOptions},
    expose_option::ExposeOption,
    input_item::InputItem,
    library_options::{LibraryOptions, RawLibraryOptions},
    normalized_bundler_options::NormalizedBundlerOptions,
  },
  module::amd_module::AmdModule,
  reporter::{LogReporter, Reporter},
  types::{
    coverage_instrumenter::CoverageInstrumenter,
    output_asset::{OutputAsset, OutputKind},
    source::Source,
    source_joiner::SourceJoiner,
  },
};
