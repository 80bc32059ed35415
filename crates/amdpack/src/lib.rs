mod bundler;
mod cache;
mod exposure;
mod generate_stage;
mod runtime;
mod scan_stage;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  cache::read_hash_marker,
  exposure::is_exposed,
  types::bundle_output::BundleOutput,
};
pub use amdpack_common::*;
pub use amdpack_error::{AmdError, AmdWarning, BuildError, BuildResult};
