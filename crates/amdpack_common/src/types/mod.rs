pub mod coverage_instrumenter;
pub mod output_asset;
pub mod source;
pub mod source_joiner;
