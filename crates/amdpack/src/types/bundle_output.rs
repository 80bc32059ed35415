use amdpack_common::{AmdModule, OutputAsset};
use amdpack_error::AmdWarning;

#[derive(Debug, Default)]
pub struct BundleOutput {
  pub assets: Vec<OutputAsset>,
  pub warnings: Vec<AmdWarning>,
  pub modules: Vec<AmdModule>,
  /// Hex SHA-256 of the module set and the options this output was built from.
  pub fingerprint: String,
  /// Nothing changed since the previous build, no output was generated.
  pub skipped: bool,
  pub max_mtime: u128,
}
