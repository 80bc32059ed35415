use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use serde::Serialize;

use crate::{CompressOptions, ExposeOption, LibraryOptions};

/// The immutable snapshot every stage of one build reads from. All paths are absolute.
///
/// Its JSON serialization is part of the build fingerprint, so every field that influences
/// the generated output must be serialized.
#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<String>,
  pub cwd: PathBuf,
  pub base_dir: PathBuf,
  #[serde(rename = "rootNS")]
  pub root_ns: Option<String>,
  pub libs: FxIndexMap<String, LibraryOptions>,
  pub module_overrides: FxIndexMap<String, PathBuf>,
  pub inline_sources: FxIndexMap<String, String>,

  // --- Transform
  pub compress: Option<CompressOptions>,
  /// Replace module ids with synthetic bindings in the minified bundle.
  pub compress_module_ids: bool,
  pub expose: ExposeOption,
  pub version: Option<String>,
  pub release_date: Option<String>,
  pub global_modules: FxIndexMap<String, String>,

  // --- Output
  pub output_source: Option<PathBuf>,
  pub output_minified: Option<PathBuf>,
  pub output_dev: Option<PathBuf>,
  pub output_coverage: Option<PathBuf>,
  /// Only decides whether the cache is consulted, so it stays out of the fingerprint.
  #[serde(skip)]
  pub force: bool,
  pub hash: bool,
}

impl NormalizedBundlerOptions {
  /// `// 4.5.1 (2016-12-07)`, only when both the version and the release date are known.
  pub fn banner(&self) -> Option<String> {
    match (&self.version, &self.release_date) {
      (Some(version), Some(release_date)) => Some(format!("// {version} ({release_date})\n")),
      _ => None,
    }
  }

  pub fn has_any_output(&self) -> bool {
    self.output_source.is_some()
      || self.output_minified.is_some()
      || self.output_dev.is_some()
      || self.output_coverage.is_some()
  }
}
