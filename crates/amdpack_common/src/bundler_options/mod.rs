pub mod compress_options;
pub mod expose_option;
pub mod input_item;
pub mod library_options;
pub mod normalized_bundler_options;

use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

use crate::{ExposeOption, InputItem, RawCompressOptions, RawLibraryOptions};

/// Options as written by the user, e.g. in a JSON config file. Every field is optional,
/// defaults are applied when the options are normalized.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  // --- Input
  pub from: Option<InputItem>,
  pub cwd: Option<PathBuf>,
  pub base_dir: Option<PathBuf>,
  #[serde(rename = "rootNS")]
  pub root_ns: Option<String>,
  pub libs: Option<FxIndexMap<String, RawLibraryOptions>>,
  pub module_overrides: Option<FxIndexMap<String, String>>,
  pub inline_sources: Option<FxIndexMap<String, String>>,

  // --- Transform
  pub compress: Option<RawCompressOptions>,
  /// `false` keeps the literal module ids in the minified bundle.
  pub compress_module_ids: Option<bool>,
  pub expose: Option<ExposeOption>,
  pub version: Option<String>,
  pub release_date: Option<String>,
  pub global_modules: Option<FxIndexMap<String, String>>,

  // --- Output
  pub output_source: Option<PathBuf>,
  pub output_minified: Option<PathBuf>,
  pub output_dev: Option<PathBuf>,
  pub output_coverage: Option<PathBuf>,
  pub force: Option<bool>,
  pub hash: Option<bool>,
}

impl BundlerOptions {
  pub fn from_json(json: &str) -> anyhow::Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Fields set in `other` win over the ones set in `self`.
  #[must_use]
  pub fn merge(self, other: Self) -> Self {
    Self {
      from: other.from.or(self.from),
      cwd: other.cwd.or(self.cwd),
      base_dir: other.base_dir.or(self.base_dir),
      root_ns: other.root_ns.or(self.root_ns),
      libs: other.libs.or(self.libs),
      module_overrides: other.module_overrides.or(self.module_overrides),
      inline_sources: other.inline_sources.or(self.inline_sources),
      compress: other.compress.or(self.compress),
      compress_module_ids: other.compress_module_ids.or(self.compress_module_ids),
      expose: other.expose.or(self.expose),
      version: other.version.or(self.version),
      release_date: other.release_date.or(self.release_date),
      global_modules: other.global_modules.or(self.global_modules),
      output_source: other.output_source.or(self.output_source),
      output_minified: other.output_minified.or(self.output_minified),
      output_dev: other.output_dev.or(self.output_dev),
      output_coverage: other.output_coverage.or(self.output_coverage),
      force: other.force.or(self.force),
      hash: other.hash.or(self.hash),
    }
  }
}

#[test]
fn deserialize_config_file() {
  let options = BundlerOptions::from_json(
    r#"{
      "from": ["src/js/tinymce/**/*.js"],
      "baseDir": "src/js",
      "rootNS": "tinymce",
      "expose": "public",
      "compress": { "mangle": false },
      "libs": { "ephox": { "baseDir": "lib/ephox", "rootNS": "ephox", "expose": false } },
      "globalModules": { "tinymce.Env": "Env" },
      "outputSource": "out/tinymce.js"
    }"#,
  )
  .unwrap();

  assert_eq!(options.root_ns.as_deref(), Some("tinymce"));
  assert_eq!(options.expose, Some(ExposeOption::Public));
  assert!(matches!(options.from, Some(InputItem::Many(ref items)) if items.len() == 1));
  assert_eq!(options.libs.unwrap()["ephox"].expose, Some(ExposeOption::Never));
  assert_eq!(options.global_modules.unwrap()["tinymce.Env"], "Env");
}

#[test]
fn unknown_fields_are_rejected() {
  assert!(BundlerOptions::from_json(r#"{ "outputMin": "a.js" }"#).is_err());
}

#[test]
fn merge_prefers_later_values() {
  let base = BundlerOptions {
    root_ns: Some("tinymce".to_string()),
    version: Some("4.0.0".to_string()),
    ..Default::default()
  };
  let merged =
    base.merge(BundlerOptions { version: Some("4.1.0".to_string()), ..Default::default() });
  assert_eq!(merged.root_ns.as_deref(), Some("tinymce"));
  assert_eq!(merged.version.as_deref(), Some("4.1.0"));
}
