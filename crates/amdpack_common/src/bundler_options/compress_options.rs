use serde::{Deserialize, Serialize};

/// Settings of the minified output. `compress: false` in the raw options disables all of them
/// and the minified target is printed readable instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CompressOptions {
  pub mangle: bool,
  pub dead_code: bool,
  pub drop_console: bool,
  pub drop_debugger: bool,
}

impl Default for CompressOptions {
  fn default() -> Self {
    Self { mangle: true, dead_code: true, drop_console: false, drop_debugger: false }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCompressOptions {
  Enabled(bool),
  Custom(CompressOptions),
}

impl RawCompressOptions {
  pub fn normalize(self) -> Option<CompressOptions> {
    match self {
      Self::Enabled(true) => Some(CompressOptions::default()),
      Self::Enabled(false) => None,
      Self::Custom(options) => Some(options),
    }
  }
}

#[test]
fn raw_compress_options() {
  let parse = |json: &str| serde_json::from_str::<RawCompressOptions>(json).unwrap().normalize();
  assert_eq!(parse("true"), Some(CompressOptions::default()));
  assert_eq!(parse("false"), None);
  assert_eq!(
    parse(r#"{ "mangle": false }"#),
    Some(CompressOptions { mangle: false, ..CompressOptions::default() })
  );
}
