use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
  Source,
  Minified,
  Development,
  Coverage,
}

impl fmt::Display for OutputKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Source => "source",
      Self::Minified => "minified",
      Self::Development => "development",
      Self::Coverage => "coverage",
    })
  }
}

#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub kind: OutputKind,
  pub path: PathBuf,
  pub content: String,
}

impl OutputAsset {
  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}
