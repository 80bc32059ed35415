use std::{io, path::PathBuf};

/// Fatal conditions. Any of these aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum AmdError {
  #[error("Could not find {}{}.", .path, .referrer.as_ref().map(|r| format!(" (required by {r})")).unwrap_or_default())]
  MissingFile { path: String, referrer: Option<String> },

  #[error("Failed to evaluate module declarations in {path}: {message}")]
  DeclarationEvaluation { path: String, message: String },

  #[error("No input files found.")]
  NoModulesDiscovered,

  #[error("Failed to access {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Invalid loader template {name}: {message}")]
  Template { name: &'static str, message: String },

  #[error("Invalid options: {message}")]
  Config { message: String },
}

impl AmdError {
  pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  pub fn declaration(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self::DeclarationEvaluation { path: path.into(), message: message.into() }
  }
}

#[test]
fn missing_file_message() {
  let err = AmdError::MissingFile { path: "src/a/B.js".into(), referrer: None };
  assert_eq!(err.to_string(), "Could not find src/a/B.js.");

  let err =
    AmdError::MissingFile { path: "src/a/B.js".into(), referrer: Some("src/a/C.js".into()) };
  assert_eq!(err.to_string(), "Could not find src/a/B.js (required by src/a/C.js).");
}
