use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ExposeOption;

/// A library namespace as configured under `libs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawLibraryOptions {
  pub base_dir: PathBuf,
  #[serde(rename = "rootNS")]
  pub root_ns: Option<String>,
  pub expose: Option<ExposeOption>,
}

/// Library namespace with `base_dir` made absolute. Modules below it resolve and expose
/// independently of the top level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOptions {
  pub base_dir: PathBuf,
  #[serde(rename = "rootNS")]
  pub root_ns: Option<String>,
  pub expose: ExposeOption,
}
