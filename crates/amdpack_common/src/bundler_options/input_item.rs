use serde::{Deserialize, Serialize};

/// Where discovery starts: a file path, a glob pattern, or a list of either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputItem {
  One(String),
  Many(Vec<String>),
}

impl InputItem {
  pub fn into_patterns(self) -> Vec<String> {
    match self {
      Self::One(pattern) => vec![pattern],
      Self::Many(patterns) => patterns,
    }
  }
}

impl From<&str> for InputItem {
  fn from(value: &str) -> Self {
    Self::One(value.to_string())
  }
}

impl From<Vec<String>> for InputItem {
  fn from(value: Vec<String>) -> Self {
    Self::Many(value)
  }
}
