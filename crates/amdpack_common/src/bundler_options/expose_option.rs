use serde::{Deserialize, Serialize};

/// Which modules get published through the generated `expose([...])` call.
///
/// Written as `false`, `true`, `"public"` or a list of module ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExposeOption", into = "RawExposeOption")]
pub enum ExposeOption {
  Never,
  #[default]
  Always,
  /// Everything except modules whose `@class` doc comment is marked `@private`.
  Public,
  List(Vec<String>),
}

impl ExposeOption {
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "false" => Some(Self::Never),
      "true" => Some(Self::Always),
      "public" => Some(Self::Public),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawExposeOption {
  Bool(bool),
  Str(String),
  List(Vec<String>),
}

impl TryFrom<RawExposeOption> for ExposeOption {
  type Error = String;

  fn try_from(value: RawExposeOption) -> Result<Self, Self::Error> {
    match value {
      RawExposeOption::Bool(false) => Ok(Self::Never),
      RawExposeOption::Bool(true) => Ok(Self::Always),
      RawExposeOption::Str(value) if value == "public" => Ok(Self::Public),
      RawExposeOption::Str(value) => {
        Err(format!("expected `true`, `false`, \"public\" or a list of module ids, got {value:?}"))
      }
      RawExposeOption::List(ids) => Ok(Self::List(ids)),
    }
  }
}

impl From<ExposeOption> for RawExposeOption {
  fn from(value: ExposeOption) -> Self {
    match value {
      ExposeOption::Never => Self::Bool(false),
      ExposeOption::Always => Self::Bool(true),
      ExposeOption::Public => Self::Str("public".to_string()),
      ExposeOption::List(ids) => Self::List(ids),
    }
  }
}

#[test]
fn expose_option_from_json() {
  let parse = |json: &str| serde_json::from_str::<ExposeOption>(json);
  assert_eq!(parse("false").unwrap(), ExposeOption::Never);
  assert_eq!(parse("true").unwrap(), ExposeOption::Always);
  assert_eq!(parse(r#""public""#).unwrap(), ExposeOption::Public);
  assert_eq!(parse(r#"["a.B"]"#).unwrap(), ExposeOption::List(vec!["a.B".to_string()]));
  assert!(parse(r#""private""#).is_err());
  assert_eq!(serde_json::to_string(&ExposeOption::Public).unwrap(), r#""public""#);
}
