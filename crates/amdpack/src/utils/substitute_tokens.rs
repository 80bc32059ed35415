use std::borrow::Cow;

/// Values for the `@@token@@` placeholders. Tokens without a value are left as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateTokens<'a> {
  pub version: Option<&'a str>,
  pub release_date: Option<&'a str>,
}

impl<'a> TemplateTokens<'a> {
  pub fn new(version: Option<&'a str>, release_date: Option<&'a str>) -> Self {
    Self { version, release_date }
  }

  /// `4` for `4.5.1`.
  pub fn major_version(&self) -> Option<&'a str> {
    self.version.map(|version| version.split_once('.').map_or(version, |(major, _)| major))
  }

  /// `5.1` for `4.5.1`, empty when the version has a single component.
  pub fn minor_version(&self) -> Option<&'a str> {
    self.version.map(|version| version.split_once('.').map_or("", |(_, minor)| minor))
  }

  pub fn substitute<'s>(&self, source: &'s str) -> Cow<'s, str> {
    if self.version.is_none() && self.release_date.is_none() {
      return Cow::Borrowed(source);
    }
    if memchr::memmem::find(source.as_bytes(), b"@@").is_none() {
      return Cow::Borrowed(source);
    }

    let replacements = [
      ("@@version@@", self.version),
      ("@@majorVersion@@", self.major_version()),
      ("@@minorVersion@@", self.minor_version()),
      ("@@releaseDate@@", self.release_date),
    ];

    let mut output = source.to_string();
    for (token, value) in replacements {
      if let Some(value) = value {
        if output.contains(token) {
          output = output.replace(token, value);
        }
      }
    }
    Cow::Owned(output)
  }
}

#[test]
fn substitutes_configured_tokens() {
  let tokens = TemplateTokens::new(Some("4.5.1"), Some("2016-12-07"));
  assert_eq!(
    tokens.substitute("v@@version@@ @@majorVersion@@/@@minorVersion@@ @@releaseDate@@"),
    "v4.5.1 4/5.1 2016-12-07"
  );
}

#[test]
fn leaves_unconfigured_tokens() {
  let tokens = TemplateTokens::new(Some("4"), None);
  assert_eq!(tokens.major_version(), Some("4"));
  assert_eq!(tokens.minor_version(), Some(""));
  assert_eq!(tokens.substitute("@@version@@ @@releaseDate@@"), "4 @@releaseDate@@");

  let source = "var a = '@@version@@';";
  assert!(matches!(TemplateTokens::default().substitute(source), Cow::Borrowed(_)));
}
