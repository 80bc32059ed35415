use std::borrow::Cow;

use oxc::syntax::identifier;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Turns an arbitrary module id into a string usable as a JS binding name by replacing every
/// character that can't appear in an identifier with `_`.
pub fn legitimize_identifier_name(name: &str) -> Cow<str> {
  if is_validate_identifier_name(name) {
    return Cow::Borrowed(name);
  }

  let mut legitimized = String::with_capacity(name.len() + 1);
  for (idx, char) in name.chars().enumerate() {
    let valid = if idx == 0 {
      identifier::is_identifier_start(char)
    } else {
      identifier::is_identifier_part(char)
    };
    if valid {
      legitimized.push(char);
    } else if idx == 0 && identifier::is_identifier_part(char) {
      legitimized.push('_');
      legitimized.push(char);
    } else {
      legitimized.push('_');
    }
  }

  if legitimized.is_empty() {
    legitimized.push('_');
  }

  Cow::Owned(legitimized)
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_legitimize_identifier_name() {
  assert_eq!(legitimize_identifier_name("foo"), "foo");
  assert_eq!(legitimize_identifier_name("tinymce.util.Tools"), "tinymce_util_Tools");
  assert_eq!(legitimize_identifier_name("ephox/katamari/Arr"), "ephox_katamari_Arr");
  assert_eq!(legitimize_identifier_name("1up"), "_1up");
  assert_eq!(legitimize_identifier_name(""), "_");
}
