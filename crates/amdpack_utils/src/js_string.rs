/// Escapes `source` so it can be placed between single quotes in a JS string literal.
///
/// Reverse with [`unescape_single_quoted`].
pub fn escape_single_quoted(source: &str) -> String {
  let mut escaped = String::with_capacity(source.len() + source.len() / 8);
  for char in source.chars() {
    match char {
      '\\' => escaped.push_str("\\\\"),
      '\'' => escaped.push_str("\\'"),
      '"' => escaped.push_str("\\\""),
      '^' => escaped.push_str("\\^"),
      '\n' => escaped.push_str("\\n"),
      '\t' => escaped.push_str("\\t"),
      '\r' => escaped.push_str("\\r"),
      _ => escaped.push(char),
    }
  }
  escaped
}

pub fn unescape_single_quoted(escaped: &str) -> String {
  let mut source = String::with_capacity(escaped.len());
  let mut chars = escaped.chars();
  while let Some(char) = chars.next() {
    if char != '\\' {
      source.push(char);
      continue;
    }
    match chars.next() {
      Some('n') => source.push('\n'),
      Some('t') => source.push('\t'),
      Some('r') => source.push('\r'),
      Some(other) => source.push(other),
      None => source.push('\\'),
    }
  }
  source
}

/// Replaces every character outside printable ASCII with a `\uXXXX` escape. Valid inside
/// string literals, template literals, regular expressions, identifiers and comments.
pub fn to_ascii_only(code: &str) -> String {
  if code.bytes().all(|byte| byte.is_ascii_graphic() || matches!(byte, b' ' | b'\n' | b'\t' | b'\r'))
  {
    return code.to_string();
  }

  let mut ascii = String::with_capacity(code.len() + 16);
  for char in code.chars() {
    if char.is_ascii_graphic() || matches!(char, ' ' | '\n' | '\t' | '\r') {
      ascii.push(char);
      continue;
    }
    let mut units = [0u16; 2];
    for unit in char.encode_utf16(&mut units) {
      ascii.push_str(&format!("\\u{unit:04x}"));
    }
  }
  ascii
}

#[test]
fn escape_round_trip() {
  let source = "var a = 'x\\y';\n\tdefine(\"a\", [], function () { return a ^ 1; });\r\n";
  let escaped = escape_single_quoted(source);
  assert!(!escaped.contains('\n'));
  assert!(!escaped.contains('\t'));
  assert_eq!(unescape_single_quoted(&escaped), source);
}

#[test]
fn escape_known_sequences() {
  assert_eq!(escape_single_quoted("a\\b'c\nd"), "a\\\\b\\'c\\nd");
  assert_eq!(escape_single_quoted("^"), "\\^");
}

#[test]
fn ascii_only() {
  assert_eq!(to_ascii_only("var a = 1;"), "var a = 1;");
  assert_eq!(to_ascii_only("\"é\""), "\"\\u00e9\"");
  assert_eq!(to_ascii_only("'😈'"), "'\\ud83d\\ude08'");
  assert_eq!(to_ascii_only("a\u{7f}"), "a\\u007f");
}
