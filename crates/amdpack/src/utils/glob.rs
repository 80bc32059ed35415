use std::path::{Path, PathBuf};

const GLOB_META_CHARS: [char; 4] = ['*', '?', '[', '{'];

pub fn is_glob_pattern(pattern: &str) -> bool {
  pattern.contains(GLOB_META_CHARS)
}

/// The longest leading run of path segments without glob syntax in them.
///
/// `src/js/**/*.js` starts at `src/js`. A pattern that is glob syntax from the first segment
/// on starts at the empty path.
pub fn static_base(pattern: &str) -> PathBuf {
  let mut base = PathBuf::new();
  let mut segments = pattern.split('/').peekable();
  while let Some(segment) = segments.next() {
    if is_glob_pattern(segment) || segments.peek().is_none() {
      break;
    }
    if segment.is_empty() && base.as_os_str().is_empty() {
      base.push("/");
    } else {
      base.push(segment);
    }
  }
  base
}

/// Directory the first entry lives in, used as the base directory when none is configured.
pub fn entry_dir(pattern: &str) -> PathBuf {
  if is_glob_pattern(pattern) {
    static_base(pattern)
  } else {
    Path::new(pattern).parent().map(Path::to_path_buf).unwrap_or_default()
  }
}

#[test]
fn glob_detection() {
  assert!(is_glob_pattern("src/**/*.js"));
  assert!(is_glob_pattern("src/[ab].js"));
  assert!(is_glob_pattern("src/{a,b}.js"));
  assert!(!is_glob_pattern("src/a/B.js"));
}

#[test]
fn static_base_of_patterns() {
  assert_eq!(static_base("/project/src/js/**/*.js"), PathBuf::from("/project/src/js"));
  assert_eq!(static_base("src/*.js"), PathBuf::from("src"));
  assert_eq!(static_base("*.js"), PathBuf::new());
  assert_eq!(entry_dir("/project/src/a/B.js"), PathBuf::from("/project/src/a"));
  assert_eq!(entry_dir("/project/src/a/*.js"), PathBuf::from("/project/src/a"));
}
