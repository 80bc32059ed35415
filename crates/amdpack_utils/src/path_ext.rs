use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  /// Normalized, forward-slash form of the path.
  fn to_normalized_slash(&self) -> String;

  /// Forward-slash path of `self` relative to the directory `base`.
  fn relative_slash(&self, base: &Path) -> String;
}

impl PathExt for Path {
  fn to_normalized_slash(&self) -> String {
    let normalized = self.normalize();
    normalized.to_slash_lossy().into_owned()
  }

  fn relative_slash(&self, base: &Path) -> String {
    self.absolutize().relative(base.absolutize()).to_slash_lossy().into_owned()
  }
}

#[test]
fn test_to_normalized_slash() {
  let path = Path::new("/project").join("src").join(".").join("a").join("..").join("B.js");
  assert_eq!(path.to_normalized_slash(), "/project/src/B.js");
}

#[test]
fn test_relative_slash() {
  let module = Path::new("/project/src/a/B.js");
  assert_eq!(module.relative_slash(Path::new("/project/dist")), "../src/a/B.js");
  assert_eq!(module.relative_slash(Path::new("/project/src")), "a/B.js");
}
