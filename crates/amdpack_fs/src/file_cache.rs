use std::{
  cell::RefCell,
  io,
  path::{Path, PathBuf},
};

use arcstr::ArcStr;
use rustc_hash::FxHashMap;

use crate::FileSystem;

/// Read-through cache of file contents keyed by path.
///
/// Lives for exactly one build: the owner calls [`FileCache::clear`] before discovery starts,
/// so edits made between two builds are always observed.
#[derive(Debug, Default)]
pub struct FileCache {
  contents: RefCell<FxHashMap<PathBuf, ArcStr>>,
}

impl FileCache {
  pub fn read_to_string(&self, fs: &dyn FileSystem, path: &Path) -> io::Result<ArcStr> {
    if let Some(content) = self.contents.borrow().get(path) {
      return Ok(ArcStr::clone(content));
    }

    let content = ArcStr::from(fs.read_to_string(path)?);
    self.contents.borrow_mut().insert(path.to_path_buf(), ArcStr::clone(&content));
    Ok(content)
  }

  pub fn len(&self) -> usize {
    self.contents.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.contents.borrow().is_empty()
  }

  pub fn clear(&mut self) {
    self.contents.get_mut().clear();
  }
}

#[cfg(feature = "os")]
#[test]
fn cached_until_cleared() {
  use crate::OsFileSystem;

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("a.js");
  std::fs::write(&path, "first").unwrap();

  let mut cache = FileCache::default();
  assert_eq!(cache.read_to_string(&OsFileSystem, &path).unwrap(), "first");

  std::fs::write(&path, "second").unwrap();
  assert_eq!(cache.read_to_string(&OsFileSystem, &path).unwrap(), "first");
  assert_eq!(cache.len(), 1);

  cache.clear();
  assert!(cache.is_empty());
  assert_eq!(cache.read_to_string(&OsFileSystem, &path).unwrap(), "second");
}
