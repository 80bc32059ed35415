use std::{
  fs, io,
  path::{Path, PathBuf},
  time::UNIX_EPOCH,
};

use walkdir::WalkDir;

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn exists(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn modified_ms(&self, path: &Path) -> io::Result<u128> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(modified.duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default())
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
  }

  fn walk_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
      return Ok(vec![]);
    }

    let mut files = vec![];
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
      let entry = entry.map_err(io::Error::from)?;
      if entry.file_type().is_file() {
        files.push(entry.into_path());
      }
    }
    Ok(files)
  }
}

#[test]
fn write_creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let target = dir.path().join("out").join("nested").join("bundle.js");

  OsFileSystem.write(&target, b"// bundle").unwrap();

  assert!(OsFileSystem.exists(&target));
  assert_eq!(OsFileSystem.read_to_string(&target).unwrap(), "// bundle");
  assert!(OsFileSystem.modified_ms(&target).unwrap() > 0);
}

#[test]
fn walk_files_is_recursive_and_sorted() {
  let dir = tempfile::tempdir().unwrap();
  OsFileSystem.write(&dir.path().join("b.js"), b"").unwrap();
  OsFileSystem.write(&dir.path().join("a").join("c.js"), b"").unwrap();

  let files = OsFileSystem.walk_files(dir.path()).unwrap();
  assert_eq!(files, vec![dir.path().join("a").join("c.js"), dir.path().join("b.js")]);

  assert!(OsFileSystem.walk_files(&dir.path().join("missing")).unwrap().is_empty());
}
