use std::path::Path;

use amdpack_error::AmdError;
use amdpack_fs::{FileCache, FileSystem};
use amdpack_utils::indexmap::FxIndexMap;
use arcstr::ArcStr;

#[derive(Debug)]
pub struct LoadedSource {
  pub source: ArcStr,
  pub is_virtual: bool,
  pub mtime: u128,
}

/// Reads `path` from disk, falling back to the inline sources registered under the same
/// normalized path. `Ok(None)` means neither knows the path.
pub fn load_source(
  fs: &dyn FileSystem,
  file_cache: &FileCache,
  inline_sources: &FxIndexMap<String, String>,
  path: &str,
) -> Result<Option<LoadedSource>, AmdError> {
  let file = Path::new(path);
  if fs.exists(file) {
    let source = file_cache.read_to_string(fs, file).map_err(|err| AmdError::io(file, err))?;
    let mtime = fs.modified_ms(file).map_err(|err| AmdError::io(file, err))?;
    return Ok(Some(LoadedSource { source, is_virtual: false, mtime }));
  }

  Ok(inline_sources.get(path).map(|source| LoadedSource {
    source: ArcStr::from(source.as_str()),
    is_virtual: true,
    mtime: 0,
  }))
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use amdpack_fs::{FileCache, FileSystem, OsFileSystem};
  use amdpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};

  use super::load_source;

  #[test]
  fn disk_wins_over_inline_sources() {
    let dir = tempfile::tempdir().unwrap();
    let on_disk = dir.path().join("a").join("B.js").to_normalized_slash();
    OsFileSystem.write(Path::new(&on_disk), b"define('a.B', [], function () {});").unwrap();

    let mut inline_sources = FxIndexMap::default();
    inline_sources.insert(on_disk.clone(), "ignored".to_string());
    let virtual_path = dir.path().join("a").join("C.js").to_normalized_slash();
    inline_sources.insert(virtual_path.clone(), "define('a.C', [], function () {});".to_string());

    let cache = FileCache::default();
    let loaded = load_source(&OsFileSystem, &cache, &inline_sources, &on_disk).unwrap().unwrap();
    assert!(!loaded.is_virtual);
    assert!(loaded.mtime > 0);
    assert!(loaded.source.starts_with("define('a.B'"));

    let loaded =
      load_source(&OsFileSystem, &cache, &inline_sources, &virtual_path).unwrap().unwrap();
    assert!(loaded.is_virtual);
    assert_eq!(loaded.mtime, 0);

    let missing = dir.path().join("a").join("D.js").to_normalized_slash();
    assert!(load_source(&OsFileSystem, &cache, &inline_sources, &missing).unwrap().is_none());
  }
}
