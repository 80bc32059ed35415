use std::{
  io,
  path::{Path, PathBuf},
};

/// The file system operations the bundler needs. Paths are passed through untouched,
/// callers are expected to hand in absolute paths.
pub trait FileSystem: Send + Sync {
  fn exists(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Last modification time in milliseconds since the Unix epoch.
  fn modified_ms(&self, path: &Path) -> io::Result<u128>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  /// Every file below `dir`, recursively. Directories that don't exist yield nothing.
  fn walk_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}
