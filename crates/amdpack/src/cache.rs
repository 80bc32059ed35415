use amdpack_common::{AmdModule, NormalizedBundlerOptions};
use amdpack_error::{AmdError, BuildResult};
use amdpack_fs::FileSystem;
use memchr::memmem;
use sha2::{Digest, Sha256};

pub const HASH_MARKER: &str = "// $hash: ";

/// Whole-build cache keyed on the module set and the options.
///
/// The fingerprint of the last build is persisted as the trailing `// $hash: <hex>` line of
/// the development output. Any change invalidates every output.
pub struct BuildCache<'a> {
  fs: &'a dyn FileSystem,
  options: &'a NormalizedBundlerOptions,
}

impl<'a> BuildCache<'a> {
  pub fn new(fs: &'a dyn FileSystem, options: &'a NormalizedBundlerOptions) -> Self {
    Self { fs, options }
  }

  pub fn fingerprint(&self, modules: &[AmdModule]) -> BuildResult<String> {
    let mut hasher = Sha256::new();
    let mut mtime = itoa::Buffer::new();
    for module in modules {
      hasher.update(module.file_path.as_bytes());
      hasher.update(b"\0");
      hasher.update(mtime.format(module.mtime).as_bytes());
      hasher.update(b"\n");
    }
    let options = serde_json::to_vec(self.options).map_err(|err| AmdError::Config {
      message: format!("failed to serialize the options: {err}"),
    })?;
    hasher.update(&options);
    Ok(format!("{:x}", hasher.finalize()))
  }

  /// The fingerprint stored in the development output, if there is one.
  pub fn previous_fingerprint(&self) -> Option<String> {
    let output = self.options.output_dev.as_deref()?;
    if !self.fs.exists(output) {
      return None;
    }
    let content = self.fs.read_to_string(output).ok()?;
    read_hash_marker(&content).map(ToString::to_string)
  }

  pub fn should_rebuild(&self, fingerprint: &str) -> bool {
    if self.options.force {
      return true;
    }
    self.previous_fingerprint().is_none_or(|previous| previous != fingerprint)
  }
}

/// Finds `// $hash: <hex>` on the last non-empty line of `content`.
pub fn read_hash_marker(content: &str) -> Option<&str> {
  let tail = content.trim_end();
  let start = memmem::rfind(tail.as_bytes(), HASH_MARKER.as_bytes())?;
  let hash = &tail[start + HASH_MARKER.len()..];
  let is_hex = !hash.is_empty() && hash.bytes().all(|byte| byte.is_ascii_hexdigit());
  is_hex.then_some(hash)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use amdpack_common::{AmdModule, BundlerOptions};
  use amdpack_fs::{FileSystem, OsFileSystem};
  use arcstr::ArcStr;

  use super::{BuildCache, read_hash_marker};
  use crate::utils::normalize_options::normalize_options;

  fn module(path: &str, mtime: u128) -> AmdModule {
    AmdModule {
      id: ArcStr::from(path),
      file_path: ArcStr::from(path),
      source: ArcStr::default(),
      deps: vec![],
      is_public: true,
      is_virtual: false,
      mtime,
    }
  }

  #[test]
  fn hash_marker() {
    assert_eq!(read_hash_marker("a();\n// $hash: 0aF9\n"), Some("0aF9"));
    assert_eq!(read_hash_marker("// $hash: 01\na();"), None);
    assert_eq!(read_hash_marker("a();"), None);
    assert_eq!(read_hash_marker("// $hash: "), None);
  }

  #[test]
  fn fingerprint_follows_modules_and_options() {
    let dir = tempfile::tempdir().unwrap();
    let options = normalize_options(BundlerOptions {
      cwd: Some(dir.path().to_path_buf()),
      output_dev: Some(PathBuf::from("out/bundle.dev.js")),
      ..Default::default()
    })
    .unwrap()
    .options;
    let cache = BuildCache::new(&OsFileSystem, &options);

    let modules = vec![module("/a.js", 1), module("/b.js", 2)];
    let fingerprint = cache.fingerprint(&modules).unwrap();
    assert_eq!(fingerprint.len(), 64);
    assert_eq!(fingerprint, cache.fingerprint(&modules).unwrap());

    let touched = vec![module("/a.js", 1), module("/b.js", 3)];
    assert_ne!(fingerprint, cache.fingerprint(&touched).unwrap());

    assert!(cache.should_rebuild(&fingerprint));
    OsFileSystem
      .write(options.output_dev.as_deref().unwrap(), format!("x();\n// $hash: {fingerprint}").as_bytes())
      .unwrap();
    assert_eq!(cache.previous_fingerprint().as_deref(), Some(fingerprint.as_str()));
    assert!(!cache.should_rebuild(&fingerprint));
    assert!(cache.should_rebuild(&cache.fingerprint(&touched).unwrap()));

    let forced = normalize_options(BundlerOptions {
      cwd: Some(dir.path().to_path_buf()),
      output_dev: Some(PathBuf::from("out/bundle.dev.js")),
      force: Some(true),
      ..Default::default()
    })
    .unwrap()
    .options;
    let forced_cache = BuildCache::new(&OsFileSystem, &forced);
    let forced_fingerprint = forced_cache.fingerprint(&modules).unwrap();
    assert_eq!(fingerprint, forced_fingerprint);
    assert!(forced_cache.should_rebuild(&forced_fingerprint));
  }
}
