mod define_scanner;
mod module_loader;

use std::path::Path;

use amdpack_common::Reporter;
use amdpack_error::{AmdError, BuildResult};
use amdpack_fs::{FileCache, FileSystem};
use amdpack_resolver::PathResolver;
use amdpack_utils::path_ext::PathExt;

use crate::{
  types::{SharedOptions, module_graph::ModuleGraph},
  utils::glob::{is_glob_pattern, static_base},
};

use module_loader::ModuleLoader;

pub struct ScanStage<'a> {
  fs: &'a dyn FileSystem,
  file_cache: &'a FileCache,
  options: &'a SharedOptions,
  resolver: &'a PathResolver,
  reporter: &'a dyn Reporter,
}

impl<'a> ScanStage<'a> {
  pub fn new(
    fs: &'a dyn FileSystem,
    file_cache: &'a FileCache,
    options: &'a SharedOptions,
    resolver: &'a PathResolver,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self { fs, file_cache, options, resolver, reporter }
  }

  pub fn scan(&self) -> BuildResult<ModuleGraph> {
    let entries = self.expand_entries()?;

    let mut module_loader =
      ModuleLoader::new(self.fs, self.file_cache, self.options, self.resolver, self.reporter);
    for entry in &entries {
      module_loader.load_entry(entry)?;
    }
    module_loader.into_module_graph()
  }

  /// Glob patterns expand to the matching files in sorted order, anything else is taken as a
  /// path as it is.
  fn expand_entries(&self) -> BuildResult<Vec<String>> {
    let mut entries = Vec::with_capacity(self.options.input.len());
    for pattern in &self.options.input {
      if !is_glob_pattern(pattern) {
        entries.push(pattern.clone());
        continue;
      }

      let base = static_base(pattern);
      let files = self.fs.walk_files(&base).map_err(|err| AmdError::io(&base, err))?;
      let mut matched = files
        .iter()
        .map(|file| Path::new(file).to_normalized_slash())
        .filter(|file| fast_glob::glob_match(pattern, file))
        .collect::<Vec<_>>();
      matched.sort_unstable();

      if matched.is_empty() {
        self.reporter.debug(&format_args!("Pattern {pattern} matched no files"));
      }
      entries.extend(matched);
    }
    Ok(entries)
  }
}

#[cfg(test)]
mod tests {
  use std::{path::Path, sync::Arc};

  use amdpack_common::{BundlerOptions, LogReporter};
  use amdpack_error::{AmdError, AmdWarning};
  use amdpack_fs::{FileCache, FileSystem, OsFileSystem};
  use amdpack_resolver::PathResolver;

  use super::ScanStage;
  use crate::{
    types::module_graph::ModuleGraph,
    utils::normalize_options::{NormalizeOptionsReturn, normalize_options},
  };

  fn write(root: &Path, path: &str, source: &str) {
    OsFileSystem.write(&root.join(path), source.as_bytes()).unwrap();
  }

  fn scan(options: BundlerOptions) -> Result<ModuleGraph, amdpack_error::BuildError> {
    let NormalizeOptionsReturn { options, resolve_options } = normalize_options(options)?;
    let options = Arc::new(options);
    let resolver = PathResolver::new(resolve_options);
    let file_cache = FileCache::default();
    ScanStage::new(&OsFileSystem, &file_cache, &options, &resolver, &LogReporter).scan()
  }

  fn options(root: &Path, from: &str) -> BundlerOptions {
    BundlerOptions {
      cwd: Some(root.to_path_buf()),
      from: Some(from.into()),
      base_dir: Some(root.join("src")),
      ..Default::default()
    }
  }

  fn ids(graph: &ModuleGraph) -> Vec<&str> {
    graph.modules.iter().map(|module| module.id.as_str()).collect()
  }

  #[test]
  fn dependencies_come_first() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.B', 'a.C'], function (B, C) {});");
    write(dir.path(), "src/a/B.js", "define('a.B', ['a.C'], function (C) {});");
    write(dir.path(), "src/a/C.js", "define('a.C', [], function () {});");

    let graph = scan(options(dir.path(), "src/a/A.js")).unwrap();
    assert_eq!(ids(&graph), vec!["a.C", "a.B", "a.A"]);
    assert_eq!(graph.visited.len(), 3);
    assert!(graph.warnings.is_empty());
    assert!(graph.max_mtime > 0);
    assert!(graph.modules.iter().all(|module| !module.is_virtual && module.is_public));
  }

  #[test]
  fn one_record_per_file_for_overlapping_entries() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.C'], function (C) {});");
    write(dir.path(), "src/a/B.js", "define('a.B', ['a.C'], function (C) {});");
    write(dir.path(), "src/a/C.js", "define('a.C', [], function () {});");

    let graph = scan(options(dir.path(), "src/**/*.js")).unwrap();
    assert_eq!(ids(&graph), vec!["a.C", "a.A", "a.B"]);
  }

  #[test]
  fn missing_dependency_names_the_referrer() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.Missing'], function (M) {});");

    let err = scan(options(dir.path(), "src/a/A.js")).unwrap_err();
    match err.amd_error() {
      Some(AmdError::MissingFile { path, referrer }) => {
        assert!(path.ends_with("src/a/Missing.js"));
        assert!(referrer.as_deref().is_some_and(|referrer| referrer.ends_with("src/a/A.js")));
      }
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn nothing_discovered() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan(options(dir.path(), "src/**/*.js")).unwrap_err();
    assert!(matches!(err.amd_error(), Some(AmdError::NoModulesDiscovered)));
  }

  #[test]
  fn invalid_declaration() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define(id, [], function () {});");
    let err = scan(options(dir.path(), "src/a/A.js")).unwrap_err();
    assert!(matches!(err.amd_error(), Some(AmdError::DeclarationEvaluation { .. })));

    write(dir.path(), "src/a/A.js", "define('a.A', [], function () {");
    let err = scan(options(dir.path(), "src/a/A.js")).unwrap_err();
    assert!(matches!(err.amd_error(), Some(AmdError::DeclarationEvaluation { .. })));
  }

  #[test]
  fn cycles_are_tolerated_with_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.B'], function (B) {});");
    write(dir.path(), "src/a/B.js", "define('a.B', ['a.A'], function (A) {});");

    let graph = scan(options(dir.path(), "src/a/A.js")).unwrap();
    assert_eq!(ids(&graph), vec!["a.B", "a.A"]);
    assert!(matches!(
      graph.warnings.as_slice(),
      [AmdWarning::CircularDependency { path }] if path.ends_with("src/a/A.js")
    ));
  }

  #[test]
  fn self_references_are_kept_without_warning() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.A'], function (A) {});");

    let graph = scan(options(dir.path(), "src/a/A.js")).unwrap();
    assert_eq!(ids(&graph), vec!["a.A"]);
    assert_eq!(graph.modules[0].deps, vec!["a.A"]);
    assert!(graph.warnings.is_empty());
  }

  #[test]
  fn arity_and_duplicate_warnings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.B', 'a.C'], function (B) {});");
    write(dir.path(), "src/a/B.js", "define('a.B', [], function () {});");
    write(dir.path(), "src/a/C.js", "define('a.B', [], function () {});");

    let graph = scan(options(dir.path(), "src/a/A.js")).unwrap();
    assert_eq!(ids(&graph), vec!["a.B", "a.B", "a.A"]);
    assert!(graph.warnings.iter().any(|warning| matches!(
      warning,
      AmdWarning::ArityMismatch { id, deps: 2, params: 1, .. } if id == "a.A"
    )));
    assert!(graph.warnings.iter().any(|warning| matches!(
      warning,
      AmdWarning::DuplicateModuleId { id, .. } if id == "a.B"
    )));
  }

  #[test]
  fn several_declarations_in_one_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
      dir.path(),
      "src/a/A.js",
      "define('a.B', [], function () {});\ndefine('a.A', ['a.B'], function (B) {});",
    );
    write(dir.path(), "src/a/B.js", "define('a.B', [], function () { throw 'unused'; });");

    let mut options = options(dir.path(), "src/a/A.js");
    let mut overrides = amdpack_utils::indexmap::FxIndexMap::default();
    overrides.insert("a.B".to_string(), "src/a/A.js".to_string());
    options.module_overrides = Some(overrides);

    let graph = scan(options).unwrap();
    assert_eq!(ids(&graph), vec!["a.B", "a.A"]);
    assert!(graph.warnings.is_empty());
    assert_eq!(graph.modules[0].file_path, graph.modules[1].file_path);
  }

  #[test]
  fn ids_outside_the_root_namespace_are_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/A.js", "define('app.A', ['jquery.Core', 'app.B'], function ($, B) {});");
    write(dir.path(), "src/B.js", "define('app.B', [], function () {});");

    let mut options = options(dir.path(), "src/A.js");
    options.root_ns = Some("app".to_string());

    let graph = scan(options).unwrap();
    assert_eq!(ids(&graph), vec!["app.B", "app.A"]);
    assert_eq!(graph.modules[1].deps, vec!["jquery.Core", "app.B"]);
  }

  #[test]
  fn inline_sources_and_tokens() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/a/A.js", "define('a.A', ['a.V'], function (V) { return '@@version@@'; });");

    let mut options = options(dir.path(), "src/a/A.js");
    let mut inline_sources = amdpack_utils::indexmap::FxIndexMap::default();
    inline_sources
      .insert("src/a/V.js".to_string(), "define('a.V', [], function () {});".to_string());
    options.inline_sources = Some(inline_sources);
    options.version = Some("4.5.1".to_string());

    let graph = scan(options).unwrap();
    assert_eq!(ids(&graph), vec!["a.V", "a.A"]);
    assert!(graph.modules[0].is_virtual);
    assert_eq!(graph.modules[0].mtime, 0);
    assert!(graph.modules[1].source.contains("return '4.5.1';"));
  }
}
