use std::path::{Path, PathBuf};

use amdpack_common::{
  BundlerOptions, CompressOptions, LibraryOptions, NormalizedBundlerOptions, RawCompressOptions,
};
use amdpack_error::{AmdError, BuildResult};
use amdpack_resolver::ResolveOptions;
use amdpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};
use sugar_path::SugarPath;

use super::glob::entry_dir;

pub struct NormalizeOptionsReturn {
  pub options: NormalizedBundlerOptions,
  pub resolve_options: ResolveOptions,
}

pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizeOptionsReturn> {
  let cwd = match raw_options.cwd {
    Some(cwd) if cwd.is_absolute() => cwd.normalize(),
    Some(cwd) => current_dir()?.join(cwd).normalize(),
    None => current_dir()?,
  };

  let input = raw_options
    .from
    .map(|from| {
      from.into_patterns().iter().map(|pattern| resolve_pattern(&cwd, pattern)).collect::<Vec<_>>()
    })
    .unwrap_or_default();

  let base_dir = match raw_options.base_dir {
    Some(base_dir) => resolve_path(&cwd, &base_dir),
    None => input.first().map_or_else(|| cwd.clone(), |entry| entry_dir(entry)),
  };

  let root_ns = raw_options.root_ns.filter(|ns| !ns.is_empty());
  let expose = raw_options.expose.unwrap_or_default();

  let mut libs = FxIndexMap::default();
  for (name, lib) in raw_options.libs.unwrap_or_default() {
    if name.is_empty() {
      Err(AmdError::Config { message: "library namespaces must not be empty".to_string() })?;
    }
    let lib = LibraryOptions {
      base_dir: resolve_path(&cwd, &lib.base_dir),
      root_ns: lib.root_ns.filter(|ns| !ns.is_empty()),
      expose: lib.expose.unwrap_or_else(|| expose.clone()),
    };
    libs.insert(name, lib);
  }

  let module_overrides = raw_options
    .module_overrides
    .unwrap_or_default()
    .into_iter()
    .map(|(id, path)| (id, resolve_path(&cwd, Path::new(&path))))
    .collect::<FxIndexMap<_, _>>();

  let inline_sources = raw_options
    .inline_sources
    .unwrap_or_default()
    .into_iter()
    .map(|(path, source)| (resolve_pattern(&cwd, &path), source))
    .collect::<FxIndexMap<_, _>>();

  let options = NormalizedBundlerOptions {
    input,
    base_dir,
    root_ns,
    libs,
    module_overrides,
    inline_sources,
    compress: raw_options
      .compress
      .map_or_else(|| Some(CompressOptions::default()), RawCompressOptions::normalize),
    compress_module_ids: raw_options.compress_module_ids.unwrap_or(true),
    expose,
    version: raw_options.version,
    release_date: raw_options.release_date,
    global_modules: raw_options.global_modules.unwrap_or_default(),
    output_source: raw_options.output_source.map(|path| resolve_path(&cwd, &path)),
    output_minified: raw_options.output_minified.map(|path| resolve_path(&cwd, &path)),
    output_dev: raw_options.output_dev.map(|path| resolve_path(&cwd, &path)),
    output_coverage: raw_options.output_coverage.map(|path| resolve_path(&cwd, &path)),
    force: raw_options.force.unwrap_or(false),
    hash: raw_options.hash.unwrap_or(true),
    cwd,
  };

  validate_outputs(&options)?;

  let resolve_options = ResolveOptions::from(&options);
  Ok(NormalizeOptionsReturn { options, resolve_options })
}

fn current_dir() -> BuildResult<PathBuf> {
  std::env::current_dir()
    .map_err(|err| AmdError::Config { message: format!("cannot read the current directory: {err}") })
    .map_err(Into::into)
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() { path.normalize() } else { cwd.join(path).normalize() }
}

/// Entry patterns and inline source keys are compared as forward-slash strings.
fn resolve_pattern(cwd: &Path, pattern: &str) -> String {
  resolve_path(cwd, Path::new(pattern)).to_normalized_slash()
}

fn validate_outputs(options: &NormalizedBundlerOptions) -> BuildResult<()> {
  let outputs = [
    &options.output_source,
    &options.output_minified,
    &options.output_dev,
    &options.output_coverage,
  ];
  let outputs = outputs.iter().filter_map(|output| output.as_deref()).collect::<Vec<_>>();
  for (idx, output) in outputs.iter().enumerate() {
    if outputs[..idx].contains(output) {
      Err(AmdError::Config {
        message: format!("{} is configured as more than one output", output.display()),
      })?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use amdpack_common::{BundlerOptions, CompressOptions, ExposeOption, RawLibraryOptions};
  use amdpack_error::AmdError;
  use amdpack_utils::indexmap::FxIndexMap;

  use super::normalize_options;

  fn options() -> BundlerOptions {
    BundlerOptions { cwd: Some(PathBuf::from("/project")), ..Default::default() }
  }

  #[test]
  fn defaults() {
    let ret = normalize_options(BundlerOptions {
      from: Some("src/js/tinymce/Editor.js".into()),
      ..options()
    })
    .unwrap();
    let options = ret.options;

    assert_eq!(options.input, vec!["/project/src/js/tinymce/Editor.js".to_string()]);
    assert_eq!(options.base_dir, PathBuf::from("/project/src/js/tinymce"));
    assert_eq!(options.compress, Some(CompressOptions::default()));
    assert_eq!(options.expose, ExposeOption::Always);
    assert!(options.hash);
    assert!(options.compress_module_ids);
    assert!(!options.force);
    assert!(!options.has_any_output());
  }

  #[test]
  fn paths_are_resolved_against_cwd() {
    let mut libs = FxIndexMap::default();
    libs.insert(
      "ephox".to_string(),
      RawLibraryOptions { base_dir: PathBuf::from("lib/../vendor/ephox"), ..Default::default() },
    );
    let mut module_overrides = FxIndexMap::default();
    module_overrides.insert("tinymce.Env".to_string(), "shims/Env.js".to_string());

    let ret = normalize_options(BundlerOptions {
      from: Some("src/**/*.js".into()),
      base_dir: Some(PathBuf::from("src")),
      expose: Some(ExposeOption::Public),
      libs: Some(libs),
      module_overrides: Some(module_overrides),
      output_dev: Some(PathBuf::from("dist/tinymce.dev.js")),
      compress: Some(amdpack_common::RawCompressOptions::Enabled(false)),
      ..options()
    })
    .unwrap();
    let options = ret.options;

    assert_eq!(options.base_dir, PathBuf::from("/project/src"));
    assert_eq!(options.libs["ephox"].base_dir, PathBuf::from("/project/vendor/ephox"));
    assert_eq!(options.libs["ephox"].expose, ExposeOption::Public);
    assert_eq!(options.module_overrides["tinymce.Env"], PathBuf::from("/project/shims/Env.js"));
    assert_eq!(options.output_dev, Some(PathBuf::from("/project/dist/tinymce.dev.js")));
    assert_eq!(options.compress, None);
    assert_eq!(ret.resolve_options.base_dir, PathBuf::from("/project/src"));
  }

  #[test]
  fn glob_entry_defines_base_dir() {
    let ret =
      normalize_options(BundlerOptions { from: Some("src/js/**/*.js".into()), ..options() })
        .unwrap();
    assert_eq!(ret.options.base_dir, PathBuf::from("/project/src/js"));
  }

  #[test]
  fn same_output_twice_is_rejected() {
    let Err(err) = normalize_options(BundlerOptions {
      output_source: Some(PathBuf::from("out/a.js")),
      output_minified: Some(PathBuf::from("out/./a.js")),
      ..options()
    }) else {
      panic!("expected an error");
    };
    assert!(matches!(err.amd_error(), Some(AmdError::Config { .. })));
  }
}
