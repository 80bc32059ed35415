use std::path::PathBuf;

use amdpack_common::{LibraryOptions, NormalizedBundlerOptions};
use amdpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};
use arcstr::ArcStr;

const MODULE_EXTENSION: &str = ".js";

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
  pub base_dir: PathBuf,
  pub root_ns: Option<String>,
  pub libs: FxIndexMap<String, LibraryOptions>,
  pub module_overrides: FxIndexMap<String, PathBuf>,
}

impl From<&NormalizedBundlerOptions> for ResolveOptions {
  fn from(options: &NormalizedBundlerOptions) -> Self {
    Self {
      base_dir: options.base_dir.clone(),
      root_ns: options.root_ns.clone(),
      libs: options.libs.clone(),
      module_overrides: options.module_overrides.clone(),
    }
  }
}

/// Turns module ids such as `tinymce.util.Tools` or `ephox/katamari/Arr` into file paths.
///
/// Resolution is a pure function of the id and the options the resolver was created with.
#[derive(Debug)]
pub struct PathResolver {
  options: ResolveOptions,
}

impl PathResolver {
  pub fn new(options: ResolveOptions) -> Self {
    Self { options }
  }

  /// The library namespace owning `id`. The longest matching library name wins, so `a.b`
  /// shadows `a` for `a.b.C`.
  pub fn library_for(&self, id: &str) -> Option<(&str, &LibraryOptions)> {
    self
      .options
      .libs
      .iter()
      .filter(|(name, _)| is_in_namespace(id, name))
      .max_by_key(|(name, _)| name.len())
      .map(|(name, lib)| (name.as_str(), lib))
  }

  pub fn resolve(&self, id: &str) -> ArcStr {
    if let Some(path) = self.options.module_overrides.get(id) {
      return path.to_normalized_slash().into();
    }

    let (base_dir, root_ns) = match self.library_for(id) {
      Some((_, lib)) => (lib.base_dir.as_path(), lib.root_ns.as_deref()),
      None => (self.options.base_dir.as_path(), self.options.root_ns.as_deref()),
    };

    let relative = root_ns.and_then(|ns| strip_namespace(id, ns)).unwrap_or(id);
    let mut relative = relative.replace('.', "/");
    relative.push_str(MODULE_EXTENSION);

    base_dir.join(relative).to_normalized_slash().into()
  }

  /// Whether the module behind `id` should be inlined into the bundle. Ids outside of the
  /// root namespace are expected to be provided by something else at runtime.
  pub fn should_load(&self, id: &str) -> bool {
    if self.library_for(id).is_some() || self.options.module_overrides.contains_key(id) {
      return true;
    }

    self.options.root_ns.as_deref().is_none_or(|ns| is_in_namespace(id, ns))
  }
}

fn is_separator(char: char) -> bool {
  matches!(char, '.' | '/')
}

/// `id` is `namespace` itself or lives below it, compared on whole segments.
fn is_in_namespace(id: &str, namespace: &str) -> bool {
  id.strip_prefix(namespace)
    .is_some_and(|rest| rest.is_empty() || rest.starts_with(is_separator))
}

/// `tinymce.util.Tools` without `tinymce` is `util.Tools`.
fn strip_namespace<'a>(id: &'a str, namespace: &str) -> Option<&'a str> {
  id.strip_prefix(namespace)
    .and_then(|rest| rest.strip_prefix(is_separator))
    .filter(|rest| !rest.is_empty())
}
