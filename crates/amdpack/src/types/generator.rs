use std::path::Path;

use amdpack_common::{AmdModule, NormalizedBundlerOptions};
use amdpack_error::{AmdWarning, BuildResult};
use amdpack_utils::indexmap::FxIndexMap;
use rustc_hash::FxHashSet;

pub struct GenerateOutput {
  pub assets: Vec<amdpack_common::OutputAsset>,
  pub warnings: Vec<AmdWarning>,
}

/// What every target is rendered from.
pub struct GenerateContext<'a> {
  pub options: &'a NormalizedBundlerOptions,
  /// The full module list, one record per `define` call.
  pub modules: &'a [AmdModule],
  /// Modules grouped by the file declaring them, in first-seen order.
  pub files: FxIndexMap<&'a str, Vec<&'a AmdModule>>,
  /// Public modules without repeated ids.
  pub exposed: Vec<&'a AmdModule>,
  pub fingerprint: &'a str,
}

impl<'a> GenerateContext<'a> {
  pub fn new(
    options: &'a NormalizedBundlerOptions,
    modules: &'a [AmdModule],
    fingerprint: &'a str,
  ) -> Self {
    let mut files: FxIndexMap<&str, Vec<&AmdModule>> = FxIndexMap::default();
    for module in modules {
      files.entry(module.file_path.as_str()).or_default().push(module);
    }

    let mut exposed_ids = FxHashSet::default();
    let exposed = modules
      .iter()
      .filter(|module| module.is_public && exposed_ids.insert(module.id.as_str()))
      .collect();

    Self { options, modules, files, exposed, fingerprint }
  }

  /// Each file once, with the source its modules share.
  pub fn rendered_files(&self) -> impl Iterator<Item = RenderedFile<'_>> {
    self.files.iter().filter_map(|(path, modules)| {
      let first = modules.first()?;
      Some(RenderedFile {
        path: *path,
        source: first.source.as_str(),
        modules,
        is_virtual: first.is_virtual,
      })
    })
  }

  /// `(module, global name)` once per id mapped in `globalModules`. An id declared more than
  /// once is aliased through its last declaration, the one the loaders keep.
  pub fn global_aliases(&self) -> Vec<(&'a AmdModule, &'a str)> {
    let mut aliases: FxIndexMap<&str, (&AmdModule, &str)> = FxIndexMap::default();
    for module in self.modules {
      if let Some(global) = self.options.global_modules.get(module.id.as_str()) {
        aliases.insert(module.id.as_str(), (module, global.as_str()));
      }
    }
    aliases.into_values().collect()
  }
}

pub struct RenderedFile<'r> {
  pub path: &'r str,
  pub source: &'r str,
  pub modules: &'r [&'r AmdModule],
  pub is_virtual: bool,
}

/// Renders one output target.
pub trait Generator {
  fn render(&self, ctx: &GenerateContext, output: &Path) -> BuildResult<String>;
}
