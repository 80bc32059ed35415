use std::borrow::Cow;

use amdpack_common::{AmdModule, Reporter};
use amdpack_ecmascript::EcmaCompiler;
use amdpack_error::{AmdError, AmdWarning, BuildResult};
use amdpack_fs::{FileCache, FileSystem};
use amdpack_resolver::PathResolver;
use amdpack_utils::indexmap::FxIndexSet;
use arcstr::ArcStr;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
  exposure::ExposurePolicy,
  types::{SharedOptions, module_graph::ModuleGraph},
  utils::{load_source::load_source, substitute_tokens::TemplateTokens},
};

use super::define_scanner::{DefineDeclaration, scan_defines};

/// Depth-first discovery of every module reachable from the entries.
///
/// A path is marked visited before its dependencies are loaded, so each file is parsed at
/// most once per build. Modules are recorded once all of their dependencies are.
pub struct ModuleLoader<'a> {
  fs: &'a dyn FileSystem,
  file_cache: &'a FileCache,
  options: &'a SharedOptions,
  resolver: &'a PathResolver,
  reporter: &'a dyn Reporter,
  exposure: ExposurePolicy<'a>,
  tokens: TemplateTokens<'a>,
  visited: FxIndexSet<ArcStr>,
  /// Paths on the current recursion stack.
  loading: FxHashSet<ArcStr>,
  /// Module id to the path that declared it first.
  declared_in: FxHashMap<ArcStr, ArcStr>,
  modules: Vec<AmdModule>,
  warnings: Vec<AmdWarning>,
  max_mtime: u128,
}

impl<'a> ModuleLoader<'a> {
  pub fn new(
    fs: &'a dyn FileSystem,
    file_cache: &'a FileCache,
    options: &'a SharedOptions,
    resolver: &'a PathResolver,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self {
      fs,
      file_cache,
      options,
      resolver,
      reporter,
      exposure: ExposurePolicy::new(options, resolver),
      tokens: TemplateTokens::new(options.version.as_deref(), options.release_date.as_deref()),
      visited: FxIndexSet::default(),
      loading: FxHashSet::default(),
      declared_in: FxHashMap::default(),
      modules: vec![],
      warnings: vec![],
      max_mtime: 0,
    }
  }

  pub fn load_entry(&mut self, path: &str) -> BuildResult<()> {
    self.load_file(ArcStr::from(path), None)
  }

  pub fn into_module_graph(self) -> BuildResult<ModuleGraph> {
    if self.modules.is_empty() {
      Err(AmdError::NoModulesDiscovered)?;
    }

    Ok(ModuleGraph {
      modules: self.modules,
      visited: self.visited,
      max_mtime: self.max_mtime,
      warnings: self.warnings,
    })
  }

  fn load_file(&mut self, path: ArcStr, referrer: Option<&ArcStr>) -> BuildResult<()> {
    if !self.visited.insert(path.clone()) {
      return Ok(());
    }
    self.loading.insert(path.clone());

    let Some(loaded) =
      load_source(self.fs, self.file_cache, &self.options.inline_sources, &path)?
    else {
      return Err(
        AmdError::MissingFile {
          path: path.to_string(),
          referrer: referrer.map(ToString::to_string),
        }
        .into(),
      );
    };

    self.reporter.debug(&format_args!("Parsing module file: {path}"));
    self.max_mtime = self.max_mtime.max(loaded.mtime);

    let source = match self.tokens.substitute(&loaded.source) {
      Cow::Borrowed(_) => loaded.source.clone(),
      Cow::Owned(substituted) => ArcStr::from(substituted),
    };

    let declarations = {
      let ast = EcmaCompiler::parse(source.clone(), EcmaCompiler::script_source_type())
        .map_err(|err| AmdError::declaration(path.as_str(), err.to_string()))?;
      scan_defines(ast.program()).map_err(|message| AmdError::declaration(path.as_str(), message))?
    };

    for declaration in declarations {
      self.load_declaration(declaration, &path, &source, loaded.is_virtual, loaded.mtime)?;
    }

    self.loading.remove(&path);
    Ok(())
  }

  fn load_declaration(
    &mut self,
    declaration: DefineDeclaration,
    path: &ArcStr,
    source: &ArcStr,
    is_virtual: bool,
    mtime: u128,
  ) -> BuildResult<()> {
    let DefineDeclaration { id, deps, params } = declaration;

    if deps.len() != params {
      self.warn(AmdWarning::ArityMismatch {
        id: id.clone(),
        path: path.to_string(),
        deps: deps.len(),
        params,
      });
    }

    for dep in &deps {
      if *dep == id || !self.resolver.should_load(dep) {
        continue;
      }

      let dep_path = self.resolver.resolve(dep);
      if self.loading.contains(&dep_path) {
        // A module of this file depending on one declared earlier in the same file.
        let declared_here = self.declared_in.get(dep.as_str()).is_some_and(|file| *file == dep_path);
        if !declared_here {
          self.warn(AmdWarning::CircularDependency { path: dep_path.to_string() });
        }
        continue;
      }

      self.load_file(dep_path, Some(path))?;
    }

    let id = ArcStr::from(id);
    match self.declared_in.get(&id) {
      Some(first) if first != path => {
        let warning = AmdWarning::DuplicateModuleId {
          id: id.to_string(),
          first: first.to_string(),
          second: path.to_string(),
        };
        self.warn(warning);
      }
      Some(_) => {}
      None => {
        self.declared_in.insert(id.clone(), path.clone());
      }
    }

    let is_public = self.exposure.is_public(&id, source);
    self.modules.push(AmdModule {
      id,
      file_path: path.clone(),
      source: source.clone(),
      deps: deps.into_iter().map(ArcStr::from).collect(),
      is_public,
      is_virtual,
      mtime,
    });
    Ok(())
  }

  fn warn(&mut self, warning: AmdWarning) {
    self.reporter.warn(&warning);
    self.warnings.push(warning);
  }
}
