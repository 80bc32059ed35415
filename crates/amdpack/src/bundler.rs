use std::sync::Arc;

use amdpack_common::{
  BundlerOptions, CoverageInstrumenter, LogReporter, NormalizedBundlerOptions, Reporter,
};
use amdpack_error::{AmdError, BuildResult};
use amdpack_fs::{FileCache, FileSystem, OsFileSystem};
use amdpack_resolver::PathResolver;

use crate::{
  cache::BuildCache,
  generate_stage::GenerateStage,
  scan_stage::ScanStage,
  types::{SharedOptions, SharedResolver, bundle_output::BundleOutput},
  utils::normalize_options::{NormalizeOptionsReturn, normalize_options},
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) file_cache: FileCache,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  reporter: Box<dyn Reporter>,
  instrumenter: Option<Box<dyn CoverageInstrumenter>>,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    let NormalizeOptionsReturn { options, resolve_options } = normalize_options(options)?;

    Ok(Bundler {
      fs: OsFileSystem,
      file_cache: FileCache::default(),
      options: Arc::new(options),
      resolver: Arc::new(PathResolver::new(resolve_options)),
      reporter: Box::new(LogReporter),
      instrumenter: None,
    })
  }

  #[must_use]
  pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
    self.reporter = Box::new(reporter);
    self
  }

  /// Enables the `outputCoverage` target.
  #[must_use]
  pub fn with_coverage_instrumenter(
    mut self,
    instrumenter: impl CoverageInstrumenter + 'static,
  ) -> Self {
    self.instrumenter = Some(Box::new(instrumenter));
    self
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Builds every configured target without touching the disk.
  pub fn generate(&mut self) -> BuildResult<BundleOutput> {
    self.build(false)
  }

  /// Builds every configured target and writes it. Nothing is written unless every target
  /// was generated.
  pub fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build(true)
  }

  fn build(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    self.file_cache.clear();

    let ret = self.try_build(is_write);
    if let Err(errors) = &ret {
      self.reporter.fatal(errors);
    }
    ret
  }

  fn try_build(&self, is_write: bool) -> BuildResult<BundleOutput> {
    let reporter = self.reporter.as_ref();

    let graph =
      ScanStage::new(&self.fs, &self.file_cache, &self.options, &self.resolver, reporter).scan()?;

    reporter.debug(&format_args!(
      "Discovered {} modules in {} files",
      graph.modules.len(),
      graph.visited.len()
    ));
    if !self.options.has_any_output() {
      reporter.info(&"No output configured, only module discovery was run");
    }

    let cache = BuildCache::new(&self.fs, &self.options);
    let fingerprint = cache.fingerprint(&graph.modules)?;

    if !cache.should_rebuild(&fingerprint) {
      reporter.info(&"All outputs are up to date");
      return Ok(BundleOutput {
        assets: vec![],
        warnings: graph.warnings,
        modules: graph.modules,
        fingerprint,
        skipped: true,
        max_mtime: graph.max_mtime,
      });
    }

    let output = GenerateStage::new(
      &graph,
      &self.options,
      &fingerprint,
      self.instrumenter.as_deref(),
      reporter,
    )
    .generate()?;

    if is_write {
      for asset in &output.assets {
        self
          .fs
          .write(&asset.path, asset.content_as_bytes())
          .map_err(|err| AmdError::io(&asset.path, err))?;
        reporter.info(&format_args!("Wrote {} version to {}", asset.kind, asset.path.display()));
      }
    }

    let mut warnings = graph.warnings;
    warnings.extend(output.warnings);

    Ok(BundleOutput {
      assets: output.assets,
      warnings,
      modules: graph.modules,
      fingerprint,
      skipped: false,
      max_mtime: graph.max_mtime,
    })
  }
}
