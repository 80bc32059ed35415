/// Rewrites a module's source to record coverage when executed. Used by the coverage
/// target in place of the verbatim source.
pub trait CoverageInstrumenter {
  fn instrument(&self, source: &str, file_path: &str) -> anyhow::Result<String>;
}
