use amdpack_common::AmdModule;
use amdpack_error::AmdWarning;
use amdpack_utils::indexmap::FxIndexSet;
use arcstr::ArcStr;

/// Output of discovery. `modules` is in definition-completion order: every module comes
/// after the modules it depends on, except where a cycle made that impossible.
#[derive(Debug, Default)]
pub struct ModuleGraph {
  pub modules: Vec<AmdModule>,
  /// Every path discovery looked at, in the order it got to them.
  pub visited: FxIndexSet<ArcStr>,
  pub max_mtime: u128,
  pub warnings: Vec<AmdWarning>,
}
