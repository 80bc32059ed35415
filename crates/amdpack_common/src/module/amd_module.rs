use arcstr::ArcStr;

/// One `define(id, deps, factory)` call found during discovery.
///
/// Created once when its declaration is extracted and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmdModule {
  pub id: ArcStr,
  /// Normalized, forward-slash path. For inline sources this is the key they were
  /// registered under.
  pub file_path: ArcStr,
  /// Source of the whole file after `@@token@@` substitution. Files with several `define`
  /// calls share the same source.
  pub source: ArcStr,
  pub deps: Vec<ArcStr>,
  pub is_public: bool,
  /// Loaded from `inlineSources` instead of a file on disk.
  pub is_virtual: bool,
  /// Milliseconds since the Unix epoch, `0` for virtual modules.
  pub mtime: u128,
}
