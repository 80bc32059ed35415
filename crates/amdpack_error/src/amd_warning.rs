/// Non-fatal conditions, reported while the build carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmdWarning {
  #[error("Module {id} in {path} declares {deps} dependencies but its factory takes {params} parameters")]
  ArityMismatch { id: String, path: String, deps: usize, params: usize },

  #[error("Module {id} is declared in both {first} and {second}, the last definition wins")]
  DuplicateModuleId { id: String, first: String, second: String },

  #[error("Circular dependency detected while loading {path}, module order is not guaranteed")]
  CircularDependency { path: String },

  #[error("No coverage instrumenter registered, skipped {output}")]
  MissingInstrumenter { output: String },
}
