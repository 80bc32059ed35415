mod amd_error;
mod amd_warning;

use std::{
  fmt,
  ops::{Deref, DerefMut},
};

pub use crate::{amd_error::AmdError, amd_warning::AmdWarning};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns the first error that downcasts to [`AmdError`].
  pub fn amd_error(&self) -> Option<&AmdError> {
    self.0.iter().find_map(|error| error.downcast_ref::<AmdError>())
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<AmdError> for BuildError {
  fn from(error: AmdError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn amd_error_is_recovered_from_build_error() {
  let error = BuildError::from(AmdError::NoModulesDiscovered);
  assert!(matches!(error.amd_error(), Some(AmdError::NoModulesDiscovered)));

  let error = BuildError::from(anyhow::anyhow!("plain"));
  assert!(error.amd_error().is_none());
}
