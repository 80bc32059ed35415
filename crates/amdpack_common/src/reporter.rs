use std::fmt::Display;

/// Leveled diagnostics sink shared by every stage of a build.
///
/// `fatal` is called at most once per build, right before the build returns its error.
pub trait Reporter {
  fn debug(&self, message: &dyn Display);
  fn info(&self, message: &dyn Display);
  fn warn(&self, message: &dyn Display);
  fn error(&self, message: &dyn Display);

  fn fatal(&self, message: &dyn Display) {
    self.error(message);
  }
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
  fn debug(&self, message: &dyn Display) {
    log::debug!("{message}");
  }

  fn info(&self, message: &dyn Display) {
    log::info!("{message}");
  }

  fn warn(&self, message: &dyn Display) {
    log::warn!("{message}");
  }

  fn error(&self, message: &dyn Display) {
    log::error!("{message}");
  }

  fn fatal(&self, message: &dyn Display) {
    log::error!("Fatal: {message}");
  }
}
