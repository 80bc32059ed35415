use clap::Args;
use log::LevelFilter;

#[derive(Args)]
pub struct LogArgs {
  /// More output per occurrence, `-vv` includes trace logs.
  #[clap(long, short, action = clap::ArgAction::Count, conflicts_with = "silent")]
  pub verbose: u8,

  /// Only report errors.
  #[clap(long, short)]
  pub silent: bool,
}

impl LogArgs {
  pub fn level(&self) -> LevelFilter {
    if self.silent {
      return LevelFilter::Error;
    }
    match self.verbose {
      0 => LevelFilter::Info,
      1 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  }
}
