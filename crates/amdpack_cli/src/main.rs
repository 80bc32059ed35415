mod args;
mod types;

use std::{process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{InputArgs, OutputArgs, TransformArgs, to_bundler_options};
use clap::Parser;
use log::{debug, error, info};
use types::log_args::LogArgs;

use amdpack::{Bundler, OutputAsset};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  transform: TransformArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  log: LogArgs,
}

fn print_output_assets(outputs: &[OutputAsset]) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);
    let path = output.path.display().to_string();

    right = right.max(size.len());
    left = left.max(path.len());

    assets.push((path, output.kind, size));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (path, kind, size) in assets {
    let path_len = path.len();
    let kind = kind.to_string();

    println!(
      "{}{:left$} {}{:kind_width$}{}{:right$}{} kB",
      color.paint(path),
      "",
      dim.paint(kind.as_str()),
      "",
      dim.paint(" │ size: "),
      "",
      size,
      left = left - path_len,
      kind_width = "development".len() - kind.len(),
      right = right - size.len()
    );
  }
}

fn main() -> ExitCode {
  let args = Commands::parse();

  env_logger::Builder::new().filter_level(args.log.level()).parse_default_env().init();
  let silent = args.log.silent;

  let options = match to_bundler_options(args.input, args.transform, args.output) {
    Ok(options) => options,
    Err(err) => {
      error!("{err:#}");
      return ExitCode::FAILURE;
    }
  };
  debug!("Options: {options:?}");

  let mut bundler = match Bundler::new(options) {
    Ok(bundler) => bundler,
    Err(err) => {
      error!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let start = Instant::now();
  // Failures are reported by the bundler itself.
  let Ok(output) = bundler.write() else {
    return ExitCode::FAILURE;
  };

  if !silent && !output.skipped {
    print_output_assets(&output.assets);
    info!(
      "{} {} modules in {} ms",
      Colour::Green.paint("Bundled"),
      output.modules.len(),
      start.elapsed().as_millis()
    );
  }

  if !output.warnings.is_empty() {
    info!("{}", Colour::Yellow.paint(format!("{} warnings", output.warnings.len())));
  }
  ExitCode::SUCCESS
}
