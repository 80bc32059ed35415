use std::path::{Path, PathBuf};

use amdpack::{BundlerOptions, ExposeOption, InputItem, RawCompressOptions};
use clap::Args;

use crate::types::expose_arg::parse_expose_arg;

#[derive(Args)]
pub struct InputArgs {
  /// Entry files or glob patterns.
  pub inputs: Vec<String>,

  /// JSON file with bundler options. Command line flags take precedence.
  #[clap(long, short)]
  pub config: Option<PathBuf>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long)]
  pub base_dir: Option<PathBuf>,

  #[clap(long = "root-ns")]
  pub root_ns: Option<String>,
}

#[derive(Args)]
pub struct TransformArgs {
  #[clap(long, value_parser = parse_expose_arg)]
  pub expose: Option<ExposeOption>,

  /// Print the minified bundle readable.
  #[clap(long)]
  pub no_compress: bool,

  /// Substituted for `@@version@@` and printed in the banner.
  #[clap(long)]
  pub version_string: Option<String>,

  #[clap(long)]
  pub release_date: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Path of the readable bundle. `<output>.min.js` and `<output>.dev.js` are written next
  /// to it.
  #[clap(long, short = 'o')]
  pub output: Option<PathBuf>,

  /// Skip `<output>.min.js`.
  #[clap(long, requires = "output")]
  pub no_minified: bool,

  /// Skip `<output>.dev.js`.
  #[clap(long, requires = "output")]
  pub no_dev: bool,

  /// Rebuild even when no input changed.
  #[clap(long, short)]
  pub force: bool,

  /// Leave the fingerprint out of the development bundle.
  #[clap(long)]
  pub no_hash: bool,
}

/// `out/tinymce.js` with suffix `min` is `out/tinymce.min.js`.
pub fn sibling_output(output: &Path, suffix: &str) -> PathBuf {
  let stem = output.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
  output.with_file_name(format!("{stem}.{suffix}.js"))
}

pub fn to_bundler_options(
  input: InputArgs,
  transform: TransformArgs,
  output: OutputArgs,
) -> anyhow::Result<BundlerOptions> {
  let from_file = match &input.config {
    Some(path) => {
      let json = std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("Failed to read {}: {err}", path.display()))?;
      BundlerOptions::from_json(&json)?
    }
    None => BundlerOptions::default(),
  };

  let from = match input.inputs.len() {
    0 => None,
    1 => input.inputs.into_iter().next().map(InputItem::One),
    _ => Some(InputItem::Many(input.inputs)),
  };

  let derived = |enabled: bool, suffix: &str| {
    output.output.as_deref().filter(|_| enabled).map(|path| sibling_output(path, suffix))
  };

  let from_args = BundlerOptions {
    from,
    cwd: input.cwd,
    base_dir: input.base_dir,
    root_ns: input.root_ns,
    compress: transform.no_compress.then_some(RawCompressOptions::Enabled(false)),
    expose: transform.expose,
    version: transform.version_string,
    release_date: transform.release_date,
    output_minified: derived(!output.no_minified, "min"),
    output_dev: derived(!output.no_dev, "dev"),
    output_source: output.output,
    force: output.force.then_some(true),
    hash: output.no_hash.then_some(false),
    ..Default::default()
  };

  Ok(from_file.merge(from_args))
}

#[test]
fn sibling_outputs() {
  assert_eq!(sibling_output(Path::new("out/tinymce.js"), "min"), PathBuf::from("out/tinymce.min.js"));
  assert_eq!(sibling_output(Path::new("tinymce.js"), "dev"), PathBuf::from("tinymce.dev.js"));
}
