mod define_id_mangler;
mod development;
mod minified;
mod source;

use std::sync::LazyLock;

use amdpack_common::{
  CoverageInstrumenter, NormalizedBundlerOptions, OutputAsset, OutputKind, Reporter,
};
use amdpack_error::{AmdError, AmdWarning, BuildResult};
use regex::{NoExpand, Regex};

use crate::{
  runtime::CODE_MARKER,
  types::{
    SharedOptions,
    generator::{GenerateContext, GenerateOutput, Generator},
    module_graph::ModuleGraph,
  },
};

use development::DevelopmentGenerator;
use minified::MinifiedGenerator;
use source::SourceGenerator;

static RAW_CODE_MARKER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s*\$code\(\);").expect("valid regex"));

pub struct GenerateStage<'a> {
  graph: &'a ModuleGraph,
  options: &'a SharedOptions,
  fingerprint: &'a str,
  instrumenter: Option<&'a dyn CoverageInstrumenter>,
  reporter: &'a dyn Reporter,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    graph: &'a ModuleGraph,
    options: &'a SharedOptions,
    fingerprint: &'a str,
    instrumenter: Option<&'a dyn CoverageInstrumenter>,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self { graph, options, fingerprint, instrumenter, reporter }
  }

  /// Renders every configured target. Targets without an output path are skipped.
  pub fn generate(&self) -> BuildResult<GenerateOutput> {
    let ctx = GenerateContext::new(self.options, &self.graph.modules, self.fingerprint);
    let mut assets = vec![];
    let mut warnings = vec![];

    let targets = [
      (OutputKind::Source, &self.options.output_source),
      (OutputKind::Minified, &self.options.output_minified),
      (OutputKind::Development, &self.options.output_dev),
      (OutputKind::Coverage, &self.options.output_coverage),
    ];

    for (kind, output) in targets {
      let Some(output) = output.as_deref() else {
        continue;
      };

      let content = match kind {
        OutputKind::Source => SourceGenerator::new().render(&ctx, output)?,
        OutputKind::Minified => MinifiedGenerator.render(&ctx, output)?,
        OutputKind::Development => DevelopmentGenerator.render(&ctx, output)?,
        OutputKind::Coverage => match self.instrumenter {
          Some(instrumenter) => {
            SourceGenerator::with_instrumenter(instrumenter).render(&ctx, output)?
          }
          None => {
            let warning = AmdWarning::MissingInstrumenter { output: output.display().to_string() };
            self.reporter.warn(&warning);
            warnings.push(warning);
            continue;
          }
        },
      };

      self.reporter.debug(&format_args!("Generated {kind} bundle for {}", output.display()));
      assets.push(OutputAsset { kind, path: output.to_path_buf(), content });
    }

    Ok(GenerateOutput { assets, warnings })
  }
}

/// Replaces the `$code();` statement of a loader template, together with the whitespace
/// leading up to it, with `code`.
fn splice_raw_code(template: &str, name: &'static str, code: &str) -> BuildResult<String> {
  if !RAW_CODE_MARKER.is_match(template) {
    Err(AmdError::Template { name, message: format!("no `{CODE_MARKER}();` statement found") })?;
  }
  Ok(RAW_CODE_MARKER.replace(template, NoExpand(code)).into_owned())
}

fn with_banner(options: &NormalizedBundlerOptions, code: String) -> String {
  match options.banner() {
    Some(banner) => banner + &code,
    None => code,
  }
}

/// A double quoted JS string literal for `value`.
fn js_string_literal(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
  use super::{js_string_literal, splice_raw_code};

  #[test]
  fn raw_splice_eats_leading_whitespace() {
    let template = "(function () {\n\tvar a;\n\n\t$code();\n})();";
    let bundle = splice_raw_code(template, "test", "\n\nb();").unwrap();
    assert_eq!(bundle, "(function () {\n\tvar a;\n\nb();\n})();");
  }

  #[test]
  fn raw_splice_keeps_dollar_signs() {
    let bundle = splice_raw_code("$code();", "test", "a$1 = '$0';").unwrap();
    assert_eq!(bundle, "a$1 = '$0';");
  }

  #[test]
  fn missing_marker() {
    assert!(splice_raw_code("code();", "test", "").is_err());
  }

  #[test]
  fn string_literals() {
    assert_eq!(js_string_literal("a.B"), r#""a.B""#);
    assert_eq!(js_string_literal("a\"b\\"), r#""a\"b\\""#);
  }
}
