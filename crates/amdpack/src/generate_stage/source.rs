use std::{borrow::Cow, path::Path};

use amdpack_common::{CoverageInstrumenter, SourceJoiner};
use amdpack_error::BuildResult;
use anyhow::Context;
use itertools::Itertools;

use crate::{
  runtime::INLINE_LOADER,
  types::generator::{GenerateContext, Generator},
};

use super::{js_string_literal, splice_raw_code, with_banner};

/// The readable bundle: every file verbatim, in dependency order, inside the inline loader.
///
/// With an instrumenter it renders the coverage bundle instead, each file passed through
/// [`CoverageInstrumenter::instrument`] first.
pub struct SourceGenerator<'a> {
  instrumenter: Option<&'a dyn CoverageInstrumenter>,
}

impl<'a> SourceGenerator<'a> {
  pub fn new() -> Self {
    Self { instrumenter: None }
  }

  pub fn with_instrumenter(instrumenter: &'a dyn CoverageInstrumenter) -> Self {
    Self { instrumenter: Some(instrumenter) }
  }
}

impl Generator for SourceGenerator<'_> {
  fn render(&self, ctx: &GenerateContext, _output: &Path) -> BuildResult<String> {
    let mut joiner = SourceJoiner::with_separator("\n\n");
    let aliases = ctx.global_aliases();

    for file in ctx.rendered_files() {
      let source = match self.instrumenter {
        Some(instrumenter) => Cow::Owned(
          instrumenter
            .instrument(file.source, file.path)
            .with_context(|| format!("Failed to instrument {}", file.path))?,
        ),
        None => Cow::Borrowed(file.source),
      };

      let mut rendered = format!("// Included from: {}\n\n{}", file.path, source.trim());
      for module in file.modules {
        for (_, global) in aliases.iter().filter(|(aliased, _)| std::ptr::eq(*aliased, *module)) {
          rendered.push_str(&format!(
            "\nexports[{}] = modules[{}];",
            js_string_literal(global),
            js_string_literal(&module.id)
          ));
        }
      }
      joiner.append_source(rendered);
    }

    if !ctx.exposed.is_empty() {
      let ids = ctx.exposed.iter().map(|module| js_string_literal(&module.id)).join(",");
      joiner.append_source(format!("expose([{ids}]);"));
    }

    let bundle = splice_raw_code(INLINE_LOADER, "inline loader", &format!("\n\n{}", joiner.join()))?;
    Ok(with_banner(ctx.options, bundle))
  }
}
