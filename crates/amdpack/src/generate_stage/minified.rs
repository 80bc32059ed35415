use std::path::Path;

use amdpack_ecmascript::{EcmaCompiler, MinifyOptions, splice_marker_statement};
use amdpack_error::{AmdError, BuildResult};
use amdpack_utils::js_string::to_ascii_only;
use itertools::Itertools;
use oxc::ast_visit::VisitMut;

use crate::{
  runtime::{CODE_MARKER, INLINE_LOADER},
  types::generator::{GenerateContext, Generator},
};

use super::{
  define_id_mangler::{DefineIdMangler, SyntheticNames},
  js_string_literal, with_banner,
};

/// Every module parsed into the inline loader's program, module ids replaced with synthetic
/// bindings, then printed through oxc's minifier.
pub struct MinifiedGenerator;

impl Generator for MinifiedGenerator {
  fn render(&self, ctx: &GenerateContext, _output: &Path) -> BuildResult<String> {
    let names = if ctx.options.compress_module_ids {
      SyntheticNames::from_modules(ctx.modules)
    } else {
      SyntheticNames::default()
    };
    let epilogue = epilogue(ctx, &names);

    let mut ast = EcmaCompiler::parse(INLINE_LOADER, EcmaCompiler::script_source_type())
      .map_err(|err| AmdError::Template { name: "inline loader", message: err.to_string() })?;

    let spliced = ast.with_mut(|fields| -> BuildResult<bool> {
      let mut body = vec![];

      if let Some(prologue) = names.var_declaration() {
        body.extend(EcmaCompiler::parse_statements(fields.allocator, &prologue)?);
      }

      let mut mangler = DefineIdMangler::new(fields.allocator, &names);
      for file in ctx.rendered_files() {
        let mut stmts = EcmaCompiler::parse_statements(fields.allocator, file.source)
          .map_err(|err| AmdError::declaration(file.path, err.to_string()))?;
        mangler.visit_statements(&mut stmts);
        body.extend(stmts);
      }

      if !epilogue.is_empty() {
        body.extend(EcmaCompiler::parse_statements(fields.allocator, &epilogue)?);
      }

      // Comment spans point into the template, not into the merged sources.
      fields.program.comments.clear();
      Ok(splice_marker_statement(fields.program, CODE_MARKER, body))
    })?;

    if !spliced {
      Err(AmdError::Template {
        name: "inline loader",
        message: format!("no `{CODE_MARKER}();` statement found"),
      })?;
    }

    let code = match ctx.options.compress {
      Some(compress) => EcmaCompiler::print_minified(
        &mut ast,
        MinifyOptions {
          mangle: compress.mangle,
          compress: compress.dead_code,
          drop_console: compress.drop_console,
          drop_debugger: compress.drop_debugger,
        },
      ),
      None => EcmaCompiler::print(&ast),
    };

    Ok(with_banner(ctx.options, to_ascii_only(&code)))
  }
}

/// Global aliases followed by the `expose([...])` call. Ids are referred to by their
/// synthetic names when they have one.
fn epilogue(ctx: &GenerateContext, names: &SyntheticNames) -> String {
  let id_expr = |id: &str| names.get(id).map_or_else(|| js_string_literal(id), ToString::to_string);
  let mut epilogue = String::new();

  for (module, global) in ctx.global_aliases() {
    epilogue.push_str(&format!(
      "exports[{}] = modules[{}];\n",
      js_string_literal(global),
      id_expr(&module.id)
    ));
  }

  if !ctx.exposed.is_empty() {
    let ids = ctx.exposed.iter().map(|module| id_expr(&module.id)).join(",");
    epilogue.push_str(&format!("expose([{ids}]);\n"));
  }

  epilogue
}
