use amdpack_error::BuildResult;
use arcstr::ArcStr;
use itertools::Itertools;
use oxc::{
  allocator::{Allocator, Vec as ArenaVec},
  ast::ast::Statement,
  codegen::{Codegen, CodegenOptions},
  diagnostics::OxcDiagnostic,
  minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions},
  parser::Parser,
  span::SourceType,
};

use crate::ecma_ast::{AstDependent, AstOwner, EcmaAst, ProgramCell};

/// Which of oxc's minifier passes run before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
  /// Identifier shortening.
  pub mangle: bool,
  /// Dead code elimination and the other compressor passes.
  pub compress: bool,
  pub drop_console: bool,
  pub drop_debugger: bool,
}

impl Default for MinifyOptions {
  fn default() -> Self {
    Self { mangle: true, compress: true, drop_console: false, drop_debugger: false }
  }
}

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Module sources and loader templates are classic scripts, not ES modules.
  pub fn script_source_type() -> SourceType {
    SourceType::cjs()
  }

  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = AstOwner { source: source.into(), allocator };
    let cell = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(AstDependent { program: ret.program })
      } else {
        Err(anyhow::anyhow!(join_diagnostics(&ret.errors)))
      }
    })?;

    Ok(EcmaAst { cell, source_type })
  }

  /// Parses `source` as a script whose nodes live in `allocator`, returning its top level
  /// statements. The source text is copied into the allocator first.
  pub fn parse_statements<'a>(
    allocator: &'a Allocator,
    source: &str,
  ) -> BuildResult<ArenaVec<'a, Statement<'a>>> {
    let source = allocator.alloc_str(source);
    let ret = Parser::new(allocator, source, Self::script_source_type()).parse();
    if !ret.errors.is_empty() || ret.panicked {
      Err(anyhow::anyhow!(join_diagnostics(&ret.errors)))?;
    }
    Ok(ret.program.body)
  }

  pub fn print(ast: &EcmaAst) -> String {
    Codegen::new().build(ast.program()).code
  }

  /// Runs the requested minifier passes in place, then prints with minified whitespace.
  pub fn print_minified(ast: &mut EcmaAst, options: MinifyOptions) -> String {
    ast.with_mut(|fields| {
      let ret = Minifier::new(MinifierOptions {
        mangle: options.mangle.then(MangleOptions::default),
        compress: options.compress.then(|| CompressOptions {
          drop_console: options.drop_console,
          drop_debugger: options.drop_debugger,
          ..CompressOptions::default()
        }),
      })
      .build(fields.allocator, fields.program);

      Codegen::new()
        .with_options(CodegenOptions { minify: true, ..CodegenOptions::default() })
        .with_scoping(ret.scoping)
        .build(fields.program)
        .code
    })
  }
}

fn join_diagnostics(errors: &[OxcDiagnostic]) -> String {
  if errors.is_empty() {
    return "unrecoverable syntax error".to_string();
  }
  errors.iter().map(ToString::to_string).join("; ")
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("var a = 1;", SourceType::default()).unwrap();
  let code = EcmaCompiler::print(&ast);
  assert_eq!(code, "var a = 1;\n");
}

#[test]
fn scripts_allow_sloppy_mode_syntax() {
  let ast = EcmaCompiler::parse("with (a) { b = 1; }", EcmaCompiler::script_source_type());
  assert!(ast.is_ok());
}

#[test]
fn parse_error_is_reported() {
  let err = EcmaCompiler::parse("define(", SourceType::default()).unwrap_err();
  assert_eq!(err.len(), 1);
}

#[test]
fn statements_from_several_sources_share_one_program() {
  let mut ast = EcmaCompiler::parse("var a = 1;", SourceType::default()).unwrap();
  ast.with_mut(|fields| {
    let stmts = EcmaCompiler::parse_statements(fields.allocator, "var b = 2;").unwrap();
    fields.program.body.extend(stmts);
  });
  assert_eq!(EcmaCompiler::print(&ast), "var a = 1;\nvar b = 2;\n");
}

#[test]
fn minify_shortens_locals() {
  let mut ast = EcmaCompiler::parse(
    "(function () { var longName = 1; console.log(longName); })();",
    EcmaCompiler::script_source_type(),
  )
  .unwrap();
  let code =
    EcmaCompiler::print_minified(&mut ast, MinifyOptions { compress: false, ..MinifyOptions::default() });
  assert!(!code.contains("longName"));
  assert!(code.contains("console.log"));
}
