mod ecma_ast;
mod ecma_compiler;
mod ecma_utils;

pub use crate::{
  ecma_ast::{EcmaAst, WithMutFields},
  ecma_compiler::{EcmaCompiler, MinifyOptions},
  ecma_utils::{AstSnippet, ExpressionExt, StatementExt, splice_marker_statement},
};
