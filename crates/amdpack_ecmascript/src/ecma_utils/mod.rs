mod ast_ext;
mod ast_snippet;
mod marker_splicer;

pub use {
  ast_ext::{expression_ext::ExpressionExt, statement_ext::StatementExt},
  ast_snippet::AstSnippet,
  marker_splicer::splice_marker_statement,
};
