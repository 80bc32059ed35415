use oxc::{
  allocator::Vec as ArenaVec,
  ast::ast::{Program, Statement},
  ast_visit::{VisitMut, walk_mut},
};

use super::StatementExt;

/// Replaces the first statement of the exact shape `marker();` found anywhere in `program`
/// (including nested function bodies) with `replacement`.
///
/// Returns `false` if no such statement exists, in which case `program` is left untouched.
pub fn splice_marker_statement<'ast>(
  program: &mut Program<'ast>,
  marker: &str,
  replacement: Vec<Statement<'ast>>,
) -> bool {
  let mut splicer = MarkerSplicer { marker, replacement: Some(replacement) };
  splicer.visit_program(program);
  splicer.replacement.is_none()
}

struct MarkerSplicer<'me, 'ast> {
  marker: &'me str,
  replacement: Option<Vec<Statement<'ast>>>,
}

impl<'ast> VisitMut<'ast> for MarkerSplicer<'_, 'ast> {
  fn visit_statements(&mut self, stmts: &mut ArenaVec<'ast, Statement<'ast>>) {
    if self.replacement.is_none() {
      return;
    }

    if let Some(idx) = stmts.iter().position(|stmt| stmt.is_bare_call_statement(self.marker)) {
      let replacement = self.replacement.take().unwrap_or_default();
      stmts.remove(idx);
      for (offset, stmt) in replacement.into_iter().enumerate() {
        stmts.insert(idx + offset, stmt);
      }
      return;
    }

    walk_mut::walk_statements(self, stmts);
  }
}

#[cfg(test)]
mod tests {
  use oxc::span::SourceType;

  use super::splice_marker_statement;
  use crate::EcmaCompiler;

  #[test]
  fn splices_into_nested_function_body() {
    let mut ast = EcmaCompiler::parse(
      "(function (exports) {\n  var a = 1;\n  $code();\n})(this);",
      SourceType::default(),
    )
    .unwrap();

    let spliced = ast.with_mut(|fields| {
      let stmts = EcmaCompiler::parse_statements(fields.allocator, "a++; a--;").unwrap();
      splice_marker_statement(fields.program, "$code", stmts.into_iter().collect())
    });

    assert!(spliced);
    let code = EcmaCompiler::print(&ast);
    assert!(!code.contains("$code"));
    assert!(code.contains("a++;"));
    assert!(code.contains("a--;"));
  }

  #[test]
  fn missing_marker_is_reported() {
    let mut ast = EcmaCompiler::parse("$code(1);", SourceType::default()).unwrap();
    let spliced = ast.with_mut(|fields| splice_marker_statement(fields.program, "$code", vec![]));
    assert!(!spliced);
  }
}
