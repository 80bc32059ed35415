use oxc::ast::ast;

use super::expression_ext::ExpressionExt;

pub trait StatementExt<'ast> {
  fn as_expression_statement(&self) -> Option<&ast::ExpressionStatement<'ast>>;

  /// Check if the statement is exactly `name();`
  fn is_bare_call_statement(&self, name: &str) -> bool;
}

impl<'ast> StatementExt<'ast> for ast::Statement<'ast> {
  fn as_expression_statement(&self) -> Option<&ast::ExpressionStatement<'ast>> {
    if let ast::Statement::ExpressionStatement(stmt) = self {
      return Some(&**stmt);
    }
    None
  }

  fn is_bare_call_statement(&self, name: &str) -> bool {
    self.as_expression_statement().is_some_and(|stmt| {
      stmt.expression.is_call_to(name)
        && stmt.expression.as_call_expression().is_some_and(|call| call.arguments.is_empty())
    })
  }
}
