use oxc::ast::ast;

pub trait ExpressionExt<'ast> {
  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>>;
  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>>;

  /// `name(...)`
  fn is_call_to(&self, name: &str) -> bool;
}

impl<'ast> ExpressionExt<'ast> for ast::Expression<'ast> {
  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>> {
    if let ast::Expression::Identifier(ident) = self { Some(ident) } else { None }
  }

  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>> {
    let ast::Expression::CallExpression(expr) = self else {
      return None;
    };
    Some(expr)
  }

  fn is_call_to(&self, name: &str) -> bool {
    self
      .as_call_expression()
      .and_then(|call| call.callee.as_identifier())
      .is_some_and(|ident| ident.name == name)
  }
}
