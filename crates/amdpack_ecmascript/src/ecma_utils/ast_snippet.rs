use oxc::{
  allocator::{Allocator, Box},
  ast::{
    AstBuilder,
    ast::{self, Argument, ArrayExpressionElement},
  },
  span::Span,
};

type PassedStr<'a> = &'a str;

// `AstBuilder` is more suitable name, but it's already used in oxc.
pub struct AstSnippet<'ast> {
  pub builder: AstBuilder<'ast>,
}

impl<'ast> AstSnippet<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { builder: AstBuilder::new(alloc) }
  }

  #[inline]
  pub fn alloc_id_ref(
    &self,
    name: PassedStr,
    span: Span,
  ) -> Box<'ast, ast::IdentifierReference<'ast>> {
    self.builder.alloc_identifier_reference(span, self.builder.atom(name))
  }

  /// `name` in argument position, keeping the span of the node it replaces.
  #[inline]
  pub fn id_ref_argument(&self, name: PassedStr, span: Span) -> Argument<'ast> {
    Argument::Identifier(self.alloc_id_ref(name, span))
  }

  /// `name` as an element of an array literal.
  #[inline]
  pub fn id_ref_array_element(&self, name: PassedStr, span: Span) -> ArrayExpressionElement<'ast> {
    ArrayExpressionElement::Identifier(self.alloc_id_ref(name, span))
  }
}
