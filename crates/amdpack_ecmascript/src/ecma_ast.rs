use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::{allocator::Allocator, ast::ast::Program, span::SourceType};
use self_cell::self_cell;

pub struct AstOwner {
  pub source: ArcStr,
  pub allocator: Allocator,
}

pub struct AstDependent<'cell> {
  pub program: Program<'cell>,
}

self_cell!(
  /// Keeps the allocator, the source text and the `Program` borrowing from both in one value,
  /// so a parsed script can be stored without carrying the `'ast` lifetime around.
  pub struct ProgramCell {
    owner: AstOwner,

    #[covariant]
    dependent: AstDependent,
  }
);

/// Mutable view handed out by [`EcmaAst::with_mut`].
pub struct WithMutFields<'outer, 'inner> {
  pub allocator: &'inner Allocator,
  pub program: &'outer mut Program<'inner>,
}

/// A parsed script.
///
/// Statements parsed from other sources with [`crate::EcmaCompiler::parse_statements`] into
/// `fields.allocator` live as long as the ast, which is how several modules end up in one
/// program.
pub struct EcmaAst {
  pub(crate) cell: ProgramCell,
  pub source_type: SourceType,
}

impl EcmaAst {
  pub fn source(&self) -> &ArcStr {
    &self.cell.borrow_owner().source
  }

  pub fn program(&self) -> &Program {
    &self.cell.borrow_dependent().program
  }

  pub fn with_mut<'outer, Ret>(
    &'outer mut self,
    func: impl for<'inner> FnOnce(WithMutFields<'outer, 'inner>) -> Ret,
  ) -> Ret {
    self.cell.with_dependent_mut::<'outer, Ret>(
      |owner: &AstOwner, dependent: &'outer mut AstDependent| {
        func(WithMutFields { allocator: &owner.allocator, program: &mut dependent.program })
      },
    )
  }
}

impl Debug for EcmaAst {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EcmaAst").field("source", &self.source()).finish_non_exhaustive()
  }
}
