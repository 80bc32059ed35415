use amdpack_common::AmdModule;
use amdpack_ecmascript::{AstSnippet, ExpressionExt};
use amdpack_utils::{ecmascript::legitimize_identifier_name, indexmap::FxIndexMap};
use arcstr::ArcStr;
use itertools::Itertools;
use oxc::{
  allocator::Allocator,
  ast::ast::{Argument, ArrayExpressionElement, CallExpression},
  ast_visit::{VisitMut, walk_mut},
};
use rustc_hash::FxHashSet;

/// Injective mapping from module ids to the bindings that stand in for them in the minified
/// bundle. `tinymce.util.Tools` becomes `_tinymce_util_Tools`, ids that legitimize to a taken
/// name get a `$1`, `$2`, ... suffix.
#[derive(Debug, Default)]
pub struct SyntheticNames {
  names: FxIndexMap<ArcStr, String>,
  used: FxHashSet<String>,
}

impl SyntheticNames {
  /// Names every module id and every dependency id, external ones included, in the order
  /// they are first mentioned.
  pub fn from_modules(modules: &[AmdModule]) -> Self {
    let mut names = Self::default();
    for module in modules {
      names.add(&module.id);
      for dep in &module.deps {
        names.add(dep);
      }
    }
    names
  }

  pub fn add(&mut self, id: &ArcStr) {
    if self.names.contains_key(id) {
      return;
    }

    let base = format!("_{}", legitimize_identifier_name(id));
    let mut candidate = base.clone();
    let mut suffix = itoa::Buffer::new();
    let mut count = 0u32;
    while self.used.contains(&candidate) {
      count += 1;
      candidate = format!("{base}${}", suffix.format(count));
    }

    self.used.insert(candidate.clone());
    self.names.insert(id.clone(), candidate);
  }

  pub fn get(&self, id: &str) -> Option<&str> {
    self.names.get(id).map(String::as_str)
  }

  /// `var _a_B = "a.B", _a_C = "a.C";`
  pub fn var_declaration(&self) -> Option<String> {
    if self.names.is_empty() {
      return None;
    }
    let declarators = self
      .names
      .iter()
      .map(|(id, name)| format!("{name} = {}", super::js_string_literal(id)))
      .join(", ");
    Some(format!("var {declarators};"))
  }
}

/// Rewrites `define("a.B", ["a.C"], factory)` into `define(_a_B, [_a_C], factory)` in place.
///
/// Only the id argument and the string elements of the dependency array are replaced, spans
/// are kept. Arguments of a rewritten call are not visited, so a `define` nested in a factory
/// keeps its literals. Ids without a synthetic name are left alone.
pub struct DefineIdMangler<'me, 'ast> {
  snippet: AstSnippet<'ast>,
  names: &'me SyntheticNames,
}

impl<'me, 'ast> DefineIdMangler<'me, 'ast> {
  pub fn new(allocator: &'ast Allocator, names: &'me SyntheticNames) -> Self {
    Self { snippet: AstSnippet::new(allocator), names }
  }

  fn rewrite_define(&self, call: &mut CallExpression<'ast>) {
    let mut args = call.arguments.iter_mut();

    if let Some(id) = args.next() {
      let replacement = match id {
        Argument::StringLiteral(lit) => {
          self.names.get(&lit.value).map(|name| self.snippet.id_ref_argument(name, lit.span))
        }
        _ => None,
      };
      if let Some(replacement) = replacement {
        *id = replacement;
      }
    }

    if let Some(Argument::ArrayExpression(deps)) = args.next() {
      for dep in &mut deps.elements {
        let replacement = match dep {
          ArrayExpressionElement::StringLiteral(lit) => self
            .names
            .get(&lit.value)
            .map(|name| self.snippet.id_ref_array_element(name, lit.span)),
          _ => None,
        };
        if let Some(replacement) = replacement {
          *dep = replacement;
        }
      }
    }
  }
}

impl<'ast> VisitMut<'ast> for DefineIdMangler<'_, 'ast> {
  fn visit_call_expression(&mut self, call: &mut CallExpression<'ast>) {
    if call.callee.as_identifier().is_some_and(|callee| callee.name == "define") {
      self.rewrite_define(call);
    } else {
      walk_mut::walk_call_expression(self, call);
    }
  }
}

#[cfg(test)]
mod tests {
  use amdpack_common::AmdModule;
  use amdpack_ecmascript::EcmaCompiler;
  use arcstr::ArcStr;
  use oxc::ast_visit::VisitMut;

  use super::{DefineIdMangler, SyntheticNames};

  fn module(id: &str, deps: &[&str]) -> AmdModule {
    AmdModule {
      id: ArcStr::from(id),
      file_path: ArcStr::from(format!("/{id}.js")),
      source: ArcStr::default(),
      deps: deps.iter().copied().map(ArcStr::from).collect(),
      is_public: true,
      is_virtual: false,
      mtime: 0,
    }
  }

  #[test]
  fn names_are_injective() {
    let names = SyntheticNames::from_modules(&[
      module("a.B", &["ext.Lib", "a/B"]),
      module("a/B", &[]),
      module("a.B$1", &[]),
    ]);
    assert_eq!(names.get("a.B"), Some("_a_B"));
    assert_eq!(names.get("ext.Lib"), Some("_ext_Lib"));
    assert_eq!(names.get("a/B"), Some("_a_B$1"));
    assert_eq!(names.get("a.B$1"), Some("_a_B$1$1"));
    assert_eq!(
      names.var_declaration().as_deref(),
      Some(r#"var _a_B = "a.B", _ext_Lib = "ext.Lib", _a_B$1 = "a/B", _a_B$1$1 = "a.B$1";"#)
    );
    assert!(SyntheticNames::default().var_declaration().is_none());
  }

  #[test]
  fn rewrites_define_literals_only() {
    let names = SyntheticNames::from_modules(&[module("a.B", &["a.C"]), module("a.C", &[])]);
    let mut ast = EcmaCompiler::parse(
      r#"define("a.B", ["a.C"], function (C) { return "a.C"; }); log("a.B");"#,
      EcmaCompiler::script_source_type(),
    )
    .unwrap();

    ast.with_mut(|fields| {
      DefineIdMangler::new(fields.allocator, &names).visit_program(fields.program);
    });

    let code = EcmaCompiler::print(&ast).replace(char::is_whitespace, "");
    assert!(code.contains("define(_a_B,[_a_C],function(C){"), "{code}");
    assert!(code.contains(r#"return"a.C";"#));
    assert!(code.contains(r#"log("a.B");"#));
  }
}
