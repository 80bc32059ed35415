use amdpack_ecmascript::ExpressionExt;
use oxc::{
  ast::ast::{Argument, ArrayExpressionElement, CallExpression, Program},
  ast_visit::{Visit, walk},
};

/// One `define(id, deps, factory)` call, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineDeclaration {
  pub id: String,
  pub deps: Vec<String>,
  /// Number of parameters the factory declares, a rest parameter counts as one.
  pub params: usize,
}

/// Collects every `define` call of `program` in source order.
///
/// Arguments of a matched call are not searched for further `define` calls. The first
/// malformed declaration stops the scan and is returned as the error message.
pub fn scan_defines(program: &Program) -> Result<Vec<DefineDeclaration>, String> {
  let mut scanner = DefineScanner { declarations: vec![], error: None };
  scanner.visit_program(program);
  match scanner.error {
    Some(error) => Err(error),
    None => Ok(scanner.declarations),
  }
}

struct DefineScanner {
  declarations: Vec<DefineDeclaration>,
  error: Option<String>,
}

impl<'ast> Visit<'ast> for DefineScanner {
  fn visit_call_expression(&mut self, call: &CallExpression<'ast>) {
    if self.error.is_some() {
      return;
    }

    if !call.callee.as_identifier().is_some_and(|callee| callee.name == "define") {
      walk::walk_call_expression(self, call);
      return;
    }

    match read_declaration(call) {
      Ok(declaration) => self.declarations.push(declaration),
      Err(error) => self.error = Some(error),
    }
  }
}

fn read_declaration(call: &CallExpression) -> Result<DefineDeclaration, String> {
  let mut args = call.arguments.iter();

  let id = match args.next() {
    Some(Argument::StringLiteral(id)) => id.value.to_string(),
    Some(_) => return Err("the module id passed to define must be a string literal".to_string()),
    None => return Err("define was called without arguments".to_string()),
  };

  let deps = match args.next() {
    Some(Argument::ArrayExpression(deps)) => deps
      .elements
      .iter()
      .map(|dep| match dep {
        ArrayExpressionElement::StringLiteral(dep) => Ok(dep.value.to_string()),
        _ => Err(format!("the dependencies of {id} must be string literals")),
      })
      .collect::<Result<Vec<_>, _>>()?,
    _ => return Err(format!("the dependencies of {id} must be an array literal")),
  };

  let params = match args.next() {
    Some(Argument::FunctionExpression(factory)) => {
      factory.params.items.len() + usize::from(factory.params.rest.is_some())
    }
    Some(Argument::ArrowFunctionExpression(factory)) => {
      factory.params.items.len() + usize::from(factory.params.rest.is_some())
    }
    _ => return Err(format!("the module {id} has no factory function")),
  };

  Ok(DefineDeclaration { id, deps, params })
}

#[cfg(test)]
mod tests {
  use amdpack_ecmascript::EcmaCompiler;

  use super::{DefineDeclaration, scan_defines};

  fn scan(source: &str) -> Result<Vec<DefineDeclaration>, String> {
    let ast = EcmaCompiler::parse(source, EcmaCompiler::script_source_type()).unwrap();
    scan_defines(ast.program())
  }

  #[test]
  fn collects_declarations_in_source_order() {
    let declarations = scan(
      r#"
      define("a.B", ["a.C", "a.C", "a.B"], function (C, C2, B) { return {}; });
      (function () {
        define("a.D", [], () => 1);
      })();
      "#,
    )
    .unwrap();

    assert_eq!(
      declarations,
      vec![
        DefineDeclaration {
          id: "a.B".to_string(),
          deps: vec!["a.C".to_string(), "a.C".to_string(), "a.B".to_string()],
          params: 3,
        },
        DefineDeclaration { id: "a.D".to_string(), deps: vec![], params: 0 },
      ]
    );
  }

  #[test]
  fn does_not_descend_into_matched_calls() {
    let declarations = scan(
      r#"define("a", [], function () { define("nested", [], function () {}); });"#,
    )
    .unwrap();
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].id, "a");
  }

  #[test]
  fn other_calls_are_ignored() {
    assert!(scan("require(['a'], function (a) {}); define.amd = true;").unwrap().is_empty());
  }

  #[test]
  fn malformed_declarations() {
    assert!(scan("define(id, [], function () {});").unwrap_err().contains("string literal"));
    assert!(scan("define('a', deps, function () {});").unwrap_err().contains("array literal"));
    assert!(scan("define('a', [b], function () {});").unwrap_err().contains("string literals"));
    assert!(scan("define('a', []);").unwrap_err().contains("no factory"));
    assert!(scan("define();").is_err());
  }
}
