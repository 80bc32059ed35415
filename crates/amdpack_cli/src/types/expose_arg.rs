use amdpack::ExposeOption;

/// `--expose` accepts `true`, `false`, `public` or a comma separated list of module ids.
pub fn parse_expose_arg(value: &str) -> Result<ExposeOption, String> {
  if let Some(option) = ExposeOption::parse(value) {
    return Ok(option);
  }

  let ids = value
    .split(',')
    .map(str::trim)
    .filter(|id| !id.is_empty())
    .map(ToString::to_string)
    .collect::<Vec<_>>();

  if ids.is_empty() {
    return Err(format!("expected `true`, `false`, `public` or module ids, got {value:?}"));
  }
  Ok(ExposeOption::List(ids))
}

#[test]
fn expose_arg() {
  assert_eq!(parse_expose_arg("public"), Ok(ExposeOption::Public));
  assert_eq!(parse_expose_arg("false"), Ok(ExposeOption::Never));
  assert_eq!(
    parse_expose_arg("a.B, a.C"),
    Ok(ExposeOption::List(vec!["a.B".to_string(), "a.C".to_string()]))
  );
  assert!(parse_expose_arg(" , ").is_err());
}
