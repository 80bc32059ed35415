use std::sync::LazyLock;

use amdpack_common::{ExposeOption, NormalizedBundlerOptions};
use amdpack_resolver::PathResolver;
use regex::Regex;

static DOC_COMMENT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"/\*\*([\s\S]+?)\*/").expect("valid regex"));
static CLASS_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"@class\s+([^\s*]+)").expect("valid regex"));
static PRIVATE_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"@private\b").expect("valid regex"));

/// Decides which modules end up in the generated `expose([...])` call.
pub struct ExposurePolicy<'a> {
  options: &'a NormalizedBundlerOptions,
  resolver: &'a PathResolver,
}

impl<'a> ExposurePolicy<'a> {
  pub fn new(options: &'a NormalizedBundlerOptions, resolver: &'a PathResolver) -> Self {
    Self { options, resolver }
  }

  /// Modules below a library namespace follow the library's setting.
  pub fn effective_expose(&self, id: &str) -> &'a ExposeOption {
    match self.resolver.library_for(id) {
      Some((_, lib)) => &lib.expose,
      None => &self.options.expose,
    }
  }

  pub fn is_public(&self, id: &str, source: &str) -> bool {
    is_exposed(id, source, self.effective_expose(id))
  }
}

pub fn is_exposed(id: &str, source: &str, expose: &ExposeOption) -> bool {
  match expose {
    ExposeOption::Never => false,
    ExposeOption::Always => true,
    ExposeOption::List(ids) => ids.iter().any(|exposed| exposed == id),
    ExposeOption::Public => !is_marked_private(id, source),
  }
}

/// A `/** ... */` block documenting `@class <id>` that also carries `@private`.
fn is_marked_private(id: &str, source: &str) -> bool {
  let id = normalize_id(id);
  DOC_COMMENT.captures_iter(source).any(|doc| {
    let doc = &doc[1];
    CLASS_TAG
      .captures(doc)
      .is_some_and(|class| normalize_id(&class[1]) == id && PRIVATE_TAG.is_match(doc))
  })
}

/// `tinymce/util/Tools` and `tinymce.util.Tools` name the same class.
fn normalize_id(id: &str) -> String {
  id.trim().replace('/', ".")
}

#[cfg(test)]
mod tests {
  use amdpack_common::ExposeOption;

  use super::is_exposed;

  const PRIVATE_SOURCE: &str = r"
/**
 * Internal helper.
 *
 * @private
 * @class tinymce.util.Internal
 */
define('tinymce.util.Internal', [], function () {});
";

  const PUBLIC_SOURCE: &str = r"
/**
 * Collection utilities.
 *
 * @class tinymce.util.Tools
 */
define('tinymce.util.Tools', [], function () {});
";

  #[test]
  fn allow_list() {
    let expose = ExposeOption::List(vec!["a.B".to_string()]);
    assert!(is_exposed("a.B", "", &expose));
    assert!(!is_exposed("a.C", "", &expose));
  }

  #[test]
  fn never_and_always() {
    assert!(!is_exposed("a.B", PUBLIC_SOURCE, &ExposeOption::Never));
    assert!(is_exposed("tinymce.util.Internal", PRIVATE_SOURCE, &ExposeOption::Always));
  }

  #[test]
  fn public_honors_private_doc_comments() {
    assert!(!is_exposed("tinymce.util.Internal", PRIVATE_SOURCE, &ExposeOption::Public));
    assert!(!is_exposed("tinymce/util/Internal", PRIVATE_SOURCE, &ExposeOption::Public));
    assert!(is_exposed("tinymce.util.Tools", PUBLIC_SOURCE, &ExposeOption::Public));
    // `@private` on another class in the same file doesn't hide this one.
    assert!(is_exposed("tinymce.util.Other", PRIVATE_SOURCE, &ExposeOption::Public));
  }
}
