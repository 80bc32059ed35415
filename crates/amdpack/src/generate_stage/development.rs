use std::path::Path;

use amdpack_error::{AmdError, BuildResult};
use amdpack_utils::{js_string::escape_single_quoted, path_ext::PathExt};
use itertools::Itertools;

use crate::{
  cache::HASH_MARKER,
  runtime::{DEV_LOADER, FILE_NAME_TOKEN},
  types::generator::{GenerateContext, Generator},
};

use super::{js_string_literal, splice_raw_code};

/// The development bundle loads every file with its own script tag, only sources that don't
/// exist on disk are inlined.
pub struct DevelopmentGenerator;

impl Generator for DevelopmentGenerator {
  fn render(&self, ctx: &GenerateContext, output: &Path) -> BuildResult<String> {
    let out_dir = output.parent().unwrap_or(Path::new(""));
    let mut code = String::new();

    if !ctx.exposed.is_empty() {
      let ids = ctx.exposed.iter().map(|module| js_string_literal(&module.id)).join(",");
      code.push_str(&format!("expose([{ids}]);\n\n"));
    }

    if !ctx.options.global_modules.is_empty() {
      let globals = serde_json::to_string(&ctx.options.global_modules).map_err(|err| {
        AmdError::Config { message: format!("failed to serialize globalModules: {err}") }
      })?;
      code.push_str(&format!("\tglobals = {globals};\n\n"));
    }

    for file in ctx.rendered_files() {
      if file.is_virtual {
        code.push_str(&format!("\tinline('{}');\n", escape_single_quoted(file.source)));
      } else {
        let path = Path::new(file.path).relative_slash(out_dir);
        code.push_str(&format!("\tload('{}');\n", escape_single_quoted(&path)));
      }
    }

    code.push_str("\n\twriteScripts();");

    let file_name =
      output.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    let template = DEV_LOADER.replace(FILE_NAME_TOKEN, &file_name);
    let mut bundle = splice_raw_code(&template, "development loader", &format!("\n\n\t{}", code.trim()))?;

    if ctx.options.hash {
      if !bundle.ends_with('\n') {
        bundle.push('\n');
      }
      bundle.push_str(HASH_MARKER);
      bundle.push_str(ctx.fingerprint);
      bundle.push('\n');
    }

    Ok(bundle)
  }
}
