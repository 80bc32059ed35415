//! Loader templates the bundles are spliced into.

/// Wraps the source, minified and coverage bundles. Modules replace the `$code();` statement.
pub const INLINE_LOADER: &str = include_str!("../runtime/inline_loader.js");

/// `document.write` based loader of the development bundle. Besides the `$code();` statement
/// every `$fileName` is replaced with the base name of the output file.
pub const DEV_LOADER: &str = include_str!("../runtime/dev_loader.js");

pub const CODE_MARKER: &str = "$code";

pub const FILE_NAME_TOKEN: &str = "$fileName";
