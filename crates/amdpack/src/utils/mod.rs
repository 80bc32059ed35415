pub mod glob;
pub mod load_source;
pub mod normalize_options;
pub mod substitute_tokens;
