// Maps AMD module ids onto the file system.

mod resolver;

pub use crate::resolver::{PathResolver, ResolveOptions};
