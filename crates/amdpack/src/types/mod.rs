pub mod bundle_output;
pub mod generator;
pub mod module_graph;

use std::sync::Arc;

use amdpack_common::NormalizedBundlerOptions;
use amdpack_resolver::PathResolver;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedResolver = Arc<PathResolver>;
