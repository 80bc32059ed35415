pub mod ecmascript;
pub mod indexmap;
pub mod js_string;
pub mod path_ext;
