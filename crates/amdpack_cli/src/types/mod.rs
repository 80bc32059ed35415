pub mod expose_arg;
pub mod log_args;
