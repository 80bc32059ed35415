pub mod amd_module;
