pub mod loader;
pub mod types;
