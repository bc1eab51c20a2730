pub mod env_loader;
pub mod model;
