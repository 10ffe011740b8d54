pub mod project;

pub use crate::domain::project::ProjectConfig;
pub use project::{load_project_config, parse_config};
