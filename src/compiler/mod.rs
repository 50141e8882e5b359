pub mod codegen;
pub mod errors;
pub mod flatten;
pub mod linker;
pub mod native;

pub use codegen::{compile_event, render_argument};
pub use flatten::flatten;
pub use linker::{NO_RESOURCE, resolve_id};

use crate::project::Project;
use anyhow::Result;

/// Convenience function to run the whole conversion pipeline over a loaded
/// project description.
pub fn compile_project(project: &Project) -> Result<native::NativeGraph> {
    flatten(project)
}
