pub mod cli;
pub mod compiler;
pub mod plugin;
pub mod project;

// Re-export commonly used types
pub use compiler::{NO_RESOURCE, compile_event, flatten, render_argument, resolve_id};
pub use project::{Project, Resource};
