//! Kernel module - chat infrastructure and dependencies.

pub mod deps;
pub mod llm;
pub mod test_dependencies;
pub mod traits;

pub use deps::ChatDeps;
pub use test_dependencies::{MockAI, TestDependencies};
pub use traits::*;
