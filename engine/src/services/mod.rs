//! Service implementations
//!
//! Production implementations of the traits in `crate::traits`, plus the
//! file loader used by the CLI.

pub mod memory_store;
pub mod pipeline;
pub mod scenario_loader;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use memory_store::MemoryResultStore;
pub use pipeline::DefaultPipeline;
pub use scenario_loader::load_scenario;
