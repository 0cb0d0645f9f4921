#![deny(clippy::pedantic, unsafe_code)]
//! Build orchestration for CMake/Make projects
//!
//! This crate drives the per-profile pipeline: configure the build tree
//! with cmake when it has not been configured yet, then compile and run
//! the test target through make, with every exit status checked.

mod exec;
mod layout;
mod orchestrator;
mod pipeline;
mod toolchain;

pub use exec::CommandOutput;
pub use layout::BuildLayout;
pub use orchestrator::Builder;
pub use pipeline::CACHE_MARKER;
pub use toolchain::Toolchain;
