//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core/adapters calls and render
//! the results through [`crate::output::OutputManager`].

pub mod batch;
pub mod completions;
pub mod config;
pub mod fields;
pub mod init;
pub mod submit;
pub mod validate;
