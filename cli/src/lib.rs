//! Terminal front end for the todo service.
//!
//! A thin shell over [`todo_core::TodoApp`]: it turns input lines into
//! controller operations, executes the resulting requests with [`Transport`]
//! and prints the rendered state after every change.

pub mod commands;
pub mod render;
pub mod shell;
pub mod transport;

pub use commands::Command;
pub use shell::{run, Reply, Shell};
pub use transport::Transport;
