//! Error types produced while routing and resolving a command invocation.

mod helpers;
mod types;

pub use types::{ActionError, OptbindError, OptbindResult};

#[cfg(test)]
mod tests;
