//! Declarative command trees whose options are bound from flags and the
//! environment.
//!
//! A program declares a tree of [`Command`]s. Each command may carry an
//! options record: a plain struct of `String` fields that implements
//! [`Options`], usually through `#[derive(Options)]`. Dispatch walks the tree
//! using the leading positional arguments, then resolves the selected
//! command's options in priority order:
//!
//! 1. `--<name> <value>` flags,
//! 2. environment variables named after the option (`max-retry-count` reads
//!    `MAX_RETRY_COUNT`),
//!
//! and finally rejects the invocation if a required option is still unset.
//! Option names are derived from field identifiers by [`derive_name`].
//!
//! ```
//! use std::collections::HashMap;
//! use optbind::{Command, Dispatcher, Options};
//!
//! #[derive(Default, Options)]
//! struct Http {
//!     #[opt(desc = "port to listen on", required = "true")]
//!     port: String,
//!     #[opt(desc = "address to bind")]
//!     bind_addr: String,
//! }
//!
//! let mut http = Http::default();
//! let root = Command::new("app").subcommand(
//!     Command::new("serve")
//!         .subcommand(Command::new("http").action_with(&mut http, |_, _| Ok(()))),
//! );
//! let env = HashMap::from([("BIND_ADDR".to_owned(), "0.0.0.0".to_owned())]);
//! Dispatcher::new(root)
//!     .with_env(env)
//!     .execute_from(["app", "serve", "http", "--port", "8080"])?;
//!
//! assert_eq!(http.port, "8080");
//! assert_eq!(http.bind_addr, "0.0.0.0");
//! # Ok::<(), optbind::OptbindError>(())
//! ```

extern crate self as optbind;

pub use optbind_macros::Options;

mod command;
mod dispatch;
mod env;
mod error;
mod fields;
mod flags;
mod name;
mod opt;
mod parser;

pub use command::{Command, Invocation};
pub use dispatch::{Dispatcher, RouterPolicy};
pub use env::{Environment, ProcessEnv};
pub use error::{ActionError, OptbindError, OptbindResult};
pub use fields::{FieldDescriptor, Options, discover};
pub use flags::Flags;
pub use name::{SEPARATOR, derive_name, env_key};
pub use opt::{Opt, OptState, ResolvedOpt, parse_bool_tag};
pub use parser::parse_flags;
