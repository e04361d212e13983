//! Routing process arguments through the command tree.

use std::ffi::OsString;

use crate::command::{Command, Invocation};
use crate::env::{Environment, ProcessEnv};
use crate::error::{OptbindError, OptbindResult};

/// What a router command does when no argument is left to pick a child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouterPolicy {
    /// Fail with [`OptbindError::NotEnoughArguments`].
    #[default]
    RequireSubcommand,
    /// Run the router's own action, failing as above when it has none.
    RunOwnAction,
}

/// Walks the command tree and runs the selected command.
///
/// # Examples
///
/// ```
/// use optbind::{Command, Dispatcher, OptbindError};
///
/// let root = Command::new("app").subcommand(Command::new("serve").action(|_| Ok(())));
/// let mut dispatcher = Dispatcher::new(root);
/// dispatcher.execute_from(["app", "serve"])?;
///
/// let err = dispatcher.execute_from(["app", "bogus"]).unwrap_err();
/// assert!(matches!(err, OptbindError::UnknownSubcommand { .. }));
/// # Ok::<(), OptbindError>(())
/// ```
#[derive(Debug)]
pub struct Dispatcher<'a, E = ProcessEnv> {
    root: Command<'a>,
    env: E,
    env_prefix: Option<String>,
    router_policy: RouterPolicy,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher reading fallbacks from the process environment.
    #[must_use]
    pub fn new(root: Command<'a>) -> Self {
        Self {
            root,
            env: ProcessEnv,
            env_prefix: None,
            router_policy: RouterPolicy::default(),
        }
    }
}

impl<'a, E: Environment> Dispatcher<'a, E> {
    /// Replaces the environment consulted for fallback values.
    #[must_use]
    pub fn with_env<F: Environment>(self, env: F) -> Dispatcher<'a, F> {
        Dispatcher {
            root: self.root,
            env,
            env_prefix: self.env_prefix,
            router_policy: self.router_policy,
        }
    }

    /// Prepends `prefix` to every environment variable name.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Chooses how router commands treat running out of arguments.
    #[must_use]
    pub fn with_router_policy(mut self, policy: RouterPolicy) -> Self {
        self.router_policy = policy;
        self
    }

    /// Root of the command tree.
    #[must_use]
    pub const fn root(&self) -> &Command<'a> {
        &self.root
    }

    /// Dispatches the arguments of the current process.
    ///
    /// # Errors
    ///
    /// As [`Self::execute_os`].
    pub fn execute(&mut self) -> OptbindResult<()> {
        self.execute_os(std::env::args_os())
    }

    /// Dispatches platform strings, whose first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`OptbindError::InvalidUnicode`] for the first argument that
    /// is not valid Unicode, before any command is selected. Otherwise as
    /// [`Self::execute_from`].
    pub fn execute_os<I>(&mut self, args: I) -> OptbindResult<()>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = args
            .into_iter()
            .map(|arg| {
                arg.into_string().map_err(|raw| OptbindError::InvalidUnicode {
                    argument: raw.to_string_lossy().into_owned(),
                })
            })
            .collect::<OptbindResult<Vec<_>>>()?;
        self.execute_from(args)
    }

    /// Dispatches `args`, whose first item is the program name.
    ///
    /// Arguments name subcommands until a command without children is
    /// reached. That command's options are resolved from the remaining
    /// arguments and the environment, then its action runs.
    ///
    /// # Errors
    ///
    /// Returns dispatch errors when the arguments do not select a command,
    /// any resolution error of the selected command, and
    /// [`OptbindError::Action`] when its action fails.
    pub fn execute_from<I, T>(&mut self, args: I) -> OptbindResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let executed_as = args.next().unwrap_or_default();
        let rest: Vec<String> = args.collect();

        let policy = self.router_policy;
        let (target, path, remaining) = route(&mut self.root, &rest, policy)?;
        tracing::debug!(path = ?path, "command selected");
        // Nothing is written into the record of a command that cannot run.
        if !target.has_action() {
            return Err(OptbindError::MissingAction {
                command: target.name().to_owned(),
            });
        }

        let (positional, options) =
            target.resolve(remaining, &self.env, self.env_prefix.as_deref())?;
        let invocation = Invocation {
            executed_as,
            path,
            args: positional,
            options,
        };
        target.run(&invocation)
    }
}

/// Follows `args` from `root` down to the command that should run.
///
/// Returns the command, the names along the way and the arguments left for
/// its flags.
fn route<'c, 'a, 'r>(
    root: &'c mut Command<'a>,
    args: &'r [String],
    policy: RouterPolicy,
) -> OptbindResult<(&'c mut Command<'a>, Vec<String>, &'r [String])> {
    let mut node = root;
    let mut path = vec![node.name().to_owned()];
    let mut remaining = args;
    while node.is_router() {
        let Some((token, rest)) = remaining.split_first() else {
            if policy == RouterPolicy::RunOwnAction && node.has_action() {
                break;
            }
            return Err(OptbindError::NotEnoughArguments {
                command: node.name().to_owned(),
            });
        };
        let command = node.name().to_owned();
        let Some(child) = node.subcommand_named_mut(token) else {
            return Err(OptbindError::UnknownSubcommand {
                token: token.clone(),
                command,
            });
        };
        path.push(child.name().to_owned());
        node = child;
        remaining = rest;
    }
    Ok((node, path, remaining))
}
