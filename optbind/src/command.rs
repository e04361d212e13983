//! Command tree nodes and their bound actions.

use std::fmt;

use crate::env::Environment;
use crate::error::{ActionError, OptbindError, OptbindResult};
use crate::fields::{FieldDescriptor, Options};
use crate::flags::Flags;
use crate::opt::ResolvedOpt;
use crate::parser::parse_flags;

/// Context handed to an action once its options are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Program name the process was started as.
    pub executed_as: String,
    /// Command names from the root to the executing command.
    pub path: Vec<String>,
    /// Positional arguments left after the flags.
    pub args: Vec<String>,
    /// Every option of the command, in discovery order.
    pub options: Vec<ResolvedOpt>,
}

impl Invocation {
    /// Looks up a resolved option by derived name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ResolvedOpt> {
        self.options.iter().find(|opt| opt.name == name)
    }
}

/// Options record paired with what to do once it is filled in.
trait Handler {
    /// Leaf fields of the bound record, or `None` when the command takes no
    /// options at all.
    fn describe(&mut self) -> Option<Vec<FieldDescriptor<'_>>>;
    fn has_action(&self) -> bool;
    /// Runs the action, or returns `None` when none is bound.
    fn run(&mut self, invocation: &Invocation) -> Option<Result<(), ActionError>>;
}

struct Bound<O, F> {
    options: O,
    action: Option<F>,
}

impl<O, F> Handler for Bound<O, F>
where
    O: Options,
    F: FnMut(&O, &Invocation) -> Result<(), ActionError>,
{
    fn describe(&mut self) -> Option<Vec<FieldDescriptor<'_>>> {
        Some(self.options.describe())
    }

    fn has_action(&self) -> bool {
        self.action.is_some()
    }

    fn run(&mut self, invocation: &Invocation) -> Option<Result<(), ActionError>> {
        let action = self.action.as_mut()?;
        Some(action(&self.options, invocation))
    }
}

type NoAction<O> = fn(&O, &Invocation) -> Result<(), ActionError>;

/// An action that takes no options record.
struct Plain<F>(F);

impl<F> Handler for Plain<F>
where
    F: FnMut(&Invocation) -> Result<(), ActionError>,
{
    fn describe(&mut self) -> Option<Vec<FieldDescriptor<'_>>> {
        None
    }

    fn has_action(&self) -> bool {
        true
    }

    fn run(&mut self, invocation: &Invocation) -> Option<Result<(), ActionError>> {
        Some((self.0)(invocation))
    }
}

/// A node of the command tree.
///
/// Nodes with children route to one of them by name. Nodes without children
/// resolve their options and run their action.
///
/// # Examples
///
/// ```
/// use optbind::{Command, Options};
///
/// #[derive(Default, Options)]
/// struct Http {
///     #[opt(required = "true")]
///     port: String,
/// }
///
/// let root = Command::new("app").subcommand(
///     Command::new("serve").subcommand(Command::new("http").action_with(
///         Http::default(),
///         |http, _| {
///             assert_eq!(http.port, "8080");
///             Ok(())
///         },
///     )),
/// );
/// assert_eq!(root.children().len(), 1);
/// ```
pub struct Command<'a> {
    name: String,
    children: Vec<Command<'a>>,
    handler: Option<Box<dyn Handler + 'a>>,
}

impl<'a> Command<'a> {
    /// Creates a command without options, children or action.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            handler: None,
        }
    }

    /// Appends a child command. Children are matched in declaration order.
    #[must_use]
    pub fn subcommand(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets an action for a command that takes no options.
    ///
    /// Such a command does not parse flags: every argument left after
    /// routing reaches the action untouched.
    #[must_use]
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&Invocation) -> Result<(), ActionError> + 'a,
    {
        self.handler = Some(Box::new(Plain(action)));
        self
    }

    /// Binds an options record and the action that consumes it.
    ///
    /// Pass `&mut record` to keep ownership of the record and read the
    /// resolved values after dispatch.
    #[must_use]
    pub fn action_with<O, F>(mut self, options: O, action: F) -> Self
    where
        O: Options + 'a,
        F: FnMut(&O, &Invocation) -> Result<(), ActionError> + 'a,
    {
        self.handler = Some(Box::new(Bound {
            options,
            action: Some(action),
        }));
        self
    }

    /// Binds an options record without an action.
    ///
    /// Reaching such a command is reported as
    /// [`crate::OptbindError::MissingAction`].
    #[must_use]
    pub fn options<O>(mut self, options: O) -> Self
    where
        O: Options + 'a,
    {
        self.handler = Some(Box::new(Bound::<O, NoAction<O>> {
            options,
            action: None,
        }));
        self
    }

    /// Name used to select this command.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child commands in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether the command routes to children.
    #[must_use]
    pub fn is_router(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether an action is bound.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.handler.as_ref().is_some_and(|handler| handler.has_action())
    }

    /// Finds the child whose name is exactly `name`.
    #[must_use]
    pub fn subcommand_named(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    pub(crate) fn subcommand_named_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Resolves the options of this command from `args` and `env`.
    ///
    /// Flags are parsed first, untouched options then fall back to the
    /// environment, and finally every required option must have a value.
    /// Values written before a failure stay in the record. A command without
    /// an options record skips all of this and treats every argument as
    /// positional.
    ///
    /// Returns the positional arguments and a snapshot of every option.
    ///
    /// # Errors
    ///
    /// Propagates malformed metadata, duplicate names, flag syntax errors and
    /// missing required options.
    pub fn resolve<E>(
        &mut self,
        args: &[String],
        env: &E,
        env_prefix: Option<&str>,
    ) -> OptbindResult<(Vec<String>, Vec<ResolvedOpt>)>
    where
        E: Environment + ?Sized,
    {
        let Some(fields) = self.handler.as_mut().and_then(|handler| handler.describe()) else {
            return Ok((args.to_vec(), Vec::new()));
        };
        let mut flags = Flags::from_fields(fields)?;
        let positional = parse_flags(&self.name, &mut flags, args.iter().cloned())?;
        flags.apply_env(env, env_prefix);
        flags.check_required()?;
        Ok((positional, flags.resolved()))
    }

    /// Runs the bound action.
    ///
    /// Fails with [`OptbindError::MissingAction`] when no action is bound and
    /// with [`OptbindError::Action`] when the action fails.
    pub(crate) fn run(&mut self, invocation: &Invocation) -> OptbindResult<()> {
        let outcome = self
            .handler
            .as_mut()
            .and_then(|handler| handler.run(invocation));
        outcome.map_or_else(
            || {
                Err(OptbindError::MissingAction {
                    command: self.name.clone(),
                })
            },
            |result| {
                result.map_err(|source| OptbindError::Action {
                    command: self.name.clone(),
                    source,
                })
            },
        )
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("children", &self.children)
            .field("has_action", &self.has_action())
            .finish()
    }
}
