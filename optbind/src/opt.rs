//! Runtime representation of a single resolved option.

use std::fmt;

use crate::error::{OptbindError, OptbindResult};
use crate::fields::FieldDescriptor;
use crate::name::derive_name;

/// Where the current value of an option came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OptState {
    /// Neither a flag nor the environment supplied a value.
    #[default]
    Untouched,
    /// A command-line flag supplied the value.
    FlagPassed,
    /// An environment variable supplied the value.
    EnvPassed,
}

/// An option bound to the leaf field it writes into.
#[derive(Debug)]
pub struct Opt<'a> {
    name: String,
    ident: &'static str,
    description: String,
    value: String,
    state: OptState,
    required: bool,
    slot: &'a mut String,
}

impl<'a> Opt<'a> {
    /// Builds an option from a discovered field.
    ///
    /// # Errors
    ///
    /// Returns [`OptbindError::MalformedRequired`] when the `required` tag is
    /// not a recognised boolean and [`OptbindError::InvalidOptionName`] when
    /// the identifier derives an empty name.
    pub fn from_descriptor(field: FieldDescriptor<'a>) -> OptbindResult<Self> {
        let ident = field.ident();
        let name = derive_name(ident);
        if name.is_empty() {
            return Err(OptbindError::InvalidOptionName {
                field: ident.to_owned(),
            });
        }
        let required = match field.required_tag() {
            Some(tag) => parse_bool_tag(tag).ok_or_else(|| OptbindError::MalformedRequired {
                field: ident.to_owned(),
                value: tag.to_owned(),
            })?,
            None => false,
        };
        Ok(Self {
            name,
            ident,
            description: field.description().unwrap_or_default().to_owned(),
            value: String::new(),
            state: OptState::Untouched,
            required,
            slot: field.into_slot(),
        })
    }

    /// Derived external name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the field this option writes into.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Description tag, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value recorded by the last write, empty while untouched.
    ///
    /// The field itself keeps whatever it held before resolution.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Source of the current value.
    #[must_use]
    pub const fn state(&self) -> OptState {
        self.state
    }

    /// Whether resolution fails when the option stays untouched.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Records a value passed as a flag.
    ///
    /// Repeated flags overwrite one another; the last one wins.
    pub fn set(&mut self, value: &str) {
        self.write(value);
        self.state = OptState::FlagPassed;
    }

    /// Records a value read from the environment.
    ///
    /// Only an untouched option accepts it, so a flag value is never
    /// replaced. Returns whether the value was applied.
    pub fn fallback(&mut self, value: &str) -> bool {
        if self.state != OptState::Untouched {
            return false;
        }
        self.write(value);
        self.state = OptState::EnvPassed;
        true
    }

    /// Captures an owned snapshot of the option.
    #[must_use]
    pub fn resolved(&self) -> ResolvedOpt {
        ResolvedOpt {
            name: self.name.clone(),
            description: self.description.clone(),
            value: self.value.clone(),
            state: self.state,
            required: self.required,
        }
    }

    fn write(&mut self, value: &str) {
        value.clone_into(self.slot);
        value.clone_into(&mut self.value);
    }
}

impl fmt::Display for Opt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Owned view of an option after resolution finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOpt {
    /// Derived external name.
    pub name: String,
    /// Description tag, empty when none was given.
    pub description: String,
    /// Final value. Empty for untouched options, even when the field holds a
    /// default.
    pub value: String,
    /// Source of the final value.
    pub state: OptState,
    /// Whether the option was declared required.
    pub required: bool,
}

/// Parses the textual boolean grammar accepted in `required` tags.
///
/// # Examples
///
/// ```
/// use optbind::parse_bool_tag;
///
/// assert_eq!(parse_bool_tag("true"), Some(true));
/// assert_eq!(parse_bool_tag("F"), Some(false));
/// assert_eq!(parse_bool_tag("yes"), None);
/// ```
#[must_use]
pub fn parse_bool_tag(tag: &str) -> Option<bool> {
    match tag {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
