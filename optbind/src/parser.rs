//! Flag syntax, delegated to `clap`.
//!
//! A throwaway [`clap::Command`] is generated from the option set of the
//! invocation: one `--<name> <value>` argument per option plus a trailing
//! positional catch-all. Parsing stops at the first positional token (or at
//! `--`), and everything from there on is handed back untouched.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::OptbindResult;
use crate::flags::Flags;

/// Id of the positional catch-all. Derived names never contain brackets.
const POSITIONAL: &str = "[args]";

/// Parses `args` against `flags`, recording every flag that matched.
///
/// Returns the positional arguments left over after the flags.
///
/// # Errors
///
/// Returns [`crate::OptbindError::Flags`] for unknown flags and flags
/// missing their value.
pub fn parse_flags<I, T>(command: &str, flags: &mut Flags<'_>, args: I) -> OptbindResult<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let matches = flag_command(command, flags)
        .try_get_matches_from(args.into_iter().map(Into::into))?;
    let passed: Vec<(String, String)> = flags
        .iter()
        .filter_map(|opt| flag_value(&matches, opt.name()).map(|v| (opt.name().to_owned(), v)))
        .collect();
    for (name, value) in passed {
        flags.set(&name, &value);
    }
    let positional: Vec<String> = matches
        .get_many::<String>(POSITIONAL)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    tracing::debug!(command, remaining = ?positional, "flags parsed");
    Ok(positional)
}

fn flag_command(command: &str, flags: &Flags<'_>) -> Command {
    let options = flags.iter().map(|opt| {
        Arg::new(opt.name().to_owned())
            .long(opt.name().to_owned())
            .help(opt.description().to_owned())
            .value_name("VALUE")
            .num_args(1)
            .allow_hyphen_values(true)
            .action(ArgAction::Set)
    });
    Command::new(command.to_owned())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .args(options)
        .arg(
            Arg::new(POSITIONAL)
                .num_args(0..)
                .action(ArgAction::Append)
                .trailing_var_arg(true),
        )
}

fn flag_value(matches: &ArgMatches, name: &str) -> Option<String> {
    if matches.value_source(name) != Some(ValueSource::CommandLine) {
        return None;
    }
    matches.get_one::<String>(name).cloned()
}
