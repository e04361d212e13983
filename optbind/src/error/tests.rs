//! Unit tests for error rendering and classification.

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::OptbindError;

fn flag_error() -> OptbindError {
    Command::new("demo")
        .error(ErrorKind::UnknownArgument, "unexpected argument '--bogus'")
        .into()
}

#[rstest]
#[case(
    OptbindError::NotEnoughArguments { command: "serve".into() },
    "serve: not enough arguments"
)]
#[case(
    OptbindError::UnknownSubcommand { token: "bogus".into(), command: "serve".into() },
    "'bogus' is not a serve command"
)]
#[case(
    OptbindError::MissingRequired { name: "port".into() },
    "opt 'port' is required but not passed"
)]
#[case(
    OptbindError::MalformedRequired { field: "port".into(), value: "yes".into() },
    "field 'port' has a malformed required tag 'yes'"
)]
fn renders_messages(#[case] err: OptbindError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn dispatch_errors_are_input_errors() {
    let err = OptbindError::UnknownSubcommand {
        token: "x".into(),
        command: "root".into(),
    };
    assert!(err.is_dispatch_error());
    assert!(err.is_input_error());
    assert!(!err.is_configuration_error());
}

#[test]
fn flag_errors_are_input_but_not_dispatch_errors() {
    let err = flag_error();
    assert!(matches!(err, OptbindError::Flags(_)));
    assert!(err.is_input_error());
    assert!(!err.is_dispatch_error());
}

#[rstest]
#[case(OptbindError::MissingAction { command: "leaf".into() })]
#[case(OptbindError::InvalidOptionName { field: "_".into() })]
#[case(OptbindError::DuplicateOption {
    name: "port".into(),
    first: "port".into(),
    second: "Port".into(),
})]
fn declaration_mistakes_are_configuration_errors(#[case] err: OptbindError) {
    assert!(err.is_configuration_error());
    assert!(!err.is_input_error());
}

#[test]
fn action_failures_keep_their_source() {
    let err = OptbindError::Action {
        command: "http".into(),
        source: "port in use".into(),
    };
    assert_eq!(err.to_string(), "command 'http' failed: port in use");
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("port in use"));
}
