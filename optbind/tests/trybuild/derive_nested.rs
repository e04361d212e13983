//! Nested and empty records derive `Options` from a downstream crate.

use optbind::{Command, Dispatcher, Options};

/// Storage settings shared by several commands.
#[derive(Default, Options)]
struct Storage {
    #[opt(desc = "database URL", required = true)]
    database_url: String,
}

/// Settings of the `migrate` command.
#[derive(Default, Options)]
struct Migrate {
    #[opt(flatten)]
    storage: Storage,
    #[opt(desc = "steps to apply", required = "false")]
    steps: String,
}

/// Records without fields still implement the trait.
#[derive(Options)]
struct Empty {}

fn main() {
    let root = Command::new("db")
        .subcommand(Command::new("migrate").action_with(Migrate::default(), |m, _| {
            let _: &str = &m.storage.database_url;
            Ok(())
        }))
        .subcommand(Command::new("noop").options(Empty {}));
    let _ = Dispatcher::new(root);
}
