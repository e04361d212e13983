//! Records derive `Options` through a re-exported path.

mod cli_kit {
    pub use ::optbind;
}

use cli_kit::optbind::{Command, Dispatcher};

/// Options reached through the `cli_kit` re-export.
#[derive(Default, cli_kit::optbind::Options)]
#[opt(crate = "cli_kit::optbind")]
struct Deploy {
    #[opt(desc = "target environment", required = true)]
    target: String,
}

fn main() {
    let root = Command::new("ops").subcommand(Command::new("deploy").action_with(
        Deploy::default(),
        |deploy, _| {
            let _: &str = &deploy.target;
            Ok(())
        },
    ));
    let _ = Dispatcher::new(root);
}
