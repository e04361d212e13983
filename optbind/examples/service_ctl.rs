//! Example service controller built on `optbind`.
//!
//! ```text
//! service_ctl serve http --port 8080
//! SERVICE_CTL_PORT=9090 SERVICE_CTL_BIND_ADDR=127.0.0.1 service_ctl serve http
//! SERVICE_CTL_DATABASE_URL=postgres://db service_ctl migrate --steps 2
//! ```
//!
//! Every option can also be supplied through an environment variable named
//! after it, with the `SERVICE_CTL_` prefix.
//! Set `RUST_LOG=optbind=debug` to watch routing and resolution.

use std::io::{self, Write};
use std::process::ExitCode;

use optbind::{ActionError, Command, Dispatcher, Invocation, OptbindError, Options};
use tracing_subscriber::EnvFilter;

/// Options of `serve http`.
#[derive(Debug, Default, Options)]
struct Http {
    #[opt(desc = "port to listen on", required = "true")]
    port: String,
    #[opt(desc = "address to bind")]
    bind_addr: String,
}

/// Options of `serve grpc`.
#[derive(Debug, Default, Options)]
struct Grpc {
    #[opt(desc = "port to listen on", required = true)]
    port: String,
    #[opt(flatten)]
    tls: Tls,
}

/// TLS material shared by listeners.
#[derive(Debug, Default, Options)]
struct Tls {
    #[opt(desc = "certificate chain in PEM format")]
    cert_file: String,
    #[opt(desc = "private key in PEM format")]
    key_file: String,
}

/// Options of `migrate`.
#[derive(Debug, Default, Options)]
struct Migrate {
    #[opt(desc = "database connection string", required = "true")]
    database_url: String,
    #[opt(desc = "number of migrations to apply")]
    steps: String,
}

fn write_line(text: &str) -> Result<(), ActionError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}

fn report(invocation: &Invocation) -> Result<(), ActionError> {
    for opt in &invocation.options {
        write_line(&format!(
            "  {:<12} {:<16} {:?}",
            opt.name, opt.value, opt.state
        ))?;
    }
    Ok(())
}

fn serve_http(http: &Http, invocation: &Invocation) -> Result<(), ActionError> {
    let bind = if http.bind_addr.is_empty() {
        "0.0.0.0"
    } else {
        http.bind_addr.as_str()
    };
    write_line(&format!("serving http on {bind}:{}", http.port))?;
    report(invocation)
}

fn serve_grpc(grpc: &Grpc, invocation: &Invocation) -> Result<(), ActionError> {
    if grpc.tls.cert_file.is_empty() != grpc.tls.key_file.is_empty() {
        return Err("cert-file and key-file must be passed together".into());
    }
    write_line(&format!("serving grpc on port {}", grpc.port))?;
    report(invocation)
}

fn migrate(migrate: &Migrate, invocation: &Invocation) -> Result<(), ActionError> {
    let steps = if migrate.steps.is_empty() {
        None
    } else {
        Some(migrate.steps.parse::<u32>()?)
    };
    match steps {
        Some(n) => write_line(&format!("applying {n} migrations to {}", migrate.database_url))?,
        None => write_line(&format!("applying all migrations to {}", migrate.database_url))?,
    }
    if !invocation.args.is_empty() {
        write_line(&format!("ignoring extra arguments {:?}", invocation.args))?;
    }
    Ok(())
}

fn tree<'a>(http: &'a mut Http, grpc: &'a mut Grpc) -> Command<'a> {
    Command::new("service_ctl")
        .subcommand(
            Command::new("serve")
                .subcommand(Command::new("http").action_with(http, |h, inv| serve_http(h, inv)))
                .subcommand(Command::new("grpc").action_with(grpc, |g, inv| serve_grpc(g, inv))),
        )
        .subcommand(Command::new("migrate").action_with(Migrate::default(), migrate))
}

fn explain(err: &OptbindError) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "service_ctl: {err}")?;
    if err.is_dispatch_error() {
        writeln!(stderr, "commands: serve http, serve grpc, migrate")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut http = Http::default();
    let mut grpc = Grpc::default();
    let outcome = Dispatcher::new(tree(&mut http, &mut grpc))
        .with_env_prefix("SERVICE_CTL_")
        .execute();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "dispatch failed");
            if let Err(io_err) = explain(&err) {
                tracing::warn!(error = %io_err, "could not write to stderr");
            }
            if err.is_input_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
