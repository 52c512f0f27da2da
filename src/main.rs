//! gddy - GoDaddy DNS management from the command line

mod cli;
mod commands;
mod config;
mod console;
mod error;
mod godaddy;
mod interactive;
mod server;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
use commands::{domains, records, Ctx};
use console::{Console, OutputMode, Prompter, StdinPrompter};
use error::Error;
use godaddy::{GoDaddyClient, Record};

#[tokio::main]
async fn main() {
    config::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        key,
        secret,
        json,
        interactive: menu,
        command,
    } = Cli::parse();

    let console = Console::new(OutputMode::detect(json));
    let prompter = StdinPrompter;

    // No command and no menu requested: usage, not an error.
    if command.is_none() && !menu {
        let _ = Cli::command().print_help();
        return;
    }

    let credentials = match config::resolve_credentials(
        key,
        secret,
        menu.then_some(&prompter as &dyn Prompter),
    ) {
        Ok(credentials) => credentials,
        Err(e) => {
            console.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let command = match command {
        Some(Commands::Serve(args)) => {
            let client = GoDaddyClient::new(&credentials);
            if let Err(e) = server::run(client, args.bind, args.token).await {
                console.error(&format!("server failed: {e:#}"));
                std::process::exit(2);
            }
            return;
        }
        other => other,
    };

    let client = GoDaddyClient::new(&credentials);
    let ctx = Ctx {
        api: &client,
        console: &console,
        prompter: &prompter,
    };

    let result = match command {
        Some(Commands::Domains) => domains::list(&ctx).await,
        Some(Commands::Records {
            domain,
            record_type,
            name,
        }) => records::list(&ctx, &domain, record_type.as_deref(), name.as_deref()).await,
        Some(Commands::Add {
            domain,
            name,
            record_type,
            data,
            ttl,
            force,
        }) => {
            let record = Record {
                name,
                record_type,
                data,
                ttl,
            };
            records::add(&ctx, &domain, record, force).await
        }
        Some(Commands::Update {
            domain,
            name,
            record_type,
            data,
            force,
        }) => records::update(&ctx, &domain, &name, &record_type, &data, force).await,
        Some(Commands::Delete {
            domain,
            name,
            record_type,
            force,
        }) => records::delete(&ctx, &domain, name.as_deref(), record_type.as_deref(), force).await,
        Some(Commands::Serve(_)) => return, // handled above
        None => interactive::run(&ctx).await,
    };

    match result {
        Ok(()) => {}
        Err(Error::Cancelled) => console.warn("Cancelled."),
        Err(e) => {
            console.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
