//! `users`: command-line caller for the `/api/users` collection.
//!
//! Connection settings come from `USERS_API_HOST` / `USERS_API_PORT`, with
//! `--host` / `--port` taking precedence. Set `RUST_LOG=debug` to see every
//! request and response status on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use users_core::{ClientConfig, NewUser, ResourceApi, UserId, UserPatch, UsersApi};

#[derive(Debug, Parser)]
#[command(name = "users", version, about = "List, search and edit users over the REST API")]
struct Cli {
    /// Backend host, overrides USERS_API_HOST.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Backend port, overrides USERS_API_PORT.
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every user.
    List,
    /// Print users matching a query; the server decides what matches.
    Search { query: String },
    /// Create a user and print what the server stored.
    Create(Fields),
    /// Change the given fields of one user.
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete one user.
    Delete { id: String },
}

#[derive(Debug, Default, Args)]
struct Fields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
    #[arg(long)]
    date_of_birth: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

impl From<Fields> for NewUser {
    fn from(f: Fields) -> Self {
        NewUser {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            status: f.status,
            phone_number: f.phone_number,
            date_of_birth: f.date_of_birth,
            address: f.address,
        }
    }
}

impl From<Fields> for UserPatch {
    fn from(f: Fields) -> Self {
        UserPatch {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            status: f.status,
            phone_number: f.phone_number,
            date_of_birth: f.date_of_birth,
            address: f.address,
        }
    }
}

impl Cli {
    fn config(&self) -> Result<ClientConfig> {
        ClientConfig::from_env_with(self.host.clone(), self.port)
            .context("reading connection settings")
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let api: UsersApi = ResourceApi::connect(&config);

    match cli.command {
        Command::List => print_json(&api.list().context("listing users")?),
        Command::Search { query } => {
            print_json(&api.search(&query).with_context(|| format!("searching for {query:?}"))?)
        }
        Command::Create(fields) => {
            let created = api.create(&fields.into()).context("creating user")?;
            info!(id = %created.id, "created user");
            print_json(&created)
        }
        Command::Update { id, fields } => {
            let patch: UserPatch = fields.into();
            if patch.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field flag");
            }
            let id = UserId::from(id);
            api.update(&id, &patch)
                .with_context(|| format!("updating user {id}"))?;
            info!(%id, "updated user");
            Ok(())
        }
        Command::Delete { id } => {
            let id = UserId::from(id);
            api.remove(&id).with_context(|| format!("deleting user {id}"))?;
            info!(%id, "deleted user");
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
