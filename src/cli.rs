//! CLI definition using clap

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::godaddy::DEFAULT_TTL;

#[derive(Parser)]
#[command(name = "gddy")]
#[command(version)]
#[command(about = "GoDaddy DNS management from the command line")]
#[command(after_help = r#"Examples:
  gddy domains
  gddy records example.com --type A
  gddy add example.com --name api --type A --data 1.2.3.4
  gddy update example.com --name api --type A --data 5.6.7.8 --force
  gddy delete example.com --name api --type A
  gddy serve --bind 127.0.0.1:8080

Credentials come from --key/--secret, from GODADDY_TOKEN/GODADDY_SECRET
(GODADDY_API_KEY/GODADDY_API_SECRET also work), or from an interactive
prompt when -i is given."#)]
pub struct Cli {
    /// API key (overrides the environment)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// API secret (overrides the environment)
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Prompt for missing credentials and open the operations menu
    #[arg(short = 'i', long, global = true)]
    pub interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List domains registered to the account
    Domains,

    /// List DNS records for a domain
    #[command(after_help = "Examples:
  gddy records example.com
  gddy records example.com --type A --name www")]
    Records {
        /// Domain name (e.g. example.com)
        domain: String,

        /// Only records of this type
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,

        /// Only records with this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Add a DNS record
    #[command(after_help = "Examples:
  gddy add example.com --name api --type A --data 1.2.3.4
  gddy add example.com --name @ --type TXT --data 'v=spf1 -all' --ttl 600")]
    Add {
        /// Domain name
        domain: String,

        /// Record name (e.g. www, or @ for the apex)
        #[arg(short, long)]
        name: String,

        /// Record type (A, AAAA, CNAME, TXT, ...)
        #[arg(short = 't', long = "type")]
        record_type: String,

        /// Record data (address, target, text, ...)
        #[arg(short, long)]
        data: String,

        /// Time to live in seconds
        #[arg(long, default_value_t = DEFAULT_TTL)]
        ttl: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Replace the data of an existing record
    #[command(after_help = "Examples:
  gddy update example.com --name api --type A --data 5.6.7.8")]
    Update {
        /// Domain name
        domain: String,

        /// Record name
        #[arg(short, long)]
        name: String,

        /// Record type
        #[arg(short = 't', long = "type")]
        record_type: String,

        /// New record data
        #[arg(short, long)]
        data: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete records matching the filters
    #[command(after_help = "Examples:
  gddy delete example.com --name api --type A
  gddy delete example.com --type TXT --force")]
    Delete {
        /// Domain name
        domain: String,

        /// Only records with this name
        #[arg(short, long)]
        name: Option<String>,

        /// Only records of this type
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the same operations over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Static bearer token required on /api routes (health stays open)
    #[arg(long, env = "GDDY_SERVER_TOKEN")]
    pub token: Option<String>,
}
