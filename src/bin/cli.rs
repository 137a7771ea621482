//! FrameKV CLI Client
//!
//! Command-line interface for interacting with FrameKV.

use clap::{Parser, Subcommand};
use framekv::{Client, KvError};

/// FrameKV CLI
#[derive(Parser, Debug)]
#[command(name = "framekv-cli")]
#[command(about = "CLI for FrameKV key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8999")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), KvError> {
    let mut client = Client::connect(args.server.as_str())?;

    match &args.command {
        Commands::Get { key } => {
            let value = client.get(key.as_bytes())?;
            println!("{}", String::from_utf8_lossy(&value));
        }
        Commands::Set { key, value } => {
            client.set(key.as_bytes(), value.as_bytes())?;
            println!("OK");
        }
    }

    Ok(())
}
