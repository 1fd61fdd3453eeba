use clap::{Parser, Subcommand};

/// Single-use order-key relay for IPFS pinning
#[derive(Parser)]
#[command(name = "pinrelay", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server
    Serve {
        /// Port to bind (overrides RELAY_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
