use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_PORT;
use crate::error::Result;
use crate::utils::resolve_port;

#[derive(Parser)]
#[command(name = "macd-screener")]
#[command(about = "Naver Finance MACD momentum screener", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Listening port; overrides the PORT environment variable
        #[arg(short, long)]
        port: Option<u16>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or_else(|| resolve_port(DEFAULT_PORT));
            crate::server::serve(port).await
        }
    }
}
