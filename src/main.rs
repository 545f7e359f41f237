mod analysis;
mod capabilities;
mod io;
mod logging;
mod lsp;
mod rpc;
mod server;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use analysis::{DocumentStore, PhraseRule};
use capabilities::Dispatcher;
use io::transport::StdioTransport;
use logging::{LogConfig, init_logging};
use server::Server;

/// CLI arguments for the wordwatch LSP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Phrase to flag in open documents
    #[arg(long, value_name = "TEXT", default_value = "VS Code")]
    phrase: String,

    /// Replacement offered by the quick-fix code action
    #[arg(long, value_name = "TEXT", default_value = "Neovim")]
    replacement: String,

    /// Log level (overrides RUST_LOG env var)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log file path (overrides WORDWATCH_LOG_FILE env var)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_config = LogConfig::from_env().with_overrides(args.log_level, args.log_file);
    if let Err(e) = init_logging(log_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    info!(
        "starting {} {} (phrase: {:?})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        args.phrase
    );

    let store = DocumentStore::new(PhraseRule::new(args.phrase, args.replacement));
    let dispatcher = Dispatcher::with_default_capabilities();
    let transport = StdioTransport::new();

    let mut server = Server::new(transport, dispatcher, store);
    server.run().await?;

    info!("server shutdown");
    Ok(())
}
