//! CLI administration tool for kv-shortener.
//!
//! Talks to the configured store directly, without going through the HTTP
//! API. Uses the same environment configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (same allocation protocol as POST /shorten)
//! cargo run --bin admin -- shorten "https://example.com/some/path"
//!
//! # Look up the URL behind a code
//! cargo run --bin admin -- resolve aB3dE9
//!
//! # Show the reverse-mapping key for a URL
//! cargo run --bin admin -- fingerprint "https://example.com/some/path"
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```

use kv_shortener::application::services::{AllocatorError, CodeAllocator};
use kv_shortener::config::{self, StoreBackend};
use kv_shortener::infrastructure::store;
use kv_shortener::utils::fingerprint;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing kv-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Allocate (or look up) the short code for a URL
    Shorten {
        /// URL to shorten
        url: String,
    },

    /// Print the URL stored for a short code
    Resolve {
        /// Short code, without the leading slash
        code: String,
    },

    /// Print the normalized URL and its reverse-mapping key
    Fingerprint {
        /// URL to fingerprint
        url: String,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Needs no store connection
    if let Commands::Fingerprint { url } = &cli.command {
        print_fingerprint(url);
        return Ok(());
    }

    let config = config::load_from_env()?;
    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND=memory: changes are discarded when this command exits".yellow()
        );
    }

    let store = store::connect(&config).await?;

    match cli.command {
        Commands::Shorten { url } => {
            let allocator = CodeAllocator::with_random_codes(store, config.allocation_policy);
            let code = allocator.shorten(&url).await?;
            println!("{}", "✅ Short code ready".green().bold());
            println!("  URL:   {}", fingerprint::normalize(&url).cyan());
            println!("  Code:  {}", code.bright_yellow().bold());
            println!("  Path:  /{}", code);
            println!("  Ladder: {}", allocator.policy().to_string().dimmed());
        }
        Commands::Resolve { code } => {
            let allocator = CodeAllocator::with_random_codes(store, config.allocation_policy);
            match allocator.resolve(&code).await {
                Ok(url) => println!("{}", url),
                Err(AllocatorError::NotFound { .. }) => {
                    println!("{} {}", "❌ Unknown code:".red(), code);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Store { action } => match action {
            StoreAction::Check => {
                if store.health_check().await {
                    println!("{}", "✅ Store connection OK".green().bold());
                } else {
                    println!("{}", "❌ Store connection failed".red().bold());
                    std::process::exit(1);
                }
            }
        },
        Commands::Fingerprint { .. } => {}
    }

    Ok(())
}

fn print_fingerprint(url: &str) {
    let normalized = fingerprint::normalize(url);
    println!("  Normalized:  {}", normalized.cyan());
    println!("  Fingerprint: {}", fingerprint::fingerprint(normalized));
    println!(
        "  Reverse key: {}",
        fingerprint::reverse_key(normalized).bright_white()
    );
}
