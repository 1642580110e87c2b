//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A minimal static blog generator for markdown articles", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Category for the new article
        #[arg(short = 'C', long, default_value = "Misc")]
        category: String,
    },

    /// List site content
    List {
        /// Type of content to list (article, category)
        #[arg(default_value = "article")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Resolve the base directory once, here; nothing below reads ambient
    // process state.
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate { watch } => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            tracing::info!("Generating static files...");

            inkpress::commands::generate::run(&app)?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                inkpress::commands::generate::watch(&app).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let app = inkpress::Inkpress::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            app.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkpress::server::start(&app, &ip, port, !r#static, open).await?;
        }

        Commands::New { title, category } => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            tracing::info!("Creating new article: {}", title);
            inkpress::commands::new::run(&app, &title, &category)?;
        }

        Commands::List { r#type } => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            inkpress::commands::list::run(&app, &r#type)?;
        }

        Commands::Clean => {
            let app = inkpress::Inkpress::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("inkpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
