use anyhow::Result;
use clap::Parser;
use sitedocs_server::{build_router, AppState};
use sitedocs_store::{ProjectStore, StoreConfig};
use std::path::PathBuf;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "sitedocs")]
#[command(about = "Construction project document manager", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Root directory of the project tree
    #[arg(long, default_value = "./Projects")]
    base_dir: PathBuf,

    /// Staging directory for uploads
    #[arg(long, default_value = "./Uploads")]
    upload_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = StoreConfig::new(cli.base_dir, cli.upload_dir);
    config.ensure_base_dir()?;
    let store = ProjectStore::new(config);

    let app = build_router(AppState { store }).layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    println!("Serving sitedocs on http://{}/", cli.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
