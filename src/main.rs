use cbe_lod::config::Config;
use cbe_lod::logging;
use cbe_lod::pipeline::{FileStatus, Pipeline, PipelineResult};
use cbe_lod::server::{self, AppState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cbe_lod")]
#[command(about = "Belgian company register (CBE) open data to linked data")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a full register extract into cbe.nt and cbetypes.nt
    Convert {
        /// Directory with the extract's CSV files
        input: PathBuf,
        /// Directory receiving the output files
        output: PathBuf,
    },
    /// Convert an update extract into cbe-upd.nt and *_id.csv retraction lists
    Update {
        input: PathBuf,
        output: PathBuf,
    },
    /// Serve entity lookups over HTTP
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// N-Triples file produced by `convert`, used before the public search
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

fn print_result(result: &PipelineResult) {
    println!("\n📊 Results for {}:", result.output_file);
    for file in &result.files {
        let status = match file.status {
            FileStatus::Processed => "ok",
            FileStatus::Missing => "missing",
            FileStatus::Failed => "FAILED",
        };
        println!(
            "   {:<28} {:>8} rows {:>10} written  {}",
            file.file_name, file.rows_read, file.written, status
        );
    }
    println!("   Statements: {}", result.triples_written);
    if result.ids_written > 0 {
        println!("   Retracted ids: {}", result.ids_written);
    }

    let errors = result.errors();
    if !errors.is_empty() {
        println!("\n⚠️  Errors encountered:");
        for error in &errors {
            println!("   - {}", error);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Convert { input, output } => {
            println!("🔄 Converting {}...", input.display());
            let pipeline = Pipeline::from_config(&config);
            let results =
                tokio::task::spawn_blocking(move || pipeline.convert(&input, &output)).await??;
            for result in &results {
                print_result(result);
            }
        }
        Commands::Update { input, output } => {
            println!("🔄 Converting update {}...", input.display());
            let pipeline = Pipeline::from_config(&config);
            let result =
                tokio::task::spawn_blocking(move || pipeline.update(&input, &output)).await??;
            print_result(&result);
        }
        Commands::Serve { port, store } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if store.is_some() {
                config.server.store = store;
            }
            cbe_lod::metrics::init_metrics();

            let state = AppState::from_config(&config)?;
            info!("Starting lookup service on port {}", config.server.port);
            if let Err(e) = server::start_server(state, config.server.port).await {
                error!("Server stopped: {}", e);
                return Err(e);
            }
        }
    }
    Ok(())
}
