use clap::Parser;
use log::{error, info};
use server::log_source::{list_matches_from, FileLogSource, LineSource};
use server::network::Server;
use shared::DEFAULT_LOG_FILE;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "27960")]
    port: u16,

    /// Quake 3 Arena server log to report on
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    log: String,

    /// Print every match report as JSON and exit instead of serving
    #[arg(long)]
    print: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let source = FileLogSource::new(&args.log);

    if args.print {
        let reports = list_matches_from(&source)?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    info!("Reporting on log file {}", source.path().display());
    if let Err(e) = source.read_lines() {
        // Queries re-read the file, so a missing log is reported per request
        error!("{}", e);
    }

    let address = format!("{}:{}", args.host, args.port);
    let mut server = Server::new(&address, Arc::new(source)).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
