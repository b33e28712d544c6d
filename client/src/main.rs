use clap::{Parser, Subcommand};
use client::network::QueryClient;
use client::output::{render_report, render_reports, to_json};
use log::info;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to query
    #[arg(short = 's', long, default_value = "127.0.0.1:27960")]
    server: String,

    /// How long to wait for a reply, in milliseconds
    #[arg(short = 't', long, default_value = "2000")]
    timeout_ms: u64,

    /// Print raw JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every match in the log
    List,
    /// Show one match by name (case-insensitive), e.g. game_3
    Find { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut client =
        QueryClient::new(&args.server, Duration::from_millis(args.timeout_ms)).await?;
    info!("Querying {}", client.server_addr());

    match args.command {
        Command::List => {
            let reports = client.list_matches().await?;
            if args.json {
                println!("{}", to_json(&reports)?);
            } else {
                print!("{}", render_reports(&reports));
            }
        }
        Command::Find { name } => match client.find_match(&name).await? {
            Some(report) if args.json => println!("{}", to_json(&report)?),
            Some(report) => print!("{}", render_report(&report)),
            None => {
                eprintln!("Match '{}' not found.", name);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
