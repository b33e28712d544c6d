//! # Frag Log Client Library
//!
//! Command-line side of the frag log service. It sends match queries to a
//! running server and renders the replies.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! `QueryClient` wraps a UDP socket:
//! - one request per call, tagged with a fresh request id
//! - waits for the reply carrying that id, up to a timeout
//! - ignores stray or undecodable datagrams
//!
//! ### Output Module (`output`)
//! Renders reports as aligned text or pretty JSON.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::QueryClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = QueryClient::new("127.0.0.1:27960", Duration::from_secs(2)).await?;
//!
//!     match client.find_match("game_1").await? {
//!         Some(report) => print!("{}", client::output::render_report(&report)),
//!         None => println!("Match 'game_1' not found."),
//!     }
//!     Ok(())
//! }
//! ```

pub mod network;
pub mod output;
