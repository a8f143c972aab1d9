//! Collect SAP announcements and generate an M3U playlist

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use saplist::net::{MulticastConfig, UdpSource};
use saplist::playlist::m3u;
use saplist::{SAP_MULTICAST_GROUP, SAP_PORT, collect};

/// Collect SAP announcements and generate an M3U playlist
#[derive(Parser)]
#[command(name = "saplist", version, about)]
struct Cli {
    /// Duration to listen for announcements (seconds)
    #[arg(short, long, default_value_t = 15)]
    duration: u64,

    /// Output M3U file name
    #[arg(short, long, default_value = "sap_streams.m3u")]
    output: PathBuf,

    /// Multicast group address
    #[arg(short, long, default_value_t = SAP_MULTICAST_GROUP)]
    group: Ipv4Addr,

    /// SAP port number
    #[arg(short, long, default_value_t = SAP_PORT)]
    port: u16,

    /// IPv4 address of the network interface to join the group on
    #[arg(short, long)]
    interface: Option<Ipv4Addr>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "saplist=debug" } else { "saplist=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = MulticastConfig {
        group: cli.group,
        port: cli.port,
        interface: cli.interface,
    };
    let mut source = UdpSource::bind(&config)?;

    info!(
        group = %cli.group,
        port = cli.port,
        "listening for SAP announcements for {} seconds",
        cli.duration
    );
    let report = collect(&mut source, Duration::from_secs(cli.duration)).await;
    info!(
        datagrams = report.datagrams,
        rejected = report.rejected,
        "capture window closed"
    );

    if report.channels.is_empty() {
        println!("No SAP announcements observed");
        return Ok(());
    }

    let channels = report.channels.finalize();
    m3u::write_playlist(&cli.output, &channels)?;

    println!("M3U playlist generated: {}", cli.output.display());
    println!("Total channels: {}", channels.len());
    for channel in &channels {
        println!("  {} - {}", channel.display_name(), channel.url());
    }

    Ok(())
}
