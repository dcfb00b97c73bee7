use std::net::SocketAddr;
use std::path::PathBuf;

use cask_server::{CaskServer, PathScheme, ServerConfig};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "caskd",
    about = "Cask — content-addressable file server",
    version
)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:4000")]
    bind: SocketAddr,

    /// Storage root directory
    #[arg(short, long, default_value = "cask-data")]
    root: PathBuf,

    /// Path derivation scheme
    #[arg(long, value_enum, default_value = "cas")]
    scheme: PathScheme,

    /// Maximum upload size in bytes
    #[arg(long, default_value_t = 100 * 1024 * 1024)]
    max_upload_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = ServerConfig {
        bind_addr: args.bind,
        storage_root: args.root,
        scheme: args.scheme,
        max_upload_size: args.max_upload_size,
    };
    CaskServer::new(config).serve().await?;
    Ok(())
}
