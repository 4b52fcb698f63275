use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Parser)]
#[command(about = "Character roster HTTP service")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,
}
