use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Parser, Debug)]
#[command(
    name = "ff-net-worth-calc",
    version,
    about = "Calculate net-worth of a Freifunk community"
)]
pub struct Cli {
    #[arg(long = "meshviewer-json", value_name = "URL", help = "meshviewer.json URL")]
    pub meshviewer_json: Vec<String>,
    #[arg(long = "nodes-json", value_name = "URL", help = "nodes.json URL (v1 or v2)")]
    pub nodes_json: Vec<String>,
    #[arg(long = "alfred-json", value_name = "URL", help = "alfred.json URL")]
    pub alfred_json: Vec<String>,
    #[arg(long, value_name = "URL", help = "Franken extended routerlist URL")]
    pub franken: Vec<String>,
    #[arg(
        long = "url",
        value_name = "URL",
        help = "URL or file in any supported format, detected from its content"
    )]
    pub urls: Vec<String>,
    #[arg(
        long = "exclude-domain",
        value_name = "DOMAIN",
        help = "Domains to exclude for calculation (meshviewer only)"
    )]
    pub exclude_domain: Vec<String>,
    #[arg(long, help = "Stats as JSON")]
    pub output_json: bool,
    #[arg(
        long,
        env = "FF_NET_WORTH_DEVICES",
        value_name = "PATH",
        help = "Price table to use instead of the bundled one"
    )]
    pub devices: Option<PathBuf>,
    #[arg(
        long,
        env = "FF_NET_WORTH_TIMEOUT_MS",
        value_name = "MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        help = "Timeout for each download"
    )]
    pub timeout_ms: u64,
    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v info, -vv debug)")]
    pub verbose: u8,
}
