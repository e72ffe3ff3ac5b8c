extern crate log;
pub mod crs;
pub mod geofile;
pub mod map;
pub mod pipeline;
pub mod wfs;

use crate::wfs::download::TrustPolicy;
use crate::wfs::request::WfsEndpoint;
use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Fetch the IBGE geomorphology layer over WFS and render it as a static
/// image and an interactive web map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub wfs: WfsEndpoint,
    #[serde(default)]
    pub tls: TrustPolicy,
    pub output_dir: PathBuf,
}

const TROUBLESHOOTING: &str = "\
Troubleshooting:
  - Check that this machine can reach the internet.
  - Open the GetFeature URL in a browser to confirm the service answers.
  - A proxy or firewall may be blocking outbound HTTPS.
  - Make sure PROJ is installed so coordinate transformations are available.";

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;
    std::fs::create_dir_all(&config.output_dir).context("Creating the output directory")?;

    let summary = pipeline::run(&config)?;
    log::info!(
        "Done: {} features, static map at {:?}, interactive map at {}",
        summary.feature_count,
        summary.static_map,
        summary
            .interactive_map
            .as_ref()
            .map(|path| format!("{:?}", path))
            .unwrap_or_else(|| "none (empty dataset)".to_owned()),
    );
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        eprintln!("{}", TROUBLESHOOTING);
        std::process::exit(1)
    }
}
