use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Arg, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bifrost::zone::{ZoneParser, write_zone_config};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = Command::new("bifrost")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a BIND zone file into a cloud DNS zone configuration")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Path to the input zone file")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path to the output JSON file")
                .required(true),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Root path for resolving $INCLUDE and zone file references")
                .default_value("."),
        )
        .arg(
            Arg::new("origin")
                .long("origin")
                .value_name("NAME")
                .help("Origin to use instead of the $ORIGIN found in the zone file"),
        )
        .get_matches();

    let input = matches.get_one::<String>("input").map(PathBuf::from);
    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let (Some(input), Some(output)) = (input, output) else {
        // Both flags are required; clap has already errored out.
        process::exit(2);
    };

    let root = matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let root = fs::canonicalize(&root).unwrap_or(root);

    let origin = matches.get_one::<String>("origin").map(String::as_str);

    // Nested zone declarations write their configurations next to ours.
    let output_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut parser = ZoneParser::new(root, output_dir);
    let config = match parser.convert_file(&input, origin) {
        Ok(config) => config,
        Err(e) => {
            error!("error parsing zone file {}: {}", input.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = write_zone_config(&config, &output) {
        error!("{}", e);
        process::exit(1);
    }

    info!("wrote zone configuration to {}", output.display());
}
