//! Blockview CLI
//!
//! Usage:
//!   blockview [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --theme <FILE>  Theme file with block metrics (TOML format)
//!       --rtl           Lay blocks out right to left
//!   -s, --scale <F>     View pixels per workspace unit
//!   -d, --debug         Mark connector centres
//!   -v, --verbose       More logging; repeat for trace output
//!   -h, --help          Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use blockview::{render_with_config, RenderConfig, Theme};

#[derive(Parser)]
#[command(name = "blockview")]
#[command(about = "Render visual programming blocks to SVG")]
struct Cli {
    /// Workspace description (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Theme file with block metrics (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Lay blocks out right to left
    #[arg(long)]
    rtl: bool,

    /// View pixels per workspace unit
    #[arg(short, long, default_value_t = 1.0)]
    scale: f64,

    /// Mark connector centres, coloured by state
    #[arg(short, long)]
    debug: bool,

    /// More logging; repeat for trace output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let theme = match &cli.theme {
        Some(path) => match Theme::from_file(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Theme::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = RenderConfig::new()
        .with_theme(theme)
        .with_rtl(cli.rtl)
        .with_scale(cli.scale)
        .with_debug(cli.debug);
    match render_with_config(&source, config) {
        Ok(svg) => println!("{}", svg),
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}
