//! ttsprep command-line entry point
//!
//! Phonemizes its arguments as one batch and prints one phoneme line
//! per input text:
//!
//! ```text
//! ttsprep fr-fr "Bonjour le monde." "Comment ça va ?"
//! ```

use std::process;

use anyhow::{Context, Result};
use log::{debug, error};
use ttsprep::phonemizer::Phonemizer;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    let args: Vec<String> = args
        .into_iter()
        .filter(|arg| arg != "--debug" && arg != "-d")
        .collect();

    if args.len() < 2 {
        eprintln!("ttsprep {}", ttsprep::VERSION);
        eprintln!("Usage: ttsprep [--debug] <language-code> <text>...");
        eprintln!("Example: ttsprep fr-fr \"Bonjour le monde.\"");
        process::exit(2);
    }

    if let Err(e) = run(&args[0], &args[1..]) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(code: &str, texts: &[String]) -> Result<()> {
    debug!("Phonemizing {} text(s) as {:?}", texts.len(), code);

    let phonemizer = Phonemizer::new(code)
        .with_context(|| format!("failed to build phonemizer for {:?}", code))?;
    for line in phonemizer.phonemize_batch(texts)? {
        println!("{}", line);
    }

    Ok(())
}
