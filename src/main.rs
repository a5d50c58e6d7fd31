//! saycmd main entry point
//!
//! The command line is the program: arguments are parsed into an
//! instruction list, compiled into prompt segments, and read aloud in
//! order through the system speech engine.

use log::{debug, error, info};
use std::io::{self, BufRead};
use std::process;

use saycmd::cli::{self, CliCommand};
use saycmd::compile::compile;
use saycmd::config::Config;
use saycmd::speech::{deliver_all, EngineBaseline, TtsCatalog, TtsEngine, VoiceCatalog};
use saycmd::Result;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to saycmd.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("saycmd.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open saycmd.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                // Initialize basic logging to stderr
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "saycmd version {} starting (debug mode, logging to saycmd.log)",
            saycmd::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only warnings and errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing saycmd");

    // Collect the instruction arguments (filter out --debug flag)
    let args: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| arg != "--debug" && arg != "-d")
        .collect();

    if args.is_empty() {
        eprintln!("Nothing to do");
        eprintln!();
        eprint!("{}", cli::usage());
        process::exit(1);
    }

    let config = Config::load()?;
    info!("Configuration loaded from {}", config.path().display());

    let catalog = TtsCatalog::new()?;

    match cli::parse_args(&args, &catalog)? {
        CliCommand::Help => {
            print!("{}", cli::usage());
        }
        CliCommand::ListVoices => {
            list_voices(&catalog);
        }
        CliCommand::Speak(instructions) => {
            let segments = compile(instructions, &mut rand::thread_rng())?;
            debug!("Compiled {} prompt segment(s)", segments.len());

            let baseline = EngineBaseline {
                voice: config.voice(),
                rate: config.rate(),
                volume: config.volume(),
            };
            let mut engine = TtsEngine::new(baseline);
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            deliver_all(&mut engine, &segments, &mut lines)?;
        }
    }

    Ok(())
}

/// Print the installed voices, one block per voice.
fn list_voices(catalog: &dyn VoiceCatalog) {
    for voice in catalog.list() {
        if voice.enabled {
            println!("{}:", voice.id);
        } else {
            println!("{} (disabled):", voice.id);
        }
        println!(" Name: {}", voice.name);
        println!(" Language: {}", voice.language);
        if let Some(gender) = voice.gender {
            println!(" Gender: {}", gender);
        }
    }
}
