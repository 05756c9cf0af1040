//! Todoist actionability updater - Main Entry Point
//!
//! Reads a snapshot of the store, plans the due-date/label mutations the
//! naming rules call for, and either prints them (default) or applies them
//! back to the snapshot file (`--execute`).

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::error;
use std::time::Duration;
use todoist_updater::{Updater, UpdaterConfig};

/// Keeps Todoist task trees actionable by applying parallel/serial naming rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the snapshot file (TOML dump of projects and tasks)
    file: String,

    /// The "No Date" label to use
    #[arg(short, long, default_value = "NoDate")]
    label: String,

    /// Trailing marker for parallel mode
    #[arg(long, default_value = "(=)")]
    parallel_suffix: String,

    /// Trailing marker for serial mode
    #[arg(long, default_value = "(-)")]
    serial_suffix: String,

    /// Label prefix meaning "already scheduled elsewhere" (repeatable)
    #[arg(long = "next-prefix", default_value = "::")]
    next_prefix: Vec<String>,

    /// Re-run the sync every N seconds instead of once
    #[arg(short = 'p', long)]
    periodical_sync_sec: Option<u64>,

    /// Apply the changes (otherwise just prints them)
    #[arg(short = 'x', long)]
    execute: bool,

    /// Enable debugging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();
    // The handle keeps the logger alive for the whole process.
    let _logger = flexi_logger::Logger::try_with_env_or_str(if args.debug {
        "debug"
    } else {
        "info"
    })?
    .start()?;

    let config = UpdaterConfig {
        nodate_label: args.label,
        parallel_suffix: args.parallel_suffix,
        serial_suffix: args.serial_suffix,
        next_prefixes: args.next_prefix,
    };
    let updater = Updater::new(&args.file, config);

    loop {
        if let Err(err) = run_once(&updater, args.execute) {
            // In periodic mode a bad run only logs; the next cycle retries
            // against whatever state the file holds then.
            if args.periodical_sync_sec.is_none() {
                return Err(err);
            }
            error!("sync failed: {:#}", err);
        }

        match args.periodical_sync_sec {
            Some(seconds) => std::thread::sleep(Duration::from_secs(seconds)),
            None => break,
        }
    }
    Ok(())
}

fn run_once(updater: &Updater, execute: bool) -> Result<()> {
    if execute {
        updater.run()?;
    } else {
        for mutation in updater.plan()? {
            println!("{mutation}");
        }
    }
    Ok(())
}
