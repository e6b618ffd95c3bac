//! motorknob - Control tool for the motorknob rotary input device
//!
//! The knob is a motor-driven encoder on an I2C bus. This tool opens a bus,
//! probes the device through the driver and exposes its attribute tree:
//!
//! ```text
//! /motorknob/position                 read-only
//! /motorknob/profile/detents          read-write
//! /motorknob/profile/start_position   read-write
//! /motorknob/profile/end_position     read-write
//! ```
//!
//! Every attribute is two bytes. Note that bytes written as `[hi, lo]` read
//! back as `[lo, hi]`; this matches the device firmware.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use motorknob_host::open_knob;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::ListBuses => {
            commands::list_buses();
            Ok(())
        }
        Commands::Tree { bus } => {
            let knob = open_knob(&bus, &cli.device_id)?;
            commands::attr::cmd_tree(&knob)
        }
        Commands::Read { bus, path } => {
            let knob = open_knob(&bus, &cli.device_id)?;
            commands::attr::cmd_read(&knob, &path)
        }
        Commands::Write { bus, path, bytes } => {
            let knob = open_knob(&bus, &cli.device_id)?;
            commands::attr::cmd_write(&knob, &path, &bytes)
        }
        Commands::Dump { bus } => {
            let knob = open_knob(&bus, &cli.device_id)?;
            commands::attr::cmd_dump(&knob)
        }
    }
}
