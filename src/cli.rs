//! CLI argument parsing

use clap::{Parser, Subcommand};

/// Parse a string as a hex or decimal byte
fn parse_byte(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex byte: {}", e))
    } else {
        s.parse::<u8>().map_err(|e| format!("Invalid byte: {}", e))
    }
}

/// Generate dynamic help text for the bus argument
fn bus_help() -> String {
    let names: Vec<&str> = motorknob_host::available_buses()
        .iter()
        .map(|b| b.name)
        .collect();
    format!("Bus to use [available: {}]", names.join(", "))
}

#[derive(Parser)]
#[command(name = "motorknob")]
#[command(author, version, about = "Motorknob control tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Device id announced to the driver
    #[arg(long, global = true, default_value = "motorknob")]
    pub device_id: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attach and list the attribute tree
    Tree {
        /// Bus to use
        #[arg(short, long, help = bus_help())]
        bus: String,
    },

    /// Read the two bytes behind an attribute
    Read {
        /// Bus to use
        #[arg(short, long, help = bus_help())]
        bus: String,

        /// Attribute path (e.g. /motorknob/position)
        path: String,
    },

    /// Write bytes to an attribute
    Write {
        /// Bus to use
        #[arg(short, long, help = bus_help())]
        bus: String,

        /// Attribute path (e.g. /motorknob/profile/detents)
        path: String,

        /// Bytes to write, hex (0x..) or decimal; the first two are sent
        #[arg(required = true, value_parser = parse_byte)]
        bytes: Vec<u8>,
    },

    /// Read every readable attribute
    Dump {
        /// Bus to use
        #[arg(short, long, help = bus_help())]
        bus: String,
    },

    /// List available buses
    ListBuses,
}
