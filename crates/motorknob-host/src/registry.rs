//! Bus registry
//!
//! This module opens a bus transport by name and hands it to the driver.
//! Transports are feature-gated; the CLI never sees the concrete types.

use std::collections::HashMap;

use motorknob_core::bus::BoxedBus;

use crate::handle::KnobHandle;

/// Information about a bus transport
pub struct BusInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available transports (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_buses() -> Vec<BusInfo> {
    let mut buses = Vec::new();

    #[cfg(feature = "dummy")]
    buses.push(BusInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory knob emulator (start=,end=,detents=,position=,strict=)",
    });

    #[cfg(feature = "linux-i2c")]
    buses.push(BusInfo {
        name: "linux_i2c",
        aliases: &["linux-i2c", "i2c"],
        description: "Linux i2c-dev SMBus (dev=/dev/i2c-N,addr=<7-bit address>)",
    });

    buses
}

/// Parsed bus parameters
#[derive(Debug)]
pub struct BusParams {
    /// Transport name
    pub name: String,
    /// Key-value parameters
    pub params: HashMap<String, String>,
}

impl BusParams {
    /// Parameters as borrowed pairs, for the transport crates' option parsers
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Parse a bus string into name and parameters
///
/// Format: "name" or "name:key1=value1,key2=value2"
///
/// # Example
/// ```ignore
/// let params = parse_bus_params("linux_i2c:dev=/dev/i2c-1,addr=0x55")?;
/// assert_eq!(params.name, "linux_i2c");
/// assert_eq!(params.params.get("addr"), Some(&"0x55".to_string()));
/// ```
pub fn parse_bus_params(s: &str) -> Result<BusParams, Box<dyn std::error::Error>> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));

    if name.is_empty() {
        return Err("Empty bus name".into());
    }

    let mut params = HashMap::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.insert(key.to_string(), value.to_string());
            } else {
                return Err(
                    format!("Invalid parameter format: '{}' (expected key=value)", opt).into(),
                );
            }
        }
    }

    Ok(BusParams {
        name: name.to_string(),
        params,
    })
}

/// Open a bus transport from its specification string
///
/// # Arguments
/// * `bus` - Bus specification (e.g., "dummy" or "linux_i2c:dev=/dev/i2c-1")
pub fn open_bus(bus: &str) -> Result<BoxedBus, Box<dyn std::error::Error>> {
    let params = parse_bus_params(bus)?;

    match params.name.as_str() {
        #[cfg(feature = "dummy")]
        "dummy" => open_dummy(&params),

        #[cfg(feature = "linux-i2c")]
        "linux_i2c" | "linux-i2c" | "i2c" => {
            motorknob_linux_i2c::open_linux_i2c(&params.pairs())
        }

        _ => Err(format!("Unknown bus: {}", params.name).into()),
    }
}

/// Open a bus and probe it as device `id`
///
/// This is the main entry point for the CLI.
pub fn open_knob(bus: &str, id: &str) -> Result<KnobHandle, Box<dyn std::error::Error>> {
    let transport = open_bus(bus)?;
    log::debug!("Opened bus {}, probing as {}", bus, id);
    Ok(KnobHandle::attach(id, transport)?)
}

#[cfg(feature = "dummy")]
fn open_dummy(params: &BusParams) -> Result<BoxedBus, Box<dyn std::error::Error>> {
    use motorknob_dummy::{DummyConfig, DummyKnob};

    let mut config = DummyConfig::default();
    let mut strict = false;
    for (key, value) in &params.params {
        let slot = match key.as_str() {
            "strict" => {
                strict = parse_bool(value)?;
                continue;
            }
            "start" => &mut config.start_position,
            "end" => &mut config.end_position,
            "detents" => &mut config.detents,
            "position" => &mut config.position,
            _ => {
                log::warn!("dummy: Unknown option: {}={}", key, value);
                continue;
            }
        };
        *slot = parse_u16(value)?;
    }

    log::info!("dummy: Using emulated knob {:?} (strict={})", config, strict);
    let knob = DummyKnob::new(config);
    knob.set_strict(strict);
    Ok(Box::new(knob))
}

#[cfg(feature = "dummy")]
fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("Invalid boolean: {}", s)),
    }
}

/// Parse a string as a hex or decimal u16
#[cfg(feature = "dummy")]
fn parse_u16(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u16>().map_err(|e| format!("Invalid number: {}", e))
    }
}
