//! List commands implementation

/// List all available buses
pub fn list_buses() {
    let buses = motorknob_host::available_buses();

    if buses.is_empty() {
        println!("No buses available (recompile with transport features enabled)");
        return;
    }

    println!("Available buses:");
    println!();
    for bus in &buses {
        if bus.aliases.is_empty() {
            println!("  {:10} - {}", bus.name, bus.description);
        } else {
            println!(
                "  {:10} - {} (aliases: {})",
                bus.name,
                bus.description,
                bus.aliases.join(", ")
            );
        }
    }
}
