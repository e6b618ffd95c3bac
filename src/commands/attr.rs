//! Attribute commands

use motorknob_host::KnobHandle;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Owner read bit of an entry mode
const MODE_READ: u16 = 0o400;

fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print every published attribute with its mode
pub fn cmd_tree(knob: &KnobHandle) -> CmdResult {
    for entry in knob.entries() {
        println!("{:04o}  {}", entry.mode, entry.path);
    }
    Ok(())
}

/// Read one attribute
pub fn cmd_read(knob: &KnobHandle, path: &str) -> CmdResult {
    let bytes = knob.read(path)?;
    println!("{}", format_bytes(&bytes));
    Ok(())
}

/// Write one attribute
pub fn cmd_write(knob: &KnobHandle, path: &str, bytes: &[u8]) -> CmdResult {
    let written = knob.write(path, bytes)?;
    log::info!("Wrote {} ({} bytes) to {}", format_bytes(bytes), written, path);
    Ok(())
}

/// Read every readable attribute
pub fn cmd_dump(knob: &KnobHandle) -> CmdResult {
    let mut failed = 0;

    for entry in knob.entries() {
        if entry.mode & MODE_READ == 0 {
            continue;
        }
        match knob.read(&entry.path) {
            Ok(bytes) => println!("{:<36} {}", entry.path, format_bytes(&bytes)),
            Err(e) => {
                log::error!("{}: {}", entry.path, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} attribute(s) could not be read", failed).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(&[0x34, 0x12]), "0x34 0x12");
        assert_eq!(format_bytes(&[]), "");
    }
}
