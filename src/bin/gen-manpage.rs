//! Man page generator for motorknob
//!
//! Writes `motorknob.1` plus one `motorknob-<command>.1` page per
//! subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

#[path = "../cli.rs"]
mod cli;

fn render(page: clap::Command, title: &str, dir: &Path) -> std::io::Result<PathBuf> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(page)
        .title(title.to_uppercase())
        .render(&mut buffer)?;

    let path = dir.join(format!("{}.1", title));
    fs::write(&path, buffer)?;
    Ok(path)
}

fn main() -> std::io::Result<()> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    let mut cmd = cli::Cli::command();
    cmd.build();

    let mut pages = vec![render(cmd.clone(), "motorknob", &output_dir)?];
    for sub in cmd.get_subcommands() {
        let title = format!("motorknob-{}", sub.get_name());
        pages.push(render(sub.clone(), &title, &output_dir)?);
    }

    for page in &pages {
        println!("Generated {}", page.display());
    }
    println!("\nTo view:");
    println!("  man -l {}", pages[0].display());
    println!("\nTo install alongside the motorknob binary:");
    println!(
        "  install -Dm644 -t /usr/local/share/man/man1 {}/motorknob*.1",
        output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pages() {
        let dir = std::env::temp_dir().join(format!("motorknob-man-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let cmd = cli::Cli::command();
        let main = render(cmd.clone(), "motorknob", &dir).unwrap();
        let page = fs::read_to_string(&main).unwrap();
        assert!(page.contains("MOTORKNOB"));
        assert!(page.contains("dump"));

        let tree = cmd.find_subcommand("tree").unwrap().clone();
        let path = render(tree, "motorknob-tree", &dir).unwrap();
        assert!(path.ends_with("motorknob-tree.1"));
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
