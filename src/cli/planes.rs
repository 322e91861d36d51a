//! Planes command - show which Unicode block each character falls in

use anyhow::Result;
use console::style;
use langdet::features::code_plane;
use std::collections::HashSet;

pub fn run(text: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for c in text.chars().filter(|c| seen.insert(*c)) {
        let plane = code_plane(c);
        let name = if plane.is_mapped() {
            style(plane.name()).cyan()
        } else {
            style(plane.name()).yellow()
        };
        println!("U+{:04X}\t{:?}\t{}", c as u32, c, name);
    }
    Ok(())
}
