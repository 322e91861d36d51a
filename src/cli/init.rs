//! Init command - write an example training config

use anyhow::{Context, Result};
use console::style;
use langdet::TrainConfig;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, TrainConfig::example_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
    println!(
        "  Train with: langdet train <CORPUS> --config {}",
        path.display()
    );
    Ok(())
}
