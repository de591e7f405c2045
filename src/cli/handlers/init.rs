use crate::config::{AppConfig, CONFIG_FILE_NAME};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn handle_init(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = AppConfig::default();
    config.save(&config_path)?;

    println!("{} {}", "Initialized".green(), config_path.display());
    println!("  Database: {}", config.database.url);
    println!(
        "  Endpoint: http://{}{}",
        config.server.address(),
        config.server.path
    );

    Ok(())
}
