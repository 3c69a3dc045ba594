//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use gradebook::config::Config;
use gradebook::info;
use std::io::{self, Write};

/// Keys accepted by `config get|set|unset`
const KNOWN_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "data_dir",
    "user",
    "reports_dir",
    "precision",
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => set_key(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset_key(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(err) = result {
        fail("Config command failed", &err);
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: '{key}' (expected one of: {})",
        KNOWN_KEYS.join(", ")
    )
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    println!("  file: {}\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn show_key(config: &Config, key: &str) -> Result<(), String> {
    let value = config.get(key).ok_or_else(|| unknown_key(key))?;
    println!("{value}");
    Ok(())
}

fn set_key(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if config.get(key).is_none() {
        return Err(unknown_key(key));
    }
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    info!("Config '{key}' set to '{value}'");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset_key(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    if config.get(key).is_none() {
        return Err(unknown_key(key));
    }
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    println!(
        "✓ Reset {key} to default ({})",
        config.get(key).unwrap_or_default()
    );
    Ok(())
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset configuration to defaults? Stored records are not affected. (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
