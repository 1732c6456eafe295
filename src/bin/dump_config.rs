//! Prints a styling configuration and its resolved variant palettes.
//!
//! Usage: `dump_config [path/to/config.json]` — with no argument the
//! built-in default configuration is dumped.

use std::env;

use anyhow::Context;
use styleweave::config::{PaletteRegistry, StyleConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => {
            StyleConfig::from_path(&path).with_context(|| format!("loading \"{path}\""))?
        }
        None => StyleConfig::DEFAULT.clone(),
    };

    println!("dark mode: {:?} ({})", config.dark_mode, config.dark_mode.css_trigger());
    println!("content globs:");
    for glob in &config.content {
        println!("  {glob}");
    }

    println!(
        "tokens: {} colors, {} shadows, {} radii",
        config.tokens.colors.len(),
        config.tokens.shadows.len(),
        config.tokens.radii.len()
    );

    println!("plugins:");
    for plugin in &config.plugins {
        println!("  {plugin}");
    }

    for issue in config.lint() {
        println!("lint: {issue}");
    }

    let registry = PaletteRegistry::builtin().context("loading builtin base palettes")?;
    let resolved = config
        .resolve_variants(&registry)
        .context("resolving theme variants")?;

    for (name, palette) in &resolved {
        println!("variant {name} ({} roles):", palette.len());
        for (role, value) in palette {
            println!("  {role}: {value}");
        }
    }

    Ok(())
}
