//! `configure` and `libraries` commands.

use anyhow::{anyhow, Result};
use console::style;

use crate::config::{Config, ConfigScreen};
use crate::core::LibraryRegistry;

/// Validate and store the icon font CSS URL.
pub fn run_configure(url: &str) -> Result<()> {
    let mut config = Config::load();

    let mut screen = ConfigScreen::load(Some(config.installation.clone()));
    screen.set_css_url(url);
    config.installation = screen.on_configure()?;

    config.save().map_err(|e| anyhow!(e))?;

    let path = Config::config_path();
    println!(
        "{} Saved icon font CSS URL to {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );

    let css_url = config.installation.css_url().unwrap_or_default();
    match LibraryRegistry::builtin().detect_library(css_url, None) {
        Some(lib) => println!("{} Looks like {}", style("→").cyan(), style(&lib.name).bold()),
        None => println!(
            "{} Library not recognized from the URL; it will be detected from the CSS",
            style("!").yellow().bold()
        ),
    }

    Ok(())
}

/// Print every registered library with its styles.
pub fn run_libraries() {
    for (i, lib) in LibraryRegistry::builtin().iter().enumerate() {
        let styles: Vec<&str> = lib.styles.iter().map(|s| s.name.as_str()).collect();
        println!(
            "{}. {} ({}-*)",
            i + 1,
            style(&lib.name).bold(),
            lib.icon_prefix
        );
        println!("   styles: {}", styles.join(", "));
        if lib.metadata_available {
            println!("   {}", style("supports offline icons.json manifest").dim());
        }
    }
}
