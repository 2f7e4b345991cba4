//! `detect`, `list` and `pick` commands.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use console::style;

use super::SourceArgs;
use crate::config::{Config, DialogInvocation, InstallationParameters};
use crate::core::{search, LibraryRegistry};
use crate::field::FieldRenderer;
use crate::picker::{PickerDialog, PickerState};
use crate::services::{CssFetcher, IconManifest, JsonFieldStore, SourceFetcher};

/// Open a picker dialog for `source` and wait until its icons are loaded.
pub(crate) async fn load_dialog(
    config: &Config,
    source: &SourceArgs,
    selected: Option<String>,
) -> Result<PickerDialog<'static>> {
    let invocation = DialogInvocation {
        selected,
        icon_font_css_url: source.url.clone(),
    };
    // An explicit --url overrides the stored installation parameter.
    let install = match &source.url {
        Some(_) => InstallationParameters::default(),
        None => config.installation.clone(),
    };

    let (dialog, _) = PickerDialog::open(LibraryRegistry::builtin(), &install, invocation);
    let mut dialog = dialog.with_fallback(config.behavior.fallback);
    if let Some(path) = &source.manifest {
        let manifest = IconManifest::load(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?;
        dialog = dialog.with_manifest(manifest);
    }

    let fetcher = fetcher(config)?;
    if let Some(url) = dialog.url() {
        println!("{} Loading {}...", style("→").cyan(), style(url).bold());
    }

    let state = match dialog.run(&fetcher).await {
        Ok(state) => state,
        Err(e) => bail!("{}", e),
    };
    if let Some(err) = state.error() {
        bail!("{}", err);
    }

    Ok(dialog)
}

fn fetcher(config: &Config) -> Result<SourceFetcher> {
    SourceFetcher::new(Duration::from_secs(config.behavior.fetch_timeout_secs))
        .context("Failed to set up fetcher")
}

/// Print the library detected for a URL, optionally checking the body too.
pub async fn run_detect(url: Option<&str>, fetch: bool) -> Result<()> {
    let config = Config::load();
    let url = match url {
        Some(url) => url.to_string(),
        None => config
            .installation
            .css_url()
            .map(str::to_string)
            .context("No URL given and none configured (run `iconfont-picker configure <URL>`)")?,
    };

    let registry = LibraryRegistry::builtin();
    let body = if fetch {
        Some(fetcher(&config)?.fetch(&url).await?)
    } else {
        None
    };

    match registry.detect_library(&url, body.as_deref()) {
        Some(lib) => println!("{} {}", style("✓").green().bold(), style(&lib.name).bold()),
        None => {
            println!("{} No icon library recognized", style("!").yellow().bold());
            if !fetch {
                println!("  Try --fetch to test the stylesheet body as well");
            }
        }
    }

    Ok(())
}

/// Print the icons of the configured (or given) stylesheet.
pub async fn run_list(
    source: &SourceArgs,
    term: Option<&str>,
    style_filter: Option<&str>,
    fuzzy: bool,
) -> Result<()> {
    let config = Config::load();
    let mut dialog = load_dialog(&config, source, None).await?;
    let registry = LibraryRegistry::builtin();

    if let PickerState::Ready { library, .. } = dialog.state() {
        let groups = dialog
            .style_groups()
            .iter()
            .map(|(name, count)| format!("{} {}", name, count))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} ({})",
            style("✓").green().bold(),
            style(library).bold(),
            groups
        );
    }

    if let Some(name) = style_filter {
        dialog.set_style_filter(Some(name));
    }

    let max = config.behavior.max_results;
    let icons: Vec<&str> = match term {
        Some(term) if fuzzy => {
            dialog.set_search("");
            search::rank(dialog.visible_icons(), term, registry, max)
        }
        Some(term) => {
            dialog.set_search(term);
            dialog.visible_icons().into_iter().take(max).collect()
        }
        None => dialog.visible_icons().into_iter().take(max).collect(),
    };

    if icons.is_empty() {
        println!("{} No icons match", style("!").yellow().bold());
        return Ok(());
    }

    for icon in &icons {
        println!(
            "{:<40} {}",
            icon,
            style(registry.clean_display_name(icon)).dim()
        );
    }

    Ok(())
}

/// Validate `icon` against the stylesheet and store it as the field value.
pub async fn run_pick(icon: &str, source: &SourceArgs) -> Result<()> {
    let config = Config::load();
    let store = JsonFieldStore::open(config.field_store_path());
    let mut field = FieldRenderer::new(store);

    let mut dialog = load_dialog(&config, source, field.selected().map(str::to_string)).await?;
    if !dialog.contains(icon) {
        bail!(
            "'{}' is not one of the icons in {}",
            icon,
            dialog.url().unwrap_or_default()
        );
    }

    let result = dialog.select(icon)?;
    field.apply_dialog_result(result)?;

    println!(
        "{} Field value set to {}",
        style("✓").green().bold(),
        style(icon).bold()
    );
    Ok(())
}
