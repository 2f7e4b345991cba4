//! `preview` command: renders every icon into a static HTML page.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::browse::load_dialog;
use super::SourceArgs;
use crate::config::Config;
use crate::core::LibraryRegistry;
use crate::picker::PickerDialog;
use crate::services::stylesheet::escape_attr;
use crate::services::{FieldValueStore, JsonFieldStore, StylesheetSet};

/// Fetch the icons and write a preview page to `out`.
pub async fn run_preview(source: &SourceArgs, out: &Path) -> Result<()> {
    let config = Config::load();
    let selected = JsonFieldStore::open(config.field_store_path()).get_value();
    let dialog = load_dialog(&config, source, selected).await?;

    let html = render_page(&dialog);
    fs::write(out, html).with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "{} {} ({})",
        style("✓").green().bold(),
        style(out.display()).cyan(),
        dialog.status_message()
    );
    Ok(())
}

/// Full HTML document with the icon font linked and one tile per icon.
pub fn render_page(dialog: &PickerDialog<'_>) -> String {
    let registry = LibraryRegistry::builtin();
    let mut links = StylesheetSet::new();
    dialog.attach_stylesheet(&mut links);

    let tiles: Vec<String> = dialog
        .visible_icons()
        .into_iter()
        .map(|icon| {
            let class = escape_attr(icon);
            let selected = if dialog.is_selected(icon) { " selected" } else { "" };
            format!(
                r#"    <div class="tile{selected}" title="{class}"><i class="{class}"></i><span>{label}</span></div>"#,
                label = escape_attr(&registry.clean_display_name(icon)),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  {links}
  <style>
    body {{ font-family: sans-serif; margin: 24px; }}
    .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 14px; }}
    .tile {{ border: 1.5px solid #e5e7eb; border-radius: 10px; padding: 16px; text-align: center; }}
    .tile.selected {{ border: 2.5px solid #2563eb; background: rgba(37,99,235,0.08); }}
    .tile i {{ font-size: 28px; display: block; margin-bottom: 6px; color: #222; }}
    .tile span {{ font-size: 11px; color: #666; word-break: break-all; }}
  </style>
</head>
<body>
  <p>{title}</p>
  <div class="grid">
{tiles}
  </div>
</body>
</html>
"#,
        title = escape_attr(&dialog.status_message()),
        links = links.to_html(),
        tiles = tiles.join("\n"),
    )
}
