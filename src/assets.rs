//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::highlight::theme_css;

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const NAV: &str = include_str!("../assets/components/nav.css");
const BADGE: &str = include_str!("../assets/components/badge.css");
const CHART: &str = include_str!("../assets/components/chart.css");

const INDEX_PAGE: &str = include_str!("../assets/page-index.css");
const WRITEUP_PAGE: &str = include_str!("../assets/page-writeup.css");
const PROJECTS_PAGE: &str = include_str!("../assets/page-projects.css");
const MARKUP: &str = include_str!("../assets/markup.css");

pub const INDEX_CSS: &str = "index.css";
pub const WRITEUP_CSS: &str = "writeup.css";
pub const PROJECTS_CSS: &str = "projects.css";
pub const HIGHLIGHT_CSS: &str = "highlight.css";

/// Writes all bundled CSS assets to output directory
///
/// The highlight stylesheet is generated from the named syntect theme.
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written
pub fn write_css_assets(assets_dir: &Path, theme: &str) -> Result<()> {
    write_bundled(
        assets_dir,
        INDEX_CSS,
        &[BASE, LAYOUT, NAV, BADGE, CHART, INDEX_PAGE],
    )?;
    write_bundled(
        assets_dir,
        WRITEUP_CSS,
        &[BASE, LAYOUT, NAV, BADGE, MARKUP, WRITEUP_PAGE],
    )?;
    write_bundled(assets_dir, PROJECTS_CSS, &[BASE, LAYOUT, NAV, BADGE, PROJECTS_PAGE])?;

    let highlight = theme_css(theme)?;
    write_bundled(assets_dir, HIGHLIGHT_CSS, &[&highlight])?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
