//! Whole-site generation from a portfolio data file.

use anyhow::{Context, Result};
use futures::future::join_all;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::assets::write_css_assets;
use crate::config::Config;
use crate::highlight::Highlighter;
use crate::loader::{FsLoader, LoadOutcome, load_or_fallback};
use crate::markup::{AssetResolver, MarkupDocument, is_safe_source, transform};
use crate::pages::index::{self, IndexPageData, PlatformAnchors};
use crate::pages::writeup::{self, WRITEUP_DIR, WriteupPageData};
use crate::pages::projects;
use crate::record::{Portfolio, Record};
use crate::stats::bucket_by_month;
use crate::util::normalize_relative;

/// Output directory for images referenced by write-ups.
const CONTENT_DIR: &str = "content";

/// What a site build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSummary {
    pub challenges: usize,
    pub writeups: usize,
    /// Write-up pages that show the fallback document.
    pub fallbacks: usize,
    pub images: usize,
    pub projects: usize,
    /// Challenges left out of the activity chart for an unreadable date.
    pub undated: usize,
}

/// Generates the complete site described by the configuration.
///
/// Reads the data file, writes the stylesheets, index, projects page, and
/// one page per challenge with content. Write-ups are loaded concurrently;
/// a write-up that fails to load gets the fallback document instead of
/// failing the build.
///
/// # Errors
///
/// Returns error if the data file is invalid, the theme is unknown, or an
/// output file cannot be written
pub async fn generate_site(config: &Config) -> Result<SiteSummary> {
    let portfolio = Portfolio::load(&config.data)?;
    let owner = config.owner_name(&portfolio);
    let github = portfolio.github.as_deref();
    let challenges = portfolio.challenges();

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;
    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    write_css_assets(&assets_dir, &config.theme).context("Failed to write CSS assets")?;
    debug!("Wrote stylesheets to {}", assets_dir.display());

    let undated = bucket_by_month(challenges, |r| r.date(), |r| r.category(), config.assumed_year)
        .dropped();
    if undated > 0 {
        warn!(
            "{} challenge(s) have no recognizable date and are left out of the activity chart",
            undated
        );
    }

    let index_html = index::generate(IndexPageData {
        owner: &owner,
        github,
        challenges,
        assumed_year: config.assumed_year,
    });
    write_page(&config.output.join("index.html"), index_html.into_string())?;
    info!("Generated index page with {} challenges", challenges.len());

    let projects_html = projects::generate(&owner, github, portfolio.projects());
    write_page(&config.output.join("projects.html"), projects_html.into_string())?;
    info!("Generated projects page with {} projects", portfolio.projects().len());

    let loader = FsLoader::new(config.content_root());
    let writeups = generate_writeups(&loader, challenges, &owner, github, &config.output).await?;

    Ok(SiteSummary {
        challenges: challenges.len(),
        writeups: writeups.pages,
        fallbacks: writeups.fallbacks,
        images: writeups.images,
        projects: portfolio.projects().len(),
        undated,
    })
}

#[derive(Default)]
struct WriteupStats {
    pages: usize,
    fallbacks: usize,
    images: usize,
}

async fn generate_writeups(
    loader: &FsLoader,
    challenges: &[Record],
    owner: &str,
    github: Option<&str>,
    output: &Path,
) -> Result<WriteupStats> {
    let pending: Vec<(&Record, &str)> = challenges
        .iter()
        .filter_map(|record| record.content_path().map(|path| (record, path)))
        .collect();

    let outcomes: Vec<LoadOutcome> =
        join_all(pending.iter().map(|(_, path)| load_or_fallback(loader, path))).await;

    let pages_dir = output.join(WRITEUP_DIR);
    fs::create_dir_all(&pages_dir).context("Failed to create write-up directory")?;

    let highlighter = Highlighter::new();
    let anchors = PlatformAnchors::new(challenges);
    let content_dir = output.join(CONTENT_DIR);
    let mut copied = HashSet::new();
    let mut stats = WriteupStats::default();

    for ((record, path), outcome) in pending.into_iter().zip(outcomes) {
        let document = transform(outcome.text());
        let document_path = normalize_relative(Path::new(path));
        let resolver = document_path
            .as_ref()
            .map(|doc| AssetResolver::new(format!("../{}/", CONTENT_DIR), doc));

        if outcome.is_fallback() {
            stats.fallbacks += 1;
        } else if let Some(resolver) = &resolver {
            stats.images += copy_images(&document, resolver, loader.root(), &content_dir, &mut copied)?;
        }

        let html = writeup::generate(
            WriteupPageData {
                owner,
                github,
                record,
                platform_anchor: anchors.get(record.platform()),
                document: &document,
                resolver,
            },
            &highlighter,
        );
        write_page(&output.join(writeup::page_path(record.id())), html.into_string())?;
        stats.pages += 1;
    }

    info!(
        "Generated {} write-up pages ({} with fallback content)",
        stats.pages, stats.fallbacks
    );
    Ok(stats)
}

/// Copies local images of a document into the published content directory.
///
/// Missing files and sources outside the content root are logged and
/// skipped; the rendered page already drops or keeps them on its own.
///
/// # Returns
///
/// Number of files copied by this call
fn copy_images(
    document: &MarkupDocument,
    resolver: &AssetResolver,
    content_root: &Path,
    content_dir: &Path,
    copied: &mut HashSet<PathBuf>,
) -> Result<usize> {
    let mut count = 0;

    for src in document.image_sources() {
        if !is_safe_source(src) {
            continue;
        }

        let relative = match resolver.local_path(src) {
            Ok(Some(relative)) => relative,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping image: {:#}", e);
                continue;
            }
        };

        if !copied.insert(relative.clone()) {
            continue;
        }

        let from = content_root.join(&relative);
        if !from.is_file() {
            warn!("Image not found: {}", from.display());
            continue;
        }

        let to = content_dir.join(&relative);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::copy(&from, &to)
            .with_context(|| format!("Failed to copy image: {}", from.display()))?;
        debug!("Copied {}", relative.display());
        count += 1;
    }

    Ok(count)
}

fn write_page(path: &Path, html: String) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write page: {}", path.display()))
}
