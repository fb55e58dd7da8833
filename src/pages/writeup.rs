//! Write-up page generation

use maud::{Markup, html};

use crate::assets::{HIGHLIGHT_CSS, WRITEUP_CSS};
use crate::components::badge::{category_badge, difficulty_badge};
use crate::components::layout::{page_wrapper, stylesheets};
use crate::components::metadata::site_header;
use crate::components::nav::{breadcrumb, tabs};
use crate::highlight::Highlighter;
use crate::markup::{AssetResolver, MarkupDocument, MarkupRenderer};
use crate::record::Record;

/// Directory holding write-up pages, relative to the output root.
pub const WRITEUP_DIR: &str = "writeups";

/// Root prefix from a write-up page back to the output root.
const ROOT: &str = "../";

/// Path of a record's write-up page relative to the output root.
pub fn page_path(id: u64) -> String {
    format!("{}/{}.html", WRITEUP_DIR, id)
}

/// Data container for write-up page generation
pub struct WriteupPageData<'a> {
    pub owner: &'a str,
    pub github: Option<&'a str>,
    pub record: &'a Record,
    /// Fragment id of the record's platform group on the index page.
    pub platform_anchor: String,
    pub document: &'a MarkupDocument,
    /// Resolver for images relative to the write-up file.
    pub resolver: Option<AssetResolver>,
}

/// Fragment id of the preview overlay for the `index`-th image.
fn preview_id(index: usize) -> String {
    format!("preview-{}", index + 1)
}

/// Generates one write-up page
///
/// Renders the transformed document below a header with the challenge's
/// badges. Every image links to a full-size overlay that CSS shows while
/// its fragment is the URL target, so previews work without script.
///
/// # Arguments
///
/// * `data`: Write-up page data container
/// * `highlighter`: Shared code highlighter
///
/// # Returns
///
/// Complete HTML markup for the write-up page
pub fn generate(data: WriteupPageData<'_>, highlighter: &Highlighter) -> Markup {
    let record = data.record;

    let mut base = MarkupRenderer::new(highlighter);
    if let Some(resolver) = data.resolver.clone() {
        base = base.with_resolver(resolver);
    }
    let sources = base.image_sources(data.document);

    let preview = |url: &str| match sources.iter().position(|s| s == url) {
        Some(index) => format!("#{}", preview_id(index)),
        None => "#".to_string(),
    };
    let mut renderer = MarkupRenderer::new(highlighter).with_preview(&preview);
    if let Some(resolver) = data.resolver {
        renderer = renderer.with_resolver(resolver);
    }

    let index_path = format!("{}index.html", ROOT);
    let platform_href = format!("{}#{}", index_path, data.platform_anchor);
    let trail = [
        (record.platform(), Some(platform_href)),
        (record.title(), None),
    ];

    page_wrapper(
        record.title(),
        data.owner,
        &stylesheets(ROOT, &[WRITEUP_CSS, HIGHLIGHT_CSS]),
        html! {
            (site_header(data.owner, data.github, ROOT))
            (tabs(None, ROOT))
            (breadcrumb(data.owner, &index_path, &trail))

            main class="card" {
                header class="writeup-header" {
                    h1 { (record.title()) }
                    (difficulty_badge(record.difficulty()))
                    (category_badge(record.category()))
                    @if !record.date().is_empty() {
                        span class="challenge-date" { (record.date()) }
                    }
                }
                article class="writeup-content" {
                    (renderer.render(data.document))
                }
            }

            @for (index, src) in sources.iter().enumerate() {
                div class="image-preview" id=(preview_id(index)) {
                    a class="image-preview-close" href="#" aria-label="Close preview" { "×" }
                    img src=(src) alt="";
                }
            }
        },
    )
}
