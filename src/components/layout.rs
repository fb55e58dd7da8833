//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::footer::footer;

/// Wraps page content with standard HTML structure
///
/// Provides DOCTYPE, head, and container structure shared by all pages.
/// Stylesheet paths are relative to the page being rendered, so callers
/// prefix them with the page's root prefix.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `site_name`: Portfolio owner shown as title suffix
/// * `stylesheets`: CSS file paths to include
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, site_name: &str, stylesheets: &[String], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (site_name) }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                div class="container" {
                    (body)
                }
                (footer())
            }
        }
    }
}

/// Links to bundled stylesheets from a page with the given root prefix.
pub fn stylesheets(root: &str, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{}assets/{}", root, name))
        .collect()
}
