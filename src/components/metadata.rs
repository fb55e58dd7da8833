//! Portfolio metadata components

use maud::{Markup, html};

use crate::markup::is_safe_source;

/// Renders the site header with the owner's name
///
/// Shows the owner prominently, with a link to their GitHub profile when
/// one is configured. Used at the top of every page.
///
/// # Arguments
///
/// * `owner`: Portfolio owner name
/// * `github`: Optional GitHub profile URL
/// * `root`: Relative path prefix back to the output root
///
/// # Returns
///
/// Site header markup
pub fn site_header(owner: &str, github: Option<&str>, root: &str) -> Markup {
    html! {
        header class="site-header" {
            a class="site-owner" href=(format!("{}index.html", root)) {
                h1 { (owner) "'s" }
            }
            @if let Some(url) = github.filter(|u| is_safe_source(u)) {
                a class="site-github" href=(url) target="_blank" rel="noopener" { "GitHub" }
            }
        }
    }
}

/// Renders a "N things" count label, singular when N is one.
pub fn count_label(count: usize, singular: &str, plural: &str) -> Markup {
    html! {
        span class="count-label" {
            (count) " " @if count == 1 { (singular) } @else { (plural) }
        }
    }
}
