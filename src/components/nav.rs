//! Tab navigation and breadcrumb components

use maud::{Markup, html};

/// Top-level view of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Writeups,
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Writeups, Tab::Projects];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Writeups => "CTF Writeups",
            Tab::Projects => "Projects",
        }
    }

    /// Output file of the tab's page, relative to the output root.
    pub fn file_name(self) -> &'static str {
        match self {
            Tab::Writeups => "index.html",
            Tab::Projects => "projects.html",
        }
    }
}

/// Renders tab links with the active tab highlighted
///
/// Each tab is a separate page, so switching tabs is plain navigation.
///
/// # Arguments
///
/// * `active`: Tab of the page being rendered, None on write-up pages
/// * `root`: Relative path prefix back to the output root
pub fn tabs(active: Option<Tab>, root: &str) -> Markup {
    html! {
        nav class="tabs" {
            @for tab in Tab::ALL {
                @let href = format!("{}{}", root, tab.file_name());
                @if Some(tab) == active {
                    a class="tab tab-active" href=(href) aria-current="page" { (tab.label()) }
                } @else {
                    a class="tab" href=(href) { (tab.label()) }
                }
            }
        }
    }
}

/// Renders breadcrumb navigation
///
/// Displays the site name as root link followed by trail components. The
/// last component without a link is the current page.
///
/// # Arguments
///
/// * `site_name`: Name for the root breadcrumb link
/// * `index_path`: Relative path back to index.html
/// * `components`: Trail components with optional link targets (None for current)
pub fn breadcrumb(
    site_name: &str,
    index_path: &str,
    components: &[(&str, Option<String>)],
) -> Markup {
    html! {
        div class="breadcrumb" {
            a href=(index_path) class="breadcrumb-link" { (site_name) }
            @for (component, href) in components {
                span class="breadcrumb-separator" { "/" }
                @if let Some(link) = href {
                    a href=(link) class="breadcrumb-link" { (*component) }
                } @else {
                    span class="breadcrumb-current" { (*component) }
                }
            }
        }
    }
}
