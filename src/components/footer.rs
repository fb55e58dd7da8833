//! Page footer component

use maud::{Markup, html};

/// Renders the generator credit line shown at the bottom of every page.
pub fn footer() -> Markup {
    html! {
        footer class="site-footer" {
            p {
                "Generated by "
                span class="generator" { "ctfolio" }
                " " (env!("CARGO_PKG_VERSION"))
            }
        }
    }
}
