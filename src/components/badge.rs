//! Difficulty and category badges

use maud::{Markup, html};

use super::legend::category_color;
use crate::record::Difficulty;

/// Renders a difficulty pill coloured by level; unknown levels use the
/// neutral style.
pub fn difficulty_badge(difficulty: &Difficulty) -> Markup {
    html! {
        span class=(format!("badge {}", difficulty.css_class())) { (difficulty) }
    }
}

/// Renders a category pill with the category's legend colour.
pub fn category_badge(category: &str) -> Markup {
    html! {
        span class="badge badge-category" style=(format!("--badge-color: {}", category_color(category))) {
            (category)
        }
    }
}

/// Renders a technology tag on a project card.
pub fn tech_tag(name: &str) -> Markup {
    html! {
        span class="tech-tag" { (name) }
    }
}
