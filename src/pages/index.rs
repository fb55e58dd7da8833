//! Portfolio index page generation

use maud::{Markup, html};
use std::collections::{HashMap, HashSet};

use crate::components::badge::{category_badge, difficulty_badge};
use crate::components::chart::{bar_chart_svg, line_chart_svg};
use crate::components::layout::{page_wrapper, stylesheets};
use crate::components::legend::{category_color, platform_color};
use crate::components::metadata::{count_label, site_header};
use crate::components::nav::{Tab, tabs};
use crate::pages::writeup;
use crate::record::Record;
use crate::stats::{bucket_by_month, count_by, group_by};

/// Data container for index page generation
pub struct IndexPageData<'a> {
    pub owner: &'a str,
    pub github: Option<&'a str>,
    pub challenges: &'a [Record],
    /// Year for dates written without one.
    pub assumed_year: i32,
}

/// Fragment id of a platform group on the index page.
///
/// Lowercases ASCII letters and digits and replaces every other character
/// with `-`, so ids stay valid for any platform name.
pub fn platform_anchor(platform: &str) -> String {
    let slug: String = platform
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("platform-{}", slug)
}

/// Distinct fragment ids for every platform group.
///
/// Platforms are numbered in first-seen order. A platform whose anchor is
/// already taken, such as `Root Me` after `Root-Me`, gets the first free
/// `-2`, `-3` suffix.
#[derive(Debug, Clone, Default)]
pub struct PlatformAnchors {
    ids: HashMap<String, String>,
}

impl PlatformAnchors {
    pub fn new(challenges: &[Record]) -> Self {
        let mut ids = HashMap::new();
        let mut taken = HashSet::new();

        for record in challenges {
            if ids.contains_key(record.platform()) {
                continue;
            }

            let base = platform_anchor(record.platform());
            let mut id = base.clone();
            let mut n = 1;
            while taken.contains(&id) {
                n += 1;
                id = format!("{}-{}", base, n);
            }

            taken.insert(id.clone());
            ids.insert(record.platform().to_string(), id);
        }

        Self { ids }
    }

    /// Anchor of a platform group; unknown platforms get the plain slug.
    pub fn get(&self, platform: &str) -> String {
        self.ids
            .get(platform)
            .cloned()
            .unwrap_or_else(|| platform_anchor(platform))
    }
}

/// Generates the portfolio landing page
///
/// Shows category and platform bar charts, a monthly activity chart with
/// one line per category, and the challenges grouped by platform in
/// first-seen order. Groups and challenges expand with `<details>`.
///
/// # Arguments
///
/// * `data`: Index page data container with all required fields
///
/// # Returns
///
/// Complete HTML markup for index page
pub fn generate(data: IndexPageData<'_>) -> Markup {
    let by_category = count_by(data.challenges, |r| r.category());
    let by_platform = count_by(data.challenges, |r| r.platform());
    let activity = bucket_by_month(
        data.challenges,
        |r| r.date(),
        |r| r.category(),
        data.assumed_year,
    );
    let series = activity.series_keys();
    let groups = group_by(data.challenges, |r| r.platform());
    let anchors = PlatformAnchors::new(data.challenges);

    page_wrapper(
        Tab::Writeups.label(),
        data.owner,
        &stylesheets("", &[crate::assets::INDEX_CSS]),
        html! {
            (site_header(data.owner, data.github, ""))
            (tabs(Some(Tab::Writeups), ""))

            section class="stats-grid" {
                (bar_chart_svg("By Category", &by_category, category_color))
                (bar_chart_svg("By Platform", &by_platform, platform_color))
                (line_chart_svg("Activity by Month", &activity, &series, category_color))
            }

            main class="card" {
                div class="card-header" {
                    h2 { "CTF Challenges" }
                    (count_label(data.challenges.len(), "challenge", "challenges"))
                }

                @if groups.is_empty() {
                    p class="empty-state" { "No challenges yet" }
                }

                @for (platform, records) in &groups {
                    details class="platform-group" id=(anchors.get(platform)) {
                        summary class="platform-summary" {
                            span {
                                span class="platform-dot" style=(format!("background: {}", platform_color(platform))) {}
                                (platform)
                            }
                            (count_label(records.len(), "challenge", "challenges"))
                        }
                        @for record in records {
                            (challenge_entry(record))
                        }
                    }
                }
            }
        },
    )
}

fn challenge_entry(record: &Record) -> Markup {
    html! {
        details class="challenge" id=(format!("challenge-{}", record.id())) {
            summary class="challenge-summary" {
                span class="challenge-title" { (record.title()) }
                span class="challenge-badges" {
                    (difficulty_badge(record.difficulty()))
                    (category_badge(record.category()))
                }
            }
            div class="challenge-body" {
                @if !record.date().is_empty() {
                    span class="challenge-date" { (record.date()) }
                }
                @if !record.description().is_empty() {
                    p { (record.description()) }
                }
                @if record.has_writeup() {
                    a class="writeup-link" href=(writeup::page_path(record.id())) { "Read write-up →" }
                } @else {
                    span class="faint" { "Write-up coming soon" }
                }
            }
        }
    }
}
