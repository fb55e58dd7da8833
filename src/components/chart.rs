//! Inline SVG chart components

use maud::{Markup, html};

use crate::stats::{ChartLayout, CountMap, PlotPoint, TimeBucketMap, bar_chart, line_chart, y_ticks};

/// Maps a bar or series key to its fill colour.
pub type ColorFn = fn(&str) -> &'static str;

fn coord(value: f64) -> String {
    format!("{:.1}", value)
}

fn view_box(layout: &ChartLayout) -> String {
    format!("0 0 {} {}", layout.width, layout.height)
}

fn axes(layout: &ChartLayout, max_count: usize) -> Markup {
    let left = layout.margin_left;
    let right = layout.width - layout.margin_right;

    html! {
        line class="chart-axis"
            x1=(coord(left)) y1=(coord(layout.baseline()))
            x2=(coord(right)) y2=(coord(layout.baseline())) {}
        @for (value, y) in y_ticks(max_count, layout) {
            line class="chart-grid" x1=(coord(left)) y1=(coord(y)) x2=(coord(right)) y2=(coord(y)) {}
            text class="chart-tick" x=(coord(left - 6.0)) y=(coord(y + 3.0)) text-anchor="end" { (value) }
        }
    }
}

/// Renders a bar chart of counts in display order
///
/// # Arguments
///
/// * `title`: Caption above the chart, also the SVG accessible label
/// * `counts`: Counts to plot
/// * `color`: Fill colour per key
///
/// # Returns
///
/// Figure with an inline SVG, or an empty-state note when there is no data
pub fn bar_chart_svg(title: &str, counts: &CountMap, color: ColorFn) -> Markup {
    let layout = ChartLayout::default();
    let bars = bar_chart(counts, &layout);

    html! {
        figure class="chart" {
            figcaption class="chart-title" { (title) }
            @if bars.is_empty() {
                p class="empty-state" { "No data yet" }
            } @else {
                svg class="chart-svg" viewBox=(view_box(&layout)) role="img" aria-label=(title) {
                    (axes(&layout, counts.max_count()))
                    @for bar in &bars {
                        @let center = bar.x + bar.width / 2.0;
                        rect class="chart-bar"
                            x=(coord(bar.x)) y=(coord(bar.y))
                            width=(coord(bar.width)) height=(coord(bar.height))
                            fill=(color(&bar.key)) {
                            title { (bar.key) ": " (bar.count) }
                        }
                        text class="chart-value" x=(coord(center)) y=(coord(bar.y - 3.0)) text-anchor="middle" {
                            (bar.count)
                        }
                        text class="chart-label" x=(coord(center)) y=(coord(layout.baseline() + 14.0)) text-anchor="middle" {
                            (bar.key)
                        }
                    }
                }
            }
        }
    }
}

fn polyline_points(points: &[&PlotPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", coord(p.x), coord(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one line per series over the months of `buckets`
///
/// Months are labelled along the x axis; a legend below the chart names
/// each series in its colour.
pub fn line_chart_svg(title: &str, buckets: &TimeBucketMap, series: &[&str], color: ColorFn) -> Markup {
    let layout = ChartLayout::default();
    let points = line_chart(buckets, series, &layout);
    let max_count = points.iter().map(|p| p.count).max().unwrap_or(0);
    let first_series: Vec<&PlotPoint> = points
        .iter()
        .filter(|p| series.first().is_some_and(|s| p.series == *s))
        .collect();

    html! {
        figure class="chart chart-wide" {
            figcaption class="chart-title" { (title) }
            @if points.is_empty() {
                p class="empty-state" { "No dated challenges yet" }
            } @else {
                svg class="chart-svg" viewBox=(view_box(&layout)) role="img" aria-label=(title) {
                    (axes(&layout, max_count))
                    @for point in &first_series {
                        text class="chart-label" x=(coord(point.x)) y=(coord(layout.baseline() + 14.0)) text-anchor="middle" {
                            (point.month_label())
                        }
                    }
                    @for name in series {
                        @let series_points: Vec<&PlotPoint> = points.iter().filter(|p| p.series == *name).collect();
                        polyline class="chart-line" points=(polyline_points(&series_points)) stroke=(color(name)) fill="none" {}
                        @for point in &series_points {
                            circle class="chart-point" cx=(coord(point.x)) cy=(coord(point.y)) r="2.5" fill=(color(name)) {
                                title { (point.series) ", " (point.month_label()) ": " (point.count) }
                            }
                        }
                    }
                }
                ul class="chart-legend" {
                    @for name in series {
                        li {
                            span class="legend-swatch" style=(format!("background: {}", color(name))) {}
                            (name)
                        }
                    }
                }
            }
        }
    }
}
