//! Mapping aggregated counts to chart coordinates.
//!
//! Coordinates are in the logical canvas space of a `ChartLayout`, with the
//! origin at the top-left corner and y growing downward (SVG convention).

use super::{CountMap, MonthKey, TimeBucketMap};

/// Logical canvas and plot area of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Room for y-axis labels.
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Room for x-axis labels.
    pub margin_bottom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 180.0,
            margin_left: 40.0,
            margin_right: 10.0,
            margin_top: 10.0,
            margin_bottom: 24.0,
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// y coordinate of the zero line.
    pub fn baseline(&self) -> f64 {
        self.height - self.margin_bottom
    }
}

/// Share of the tallest bar, guarded so an all-zero or empty map divides by one.
fn ratio(count: usize, max_count: usize) -> f64 {
    count as f64 / max_count.max(1) as f64
}

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub key: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fraction of each slot left empty between bars.
const BAR_GAP: f64 = 0.3;

/// Lays out one bar per key in display order.
///
/// Each key gets an equal-width slot across the plot width; bar height is
/// `count / max(1, max_count) * plot_height`, so heights are finite for
/// empty and all-zero maps.
pub fn bar_chart(counts: &CountMap, layout: &ChartLayout) -> Vec<Bar> {
    let ordered = counts.display_order();
    if ordered.is_empty() {
        return Vec::new();
    }

    let max_count = counts.max_count();
    let slot = layout.plot_width() / ordered.len() as f64;
    let width = slot * (1.0 - BAR_GAP);

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (key, count))| {
            let height = ratio(count, max_count) * layout.plot_height();
            Bar {
                key: key.to_string(),
                count,
                x: layout.margin_left + i as f64 * slot + slot * BAR_GAP / 2.0,
                y: layout.baseline() - height,
                width,
                height,
            }
        })
        .collect()
}

/// One point of a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub series: String,
    pub month: MonthKey,
    pub count: usize,
}

impl PlotPoint {
    /// Canonical "Mon YYYY" label of the point's month.
    pub fn month_label(&self) -> String {
        self.month.label()
    }
}

/// Maps month buckets to line chart points.
///
/// For month index `i` of `n`, `x = margin_left + i / max(1, n - 1) *
/// plot_width`; a single month sits on the left margin. `y` is measured up
/// from the baseline against the largest count among the requested series.
/// Points are grouped by series, in `series` order, months ascending.
pub fn line_chart(buckets: &TimeBucketMap, series: &[&str], layout: &ChartLayout) -> Vec<PlotPoint> {
    let months: Vec<(&MonthKey, &CountMap)> = buckets.iter().collect();
    let steps = months.len().saturating_sub(1).max(1) as f64;

    let max_count = months
        .iter()
        .flat_map(|(_, counts)| series.iter().map(|s| counts.get(s)))
        .max()
        .unwrap_or(0);

    let mut points = Vec::with_capacity(series.len() * months.len());
    for name in series {
        for (i, (month, counts)) in months.iter().enumerate() {
            let count = counts.get(name);
            points.push(PlotPoint {
                x: layout.margin_left + (i as f64 / steps) * layout.plot_width(),
                y: layout.baseline() - ratio(count, max_count) * layout.plot_height(),
                series: name.to_string(),
                month: **month,
                count,
            });
        }
    }

    points
}

/// Y-axis tick values with their y coordinates: zero and the maximum,
/// plus the midpoint when it is a whole number.
pub fn y_ticks(max_count: usize, layout: &ChartLayout) -> Vec<(usize, f64)> {
    let top = max_count.max(1);
    let mut values = vec![0, top];
    if top % 2 == 0 && top > 2 {
        values.insert(1, top / 2);
    }

    values
        .into_iter()
        .map(|v| (v, layout.baseline() - ratio(v, top) * layout.plot_height()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::stats::bucket_by_month;

    fn layout() -> ChartLayout {
        ChartLayout::default()
    }

    fn dated(id: u64, category: &str, date: &str) -> Record {
        Record::new(id, "t", "p", category).with_date(date)
    }

    #[test]
    fn test_default_layout_dimensions() {
        let layout = layout();

        assert_eq!(layout.plot_width(), 350.0);
        assert_eq!(layout.plot_height(), 146.0);
        assert_eq!(layout.baseline(), 156.0);
    }

    #[test]
    fn test_bar_heights_relative_to_max() {
        // Arrange
        let counts: CountMap = [("Web", 2), ("Crypto", 1)].into_iter().collect();

        // Act
        let bars = bar_chart(&counts, &layout());

        // Assert
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].key, "Web");
        assert_eq!(bars[0].height, 146.0);
        assert_eq!(bars[0].y, 10.0);
        assert_eq!(bars[1].height, 73.0);
        assert_eq!(bars[1].y + bars[1].height, layout().baseline());
    }

    #[test]
    fn test_bars_use_equal_slots() {
        let counts: CountMap = [("a", 1), ("b", 1)].into_iter().collect();

        let bars = bar_chart(&counts, &layout());

        assert_eq!(bars[0].width, bars[1].width);
        assert!((bars[1].x - bars[0].x - 175.0).abs() < 1e-9);
        assert!(bars[1].x + bars[1].width <= layout().width - layout().margin_right);
    }

    #[test]
    fn test_empty_count_map_yields_no_bars() {
        let bars = bar_chart(&CountMap::new(), &layout());

        assert!(bars.is_empty());
    }

    #[test]
    fn test_all_zero_counts_yield_zero_height_bars() {
        // Arrange
        let counts: CountMap = [("a", 0), ("b", 0)].into_iter().collect();

        // Act
        let bars = bar_chart(&counts, &layout());

        // Assert
        assert_eq!(bars.len(), 2);
        for bar in &bars {
            assert!(bar.height.is_finite());
            assert_eq!(bar.height, 0.0);
            assert_eq!(bar.y, layout().baseline());
        }
    }

    #[test]
    fn test_line_chart_positions() {
        // Arrange
        let records = vec![
            dated(1, "X", "Oct 2024"),
            dated(2, "X", "Nov 2024"),
            dated(3, "X", "Nov 2024"),
            dated(4, "Y", "Dec 2024"),
        ];
        let buckets = bucket_by_month(&records, |r| r.date(), |r| r.category(), 2025);

        // Act
        let points = line_chart(&buckets, &["X", "Y"], &layout());

        // Assert
        assert_eq!(points.len(), 6);
        let xs: Vec<f64> = points[..3].iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![40.0, 215.0, 390.0]);
        assert_eq!(points[1].count, 2);
        assert_eq!(points[1].y, 10.0);
        assert_eq!(points[0].y, 83.0);
        assert_eq!(points[3].series, "Y");
        assert_eq!(points[3].count, 0);
        assert_eq!(points[3].y, layout().baseline());
        assert_eq!(points[5].month_label(), "Dec 2024");
    }

    #[test]
    fn test_single_month_sits_on_left_margin() {
        let records = vec![dated(1, "X", "Nov 2024")];
        let buckets = bucket_by_month(&records, |r| r.date(), |r| r.category(), 2025);

        let points = line_chart(&buckets, &["X"], &layout());

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, layout().margin_left);
        assert!(points[0].y.is_finite());
    }

    #[test]
    fn test_line_chart_empty_inputs() {
        let buckets = TimeBucketMap::default();

        assert!(line_chart(&buckets, &["X"], &layout()).is_empty());
        assert!(line_chart(&buckets, &[], &layout()).is_empty());
    }

    #[test]
    fn test_unknown_series_is_flat_zero() {
        let records = vec![dated(1, "X", "Nov 2024"), dated(2, "X", "Dec 2024")];
        let buckets = bucket_by_month(&records, |r| r.date(), |r| r.category(), 2025);

        let points = line_chart(&buckets, &["Missing"], &layout());

        assert!(points.iter().all(|p| p.count == 0 && p.y == layout().baseline()));
    }

    #[test]
    fn test_y_ticks() {
        let layout = layout();

        assert_eq!(y_ticks(0, &layout), vec![(0, 156.0), (1, 10.0)]);
        assert_eq!(y_ticks(4, &layout), vec![(0, 156.0), (2, 83.0), (4, 10.0)]);
        assert_eq!(y_ticks(3, &layout).len(), 2);
    }
}
