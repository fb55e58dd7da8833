//! Aggregation of challenge records into counts, month buckets, and chart
//! coordinates.

mod aggregate;
mod chart;
mod month;

pub use aggregate::{CountMap, Groups, TimeBucketMap, bucket_by_month, count_by, group_by};
pub use chart::{Bar, ChartLayout, PlotPoint, bar_chart, line_chart, y_ticks};
pub use month::{DEFAULT_ASSUMED_YEAR, MonthKey};
