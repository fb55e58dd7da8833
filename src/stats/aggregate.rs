//! Grouping, counting and month bucketing over challenge records.
//!
//! All operations are deterministic: key order is the first-seen order of
//! the input, so identical input always yields identical output.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::MonthKey;
use crate::record::Record;

/// Records grouped by key, keys in first-seen order.
pub type Groups<'r, K> = Vec<(K, Vec<&'r Record>)>;

/// Groups records by key.
///
/// Every record lands in exactly one group; records keep their input order
/// within a group.
pub fn group_by<'r, K, F>(records: &'r [Record], key: F) -> Groups<'r, K>
where
    K: Eq + Hash + Clone,
    F: Fn(&'r Record) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Groups<'r, K> = Vec::new();

    for record in records {
        let k = key(record);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![record]));
            }
        }
    }

    groups
}

/// Key to count mapping with first-seen storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` to the count for `key`, registering the key if new.
    pub fn add(&mut self, key: &str, n: usize) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Count for `key`; zero when the key was never seen.
    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Largest count, zero when empty.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Entries ordered for charts: count descending, ties by first-seen order.
    pub fn display_order(&self) -> Vec<(&str, usize)> {
        let mut ordered: Vec<(&str, usize)> = self.iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = CountMap::new();
        for (key, n) in iter {
            counts.add(key.as_ref(), n);
        }
        counts
    }
}

/// Counts records per key.
pub fn count_by<'r, K, F>(records: &'r [Record], key: F) -> CountMap
where
    K: AsRef<str>,
    F: Fn(&'r Record) -> K,
{
    let mut counts = CountMap::new();
    for record in records {
        counts.increment(key(record).as_ref());
    }
    counts
}

/// Sub-key counts per month, months in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBucketMap {
    buckets: BTreeMap<MonthKey, CountMap>,
    dropped: usize,
}

impl TimeBucketMap {
    /// Months ascending with their sub-key counts.
    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &CountMap)> {
        self.buckets.iter()
    }

    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.buckets.keys()
    }

    pub fn get(&self, month: &MonthKey) -> Option<&CountMap> {
        self.buckets.get(month)
    }

    /// Number of months with at least one record.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Records left out because their date label did not parse.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Records placed in a bucket.
    pub fn total(&self) -> usize {
        self.buckets.values().map(CountMap::total).sum()
    }

    /// Largest single sub-key count across all months.
    pub fn max_count(&self) -> usize {
        self.buckets
            .values()
            .map(CountMap::max_count)
            .max()
            .unwrap_or(0)
    }

    /// Sub-keys in order of first appearance walking months ascending.
    pub fn series_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for counts in self.buckets.values() {
            for (key, _) in counts.iter() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

/// Buckets records by month and counts a sub-key inside each month.
///
/// Labels without a year use `assumed_year`, the same value for every
/// record in the call. Records whose label does not parse are dropped
/// and counted in `TimeBucketMap::dropped`, so `total() + dropped()`
/// always equals the number of input records.
pub fn bucket_by_month<'r, D, S, DK, SK>(
    records: &'r [Record],
    date: D,
    sub_key: S,
    assumed_year: i32,
) -> TimeBucketMap
where
    D: Fn(&'r Record) -> DK,
    S: Fn(&'r Record) -> SK,
    DK: AsRef<str>,
    SK: AsRef<str>,
{
    let mut buckets: BTreeMap<MonthKey, CountMap> = BTreeMap::new();
    let mut dropped = 0;

    for record in records {
        match MonthKey::parse(date(record).as_ref(), assumed_year) {
            Some(month) => buckets
                .entry(month)
                .or_default()
                .increment(sub_key(record).as_ref()),
            None => dropped += 1,
        }
    }

    TimeBucketMap { buckets, dropped }
}
