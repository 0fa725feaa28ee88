use std::collections::HashMap;

use super::model::SalaryRecord;
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// SummaryMetrics – the four metric cards
// ---------------------------------------------------------------------------

/// Scalar statistics over the filtered view. All zero / empty when the view is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub total_records: usize,
    /// Most frequent role; ties go to the role seen first.
    pub most_frequent_role: String,
}

impl SummaryMetrics {
    pub fn compute(records: &[&SalaryRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total: f64 = records.iter().map(|r| r.salary_usd).sum();
        let max_salary = records
            .iter()
            .map(|r| r.salary_usd)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean_salary: total / records.len() as f64,
            max_salary,
            total_records: records.len(),
            most_frequent_role: mode(records.iter().map(|r| r.role.as_str()))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Most frequent value; ties broken by first occurrence.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in count_by_first_appearance(values) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrence counts, in the order each value first appears.
fn count_by_first_appearance<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match position.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean salary of one group (a role or a country).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean salary per key, groups in first-appearance order.
pub fn group_mean_by<'a, F>(records: &[&'a SalaryRecord], key: F) -> Vec<GroupMean>
where
    F: Fn(&'a SalaryRecord) -> &'a str,
{
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for &record in records {
        let k = key(record);
        match position.get(k) {
            Some(&i) => {
                sums[i].1 += record.salary_usd;
                sums[i].2 += 1;
            }
            None => {
                position.insert(k, sums.len());
                sums.push((k, record.salary_usd, 1));
            }
        }
    }

    sums.into_iter()
        .map(|(k, sum, count)| GroupMean {
            key: k.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// Sort by mean descending (stable, so ties keep group order), then keep `n`.
pub fn top_n_by_mean(mut groups: Vec<GroupMean>, n: usize) -> Vec<GroupMean> {
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    groups.truncate(n);
    groups
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Fixed-width histogram; `counts.len()` is always the requested bin count.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite `values` into `bins` equal-width bins spanning
    /// `[min, max]`. Returns `None` when there is nothing to bin.
    pub fn build(values: impl IntoIterator<Item = f64>, bins: usize) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (start, span) = if max > min {
            (min, max - min)
        } else {
            (min - 0.5, 1.0)
        };
        let bin_width = span / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = ((v - start) / bin_width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Some(Histogram {
            start,
            bin_width,
            counts,
        })
    }

    /// Centre of bin `i` on the salary axis.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Category proportions
// ---------------------------------------------------------------------------

/// One slice of a proportional chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    /// Share of the total in `[0, 1]`.
    pub fraction: f64,
}

/// Counts per category, most frequent first (ties by first appearance).
pub fn category_shares<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryShare> {
    let mut counts = count_by_first_appearance(values);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label: label.to_string(),
            count,
            fraction: count as f64 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardReport – everything the main panel renders
// ---------------------------------------------------------------------------

/// All aggregations over one filtered view, recomputed on every filter change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardReport {
    pub metrics: SummaryMetrics,
    /// Highest mean salary first, at most `top_n` roles.
    pub top_roles: Vec<GroupMean>,
    pub salary_histogram: Option<Histogram>,
    pub remote_shares: Vec<CategoryShare>,
    /// Mean salary of the focus role per residence country, in group order.
    pub country_means: Vec<GroupMean>,
    /// `country_means` ranked descending and cut to `top_n`.
    pub top_countries: Vec<GroupMean>,
}

impl DashboardReport {
    pub fn build(records: &[&SalaryRecord], config: &DashboardConfig) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let role_means = group_mean_by(records, |r| r.role.as_str());

        let focus: Vec<&SalaryRecord> = records
            .iter()
            .copied()
            .filter(|r| r.role == config.focus_role)
            .collect();
        let country_means = group_mean_by(&focus, |r| r.residence_iso3.as_str());

        Self {
            metrics: SummaryMetrics::compute(records),
            top_roles: top_n_by_mean(role_means, config.top_n),
            salary_histogram: Histogram::build(
                records.iter().map(|r| r.salary_usd),
                config.histogram_bins,
            ),
            remote_shares: category_shares(records.iter().map(|r| r.remote.as_str())),
            top_countries: top_n_by_mean(country_means.clone(), config.top_n),
            country_means,
        }
    }

    /// True when the filtered view had no records.
    pub fn is_empty(&self) -> bool {
        self.metrics.total_records == 0
    }
}
