use std::collections::BTreeMap;

use crate::data::TrackRecord;

use super::chart::{BoxStats, HistogramBin};

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        if value.is_finite() {
            sum += value;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

pub fn top_n_by<'a>(
    tracks: impl IntoIterator<Item = &'a TrackRecord>,
    n: usize,
    key: impl Fn(&TrackRecord) -> Option<f64>,
) -> Vec<&'a TrackRecord> {
    let mut keyed = tracks
        .into_iter()
        .filter_map(|track| {
            key(track)
                .filter(|value| value.is_finite())
                .map(|value| (value, track))
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.truncate(n);
    keyed.into_iter().map(|(_, track)| track).collect()
}

pub fn value_counts<K: Ord>(keys: impl IntoIterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0usize) += 1;
    }

    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn group_mean<K: Ord>(pairs: impl IntoIterator<Item = (K, f64)>) -> Vec<(K, f64, usize)> {
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for (key, value) in pairs {
        if !value.is_finite() {
            continue;
        }
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64, count))
        .collect()
}

pub fn group_mean_by_value(pairs: impl IntoIterator<Item = (f64, f64)>) -> Vec<(f64, f64, usize)> {
    let mut pairs = pairs
        .into_iter()
        .filter(|(key, value)| key.is_finite() && value.is_finite())
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<(f64, f64, usize)> = Vec::new();
    for (key, value) in pairs {
        match groups.last_mut() {
            Some(last) if last.0 == key => {
                last.1 += value;
                last.2 += 1;
            }
            _ => groups.push((key, value, 1)),
        }
    }

    for group in &mut groups {
        group.1 /= group.2 as f64;
    }
    groups
}

pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn box_stats(label: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Option<BoxStats> {
    let mut values = values
        .into_iter()
        .filter(|value| value.is_finite())
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);

    Some(BoxStats {
        label: label.into(),
        min: *values.first()?,
        q1: quantile(&values, 0.25)?,
        median: quantile(&values, 0.5)?,
        q3: quantile(&values, 0.75)?,
        max: *values.last()?,
        count: values.len(),
    })
}

pub fn histogram(values: impl IntoIterator<Item = f64>, bins: usize) -> Vec<HistogramBin> {
    let values = values
        .into_iter()
        .filter(|value| value.is_finite())
        .collect::<Vec<_>>();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result = (0..bins)
        .map(|index| HistogramBin {
            start: min + width * index as f64,
            end: min + width * (index + 1) as f64,
            count: 0,
        })
        .collect::<Vec<_>>();

    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}
