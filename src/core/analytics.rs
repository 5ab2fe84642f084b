//! Chart derivations over freshly loaded tables

use crate::core::entry::{MetalPriceEntry, MoodEntry};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// One point of the gold price trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub recorded_at: NaiveDateTime,
    pub price_per_gram: f64,
}

/// Number of entries recorded for one distinct mood label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCount {
    pub mood: String,
    pub count: u64,
}

/// Gold rows of the metal table in ascending time order.
///
/// Names are matched case-insensitively. Rows sharing a timestamp are ordered
/// by price so the output does not depend on the order of `entries`.
pub fn gold_trend(entries: &[MetalPriceEntry]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = entries
        .iter()
        .filter(|e| e.metal_name.to_lowercase() == "gold")
        .map(|e| TrendPoint {
            recorded_at: e.recorded_at,
            price_per_gram: e.price_per_gram,
        })
        .collect();

    points.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then(a.price_per_gram.total_cmp(&b.price_per_gram))
    });
    points
}

/// Occurrences per distinct mood label, most frequent first.
///
/// Ties are ordered alphabetically.
pub fn mood_frequency(entries: &[MoodEntry]) -> Vec<MoodCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.mood.as_str()).or_default() += 1;
    }

    let mut frequency: Vec<MoodCount> = counts
        .into_iter()
        .map(|(mood, count)| MoodCount {
            mood: mood.to_string(),
            count,
        })
        .collect();
    frequency.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn metal(name: &str, price: f64, recorded_at: NaiveDateTime) -> MetalPriceEntry {
        MetalPriceEntry {
            metal_name: name.to_string(),
            price_per_gram: price,
            recorded_at,
        }
    }

    fn mood(label: &str, recorded_at: NaiveDateTime) -> MoodEntry {
        MoodEntry {
            mood: label.to_string(),
            recorded_at,
        }
    }

    #[test]
    fn test_gold_trend_filters_case_insensitively_and_sorts_ascending() {
        let entries = vec![
            metal("Gold", 66.0, at(3, 9)),
            metal("Silver", 0.9, at(2, 9)),
            metal("GOLD", 65.0, at(1, 9)),
            metal("gold", 65.5, at(2, 9)),
            metal("Golden", 1.0, at(2, 9)),
        ];

        let trend = gold_trend(&entries);
        let prices: Vec<f64> = trend.iter().map(|p| p.price_per_gram).collect();
        assert_eq!(prices, vec![65.0, 65.5, 66.0]);
        assert!(trend.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));
    }

    #[test]
    fn test_gold_trend_is_independent_of_input_order() {
        let mut entries = vec![
            metal("Gold", 64.0, at(4, 9)),
            metal("Gold", 63.0, at(4, 9)),
            metal("Gold", 62.0, at(1, 9)),
            metal("Platinum", 30.0, at(2, 9)),
        ];
        let expected = gold_trend(&entries);

        entries.reverse();
        assert_eq!(gold_trend(&entries), expected);

        entries.rotate_left(1);
        assert_eq!(gold_trend(&entries), expected);

        // Deriving twice yields the same sequence
        let again: Vec<MetalPriceEntry> = expected
            .iter()
            .map(|p| metal("Gold", p.price_per_gram, p.recorded_at))
            .collect();
        assert_eq!(gold_trend(&again), expected);
    }

    #[test]
    fn test_gold_trend_empty_without_gold_rows() {
        let entries = vec![metal("Silver", 0.95, at(1, 9))];
        assert!(gold_trend(&entries).is_empty());
        assert!(gold_trend(&[]).is_empty());
    }

    #[test]
    fn test_mood_frequency_counts_each_label_once() {
        let entries = vec![
            mood("Happy", at(1, 8)),
            mood("Sad", at(1, 9)),
            mood("Happy", at(1, 10)),
            mood("Neutral", at(1, 11)),
            mood("Happy", at(1, 12)),
            mood("Sad", at(1, 13)),
        ];

        let frequency = mood_frequency(&entries);
        assert_eq!(
            frequency,
            vec![
                MoodCount {
                    mood: "Happy".into(),
                    count: 3
                },
                MoodCount {
                    mood: "Sad".into(),
                    count: 2
                },
                MoodCount {
                    mood: "Neutral".into(),
                    count: 1
                },
            ]
        );

        let total: u64 = frequency.iter().map(|c| c.count).sum();
        assert_eq!(total, entries.len() as u64);
    }

    #[test]
    fn test_mood_frequency_keeps_free_text_labels() {
        let entries = vec![mood("calm", at(1, 8)), mood("Excited", at(1, 9))];
        let labels: Vec<String> = mood_frequency(&entries)
            .into_iter()
            .map(|c| c.mood)
            .collect();
        assert_eq!(labels, vec!["Excited".to_string(), "calm".to_string()]);
    }

    #[test]
    fn test_mood_frequency_empty_table() {
        assert!(mood_frequency(&[]).is_empty());
    }
}
