//! Day-weighted random selection over the truth store.
//!
//! Each weekday carries a distribution over weight tiers. Selection draws a
//! tier by cumulative probability, then a record uniformly within that tier's
//! bucket. Gaps in configuration or content never fail a request: a weekday
//! absent from the table, or a drawn tier with no records, falls back to a
//! uniform draw over the whole store.

use chrono::Weekday;
use rand::Rng;

use crate::config::SelectionConfig;
use crate::store::{TruthRecord, TruthStore, WeightTier};

/// Lowercase name for a weekday, matching config keys and response bodies.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Picks one record for the given weekday.
///
/// Randomized per call; nothing is cached between requests and records within
/// a tier are equiprobable. The store is guaranteed non-empty at load time.
pub fn select<'a, R: Rng>(
    day: Weekday,
    store: &'a TruthStore,
    selection: &SelectionConfig,
    rng: &mut R,
) -> &'a TruthRecord {
    let Some(weights) = selection.day_weight_table.get(day_name(day)) else {
        return uniform(store, rng);
    };

    let total = weights.total();
    if !(total > 0.0) {
        return uniform(store, rng);
    }

    // Cumulative draw over the day's tier weights. The running subtraction
    // keeps the last positive tier as the winner if floating point rounding
    // leaves the draw past the final boundary.
    let mut draw = rng.gen_range(0.0..total);
    let mut chosen = None;
    for tier in WeightTier::ALL {
        let weight = weights.get(tier);
        if weight <= 0.0 {
            continue;
        }
        chosen = Some(tier);
        if draw < weight {
            break;
        }
        draw -= weight;
    }

    let bucket = match chosen {
        Some(tier) => store.bucket(tier),
        None => return uniform(store, rng),
    };
    if bucket.is_empty() {
        return uniform(store, rng);
    }
    &store.records()[bucket[rng.gen_range(0..bucket.len())]]
}

fn uniform<'a, R: Rng>(store: &'a TruthStore, rng: &mut R) -> &'a TruthRecord {
    &store.records()[rng.gen_range(0..store.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    use crate::config::TierWeights;
    use crate::store::TruthRecord;

    fn record(id: &str, weight: WeightTier) -> TruthRecord {
        TruthRecord {
            id: id.to_string(),
            text: format!("Truth {}.", id),
            category: "general".to_string(),
            weight,
        }
    }

    fn store_with_all_tiers() -> TruthStore {
        TruthStore::from_records(
            vec![
                record("low-1", WeightTier::Low),
                record("low-2", WeightTier::Low),
                record("med-1", WeightTier::Medium),
                record("high-1", WeightTier::High),
            ],
            1,
        )
        .unwrap()
    }

    fn selection_for_monday(low: f64, medium: f64, high: f64) -> SelectionConfig {
        let mut table = HashMap::new();
        table.insert("monday".to_string(), TierWeights { low, medium, high });
        SelectionConfig {
            day_weight_table: table,
        }
    }

    #[test]
    fn test_tier_frequencies_approximate_distribution() {
        let store = store_with_all_tiers();
        let selection = selection_for_monday(0.2, 0.3, 0.5);
        let mut rng = StdRng::seed_from_u64(7);

        let trials = 10_000;
        let mut counts: HashMap<WeightTier, u32> = HashMap::new();
        for _ in 0..trials {
            let picked = select(Weekday::Mon, &store, &selection, &mut rng);
            *counts.entry(picked.weight).or_default() += 1;
        }

        let frequency = |tier| *counts.get(&tier).unwrap_or(&0) as f64 / trials as f64;
        assert!((frequency(WeightTier::Low) - 0.2).abs() < 0.03);
        assert!((frequency(WeightTier::Medium) - 0.3).abs() < 0.03);
        assert!((frequency(WeightTier::High) - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_records_within_tier_are_equiprobable() {
        let store = store_with_all_tiers();
        let selection = selection_for_monday(1.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(11);

        let trials = 10_000;
        let mut low_1 = 0u32;
        for _ in 0..trials {
            let picked = select(Weekday::Mon, &store, &selection, &mut rng);
            assert_eq!(picked.weight, WeightTier::Low);
            if picked.id == "low-1" {
                low_1 += 1;
            }
        }
        let frequency = low_1 as f64 / trials as f64;
        assert!((frequency - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_empty_tier_falls_back_to_whole_store() {
        let store = TruthStore::from_records(
            vec![record("low-1", WeightTier::Low), record("med-1", WeightTier::Medium)],
            1,
        )
        .unwrap();
        // All weight on a tier with no records.
        let selection = selection_for_monday(0.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(13);

        let mut seen_low = false;
        let mut seen_medium = false;
        for _ in 0..200 {
            match select(Weekday::Mon, &store, &selection, &mut rng).weight {
                WeightTier::Low => seen_low = true,
                WeightTier::Medium => seen_medium = true,
                WeightTier::High => unreachable!("store has no high records"),
            }
        }
        assert!(seen_low && seen_medium);
    }

    #[test]
    fn test_missing_day_selects_uniformly() {
        let store = store_with_all_tiers();
        let selection = selection_for_monday(0.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(17);

        // Tuesday has no entry, so every record should surface eventually.
        let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(select(Weekday::Tue, &store, &selection, &mut rng).id.clone());
        }
        assert_eq!(seen.len(), store.len());
    }

    #[test]
    fn test_sole_record_in_favored_tier_always_wins() {
        let store = store_with_all_tiers();
        let selection = selection_for_monday(0.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(19);

        for _ in 0..100 {
            assert_eq!(select(Weekday::Mon, &store, &selection, &mut rng).id, "high-1");
        }
    }

    #[test]
    fn test_day_names_cover_week() {
        assert_eq!(day_name(Weekday::Mon), "monday");
        assert_eq!(day_name(Weekday::Sun), "sunday");
    }
}
