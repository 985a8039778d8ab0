//! Property tests over the adjustment and odds invariants.

use hero_core::{
    apply_adjustment, build_population, compute_adjustment, derive_snapshot, Participant, Roster,
    Tuning,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn roster_strategy() -> impl Strategy<Value = Roster> {
    // Unique generated names with weights across (and beyond) the bounds
    prop::collection::vec(0.1f64..20.0, 1..12).prop_map(|weights| {
        Roster::new(
            weights
                .into_iter()
                .enumerate()
                .map(|(i, w)| Participant::new(&format!("member{}", i), w))
                .collect(),
        )
        .unwrap()
    })
}

proptest! {
    #[test]
    fn applied_weight_always_within_bounds(
        old_weight in -100.0f64..100.0,
        delta in -1000.0f64..1000.0,
    ) {
        let tuning = Tuning::default();
        let new_weight = apply_adjustment(&tuning, old_weight, delta);
        prop_assert!(new_weight >= tuning.min_weight);
        prop_assert!(new_weight <= tuning.max_weight);
    }

    #[test]
    fn applied_weight_keeps_four_decimals(
        old_weight in 0.5f64..15.0,
        delta in -20.0f64..20.0,
    ) {
        let tuning = Tuning::default();
        let new_weight = apply_adjustment(&tuning, old_weight, delta);
        let rescaled = new_weight * 10_000.0;
        prop_assert!((rescaled - rescaled.round()).abs() < 1e-6);
    }

    #[test]
    fn snapshot_percentages_sum_to_hundred(roster in roster_strategy()) {
        let tuning = Tuning::default();
        if let Ok(snapshot) = derive_snapshot(&tuning, &roster) {
            let sum: f64 = snapshot.entries().iter().map(|e| e.percentage).sum();
            let tolerance = 0.01 * snapshot.entries().len() as f64;
            prop_assert!((sum - 100.0).abs() <= tolerance, "sum was {}", sum);
        }
    }

    #[test]
    fn snapshot_derivation_is_idempotent(roster in roster_strategy()) {
        let tuning = Tuning::default();
        let first = derive_snapshot(&tuning, &roster).ok();
        let second = derive_snapshot(&tuning, &roster).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn population_counts_equal_rounded_weights(roster in roster_strategy(), seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(population) = build_population(&tuning, &roster, &mut rng) {
            for member in roster.members() {
                let expected = member.weight.round() as usize;
                let prefix = format!("{} (", member.name);
                let actual = population.iter().filter(|l| l.starts_with(&prefix)).count();
                prop_assert_eq!(actual, expected, "{}", member.name.clone());
            }
        }
    }

    #[test]
    fn excluded_members_never_reach_the_wheel(
        roster in roster_strategy(),
        seed in any::<u64>(),
    ) {
        let excluded_name = "member0".to_string();
        let tuning = Tuning {
            excluded: vec![excluded_name.clone()],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(population) = build_population(&tuning, &roster, &mut rng) {
            let prefix = format!("{} (", excluded_name);
            prop_assert!(!population.iter().any(|l| l.starts_with(&prefix)));
        }
    }

    #[test]
    fn adjustments_never_error_for_known_names(
        roster in roster_strategy(),
        winner_idx in 0usize..12,
        guesser_idx in 0usize..12,
        guess_idx in 0usize..12,
    ) {
        let tuning = Tuning::default();
        let rounded_total: f64 = roster.members().iter().map(|m| m.weight.round()).sum();
        prop_assume!(rounded_total > 0.0);

        let name = |idx: usize| format!("member{}", idx % roster.len());
        let winner = name(winner_idx);
        let person = name(guesser_idx);
        let guess = name(guess_idx);

        let delta =
            compute_adjustment(&tuning, &person, &winner, Some(&guess), &roster).unwrap();
        let old_weight = roster.get(&person).unwrap().weight;
        let new_weight = apply_adjustment(&tuning, old_weight, delta);
        prop_assert!(new_weight >= tuning.min_weight && new_weight <= tuning.max_weight);
    }
}
