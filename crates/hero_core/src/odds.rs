//! Probability snapshots and the discrete lottery population.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::roster::{Participant, Roster};
use crate::tuning::Tuning;

/// One participant's share of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsEntry {
    pub name: String,
    /// Stored weight, unrounded.
    pub weight: f64,
    /// Number of wheel slots this participant gets.
    pub slots: u32,
    /// Share of the wheel in percent, derived from the rounded slots.
    pub percentage: f64,
}

impl OddsEntry {
    /// The display form of the percentage, e.g. `"52.00%"`.
    pub fn percent(&self) -> String {
        format!("{:.2}%", self.percentage)
    }

    /// The label written on each wheel slot, e.g. `"Sam (52.00%)"`.
    pub fn label(&self) -> String {
        format!("{} ({:.2}%)", self.name, self.percentage)
    }
}

/// Read-only probability view over a roster.
///
/// Derived from the pre-round roster when scoring predictions and from the
/// post-round roster when reporting; deriving twice from an unchanged
/// roster yields identical snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: Vec<OddsEntry>,
    total_slots: u32,
}

impl Snapshot {
    /// Entries in roster order.
    pub fn entries(&self) -> &[OddsEntry] {
        &self.entries
    }

    /// Entries sorted by descending wheel share, for console reports.
    pub fn ranked(&self) -> Vec<&OddsEntry> {
        let mut ranked: Vec<&OddsEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.slots.cmp(&a.slots));
        ranked
    }

    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }
}

/// Derive the current odds from a roster.
///
/// Participants with non-positive weight or on the exclusion list are
/// filtered out first. Fails with `EmptyPopulation` when nothing remains
/// or every retained weight rounds to zero.
pub fn derive_snapshot(tuning: &Tuning, roster: &Roster) -> Result<Snapshot> {
    let retained: Vec<&Participant> = roster
        .members()
        .iter()
        .filter(|m| m.weight > 0.0 && !tuning.is_excluded(&m.name))
        .collect();

    let total_slots: u32 = retained.iter().map(|m| m.weight.round() as u32).sum();
    if retained.is_empty() || total_slots == 0 {
        return Err(Error::EmptyPopulation);
    }

    let entries = retained
        .iter()
        .map(|m| {
            let slots = m.weight.round() as u32;
            OddsEntry {
                name: m.name.clone(),
                weight: m.weight,
                slots,
                percentage: slots as f64 / total_slots as f64 * 100.0,
            }
        })
        .collect();

    Ok(Snapshot {
        entries,
        total_slots,
    })
}

/// Build the wheel population: each retained participant appears once per
/// slot, labeled with name and percentage, in uniformly shuffled order.
///
/// The sequence is meant to be written out and consumed once by the
/// external wheel tool.
pub fn build_population<R: Rng + ?Sized>(
    tuning: &Tuning,
    roster: &Roster,
    rng: &mut R,
) -> Result<Vec<String>> {
    let snapshot = derive_snapshot(tuning, roster)?;

    let mut population = Vec::with_capacity(snapshot.total_slots() as usize);
    for entry in snapshot.entries() {
        let label = entry.label();
        for _ in 0..entry.slots {
            population.push(label.clone());
        }
    }
    population.shuffle(rng);
    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> Roster {
        Roster::new(vec![
            Participant::new("Johan", 6.2),
            Participant::new("Ali", 3.0),
            Participant::new("Sam", 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_snapshot_uses_rounded_slots() {
        let snapshot = derive_snapshot(&Tuning::default(), &roster()).unwrap();

        // 6.2 -> 6 slots, 3.0 -> 3, 0.5 -> 1; total 10
        assert_eq!(snapshot.total_slots(), 10);
        let slots: Vec<u32> = snapshot.entries().iter().map(|e| e.slots).collect();
        assert_eq!(slots, vec![6, 3, 1]);
        assert!((snapshot.entries()[0].percentage - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let snapshot = derive_snapshot(&Tuning::default(), &roster()).unwrap();
        let sum: f64 = snapshot.entries().iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let tuning = Tuning::default();
        let roster = roster();
        assert_eq!(
            derive_snapshot(&tuning, &roster).unwrap(),
            derive_snapshot(&tuning, &roster).unwrap()
        );
    }

    #[test]
    fn test_excluded_and_nonpositive_filtered() {
        let tuning = Tuning {
            excluded: vec!["ali".to_string()],
            ..Default::default()
        };
        let roster = Roster::new(vec![
            Participant::new("Johan", 6.0),
            Participant::new("Ali", 3.0),
            Participant::new("Sam", 0.0),
        ])
        .unwrap();

        let snapshot = derive_snapshot(&tuning, &roster).unwrap();
        let names: Vec<&str> = snapshot.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Johan"]);
        assert!((snapshot.entries()[0].percentage - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population_when_all_filtered() {
        let roster = Roster::new(vec![Participant::new("Sam", 0.0)]).unwrap();
        let err = derive_snapshot(&Tuning::default(), &roster).unwrap_err();
        assert!(matches!(err, Error::EmptyPopulation));
    }

    #[test]
    fn test_empty_population_when_all_round_to_zero() {
        // 0.4 passes the positive filter but contributes zero slots
        let roster = Roster::new(vec![Participant::new("Sam", 0.4)]).unwrap();
        let err = derive_snapshot(&Tuning::default(), &roster).unwrap_err();
        assert!(matches!(err, Error::EmptyPopulation));
    }

    #[test]
    fn test_population_counts_match_slots() {
        let tuning = Tuning::default();
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);

        let population = build_population(&tuning, &roster, &mut rng).unwrap();
        assert_eq!(population.len(), 10);

        let johan = population
            .iter()
            .filter(|label| label.starts_with("Johan "))
            .count();
        let sam = population
            .iter()
            .filter(|label| label.starts_with("Sam "))
            .count();
        assert_eq!(johan, 6);
        assert_eq!(sam, 1);
    }

    #[test]
    fn test_population_labels_carry_percentages() {
        let tuning = Tuning::default();
        let roster = Roster::new(vec![
            Participant::new("Johan", 5.0),
            Participant::new("Ali", 5.0),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let population = build_population(&tuning, &roster, &mut rng).unwrap();
        assert!(population.contains(&"Johan (50.00%)".to_string()));
        assert!(population.contains(&"Ali (50.00%)".to_string()));
    }

    #[test]
    fn test_shuffle_changes_order_but_not_contents() {
        let tuning = Tuning::default();
        let roster = Roster::new(vec![
            Participant::new("Johan", 15.0),
            Participant::new("Ali", 15.0),
        ])
        .unwrap();

        let mut a = build_population(&tuning, &roster, &mut StdRng::seed_from_u64(1)).unwrap();
        let mut b = build_population(&tuning, &roster, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_ne!(a, b, "different seeds should give different orders");
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
