//! Stateless query and rollup helpers
//!
//! Everything here is recomputed on demand from the current repository
//! state; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::container::{ActiveContainer, ContainerStatus};
use crate::line::ProductionLine;
use crate::unit::Unit;

/// Case-insensitive substring search over container ids and the ids of the
/// units they hold.
pub fn search_containers<'a>(
    lines: &'a [ProductionLine],
    query: &str,
) -> Vec<&'a ActiveContainer> {
    let needle = query.to_lowercase();
    lines
        .iter()
        .flat_map(|line| line.containers.iter())
        .filter(|c| {
            c.id.to_lowercase().contains(&needle)
                || c.children()
                    .iter()
                    .any(|u| u.id.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Rollup statistics derived from lines plus the scrap collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub total_units: usize,
    pub open_containers: usize,
    pub full_containers: usize,
    /// `total_units / units_per_pallet`, rounded down.
    pub pallets_ready: usize,
    pub damaged_units: usize,
}

impl LineStats {
    pub fn compute(lines: &[ProductionLine], scrap: &[Unit], units_per_pallet: usize) -> Self {
        let mut total_units = 0;
        let mut open_containers = 0;
        let mut full_containers = 0;

        for container in lines.iter().flat_map(|l| l.containers.iter()) {
            total_units += container.filled_count();
            match container.status() {
                ContainerStatus::Open => open_containers += 1,
                ContainerStatus::Full => full_containers += 1,
            }
        }

        Self {
            total_units,
            open_containers,
            full_containers,
            pallets_ready: if units_per_pallet == 0 {
                0
            } else {
                total_units / units_per_pallet
            },
            damaged_units: scrap.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with(cases: Vec<ActiveContainer>) -> ProductionLine {
        ProductionLine::new("Line A").with_containers(cases)
    }

    fn filled(id: &str, capacity: usize, count: usize) -> ActiveContainer {
        let mut case = ActiveContainer::new(id, capacity);
        for i in 0..count {
            case.push_unit(Unit::new(format!("{id}-BTL-{i}"), "BATCH-1"))
                .unwrap();
        }
        case
    }

    #[test]
    fn search_matches_container_and_child_ids() {
        let lines = vec![line_with(vec![filled("CASE-01", 6, 2), filled("BOX-77", 6, 0)])];

        let by_container = search_containers(&lines, "box");
        assert_eq!(by_container.len(), 1);
        assert_eq!(by_container[0].id, "BOX-77");

        let by_child = search_containers(&lines, "case-01-btl-1");
        assert_eq!(by_child.len(), 1);
        assert_eq!(by_child[0].id, "CASE-01");

        assert!(search_containers(&lines, "nothing").is_empty());
    }

    #[test]
    fn stats_rollup() {
        let lines = vec![line_with(vec![
            filled("CASE-01", 2, 2),
            filled("CASE-02", 6, 3),
        ])];
        let mut scrapped = Unit::new("BTL-DMG", "BATCH-1");
        scrapped.mark_damaged();

        let stats = LineStats::compute(&lines, &[scrapped], 2);
        assert_eq!(stats.total_units, 5);
        assert_eq!(stats.full_containers, 1);
        assert_eq!(stats.open_containers, 1);
        assert_eq!(stats.pallets_ready, 2);
        assert_eq!(stats.damaged_units, 1);
    }

    #[test]
    fn zero_pallet_size_yields_zero_ready() {
        let stats = LineStats::compute(&[], &[], 0);
        assert_eq!(stats.pallets_ready, 0);
    }
}
