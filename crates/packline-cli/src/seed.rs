//! Demo seed data. Lives here, not in the core: real deployments feed the
//! store from batch creation, the CLI just needs something to pack into.

use packline_core::{ActiveContainer, ProductionLine};
use packline_store::Store;

pub fn seed_store(lines: usize, cases_per_line: usize, capacity: usize) -> Store {
    let mut store = Store::new();
    for li in 0..lines {
        let letter = (b'A' + (li % 26) as u8) as char;
        let containers = (1..=cases_per_line)
            .map(|n| ActiveContainer::new(format!("CASE-{letter}{n}"), capacity))
            .collect();
        store.add_line(ProductionLine::new(format!("Line {letter}")).with_containers(containers));
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_requested_shape() {
        let store = seed_store(2, 3, 6);
        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.containers().count(), 6);
        assert!(store.find_container("CASE-A1").is_ok());
        assert!(store.find_container("CASE-B3").is_ok());
        assert!(store.containers().all(|c| c.capacity == 6));
    }
}
