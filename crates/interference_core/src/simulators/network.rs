//! Contact network shared by the reference simulators.

/// Undirected ring lattice: unit `i` is linked to the `neighbors_per_side`
/// units on each side of it, wrapping around.
#[derive(Debug, Clone)]
pub struct RingLattice {
    neighbors: Vec<Vec<usize>>,
}

impl RingLattice {
    /// Callers must ensure `2 * neighbors_per_side < num_units` so no unit is
    /// linked to itself or twice to the same neighbour.
    pub fn new(num_units: usize, neighbors_per_side: usize) -> Self {
        let neighbors = (0..num_units)
            .map(|i| {
                (1..=neighbors_per_side)
                    .flat_map(|offset| {
                        [
                            (i + offset) % num_units,
                            (i + num_units - offset) % num_units,
                        ]
                    })
                    .collect()
            })
            .collect();
        Self { neighbors }
    }

    pub fn neighbors(&self, unit: usize) -> &[usize] {
        &self.neighbors[unit]
    }

    pub fn degree(&self, unit: usize) -> usize {
        self.neighbors[unit].len()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Per-replication seed derivation, so replication `k` of run `seed` never
/// collides with replication 0 of run `seed + k`.
pub(crate) fn replication_seed(seed: u64, replication: usize) -> u64 {
    seed.wrapping_mul(0x9e3779b97f4a7c15)
        .wrapping_add((replication as u64).wrapping_mul(0x9e3779b9))
        .rotate_left(17)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_lattice_wraps_around() {
        let lattice = RingLattice::new(6, 1);
        let mut first = lattice.neighbors(0).to_vec();
        first.sort_unstable();
        assert_eq!(first, vec![1, 5]);
        assert_eq!(lattice.degree(3), 2);
    }

    #[test]
    fn ring_lattice_is_symmetric() {
        let lattice = RingLattice::new(10, 2);
        for i in 0..lattice.len() {
            for &j in lattice.neighbors(i) {
                assert!(lattice.neighbors(j).contains(&i));
            }
        }
    }

    #[test]
    fn replication_seeds_differ() {
        assert_ne!(replication_seed(1, 0), replication_seed(1, 1));
        assert_ne!(replication_seed(1, 1), replication_seed(2, 0));
    }
}
