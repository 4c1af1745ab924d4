use crate::mass::MassSet;

/// A spring connecting two mass slots. Springs carry no numerical state; the
/// Verlet force law uses implicit adjacency. They exist so the view layer can
/// draw the couplings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spring {
    /// Left (or upper) mass slot.
    pub left: usize,
    pub right: usize,
}

/// A spring is drawn iff its left/upper mass participates in the topology.
pub fn spring_visible(masses: &MassSet, spring: &Spring) -> bool {
    masses.visible[spring.left]
}

/// Springs of a one-dimensional chain of `slots` masses (walls included).
pub fn chain_springs(slots: usize) -> Vec<Spring> {
    (0..slots - 1)
        .map(|i| Spring { left: i, right: i + 1 })
        .collect()
}

/// Horizontal lattice springs: every interior row, column to column + 1.
pub fn lattice_springs_x(stride: usize) -> Vec<Spring> {
    let mut springs = Vec::new();
    for row in 1..stride - 1 {
        for col in 0..stride - 1 {
            springs.push(Spring {
                left: row * stride + col,
                right: row * stride + col + 1,
            });
        }
    }
    springs
}

/// Vertical lattice springs: every interior column, row to row + 1.
pub fn lattice_springs_y(stride: usize) -> Vec<Spring> {
    let mut springs = Vec::new();
    for col in 1..stride - 1 {
        for row in 0..stride - 1 {
            springs.push(Spring {
                left: row * stride + col,
                right: (row + 1) * stride + col,
            });
        }
    }
    springs
}
