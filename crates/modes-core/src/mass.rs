use glam::Vec2;

/// Axis along which the chain masses are displaced. In the lattice this only
/// selects which modal plane (X or Y) the amplitude selector edits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AmplitudeDirection {
    Horizontal,
    #[default]
    Vertical,
}

/// SoA mass-point storage.
///
/// The full slab is allocated once at startup and never resized; changing the
/// active count only rewrites equilibrium positions and visibility flags.
/// Slots outside the active range keep zero motion state.
pub struct MassSet {
    /// Total allocated slots, including the virtual wall masses.
    pub count: usize,
    /// Rest position in model space when every spring is at natural length.
    pub equilibrium: Vec<Vec2>,
    /// Offset from the equilibrium position.
    pub displacement: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    pub acceleration: Vec<Vec2>,
    /// Acceleration from the previous step (Velocity Verlet only).
    pub previous_acceleration: Vec<Vec2>,
    /// Whether this slot participates in the active topology.
    pub visible: Vec<bool>,
}

impl MassSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            equilibrium: vec![Vec2::ZERO; count],
            displacement: vec![Vec2::ZERO; count],
            velocity: vec![Vec2::ZERO; count],
            acceleration: vec![Vec2::ZERO; count],
            previous_acceleration: vec![Vec2::ZERO; count],
            visible: vec![false; count],
        }
    }

    /// Current model-space position of a slot.
    pub fn position(&self, index: usize) -> Vec2 {
        self.equilibrium[index] + self.displacement[index]
    }

    /// Zeroes displacement, velocity and both accelerations for one slot.
    pub fn zero_motion(&mut self, index: usize) {
        self.displacement[index] = Vec2::ZERO;
        self.velocity[index] = Vec2::ZERO;
        self.acceleration[index] = Vec2::ZERO;
        self.previous_acceleration[index] = Vec2::ZERO;
    }

    pub fn zero_all_motion(&mut self) {
        for i in 0..self.count {
            self.zero_motion(i);
        }
    }
}
