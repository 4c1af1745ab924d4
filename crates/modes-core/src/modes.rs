use std::f32::consts::PI;

use crate::config::SimConfig;

/// Angular frequency of chain mode `r` (1-based) for `active_count` masses.
///
/// `omega_r = 2 * sqrt(k/m) * sin(pi/2 * r / (N + 1))`. Modes beyond the
/// active count are frozen and report 0, so polling inactive slots is safe.
pub fn mode_frequency_1d(config: &SimConfig, active_count: usize, r: usize) -> f32 {
    if r == 0 || r > active_count {
        return 0.0;
    }
    let k = config.spring_constant;
    let m = config.mass_value;
    2.0 * (k / m).sqrt() * (PI / 2.0 * r as f32 / (active_count as f32 + 1.0)).sin()
}

/// Angular frequency of lattice mode pair `(r, s)`: the per-axis chain
/// frequencies combined in quadrature.
pub fn mode_frequency_2d(config: &SimConfig, active_count: usize, r: usize, s: usize) -> f32 {
    if r == 0 || s == 0 || r > active_count || s > active_count {
        return 0.0;
    }
    let omega_r = mode_frequency_1d(config, active_count, r);
    let omega_s = mode_frequency_1d(config, active_count, s);
    (omega_r * omega_r + omega_s * omega_s).sqrt()
}

/// Amplitude and phase per chain mode. Frequency is not stored; it is a pure
/// function of the active count (see `mode_frequency_1d`).
pub struct ModalBasis1d {
    pub amplitude: Vec<f32>,
    pub phase: Vec<f32>,
}

impl ModalBasis1d {
    pub fn new(capacity: usize) -> Self {
        Self {
            amplitude: vec![0.0; capacity],
            phase: vec![0.0; capacity],
        }
    }

    /// Returns every mode to the configured initial amplitude and phase.
    pub fn reset(&mut self) {
        self.amplitude.fill(0.0);
        self.phase.fill(0.0);
    }
}

/// Independent X and Y amplitude/phase planes per lattice mode pair,
/// flattened row-major by `(r, s)`.
pub struct ModalBasis2d {
    capacity: usize,
    pub amplitude_x: Vec<f32>,
    pub amplitude_y: Vec<f32>,
    pub phase_x: Vec<f32>,
    pub phase_y: Vec<f32>,
}

impl ModalBasis2d {
    pub fn new(capacity: usize) -> Self {
        let len = capacity * capacity;
        Self {
            capacity,
            amplitude_x: vec![0.0; len],
            amplitude_y: vec![0.0; len],
            phase_x: vec![0.0; len],
            phase_y: vec![0.0; len],
        }
    }

    /// Flat index of mode pair `(r, s)`, both 1-based.
    pub fn index(&self, r: usize, s: usize) -> usize {
        (r - 1) * self.capacity + (s - 1)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reset(&mut self) {
        self.amplitude_x.fill(0.0);
        self.amplitude_y.fill(0.0);
        self.phase_x.fill(0.0);
        self.phase_y.fill(0.0);
    }
}

/// Memoized `sin(j*r*pi/(N+1)) * sin(i*s*pi/(N+1))` for all (i, j, r, s) in
/// [1, N]^4.
///
/// The exact lattice step reads every entry once per mass per mode pair and
/// the table is invariant under time and amplitude changes, so it is rebuilt
/// only when the active count changes.
pub struct SineProductTable {
    n: usize,
    values: Vec<f32>,
}

impl SineProductTable {
    pub fn new(n: usize) -> Self {
        let mut values = vec![0.0; n * n * n * n];
        for i in 1..=n {
            for j in 1..=n {
                for r in 1..=n {
                    // no need to recalculate this for each 's'
                    let sin_jr = (j as f32 * r as f32 * PI / (n as f32 + 1.0)).sin();
                    for s in 1..=n {
                        let sin_is = (i as f32 * s as f32 * PI / (n as f32 + 1.0)).sin();
                        values[Self::flat(n, i, j, r, s)] = sin_jr * sin_is;
                    }
                }
            }
        }
        Self { n, values }
    }

    fn flat(n: usize, i: usize, j: usize, r: usize, s: usize) -> usize {
        (((i - 1) * n + (j - 1)) * n + (r - 1)) * n + (s - 1)
    }

    /// Entry for mass (i, j) and mode pair (r, s), all 1-based in [1, N].
    pub fn get(&self, i: usize, j: usize, r: usize, s: usize) -> f32 {
        self.values[Self::flat(self.n, i, j, r, s)]
    }

    pub fn active_count(&self) -> usize {
        self.n
    }
}
