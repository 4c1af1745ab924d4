use glam::Vec2;

use crate::clock::SimulationClock;
use crate::config::{SimConfig, MAX_MASSES_PER_ROW};
use crate::error::EngineError;
use crate::mass::{AmplitudeDirection, MassSet};
use crate::modes::{mode_frequency_2d, ModalBasis2d, SineProductTable};
use crate::spring::{lattice_springs_x, lattice_springs_y, spring_visible, Spring};

// row stride: masses per row plus the 2 virtual wall slots on each row
const STRIDE: usize = MAX_MASSES_PER_ROW + 2;
const SLOTS: usize = STRIDE * STRIDE;

const DEFAULT_ACTIVE_COUNT: usize = 2;

/// Coupled mass-spring lattice, fixed along its entire border.
///
/// The same dual-regime design as the chain, with every sum over a mode
/// index generalized to a double sum over a mode pair (r, s) and every
/// displacement scalar to a 2-vector. Masses move freely in both axes.
///
/// The accumulated Y components carry a sign flip relative to X, a
/// convention tied to the view layer's inverted-y coordinate space; the
/// projection applies the matching flip, so the two cancel internally.
pub struct TwoDimensionsEngine {
    config: SimConfig,
    pub clock: SimulationClock,
    pub masses: MassSet,
    springs_x: Vec<Spring>,
    springs_y: Vec<Spring>,
    basis: ModalBasis2d,
    sine_table: SineProductTable,
    active_count: usize,
    direction: AmplitudeDirection,
    dragged: Option<(usize, usize)>,
}

impl TwoDimensionsEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            clock: SimulationClock::new(&config),
            masses: MassSet::new(SLOTS),
            springs_x: lattice_springs_x(STRIDE),
            springs_y: lattice_springs_y(STRIDE),
            basis: ModalBasis2d::new(MAX_MASSES_PER_ROW),
            sine_table: SineProductTable::new(DEFAULT_ACTIVE_COUNT),
            active_count: DEFAULT_ACTIVE_COUNT,
            direction: AmplitudeDirection::default(),
            dragged: None,
            config,
        };
        engine.relayout();
        engine
    }

    /// Flat slot index of lattice position (row i, column j).
    pub fn slot(&self, i: usize, j: usize) -> usize {
        i * STRIDE + j
    }

    // ---------- topology ----------

    pub fn active_mass_count(&self) -> usize {
        self.active_count
    }

    /// Changes the per-row mass count. Rejected while a mass is held.
    pub fn set_active_mass_count(&mut self, count: usize) -> Result<(), EngineError> {
        if self.dragged.is_some() {
            return Err(EngineError::TopologyLockedWhileDragging);
        }
        if count < 1 || count > MAX_MASSES_PER_ROW {
            return Err(EngineError::MassCountOutOfRange { value: count });
        }
        self.active_count = count;
        self.relayout();
        Ok(())
    }

    /// Respaces the grid between the walls, zeroes all motion and modes, and
    /// rebuilds the sine-product table for the new count.
    fn relayout(&mut self) {
        let n = self.active_count;
        let x_step = self.config.wall_span / (n as f32 + 1.0);
        let x_final = self.config.left_wall_x + self.config.wall_span;
        let y_step = self.config.wall_span / (n as f32 + 1.0);
        let y_final = self.config.top_wall_y - self.config.wall_span;

        let mut y = self.config.top_wall_y;
        for i in 0..STRIDE {
            let mut x = self.config.left_wall_x;
            for j in 0..STRIDE {
                let slot = self.slot(i, j);
                self.masses.equilibrium[slot] = Vec2::new(x, y);
                self.masses.visible[slot] = i <= n && j <= n;
                self.masses.zero_motion(slot);

                if x < x_final - x_step / 2.0 {
                    x += x_step;
                }
            }
            if y > y_final + y_step / 2.0 {
                y -= y_step;
            }
        }

        self.sine_table = SineProductTable::new(n);
        self.basis.reset();
        log::debug!("lattice relayout: {n}x{n} active masses");
    }

    /// Selects which modal plane (X or Y) the amplitude selector edits.
    /// Purely UI state in two dimensions; the motion itself uses both axes.
    pub fn set_amplitude_direction(&mut self, direction: AmplitudeDirection) {
        self.direction = direction;
    }

    pub fn amplitude_direction(&self) -> AmplitudeDirection {
        self.direction
    }

    pub fn springs_x(&self) -> &[Spring] {
        &self.springs_x
    }

    pub fn springs_y(&self) -> &[Spring] {
        &self.springs_y
    }

    pub fn spring_x_visible(&self, index: usize) -> bool {
        spring_visible(&self.masses, &self.springs_x[index])
    }

    pub fn spring_y_visible(&self, index: usize) -> bool {
        spring_visible(&self.masses, &self.springs_y[index])
    }

    // ---------- stepping ----------

    /// Advances the simulation by one frame's worth of wall-clock time.
    pub fn tick(&mut self, frame_dt: f32) {
        if self.clock.playing {
            let steps = self.clock.drain(frame_dt);
            for _ in 0..steps {
                self.single_step();
            }
        } else if self.dragged.is_none() {
            self.step_exact();
        }
    }

    fn single_step(&mut self) {
        let dt = self.clock.step_dt();
        self.clock.time += dt;
        if self.dragged.is_some() {
            self.step_verlet(dt);
        } else {
            self.step_exact();
        }
    }

    /// Exact state of every active mass from the modal superposition.
    ///
    /// The per-mode factors are staged once per call, then combined with the
    /// memoized sine products; the double loop over masses times the double
    /// loop over modes is the O(N^4) hot path. Pure in `(time, basis)`.
    pub fn step_exact(&mut self) {
        let n = self.active_count;
        let t = self.clock.time;
        let modes = n * n;

        // per-(r, s) factors, flattened like the basis planes
        let mut amp_x_cos = vec![0.0_f32; modes];
        let mut amp_y_cos = vec![0.0_f32; modes];
        let mut freq_amp_x_sin = vec![0.0_f32; modes];
        let mut freq_amp_y_sin = vec![0.0_f32; modes];
        let mut freq2_amp_x_cos = vec![0.0_f32; modes];
        let mut freq2_amp_y_cos = vec![0.0_f32; modes];

        for r in 1..=n {
            for s in 1..=n {
                let m = self.basis.index(r, s);
                let amplitude_x = self.basis.amplitude_x[m];
                let amplitude_y = self.basis.amplitude_y[m];
                let frequency = mode_frequency_2d(&self.config, n, r, s);
                let angle_x = frequency * t - self.basis.phase_x[m];
                let angle_y = frequency * t - self.basis.phase_y[m];

                let cos_x = angle_x.cos();
                let cos_y = angle_y.cos();

                let staged = (r - 1) * n + (s - 1);
                amp_x_cos[staged] = amplitude_x * cos_x;
                amp_y_cos[staged] = amplitude_y * cos_y;
                freq_amp_x_sin[staged] = -frequency * amplitude_x * angle_x.sin();
                freq_amp_y_sin[staged] = -frequency * amplitude_y * angle_y.sin();
                freq2_amp_x_cos[staged] = -(frequency * frequency) * amplitude_x * cos_x;
                freq2_amp_y_cos[staged] = -(frequency * frequency) * amplitude_y * cos_y;
            }
        }

        for i in 1..=n {
            for j in 1..=n {
                let mut displacement = Vec2::ZERO;
                let mut velocity = Vec2::ZERO;
                let mut acceleration = Vec2::ZERO;

                for r in 1..=n {
                    for s in 1..=n {
                        let sine_product = self.sine_table.get(i, j, r, s);
                        let staged = (r - 1) * n + (s - 1);

                        displacement.x += sine_product * amp_x_cos[staged];
                        displacement.y -= sine_product * amp_y_cos[staged];

                        velocity.x += sine_product * freq_amp_x_sin[staged];
                        velocity.y -= sine_product * freq_amp_y_sin[staged];

                        acceleration.x += sine_product * freq2_amp_x_cos[staged];
                        acceleration.y -= sine_product * freq2_amp_y_cos[staged];
                    }
                }

                let slot = self.slot(i, j);
                self.masses.displacement[slot] = displacement;
                self.masses.velocity[slot] = velocity;
                self.masses.acceleration[slot] = acceleration;
            }
        }
    }

    /// One Velocity Verlet step over every active, non-held mass.
    pub fn step_verlet(&mut self, dt: f32) {
        let n = self.active_count;
        for i in 1..=n {
            for j in 1..=n {
                if self.dragged == Some((i, j)) {
                    continue;
                }
                let slot = self.slot(i, j);
                let x = self.masses.displacement[slot];
                let v = self.masses.velocity[slot];
                let a = self.masses.acceleration[slot];

                self.masses.displacement[slot] = x + v * dt + a * (dt * dt / 2.0);
                self.masses.previous_acceleration[slot] = a;
            }
        }

        self.recalculate_velocity_and_acceleration(dt);
    }

    /// Second Verlet pass: the four-neighbour lattice Laplacian from the
    /// updated displacements, then the trapezoidal velocity completion.
    /// Both axes move independently.
    fn recalculate_velocity_and_acceleration(&mut self, dt: f32) {
        let n = self.active_count;
        let k_over_m = self.config.spring_constant / self.config.mass_value;

        for i in 1..=n {
            for j in 1..=n {
                let slot = self.slot(i, j);
                if self.dragged == Some((i, j)) {
                    self.masses.acceleration[slot] = Vec2::ZERO;
                    self.masses.velocity[slot] = Vec2::ZERO;
                    continue;
                }

                let x_left = self.masses.displacement[self.slot(i, j - 1)];
                let x_right = self.masses.displacement[self.slot(i, j + 1)];
                let x_above = self.masses.displacement[self.slot(i - 1, j)];
                let x_under = self.masses.displacement[self.slot(i + 1, j)];
                let x = self.masses.displacement[slot];

                self.masses.acceleration[slot] =
                    (x_left + x_right + x_above + x_under - 4.0 * x) * k_over_m;

                let a = self.masses.acceleration[slot];
                let a_previous = self.masses.previous_acceleration[slot];
                self.masses.velocity[slot] += (a + a_previous) * (dt / 2.0);
            }
        }
    }

    // ---------- dragging ----------

    pub fn dragged_mass(&self) -> Option<(usize, usize)> {
        self.dragged
    }

    /// Grabs the interior mass at (row i, column j).
    pub fn begin_drag(&mut self, i: usize, j: usize) -> Result<(), EngineError> {
        if self.dragged.is_some() {
            return Err(EngineError::AlreadyDragging);
        }
        let n = self.active_count;
        if i < 1 || i > n || j < 1 || j > n {
            return Err(EngineError::MassIndexOutOfRange);
        }
        self.dragged = Some((i, j));
        Ok(())
    }

    /// Moves the held mass to `target` displacement, both axes free. While
    /// paused this still relaxes the neighbours once, without advancing time.
    pub fn drag_to(&mut self, i: usize, j: usize, target: Vec2) -> Result<(), EngineError> {
        let held = self.dragged.ok_or(EngineError::NoMassBeingDragged)?;
        if held != (i, j) {
            return Err(EngineError::MassIndexOutOfRange);
        }

        let slot = self.slot(i, j);
        self.masses.displacement[slot] = target;

        if !self.clock.playing {
            self.step_verlet(self.clock.step_dt());
        }
        Ok(())
    }

    /// Releases the held mass and projects the field onto the modal basis.
    pub fn end_drag(&mut self) -> Result<(), EngineError> {
        if self.dragged.take().is_none() {
            return Err(EngineError::NoMassBeingDragged);
        }
        self.project_to_modal_basis();
        Ok(())
    }

    // ---------- modal projection ----------

    /// Recomputes both modal planes from the instantaneous displacement and
    /// velocity field, then restarts time at zero.
    pub fn project_to_modal_basis(&mut self) {
        self.clock.reset_time();
        let n = self.active_count;
        let weight = 4.0 / ((n as f32 + 1.0) * (n as f32 + 1.0));

        for r in 1..=n {
            for s in 1..=n {
                let frequency = mode_frequency_2d(&self.config, n, r, s);
                if frequency == 0.0 {
                    // inactive mode pair; the velocity weight would divide by zero
                    continue;
                }

                let mut amplitude_cos_phase_x = 0.0_f32;
                let mut amplitude_sin_phase_x = 0.0_f32;
                let mut amplitude_cos_phase_y = 0.0_f32;
                let mut amplitude_sin_phase_y = 0.0_f32;

                for i in 1..=n {
                    for j in 1..=n {
                        let slot = self.slot(i, j);
                        let mass_displacement = self.masses.displacement[slot];
                        let mass_velocity = self.masses.velocity[slot];
                        let weighted = weight * self.sine_table.get(i, j, r, s);

                        amplitude_cos_phase_x += weighted * mass_displacement.x;
                        amplitude_cos_phase_y -= weighted * mass_displacement.y;
                        amplitude_sin_phase_x += weighted / frequency * mass_velocity.x;
                        amplitude_sin_phase_y -= weighted / frequency * mass_velocity.y;
                    }
                }

                let m = self.basis.index(r, s);
                self.basis.amplitude_x[m] = (amplitude_cos_phase_x * amplitude_cos_phase_x
                    + amplitude_sin_phase_x * amplitude_sin_phase_x)
                    .sqrt();
                self.basis.amplitude_y[m] = (amplitude_cos_phase_y * amplitude_cos_phase_y
                    + amplitude_sin_phase_y * amplitude_sin_phase_y)
                    .sqrt();
                self.basis.phase_x[m] = amplitude_sin_phase_x.atan2(amplitude_cos_phase_x);
                self.basis.phase_y[m] = amplitude_sin_phase_y.atan2(amplitude_cos_phase_y);
            }
        }

        log::debug!("lattice projected onto {n}x{n} mode pairs");
    }

    // ---------- modal access ----------

    /// Slider write on the given modal plane, clamped to the count-dependent
    /// amplitude cap.
    pub fn set_mode_amplitude(
        &mut self,
        r: usize,
        s: usize,
        plane: AmplitudeDirection,
        value: f32,
    ) -> Result<(), EngineError> {
        if r == 0 || s == 0 || r > MAX_MASSES_PER_ROW || s > MAX_MASSES_PER_ROW {
            return Err(EngineError::ModeIndexOutOfRange);
        }
        let cap = self.config.max_mode_amplitude_2d(self.active_count);
        let m = self.basis.index(r, s);
        match plane {
            AmplitudeDirection::Horizontal => self.basis.amplitude_x[m] = value.clamp(0.0, cap),
            AmplitudeDirection::Vertical => self.basis.amplitude_y[m] = value.clamp(0.0, cap),
        }
        Ok(())
    }

    pub fn set_mode_phase(
        &mut self,
        r: usize,
        s: usize,
        plane: AmplitudeDirection,
        value: f32,
    ) -> Result<(), EngineError> {
        if r == 0 || s == 0 || r > MAX_MASSES_PER_ROW || s > MAX_MASSES_PER_ROW {
            return Err(EngineError::ModeIndexOutOfRange);
        }
        let clamped = value.clamp(self.config.min_mode_phase, self.config.max_mode_phase);
        let m = self.basis.index(r, s);
        match plane {
            AmplitudeDirection::Horizontal => self.basis.phase_x[m] = clamped,
            AmplitudeDirection::Vertical => self.basis.phase_y[m] = clamped,
        }
        Ok(())
    }

    /// UI slots may poll beyond the active count; out-of-storage reads are 0.
    pub fn mode_amplitude(&self, r: usize, s: usize, plane: AmplitudeDirection) -> f32 {
        if r == 0 || s == 0 || r > MAX_MASSES_PER_ROW || s > MAX_MASSES_PER_ROW {
            return 0.0;
        }
        let m = self.basis.index(r, s);
        match plane {
            AmplitudeDirection::Horizontal => self.basis.amplitude_x[m],
            AmplitudeDirection::Vertical => self.basis.amplitude_y[m],
        }
    }

    pub fn mode_phase(&self, r: usize, s: usize, plane: AmplitudeDirection) -> f32 {
        if r == 0 || s == 0 || r > MAX_MASSES_PER_ROW || s > MAX_MASSES_PER_ROW {
            return 0.0;
        }
        let m = self.basis.index(r, s);
        match plane {
            AmplitudeDirection::Horizontal => self.basis.phase_x[m],
            AmplitudeDirection::Vertical => self.basis.phase_y[m],
        }
    }

    pub fn mode_frequency(&self, r: usize, s: usize) -> f32 {
        mode_frequency_2d(&self.config, self.active_count, r, s)
    }

    pub fn sine_table(&self) -> &SineProductTable {
        &self.sine_table
    }

    // ---------- resets ----------

    /// Zeroes every mass and every mode. Playback state is untouched.
    pub fn zero_positions(&mut self) {
        self.masses.zero_all_motion();
        self.basis.reset();
    }

    /// Returns the masses to their time-zero configuration, paused.
    pub fn restore_initial_positions(&mut self) {
        self.clock.playing = false;
        self.clock.reset_time();
        self.step_exact();
    }

    /// Full model reset.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.active_count = DEFAULT_ACTIVE_COUNT;
        self.direction = AmplitudeDirection::default();
        self.dragged = None;
        self.relayout();
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
