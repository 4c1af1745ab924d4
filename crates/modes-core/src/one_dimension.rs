use glam::Vec2;
use std::f32::consts::PI;

use crate::clock::SimulationClock;
use crate::config::{SimConfig, MAX_MASSES_PER_ROW};
use crate::error::EngineError;
use crate::mass::{AmplitudeDirection, MassSet};
use crate::modes::{mode_frequency_1d, ModalBasis1d};
use crate::spring::{chain_springs, spring_visible, Spring};

// including the 2 virtual stationary masses at the wall positions
const SLOTS: usize = MAX_MASSES_PER_ROW + 2;

const DEFAULT_ACTIVE_COUNT: usize = 3;

/// Coupled mass-spring chain between two fixed walls.
///
/// While no mass is held the motion is the exact superposition of the chain's
/// normal modes, a pure function of `(time, modal basis)`. Grabbing a mass
/// invalidates the superposition, so the engine falls back to Velocity Verlet
/// until the drag ends; the release projects the displacement/velocity field
/// back onto the modal basis and restarts the exact motion from time zero.
pub struct OneDimensionEngine {
    config: SimConfig,
    pub clock: SimulationClock,
    pub masses: MassSet,
    springs: Vec<Spring>,
    basis: ModalBasis1d,
    active_count: usize,
    direction: AmplitudeDirection,
    dragged: Option<usize>,
}

impl OneDimensionEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            clock: SimulationClock::new(&config),
            masses: MassSet::new(SLOTS),
            springs: chain_springs(SLOTS),
            basis: ModalBasis1d::new(MAX_MASSES_PER_ROW),
            active_count: DEFAULT_ACTIVE_COUNT,
            direction: AmplitudeDirection::default(),
            dragged: None,
            config,
        };
        engine.relayout();
        engine
    }

    // ---------- topology ----------

    pub fn active_mass_count(&self) -> usize {
        self.active_count
    }

    /// Changes how many masses participate. Rejected while a mass is held:
    /// the Verlet neighbourhood and the modal summation bounds would change
    /// under the drag.
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

    /// Respaces all slots between the walls and zeroes every motion field and
    /// mode. Trailing invisible slots are parked at the far wall.
    fn relayout(&mut self) {
        let n = self.active_count;
        let step = self.config.wall_span / (n as f32 + 1.0);
        let x_final = self.config.left_wall_x + self.config.wall_span;

        let mut x = self.config.left_wall_x;
        for i in 0..SLOTS {
            self.masses.equilibrium[i] = Vec2::new(x, 0.0);
            self.masses.visible[i] = i <= n;
            self.masses.zero_motion(i);

            if x < x_final - step / 2.0 {
                x += step;
            }
        }

        self.basis.reset();
        log::debug!("chain relayout: {n} active masses");
    }

    pub fn amplitude_direction(&self) -> AmplitudeDirection {
        self.direction
    }

    /// Selects the axis the chain oscillates along. Takes effect on the next
    /// exact step; a paused `tick` picks it up immediately.
    pub fn set_amplitude_direction(&mut self, direction: AmplitudeDirection) {
        self.direction = direction;
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn spring_visible(&self, index: usize) -> bool {
        spring_visible(&self.masses, &self.springs[index])
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
            // Even while paused, edits to the amplitude direction or to the
            // mode amplitudes and phases should move the masses.
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

    /// Exact positions, velocities and accelerations of every active mass
    /// from the modal superposition at the current time.
    ///
    /// Pure in `(time, basis)`: no other state is written, so calling it
    /// twice in a row is bit-identical. Only valid while no mass is held.
    pub fn step_exact(&mut self) {
        let n = self.active_count;
        let t = self.clock.time;

        for i in 1..=n {
            let mut displacement = 0.0_f32;
            let mut velocity = 0.0_f32;
            let mut acceleration = 0.0_f32;

            for r in 1..=n {
                let amplitude = self.basis.amplitude[r - 1];
                let frequency = mode_frequency_1d(&self.config, n, r);
                let phase = self.basis.phase[r - 1];

                let shape = ((i * r) as f32 * PI / (n as f32 + 1.0)).sin();
                let angle = frequency * t - phase;

                let mode_displacement = amplitude * shape * angle.cos();
                displacement += mode_displacement;
                velocity += -frequency * amplitude * shape * angle.sin();
                acceleration += -(frequency * frequency) * mode_displacement;
            }

            let (d, v, a) = match self.direction {
                AmplitudeDirection::Horizontal => (
                    Vec2::new(displacement, 0.0),
                    Vec2::new(velocity, 0.0),
                    Vec2::new(acceleration, 0.0),
                ),
                AmplitudeDirection::Vertical => (
                    Vec2::new(0.0, displacement),
                    Vec2::new(0.0, velocity),
                    Vec2::new(0.0, acceleration),
                ),
            };
            self.masses.displacement[i] = d;
            self.masses.velocity[i] = v;
            self.masses.acceleration[i] = a;
        }
    }

    /// One Velocity Verlet step over every active, non-held mass.
    pub fn step_verlet(&mut self, dt: f32) {
        let n = self.active_count;
        for i in 1..=n {
            if self.dragged == Some(i) {
                continue;
            }
            let x = self.masses.displacement[i];
            let v = self.masses.velocity[i];
            let a = self.masses.acceleration[i];

            self.masses.displacement[i] = x + v * dt + a * (dt * dt / 2.0);
            self.masses.previous_acceleration[i] = a;
        }

        self.recalculate_velocity_and_acceleration(dt);
    }

    /// Second Verlet pass: nearest-neighbour spring forces from the updated
    /// displacements, then the trapezoidal velocity completion.
    fn recalculate_velocity_and_acceleration(&mut self, dt: f32) {
        let n = self.active_count;
        let k_over_m = self.config.spring_constant / self.config.mass_value;

        for i in 1..=n {
            if self.dragged == Some(i) {
                // The held mass is driven by the pointer alone.
                self.masses.acceleration[i] = Vec2::ZERO;
                self.masses.velocity[i] = Vec2::ZERO;
                continue;
            }

            let x_left = self.masses.displacement[i - 1];
            let x = self.masses.displacement[i];
            let x_right = self.masses.displacement[i + 1];

            self.masses.acceleration[i] = (x_left + x_right - 2.0 * x) * k_over_m;

            let a = self.masses.acceleration[i];
            let a_previous = self.masses.previous_acceleration[i];
            self.masses.velocity[i] += (a + a_previous) * (dt / 2.0);

            // The chain moves along one axis only; the orthogonal components
            // start at zero and every update above preserves that.
            match self.direction {
                AmplitudeDirection::Horizontal => {
                    debug_assert!(
                        self.masses.velocity[i].y == 0.0 && self.masses.acceleration[i].y == 0.0,
                        "orthogonal axis leaked into the Verlet update"
                    );
                }
                AmplitudeDirection::Vertical => {
                    debug_assert!(
                        self.masses.velocity[i].x == 0.0 && self.masses.acceleration[i].x == 0.0,
                        "orthogonal axis leaked into the Verlet update"
                    );
                }
            }
        }
    }

    // ---------- dragging ----------

    pub fn dragged_mass(&self) -> Option<usize> {
        self.dragged
    }

    /// Grabs an interior mass; all other masses switch to Verlet stepping.
    pub fn begin_drag(&mut self, index: usize) -> Result<(), EngineError> {
        if self.dragged.is_some() {
            return Err(EngineError::AlreadyDragging);
        }
        if index < 1 || index > self.active_count {
            return Err(EngineError::MassIndexOutOfRange);
        }
        self.dragged = Some(index);
        Ok(())
    }

    /// Moves the held mass to `target` displacement. Only the component on
    /// the current amplitude direction is taken; the chain never leaves its
    /// axis. While paused this still relaxes the neighbours once (without
    /// advancing time) so they visibly respond to the drag.
    pub fn drag_to(&mut self, index: usize, target: Vec2) -> Result<(), EngineError> {
        let held = self.dragged.ok_or(EngineError::NoMassBeingDragged)?;
        if held != index {
            return Err(EngineError::MassIndexOutOfRange);
        }

        match self.direction {
            AmplitudeDirection::Horizontal => self.masses.displacement[index].x = target.x,
            AmplitudeDirection::Vertical => self.masses.displacement[index].y = target.y,
        }

        if !self.clock.playing {
            self.step_verlet(self.clock.step_dt());
        }
        Ok(())
    }

    /// Releases the held mass: the current displacement/velocity field is
    /// projected back onto the modal basis and exact stepping resumes.
    pub fn end_drag(&mut self) -> Result<(), EngineError> {
        if self.dragged.take().is_none() {
            return Err(EngineError::NoMassBeingDragged);
        }
        self.project_to_modal_basis();
        Ok(())
    }

    // ---------- modal projection ----------

    /// Recomputes every mode's amplitude and phase from the instantaneous
    /// displacement and velocity field, then restarts time at zero so the
    /// exact step resumes seamlessly from the current configuration.
    pub fn project_to_modal_basis(&mut self) {
        self.clock.reset_time();
        let n = self.active_count;

        for r in 1..=n {
            let frequency = mode_frequency_1d(&self.config, n, r);
            if frequency == 0.0 {
                // inactive mode; the velocity weight would divide by zero
                continue;
            }

            let mut amplitude_cos_phase = 0.0_f32;
            let mut amplitude_sin_phase = 0.0_f32;

            for j in 1..=n {
                let (mass_displacement, mass_velocity) = match self.direction {
                    AmplitudeDirection::Horizontal => {
                        (self.masses.displacement[j].x, self.masses.velocity[j].x)
                    }
                    AmplitudeDirection::Vertical => {
                        (self.masses.displacement[j].y, self.masses.velocity[j].y)
                    }
                };

                let shape = ((j * r) as f32 * PI / (n as f32 + 1.0)).sin();
                amplitude_cos_phase += 2.0 / (n as f32 + 1.0) * mass_displacement * shape;
                amplitude_sin_phase +=
                    2.0 / (frequency * (n as f32 + 1.0)) * mass_velocity * shape;
            }

            self.basis.amplitude[r - 1] =
                (amplitude_cos_phase * amplitude_cos_phase + amplitude_sin_phase * amplitude_sin_phase).sqrt();
            self.basis.phase[r - 1] = amplitude_sin_phase.atan2(amplitude_cos_phase);
        }

        log::debug!("chain projected onto {n} modes");
    }

    // ---------- modal access ----------

    /// Slider write: clamped to the legal amplitude range.
    pub fn set_mode_amplitude(&mut self, mode: usize, value: f32) -> Result<(), EngineError> {
        if mode == 0 || mode > MAX_MASSES_PER_ROW {
            return Err(EngineError::ModeIndexOutOfRange);
        }
        self.basis.amplitude[mode - 1] = value.clamp(0.0, self.config.max_mode_amplitude);
        Ok(())
    }

    pub fn set_mode_phase(&mut self, mode: usize, value: f32) -> Result<(), EngineError> {
        if mode == 0 || mode > MAX_MASSES_PER_ROW {
            return Err(EngineError::ModeIndexOutOfRange);
        }
        self.basis.phase[mode - 1] =
            value.clamp(self.config.min_mode_phase, self.config.max_mode_phase);
        Ok(())
    }

    /// UI slots may poll beyond the active count; out-of-storage reads are 0.
    pub fn mode_amplitude(&self, mode: usize) -> f32 {
        if mode == 0 || mode > MAX_MASSES_PER_ROW {
            return 0.0;
        }
        self.basis.amplitude[mode - 1]
    }

    pub fn mode_phase(&self, mode: usize) -> f32 {
        if mode == 0 || mode > MAX_MASSES_PER_ROW {
            return 0.0;
        }
        self.basis.phase[mode - 1]
    }

    pub fn mode_frequency(&self, mode: usize) -> f32 {
        mode_frequency_1d(&self.config, self.active_count, mode)
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
