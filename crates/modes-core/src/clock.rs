use crate::config::SimConfig;

/// Fixed-timestep accumulator driving both engines.
///
/// The engine owns no timers; an external driver reports wall-clock frame
/// deltas through `drain`, which clamps them (a delta above `max_frame_dt`
/// means the process was suspended, e.g. a backgrounded tab), accumulates and
/// converts them into a bounded number of fixed-size physics steps. This
/// keeps the physics deterministic regardless of the calling frequency.
pub struct SimulationClock {
    /// Whether draining frame time produces physics steps.
    pub playing: bool,
    /// Current simulation time, in seconds.
    pub time: f32,
    speed: f32,
    accumulator: f32,
    fixed_dt: f32,
    max_frame_dt: f32,
    min_speed: f32,
    init_speed: f32,
    max_speed: f32,
}

impl SimulationClock {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            playing: true,
            time: 0.0,
            speed: config.init_speed,
            accumulator: 0.0,
            fixed_dt: config.fixed_dt,
            max_frame_dt: config.max_frame_dt,
            min_speed: config.min_speed,
            init_speed: config.init_speed,
            max_speed: config.max_speed,
        }
    }

    /// Absorbs a frame delta and returns how many fixed steps to run now.
    pub fn drain(&mut self, frame_dt: f32) -> usize {
        let frame_dt = frame_dt.min(self.max_frame_dt);
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        steps
    }

    /// Simulation seconds covered by one drained step at the current speed.
    pub fn step_dt(&self) -> f32 {
        self.fixed_dt * self.speed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(self.min_speed, self.max_speed);
    }

    pub fn reset_time(&mut self) {
        self.time = 0.0;
    }

    pub fn reset(&mut self) {
        self.playing = true;
        self.time = 0.0;
        self.speed = self.init_speed;
        self.accumulator = 0.0;
    }
}
