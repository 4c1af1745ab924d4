use wasm_bindgen::prelude::*;

use modes_core::mass::AmplitudeDirection;
use modes_core::one_dimension::OneDimensionEngine;
use modes_core::two_dimensions::TwoDimensionsEngine;

/// GPU-compatible mass record: 16 bytes, matches the WGSL Mass struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuMass {
    position: [f32; 2], // 8 bytes
    velocity: [f32; 2], // 8 bytes
}

impl GpuMass {
    const ZERO: GpuMass = GpuMass {
        position: [0.0; 2],
        velocity: [0.0; 2],
    };
}

fn init_browser_logging() {
    console_error_panic_hook::set_once();
    // a second world constructor finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

fn axis_from_code(axis: u8) -> AmplitudeDirection {
    match axis {
        0 => AmplitudeDirection::Horizontal,
        _ => AmplitudeDirection::Vertical,
    }
}

#[wasm_bindgen]
pub struct OneDimensionWorld {
    engine: OneDimensionEngine,
    gpu_buffer: Vec<GpuMass>,
}

#[wasm_bindgen]
impl OneDimensionWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> OneDimensionWorld {
        init_browser_logging();
        let engine = OneDimensionEngine::new(Default::default());
        let gpu_buffer = vec![GpuMass::ZERO; engine.masses.count];

        let mut world = OneDimensionWorld { engine, gpu_buffer };
        world.write_gpu_output();
        web_sys::console::log_1(
            &format!("WASM OneDimensionWorld created: {} slots", world.gpu_buffer.len()).into(),
        );
        world
    }

    /// Advance by one frame delta; returns elapsed wall time in ms.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.engine.tick(dt);
        self.write_gpu_output();
        (js_sys::Date::now() - start) as f32
    }

    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        self.gpu_buffer.len() * std::mem::size_of::<GpuMass>()
    }

    pub fn mass_slot_count(&self) -> usize {
        self.engine.masses.count
    }

    pub fn mass_visible(&self, index: usize) -> bool {
        self.engine.masses.visible[index]
    }

    pub fn active_mass_count(&self) -> usize {
        self.engine.active_mass_count()
    }

    pub fn set_active_mass_count(&mut self, count: usize) -> Result<(), JsError> {
        self.engine.set_active_mass_count(count)?;
        self.write_gpu_output();
        Ok(())
    }

    /// axis: 0 = horizontal, anything else = vertical
    pub fn set_amplitude_direction(&mut self, axis: u8) {
        self.engine.set_amplitude_direction(axis_from_code(axis));
    }

    pub fn begin_drag(&mut self, index: usize) -> Result<(), JsError> {
        Ok(self.engine.begin_drag(index)?)
    }

    pub fn drag_to(&mut self, index: usize, dx: f32, dy: f32) -> Result<(), JsError> {
        self.engine.drag_to(index, glam::Vec2::new(dx, dy))?;
        self.write_gpu_output();
        Ok(())
    }

    pub fn end_drag(&mut self) -> Result<(), JsError> {
        Ok(self.engine.end_drag()?)
    }

    pub fn set_mode_amplitude(&mut self, mode: usize, value: f32) -> Result<(), JsError> {
        Ok(self.engine.set_mode_amplitude(mode, value)?)
    }

    pub fn set_mode_phase(&mut self, mode: usize, value: f32) -> Result<(), JsError> {
        Ok(self.engine.set_mode_phase(mode, value)?)
    }

    pub fn mode_amplitude(&self, mode: usize) -> f32 {
        self.engine.mode_amplitude(mode)
    }

    pub fn mode_phase(&self, mode: usize) -> f32 {
        self.engine.mode_phase(mode)
    }

    pub fn mode_frequency(&self, mode: usize) -> f32 {
        self.engine.mode_frequency(mode)
    }

    pub fn time(&self) -> f32 {
        self.engine.clock.time
    }

    pub fn playing(&self) -> bool {
        self.engine.clock.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.engine.clock.playing = playing;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.engine.clock.set_speed(speed);
    }

    pub fn zero_positions(&mut self) {
        self.engine.zero_positions();
        self.write_gpu_output();
    }

    pub fn restore_initial_positions(&mut self) {
        self.engine.restore_initial_positions();
        self.write_gpu_output();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.write_gpu_output();
    }
}

impl OneDimensionWorld {
    fn write_gpu_output(&mut self) {
        for i in 0..self.engine.masses.count {
            let pos = self.engine.masses.position(i);
            let vel = self.engine.masses.velocity[i];
            self.gpu_buffer[i] = GpuMass {
                position: [pos.x, pos.y],
                velocity: [vel.x, vel.y],
            };
        }
    }
}

#[wasm_bindgen]
pub struct TwoDimensionsWorld {
    engine: TwoDimensionsEngine,
    gpu_buffer: Vec<GpuMass>,
}

#[wasm_bindgen]
impl TwoDimensionsWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TwoDimensionsWorld {
        init_browser_logging();
        let engine = TwoDimensionsEngine::new(Default::default());
        let gpu_buffer = vec![GpuMass::ZERO; engine.masses.count];

        let mut world = TwoDimensionsWorld { engine, gpu_buffer };
        world.write_gpu_output();
        web_sys::console::log_1(
            &format!("WASM TwoDimensionsWorld created: {} slots", world.gpu_buffer.len()).into(),
        );
        world
    }

    /// Advance by one frame delta; returns elapsed wall time in ms.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.engine.tick(dt);
        self.write_gpu_output();
        (js_sys::Date::now() - start) as f32
    }

    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        self.gpu_buffer.len() * std::mem::size_of::<GpuMass>()
    }

    /// Flat buffer index of lattice position (row i, column j).
    pub fn slot(&self, i: usize, j: usize) -> usize {
        self.engine.slot(i, j)
    }

    pub fn mass_slot_count(&self) -> usize {
        self.engine.masses.count
    }

    pub fn mass_visible(&self, slot: usize) -> bool {
        self.engine.masses.visible[slot]
    }

    pub fn active_mass_count(&self) -> usize {
        self.engine.active_mass_count()
    }

    pub fn set_active_mass_count(&mut self, count: usize) -> Result<(), JsError> {
        self.engine.set_active_mass_count(count)?;
        self.write_gpu_output();
        Ok(())
    }

    /// axis: 0 = horizontal (X plane), anything else = vertical (Y plane)
    pub fn set_amplitude_direction(&mut self, axis: u8) {
        self.engine.set_amplitude_direction(axis_from_code(axis));
    }

    pub fn begin_drag(&mut self, i: usize, j: usize) -> Result<(), JsError> {
        Ok(self.engine.begin_drag(i, j)?)
    }

    pub fn drag_to(&mut self, i: usize, j: usize, dx: f32, dy: f32) -> Result<(), JsError> {
        self.engine.drag_to(i, j, glam::Vec2::new(dx, dy))?;
        self.write_gpu_output();
        Ok(())
    }

    pub fn end_drag(&mut self) -> Result<(), JsError> {
        Ok(self.engine.end_drag()?)
    }

    pub fn set_mode_amplitude(
        &mut self,
        r: usize,
        s: usize,
        axis: u8,
        value: f32,
    ) -> Result<(), JsError> {
        Ok(self
            .engine
            .set_mode_amplitude(r, s, axis_from_code(axis), value)?)
    }

    pub fn set_mode_phase(
        &mut self,
        r: usize,
        s: usize,
        axis: u8,
        value: f32,
    ) -> Result<(), JsError> {
        Ok(self
            .engine
            .set_mode_phase(r, s, axis_from_code(axis), value)?)
    }

    pub fn mode_amplitude(&self, r: usize, s: usize, axis: u8) -> f32 {
        self.engine.mode_amplitude(r, s, axis_from_code(axis))
    }

    pub fn mode_phase(&self, r: usize, s: usize, axis: u8) -> f32 {
        self.engine.mode_phase(r, s, axis_from_code(axis))
    }

    pub fn mode_frequency(&self, r: usize, s: usize) -> f32 {
        self.engine.mode_frequency(r, s)
    }

    pub fn time(&self) -> f32 {
        self.engine.clock.time
    }

    pub fn playing(&self) -> bool {
        self.engine.clock.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.engine.clock.playing = playing;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.engine.clock.set_speed(speed);
    }

    pub fn zero_positions(&mut self) {
        self.engine.zero_positions();
        self.write_gpu_output();
    }

    pub fn restore_initial_positions(&mut self) {
        self.engine.restore_initial_positions();
        self.write_gpu_output();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.write_gpu_output();
    }
}

impl TwoDimensionsWorld {
    fn write_gpu_output(&mut self) {
        for i in 0..self.engine.masses.count {
            let pos = self.engine.masses.position(i);
            let vel = self.engine.masses.velocity[i];
            self.gpu_buffer[i] = GpuMass {
                position: [pos.x, pos.y],
                velocity: [vel.x, vel.y],
            };
        }
    }
}
