use drape::{
    ClothSession, GridConfig, NoOpStepObserver, SimulationFlags, SolverConfig, Vec2, Viewport,
};
use wasm_bindgen::prelude::*;

/// Browser-side driver: owns the session plus the UI toggles and pointer
/// state, and hands flat position buffers to the page for drawing.
#[wasm_bindgen]
pub struct ClothDemo {
    session: ClothSession,
    flags: SimulationFlags,
    pointer: Vec2,
    pressed: bool,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32, seed: u64) -> Result<ClothDemo, JsError> {
        let viewport = Viewport::new(viewport_width, viewport_height);
        let config = SolverConfig::new().with_viewport(viewport);
        let session = ClothSession::seeded(GridConfig::default(), config, seed)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ClothDemo {
            session,
            flags: SimulationFlags::default(),
            pointer: Vec2::ZERO,
            pressed: false,
        })
    }

    /// Pressing the pointer also switches gravity on.
    pub fn set_pointer(&mut self, x: f32, y: f32, pressed: bool) {
        self.pointer = Vec2::new(x, y);
        self.pressed = pressed;
        if pressed {
            self.flags.gravity = true;
        }
    }

    pub fn toggle_wind(&mut self) {
        self.flags.wind = !self.flags.wind;
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.flags.gravity = enabled;
    }

    pub fn update(&mut self, dt: f32) {
        self.session.apply_pointer_constraint(self.pointer, self.pressed);
        self.session.apply_wind(self.flags);
        self.session.step(dt, self.flags, &mut NoOpStepObserver);
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.flags = SimulationFlags::default();
        self.pressed = false;
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        let particles = self.session.particles();
        let mut out = Vec::with_capacity(particles.len() * 3);
        for p in particles {
            out.extend_from_slice(&p.position.to_array());
        }
        out
    }

    /// Returns flat [a0, b0, a1, b1, ...] spring endpoints for line drawing
    pub fn spring_indices(&self) -> Vec<u32> {
        let springs = self.session.springs();
        let mut out = Vec::with_capacity(springs.len() * 2);
        for s in springs {
            out.push(s.p1 as u32);
            out.push(s.p2 as u32);
        }
        out
    }

    pub fn width(&self) -> usize {
        self.session.grid().width()
    }

    pub fn height(&self) -> usize {
        self.session.grid().height()
    }

    pub fn wind_enabled(&self) -> bool {
        self.flags.wind
    }
}
