//! WebAssembly bindings for the epistemic density simulation.
//!
//! Provides a thin wrapper around `AnimationDriver` for browser environments.
//! The page owns the `<canvas>` and the `setInterval`/`requestAnimationFrame`
//! loop; it calls `tick()` and blits `pixels()` into an `ImageData`.

use wasm_bindgen::prelude::*;

use crate::{
    animation::{AnimationDriver, Cadence},
    calibration::{CaseStudy, SweepConfig, sweep},
    render::PixelBuffer,
    schema::{SeedSet, SimulationParams},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// WebAssembly wrapper for the animation driver.
#[wasm_bindgen]
pub struct WasmSimulation {
    driver: AnimationDriver<PixelBuffer>,
    cadence: Cadence,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create a stopped simulation painting onto a square canvas.
    ///
    /// # Arguments
    /// * `params_json` - JSON string containing SimulationParams (empty for defaults)
    /// * `canvas_size` - Canvas side length in pixels
    #[wasm_bindgen(constructor)]
    pub fn new(params_json: &str, canvas_size: u32) -> Result<WasmSimulation, JsValue> {
        let params = parse_params(params_json)?;
        let canvas = PixelBuffer::square(canvas_size)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut driver = AnimationDriver::new(params, SeedSet::default());
        driver.attach_target(canvas);

        Ok(WasmSimulation {
            driver,
            cadence: Cadence::default(),
        })
    }

    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.cadence.restart();
        self.driver.start();
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.driver.stop();
    }

    #[wasm_bindgen]
    pub fn resume(&mut self) {
        self.driver.resume();
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.driver.reset();
    }

    /// Advance one tick. Returns the snapshot, or `null` when not running.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        match self.driver.tick() {
            Some(snapshot) => serde_wasm_bindgen::to_value(&snapshot)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Tick if the 50 ms cadence is due at `now_ms` (e.g. `performance.now()`).
    ///
    /// Returns whether a tick ran.
    #[wasm_bindgen]
    pub fn tick_at(&mut self, now_ms: f64) -> bool {
        if !self.driver.is_running() {
            return false;
        }
        self.cadence.poll_millis(now_ms) && self.driver.tick().is_some()
    }

    /// Replace parameters; a new grid size reinitializes the field.
    pub fn set_params(&mut self, params_json: &str) -> Result<(), JsValue> {
        let params = parse_params(params_json)?;
        self.driver
            .set_params(params)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the latest snapshot as a JS object.
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.driver.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// RGBA canvas bytes, suitable for `new ImageData(...)`.
    pub fn pixels(&self) -> Vec<u8> {
        self.driver
            .target()
            .map(|canvas| canvas.data().to_vec())
            .unwrap_or_default()
    }

    /// Raw density values (row-major).
    pub fn get_grid(&self) -> Vec<f32> {
        self.driver.store().grid().cells().to_vec()
    }

    pub fn total(&self) -> f32 {
        self.driver.stats().total
    }

    pub fn max_density(&self) -> f32 {
        self.driver.stats().max
    }

    pub fn entropy(&self) -> f32 {
        self.driver.stats().entropy
    }

    pub fn get_time(&self) -> f32 {
        self.driver.store().time()
    }

    pub fn get_grid_size(&self) -> usize {
        self.driver.store().grid().size()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }
}

/// Evaluate a built-in case study and its sensitivity sweep.
#[wasm_bindgen]
pub fn evaluate_case(key: &str) -> Result<JsValue, JsValue> {
    let case = CaseStudy::find(key)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown case study: {key}")))?;
    let report = case.evaluate();
    let sensitivity = sweep(&case, &SweepConfig::default());

    serde_wasm_bindgen::to_value(&(report, sensitivity))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_params(params_json: &str) -> Result<SimulationParams, JsValue> {
    let params: SimulationParams = if params_json.trim().is_empty() {
        SimulationParams::default()
    } else {
        serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid params JSON: {e}")))?
    };
    params
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(params)
}
