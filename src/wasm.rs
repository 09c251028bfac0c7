//! WASM bindings for the frame solver
//!
//! Runs the solver directly in the browser (typically from a Web Worker).
//! Every export takes and returns a JSON string using the same envelope as
//! the HTTP server.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::{self, AnalysisRequest, EvaluateRequest, PresetRequest, Response};
use crate::error::FrameResult;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn elapsed_ms(start: f64) -> u64 {
    (js_sys::Date::now() - start).max(0.0) as u64
}

/// Parse a request, run it and serialise the envelope
fn handle<R, T>(request_json: &str, run: impl FnOnce(R) -> FrameResult<T>) -> String
where
    R: serde::de::DeserializeOwned,
    T: Serialize,
{
    let start = js_sys::Date::now();

    let response = match serde_json::from_str::<R>(request_json) {
        Ok(request) => Response::from_result(run(request)),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("bad request: {e}")));
            Response::failure(format!("Failed to parse request: {e}"))
        }
    };

    serde_json::to_string(&response.with_elapsed(elapsed_ms(start))).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

/// Analyze a frame model
///
/// Takes `{"model": ..., "options": ...}` and returns the analysis result.
#[wasm_bindgen]
pub fn analyze(request_json: &str) -> String {
    handle::<AnalysisRequest, _>(request_json, api::run_analysis)
}

/// Probe internal forces of one element at a normalised position
#[wasm_bindgen]
pub fn evaluate(request_json: &str) -> String {
    handle::<EvaluateRequest, _>(request_json, api::run_evaluate)
}

/// Generate a preset structure
#[wasm_bindgen]
pub fn preset(request_json: &str) -> String {
    handle::<PresetRequest, _>(request_json, api::run_preset)
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
