//! JSON request/response layer shared by the HTTP server and WASM bindings

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::elements::ElementId;
use crate::error::{FrameError, FrameResult};
use crate::model::FrameModel;
use crate::presets::{self, PresetParams, StructureType};
use crate::results::{AnalysisResult, SectionForces};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub model: FrameModel,
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
    /// Split elements at nodes lying on them before solving
    #[serde(default)]
    pub auto_connect: bool,
    /// Pass reported forces through the display cleanup
    #[serde(default)]
    pub clean: bool,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub model: FrameModel,
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
    pub element: ElementId,
    /// Normalised position along the element
    pub position: f64,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    pub structure: StructureType,
    #[serde(default)]
    pub params: PresetParams,
}

/// Uniform envelope: `success` plus either `error` or a payload
#[derive(Debug, Serialize)]
pub struct Response<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_elapsed: Option<u64>,
}

impl<T> Response<T> {
    pub fn from_result(result: FrameResult<T>) -> Self {
        match result {
            Ok(results) => Self {
                success: true,
                error: None,
                results: Some(results),
                ms_elapsed: None,
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            results: None,
            ms_elapsed: None,
        }
    }

    pub fn with_elapsed(mut self, ms: u64) -> Self {
        self.ms_elapsed = Some(ms);
        self
    }
}

/// Validate the model and run the analysis
pub fn run_analysis(request: AnalysisRequest) -> FrameResult<AnalysisResult> {
    let mut model = request.model.validated()?;
    if request.auto_connect {
        model.split_at_nodes();
    }
    let options = request.options.unwrap_or_default();
    let result = model.analyze(&options);
    Ok(if request.clean { result.cleaned() } else { result })
}

/// Analyse and probe one element at a normalised position
pub fn run_evaluate(request: EvaluateRequest) -> FrameResult<SectionForces> {
    let model = request.model.validated()?;
    let options = request.options.unwrap_or_default();
    let result = model.analyze(&options);
    if result.is_empty() {
        return Err(FrameError::InvalidInput(
            "model needs at least two nodes and one element".to_string(),
        ));
    }
    model.evaluate(&result, request.element, request.position)
}

/// Generate a preset structure
pub fn run_preset(request: PresetRequest) -> FrameResult<FrameModel> {
    presets::generate(request.structure, &request.params)
}
