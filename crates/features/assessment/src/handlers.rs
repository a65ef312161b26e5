use crate::Assessment;
use crate::gateway::ModelStatus;
use crate::insurance::{PremiumRecommendation, recommend};
use agrisk_derive::{api_handler, api_model};
use agrisk_kernel::domain::constants::ASSESSMENT_TAG;
use agrisk_kernel::domain::observation::{
    EstimateSource, FallbackReason, ObservationInput, RiskTier, StressEstimate,
};
use agrisk_kernel::domain::ward::{WardRecord, WardRegistry};
use agrisk_kernel::server::error::{ApiError, ApiResult, ErrorBody};
use agrisk_kernel::server::state::ApiState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const UNAVAILABLE_NOTICE: &str = "Model not found. Using simulated predictions.";
const INFERENCE_NOTICE: &str = "Model inference failed. Using simulated predictions.";

#[api_model]
/// Readings submitted for one ward
pub struct ObservationRequest {
    /// Ward name; the " Ward" suffix and letter case are optional
    pub ward: String,
    /// Air temperature, °C
    pub temperature: f64,
    /// Soil moisture, %
    pub soil_moisture: f64,
    /// Vegetation index (NDVI)
    pub vegetation_index: f64,
}

#[api_model]
/// Batch of ward readings
pub struct AssessmentRequest {
    pub observations: Vec<ObservationRequest>,
}

#[api_model]
/// Readings as used by the estimator
pub struct ObservationValues {
    pub temperature: f64,
    pub soil_moisture: f64,
    pub vegetation_index: f64,
}

#[api_model]
/// Premium guidance
pub struct Recommendation {
    pub premium: String,
    pub advice: String,
}

#[api_model]
/// Stress estimate for one ward
pub struct AssessmentResult {
    pub ward: String,
    pub input: ObservationValues,
    /// Base probability times the ward multiplier
    pub probability: f64,
    pub base_probability: f64,
    pub multiplier: f64,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "MODERATE"))]
    pub tier: RiskTier,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub source: EstimateSource,
    pub recommendation: Recommendation,
}

#[api_model]
/// Batch assessment outcome
pub struct AssessmentResponse {
    pub results: Vec<AssessmentResult>,
    /// At least one result used the fallback heuristic
    pub fallback_in_use: bool,
    pub notice: Option<String>,
}

#[api_model]
/// Starting readings for a ward
pub struct DefaultObservation {
    pub ward: String,
    pub exposure: String,
    pub multiplier: f64,
    pub temperature: f64,
    pub soil_moisture: f64,
    pub vegetation_index: f64,
}

#[api_model]
/// Classifier state
pub struct ModelStatusResponse {
    pub loaded: bool,
    pub path: Option<String>,
    pub kind: Option<String>,
    pub capability: Option<String>,
    pub reason: Option<String>,
    pub notice: Option<String>,
}

impl From<ObservationInput> for ObservationValues {
    fn from(input: ObservationInput) -> Self {
        Self {
            temperature: input.temperature,
            soil_moisture: input.soil_moisture,
            vegetation_index: input.vegetation_index,
        }
    }
}

impl From<PremiumRecommendation> for Recommendation {
    fn from(recommendation: PremiumRecommendation) -> Self {
        Self {
            premium: recommendation.premium.to_owned(),
            advice: recommendation.advice.to_owned(),
        }
    }
}

impl From<ModelStatus> for ModelStatusResponse {
    fn from(status: ModelStatus) -> Self {
        Self {
            notice: (!status.loaded).then(|| UNAVAILABLE_NOTICE.to_owned()),
            loaded: status.loaded,
            path: status.path.map(|path| path.display().to_string()),
            kind: status.kind.map(|kind| kind.to_string()),
            capability: status.capability.map(|capability| capability.to_string()),
            reason: status.reason,
        }
    }
}

fn assessment_result(ward: &WardRecord, input: ObservationInput, estimate: StressEstimate) -> AssessmentResult {
    AssessmentResult {
        ward: ward.name.to_owned(),
        input: input.into(),
        probability: estimate.probability,
        base_probability: estimate.base_probability,
        multiplier: estimate.multiplier,
        tier: estimate.tier,
        source: estimate.source,
        recommendation: recommend(&estimate).into(),
    }
}

/// Resolves wards and clamps readings. Rejects empty batches, non-finite readings and
/// unknown wards, in that order.
pub(crate) fn validate<'a>(
    registry: &'a WardRegistry,
    observations: &[ObservationRequest],
) -> ApiResult<Vec<(&'a WardRecord, ObservationInput)>> {
    if observations.is_empty() {
        return Err(ApiError::bad_request("At least one observation is required"));
    }

    observations
        .iter()
        .map(|request| {
            let raw = ObservationInput::new(
                request.temperature,
                request.soil_moisture,
                request.vegetation_index,
            );
            // JSON cannot carry NaN or infinity; this guards direct callers.
            if !raw.is_finite() {
                return Err(ApiError::unprocessable(format!(
                    "Readings for '{}' must be finite numbers",
                    request.ward
                )));
            }

            let ward = registry.find(&request.ward).ok_or_else(|| {
                ApiError::not_found(format!("Ward '{}' is not in the catalogue", request.ward))
            })?;
            Ok((ward, raw.clamped()))
        })
        .collect()
}

fn fallback_notice(results: &[AssessmentResult]) -> Option<String> {
    let mut reasons = results.iter().filter_map(|result| match result.source {
        EstimateSource::Fallback { reason } => Some(reason),
        EstimateSource::Model => None,
    });

    let first = reasons.next()?;
    let inference_failed =
        first == FallbackReason::InferenceError || reasons.any(|r| r == FallbackReason::InferenceError);
    Some(if inference_failed { INFERENCE_NOTICE } else { UNAVAILABLE_NOTICE }.to_owned())
}

#[api_handler(
    post,
    path = "/api/assessments",
    request_body = AssessmentRequest,
    responses(
        (status = OK, description = "Per-ward stress estimates", body = AssessmentResponse),
        (status = BAD_REQUEST, description = "Empty batch or unparsable body", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown ward", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Readings of the wrong type or unknown fields", body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub(crate) async fn assess(
    State(state): State<ApiState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> ApiResult<Json<AssessmentResponse>> {
    let Json(request) = payload?;
    let slice = state.try_get_slice::<Assessment>()?;
    let requests = validate(&slice.registry, &request.observations)?;

    let inputs: Vec<ObservationInput> = requests.iter().map(|(_, input)| *input).collect();
    let batch = slice.estimator.estimate_all(requests);

    let results: Vec<AssessmentResult> = batch
        .estimates
        .into_iter()
        .zip(inputs)
        .map(|((ward, estimate), input)| assessment_result(ward, input, estimate))
        .collect();

    let notice = fallback_notice(&results);
    tracing::debug!(wards = results.len(), fallback_in_use = batch.fallback_in_use, "Assessment computed");

    Ok(Json(AssessmentResponse { results, fallback_in_use: batch.fallback_in_use, notice }))
}

#[api_handler(
    get,
    path = "/api/assessments/defaults",
    responses((status = OK, description = "Default readings per ward", body = [DefaultObservation])),
    tag = ASSESSMENT_TAG,
)]
pub(crate) async fn defaults(State(state): State<ApiState>) -> ApiResult<Json<Vec<DefaultObservation>>> {
    let slice = state.try_get_slice::<Assessment>()?;

    let defaults = slice
        .registry
        .iter()
        .map(|ward| {
            let observation = ward.default_observation();
            DefaultObservation {
                ward: ward.name.to_owned(),
                exposure: ward.exposure.to_string(),
                multiplier: ward.stress_multiplier(),
                temperature: observation.temperature,
                soil_moisture: observation.soil_moisture,
                vegetation_index: observation.vegetation_index,
            }
        })
        .collect();

    Ok(Json(defaults))
}

#[api_handler(
    get,
    path = "/api/model",
    responses((status = OK, description = "Classifier status", body = ModelStatusResponse)),
    tag = ASSESSMENT_TAG,
)]
pub(crate) async fn model_status(State(state): State<ApiState>) -> ApiResult<Json<ModelStatusResponse>> {
    let slice = state.try_get_slice::<Assessment>()?;
    Ok(Json(slice.estimator.gateway().status().into()))
}

/// Assessment routes: `/api/assessments`, `/api/assessments/defaults`, `/api/model`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(assess))
        .routes(routes!(defaults))
        .routes(routes!(model_status))
}
