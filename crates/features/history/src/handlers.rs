use crate::History;
use crate::impact::{DroughtImpact, drought_impact};
use crate::synth::{HistoricalRecord, filter, synthesize};
use crate::HistoryError;
use agrisk_derive::{api_handler, api_model};
use agrisk_kernel::prelude::*;
use agrisk_kernel::server::error::ErrorBody;
use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct HistoryQuery {
    /// Comma-separated ward names; all wards when omitted
    pub wards: Option<String>,
}

#[api_model]
/// Yearly figures for one ward
pub struct HistoricalRecordDto {
    pub year: u16,
    pub ward: String,
    pub yield_t_ha: f64,
    pub stress_level: f64,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
}

#[api_model]
/// Drought-year yield loss for one ward
pub struct DroughtImpactDto {
    pub ward: String,
    pub normal_yield: f64,
    pub drought_yield: f64,
    pub reduction_pct: f64,
}

#[api_model]
/// Historical series and drought impact
pub struct HistoryResponse {
    pub first_year: u16,
    pub last_year: u16,
    pub wards: Vec<String>,
    pub records: Vec<HistoricalRecordDto>,
    pub drought_impact: Vec<DroughtImpactDto>,
}

impl From<HistoricalRecord> for HistoricalRecordDto {
    fn from(record: HistoricalRecord) -> Self {
        Self {
            year: record.year,
            ward: record.ward.to_owned(),
            yield_t_ha: record.yield_t_ha,
            stress_level: record.stress_level,
            rainfall_mm: record.rainfall_mm,
            temperature_c: record.temperature_c,
        }
    }
}

impl From<DroughtImpact> for DroughtImpactDto {
    fn from(impact: DroughtImpact) -> Self {
        Self {
            ward: impact.ward.to_owned(),
            normal_yield: impact.normal_yield,
            drought_yield: impact.drought_yield,
            reduction_pct: impact.reduction_pct,
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::UnknownWard { .. } => Self::not_found(err.to_string()),
            HistoryError::Config { .. } => Self::from(err.to_string()),
        }
    }
}

#[api_handler(
    get,
    path = "/api/history",
    params(HistoryQuery),
    responses(
        (status = OK, description = "Synthesized yearly series", body = HistoryResponse),
        (status = NOT_FOUND, description = "Unknown ward", body = ErrorBody),
    ),
    tag = HISTORY_TAG,
)]
pub(crate) async fn history(
    State(state): State<ApiState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let history = state.try_get_slice::<History>()?;
    let wards = history.select_wards(query.wards.as_deref())?;

    let mut rng = simulation_rng(history.seed);
    let all = synthesize(&history.registry, history.years.clone(), &mut rng);
    let records = filter(&all, &wards);
    let impact = drought_impact(&records, &wards);

    Ok(Json(HistoryResponse {
        first_year: *history.years.start(),
        last_year: *history.years.end(),
        wards: wards.iter().map(|&ward| ward.to_owned()).collect(),
        records: records.into_iter().map(Into::into).collect(),
        drought_impact: impact.into_iter().map(Into::into).collect(),
    }))
}

/// History routes: `/api/history`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(history))
}
