use crate::Wards;
use crate::comparison::{ComparisonRow, RADAR_AXES, comparison_rows};
use crate::profile::{WardProfile, ward_profile};
use agrisk_derive::{api_handler, api_model};
use agrisk_kernel::domain::crop::{FIELD_NOTES, SWEET_POTATO, WARD_CHARACTERISTICS};
use agrisk_kernel::domain::ward::WardRecord;
use agrisk_kernel::prelude::*;
use agrisk_kernel::server::error::ErrorBody;
use axum::Json;
use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_model]
/// Catalogue entry
pub struct WardSummary {
    pub name: String,
    pub population: u32,
    pub area_km2: f64,
    pub altitude: String,
    pub avg_yield_t_ha: f64,
    pub irrigation_pct: f64,
    pub market_access: String,
    pub exposure: String,
    pub color: String,
}

#[api_model]
/// One row of the comparison table
pub struct ComparisonRowDto {
    pub ward: String,
    pub population: u32,
    pub area_km2: f64,
    pub cultivated_area_ha: f64,
    pub avg_yield_t_ha: f64,
    pub irrigation_pct: f64,
    pub market_access: String,
    /// Position of the market tier, Poor = 0 ... Excellent = 3
    pub market_index: u8,
    /// Simulated, redrawn on every request
    pub risk_score: f64,
    /// Values for the radar axes
    pub radar: Vec<f64>,
}

#[api_model]
/// Comparison table with radar axes
pub struct ComparisonResponse {
    pub sub_county: String,
    pub radar_axes: Vec<String>,
    pub rows: Vec<ComparisonRowDto>,
}

#[api_model]
/// Detailed ward profile
pub struct WardProfileDto {
    pub name: String,
    pub population: String,
    pub area_km2: f64,
    pub altitude: String,
    pub soil: String,
    pub cultivated_area_ha: f64,
    pub avg_yield_t_ha: f64,
    pub irrigation_pct: f64,
    pub varieties: Vec<String>,
    pub market: String,
    pub risk_factors: Vec<String>,
    pub exposure: String,
    pub color: String,
}

#[api_model]
/// Ward characteristic line
pub struct WardNote {
    pub ward: String,
    pub note: String,
}

#[api_model]
/// Sweet potato agronomy plus sub-county notes
pub struct CropProfileResponse {
    pub crop: String,
    pub sub_county: String,
    pub county: String,
    pub optimal_temperature: String,
    pub optimal_soil_temperature: String,
    pub rainfall_need: String,
    pub growing_period: String,
    pub drought_tolerance: String,
    pub waterlogging_sensitivity: String,
    pub critical_stages: Vec<String>,
    pub major_pests: Vec<String>,
    pub major_diseases: Vec<String>,
    pub field_notes: Vec<String>,
    pub ward_characteristics: Vec<WardNote>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|&item| item.to_owned()).collect()
}

impl From<&WardRecord> for WardSummary {
    fn from(ward: &WardRecord) -> Self {
        Self {
            name: ward.name.to_owned(),
            population: ward.population,
            area_km2: ward.area_km2,
            altitude: ward.altitude.to_owned(),
            avg_yield_t_ha: ward.avg_yield_t_ha,
            irrigation_pct: ward.irrigation_pct,
            market_access: ward.market_access.to_string(),
            exposure: ward.exposure.to_string(),
            color: ward.color.to_owned(),
        }
    }
}

impl From<ComparisonRow> for ComparisonRowDto {
    fn from(row: ComparisonRow) -> Self {
        Self {
            ward: row.ward.to_owned(),
            population: row.population,
            area_km2: row.area_km2,
            cultivated_area_ha: row.cultivated_area_ha,
            avg_yield_t_ha: row.avg_yield_t_ha,
            irrigation_pct: row.irrigation_pct,
            market_access: row.market_access.to_string(),
            market_index: row.market_index,
            risk_score: row.risk_score,
            radar: row.radar.to_vec(),
        }
    }
}

impl From<WardProfile> for WardProfileDto {
    fn from(profile: WardProfile) -> Self {
        Self {
            name: profile.name.to_owned(),
            population: profile.population,
            area_km2: profile.area_km2,
            altitude: profile.altitude.to_owned(),
            soil: profile.soil.to_owned(),
            cultivated_area_ha: profile.cultivated_area_ha,
            avg_yield_t_ha: profile.avg_yield_t_ha,
            irrigation_pct: profile.irrigation_pct,
            varieties: owned(profile.varieties),
            market: profile.market,
            risk_factors: owned(profile.risk_factors),
            exposure: profile.exposure.to_string(),
            color: profile.color.to_owned(),
        }
    }
}

#[api_handler(
    get,
    path = "/api/wards",
    responses((status = OK, description = "Wards in catalogue order", body = [WardSummary])),
    tag = WARDS_TAG,
)]
pub(crate) async fn list_wards(State(state): State<ApiState>) -> ApiResult<Json<Vec<WardSummary>>> {
    let wards = state.try_get_slice::<Wards>()?;
    Ok(Json(wards.registry.iter().map(WardSummary::from).collect()))
}

#[api_handler(
    get,
    path = "/api/wards/comparison",
    responses((status = OK, description = "Comparison table with simulated risk", body = ComparisonResponse)),
    tag = WARDS_TAG,
)]
pub(crate) async fn compare_wards(State(state): State<ApiState>) -> ApiResult<Json<ComparisonResponse>> {
    let wards = state.try_get_slice::<Wards>()?;
    let mut rng = simulation_rng(wards.seed);

    let rows = comparison_rows(&wards.registry, &mut rng).into_iter().map(Into::into).collect();
    Ok(Json(ComparisonResponse {
        sub_county: SUB_COUNTY.to_owned(),
        radar_axes: owned(&RADAR_AXES),
        rows,
    }))
}

#[api_handler(
    get,
    path = "/api/wards/{name}",
    params(("name" = String, Path, description = "Ward name, e.g. `Chania Ward` or `chania`")),
    responses(
        (status = OK, description = "Ward profile", body = WardProfileDto),
        (status = NOT_FOUND, description = "Unknown ward", body = ErrorBody),
    ),
    tag = WARDS_TAG,
)]
pub(crate) async fn ward_details(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> ApiResult<Json<WardProfileDto>> {
    let wards = state.try_get_slice::<Wards>()?;
    let profile = ward_profile(&wards.registry, &name)
        .map_err(|err| ApiError::not_found(err.to_string()))?;
    Ok(Json(profile.into()))
}

#[api_handler(
    get,
    path = "/api/crop-profile",
    responses((status = OK, description = "Crop profile and field notes", body = CropProfileResponse)),
    tag = WARDS_TAG,
)]
pub(crate) async fn crop_profile() -> Json<CropProfileResponse> {
    let crop = SWEET_POTATO;
    Json(CropProfileResponse {
        crop: crop.crop.to_owned(),
        sub_county: SUB_COUNTY.to_owned(),
        county: COUNTY.to_owned(),
        optimal_temperature: crop.optimal_temperature.to_owned(),
        optimal_soil_temperature: crop.optimal_soil_temperature.to_owned(),
        rainfall_need: crop.rainfall_need.to_owned(),
        growing_period: crop.growing_period.to_owned(),
        drought_tolerance: crop.drought_tolerance.to_owned(),
        waterlogging_sensitivity: crop.waterlogging_sensitivity.to_owned(),
        critical_stages: owned(crop.critical_stages),
        major_pests: owned(crop.major_pests),
        major_diseases: owned(crop.major_diseases),
        field_notes: owned(FIELD_NOTES),
        ward_characteristics: WARD_CHARACTERISTICS
            .iter()
            .map(|(ward, note)| WardNote { ward: (*ward).to_owned(), note: (*note).to_owned() })
            .collect(),
    })
}

/// Ward routes: `/api/wards`, `/api/wards/comparison`, `/api/wards/{name}`, `/api/crop-profile`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_wards))
        .routes(routes!(compare_wards))
        .routes(routes!(ward_details))
        .routes(routes!(crop_profile))
}
