use axum::{
    extract::{Query, State},
    Extension, Json,
};
use motoship_core::ShopOrigin;
use motoship_geo::{GeocodeResult, PincodeValidation, QuoteMethod, ShippingQuote};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct EstimateRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub order_value: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct ShopLocationData {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

impl From<&ShopOrigin> for ShopLocationData {
    fn from(origin: &ShopOrigin) -> Self {
        Self {
            lat: origin.lat,
            lon: origin.lon,
            address: origin.address.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct EstimateData {
    #[serde(flatten)]
    pub quote: ShippingQuote,
    pub shop_location: ShopLocationData,
    pub order_value: f64,
    pub free_shipping_threshold: f64,
}

pub(super) async fn estimate_shipping(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<EstimateRequest>,
) -> Result<Json<ApiResponse<EstimateData>>, ApiError> {
    let address = required_address(body.address.as_deref(), &req_id)?;

    let quote = state.pipeline.estimate(&address, body.order_value).await;

    Ok(Json(ApiResponse {
        data: EstimateData {
            shop_location: ShopLocationData::from(state.pipeline.shop_origin()),
            order_value: body.order_value,
            free_shipping_threshold: motoship_geo::FREE_SHIPPING_THRESHOLD,
            quote,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct RatesQuery {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub order_value: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct RateTier {
    pub name: &'static str,
    pub cost: u32,
    pub estimated_days: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct RatesBreakdown {
    pub standard: RateTier,
    pub express: RateTier,
    pub overnight: RateTier,
}

#[derive(Debug, Serialize)]
pub(super) struct RatesData {
    pub shipping_rates: RatesBreakdown,
    pub distance_km: f64,
    pub coordinates: Option<GeocodeResult>,
    pub shop_location: ShopLocationData,
    pub fallback: bool,
    pub order_value: f64,
    pub free_shipping_threshold: f64,
}

/// Derives the method tiers from one base quote: express is 1.5x, overnight
/// is 2x, both rounded to whole rupees.
fn rates_breakdown(base_cost: u32) -> RatesBreakdown {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let express_cost = (f64::from(base_cost) * 1.5).round() as u32;
    RatesBreakdown {
        standard: RateTier {
            name: "Standard Shipping",
            cost: base_cost,
            estimated_days: "5-7 business days",
            description: "Regular delivery service",
        },
        express: RateTier {
            name: "Express Shipping",
            cost: express_cost,
            estimated_days: "2-3 business days",
            description: "Faster delivery service",
        },
        overnight: RateTier {
            name: "Overnight Delivery",
            cost: base_cost * 2,
            estimated_days: "1 business day",
            description: "Next day delivery (if available)",
        },
    }
}

pub(super) async fn shipping_rates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RatesQuery>,
) -> Result<Json<ApiResponse<RatesData>>, ApiError> {
    let address = required_address(query.address.as_deref(), &req_id)?;

    let quote = state.pipeline.estimate(&address, query.order_value).await;

    Ok(Json(ApiResponse {
        data: RatesData {
            shipping_rates: rates_breakdown(quote.shipping_cost),
            distance_km: quote.distance_km,
            coordinates: quote.coordinates,
            shop_location: ShopLocationData::from(state.pipeline.shop_origin()),
            fallback: quote.method == QuoteMethod::Fallback,
            order_value: query.order_value,
            free_shipping_threshold: motoship_geo::FREE_SHIPPING_THRESHOLD,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct ValidateAddressRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AddressValidationData {
    pub valid: bool,
    pub coordinates: Option<GeocodeResult>,
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub(super) async fn validate_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ValidateAddressRequest>,
) -> Result<Json<ApiResponse<AddressValidationData>>, ApiError> {
    let address = required_address(body.address.as_deref(), &req_id)?;

    let data = match state.pipeline.resolve_address(&address).await {
        Ok(location) => AddressValidationData {
            valid: true,
            formatted_address: Some(location.display_name.clone()),
            coordinates: Some(location),
            error: None,
        },
        Err(error) => AddressValidationData {
            valid: false,
            coordinates: None,
            formatted_address: None,
            error: Some(error.to_string()),
        },
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct ValidatePincodeRequest {
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub order_value: f64,
}

pub(super) async fn validate_pincode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ValidatePincodeRequest>,
) -> Result<Json<ApiResponse<PincodeValidation>>, ApiError> {
    let pincode = body
        .pincode
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "validation_error", "pincode is required"))?
        .to_string();

    let data = state
        .pipeline
        .validate_pincode(&pincode, body.order_value)
        .await;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn required_address(address: Option<&str>, req_id: &RequestId) -> Result<String, ApiError> {
    address
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "validation_error", "address is required"))
}
