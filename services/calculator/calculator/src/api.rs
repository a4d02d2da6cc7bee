use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::{Route, State};
use serde::Serialize;

use expression::evaluate_json;
use telemetry::Measure;

use crate::config::ApiConfig;
use crate::error::ApiError;

lazy_static! {
    static ref CALC_MEASURE: Measure = Measure::new("controller", "calc");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

#[derive(Debug, Serialize)]
struct CalcResponse {
    result: f64,
}

#[post("/calc", format = "json", data = "<request>")]
async fn calc(
    request: Result<Json<Value>, rocket::serde::json::Error<'_>>,
    config: &State<ApiConfig>,
) -> Result<Json<CalcResponse>, ApiError> {
    CALC_MEASURE
        .stats(async move {
            let Json(node) = request?;
            let result = evaluate_json(&node, config.max_depth)?;

            Ok(Json(CalcResponse { result }))
        })
        .await
}

// Bodies without a JSON content type miss `calc` and land here
#[post("/calc", rank = 2)]
async fn calc_unsupported() -> Result<Json<CalcResponse>, ApiError> {
    CALC_MEASURE
        .stats(async { Err(ApiError::UnsupportedMediaType) })
        .await
}

pub fn routes() -> Vec<Route> {
    routes![status, metrics, calc, calc_unsupported]
}
