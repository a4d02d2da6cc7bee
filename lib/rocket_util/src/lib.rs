use std::time::Instant;

use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::{providers::Env, Figment};
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{json, Value};
use rocket::{Catcher, Data, Request, Response};

/// Logs one line per request with its status and latency
pub struct RequestLogger {
    skip: Vec<&'static str>,
}

impl RequestLogger {
    /// Logs every request except those whose path is in `skip`
    pub fn skipping(skip: Vec<&'static str>) -> RequestLogger {
        RequestLogger { skip }
    }

    fn should_log(&self, path: &str) -> bool {
        !self.skip.iter().any(|skipped| *skipped == path)
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        RequestLogger::skipping(vec!["/metrics", "/status", "/health"])
    }
}

#[derive(Copy, Clone)]
struct RequestStart(Option<Instant>);

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| RequestStart(Some(Instant::now())));
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if !self.should_log(request.uri().path().as_str()) {
            return;
        }

        let latency = request
            .local_cache(|| RequestStart(None))
            .0
            .map(|start| start.elapsed().as_micros())
            .unwrap_or_default();

        info!(
            "method={} uri={} status={} latency_us={} remote_ip={}",
            request.method(),
            request.uri(),
            response.status().code,
            latency,
            request
                .client_ip()
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}

#[rocket::catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> status::Custom<Value> {
    let reason = status.reason().unwrap_or("Unknown Error");
    status::Custom(status, json!({ "error": reason }))
}

/// Catchers rendering every unhandled status as `{"error": <reason>}`
pub fn catchers() -> Vec<Catcher> {
    rocket::catchers![default_catcher]
}

pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
