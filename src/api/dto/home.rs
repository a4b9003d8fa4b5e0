use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}
