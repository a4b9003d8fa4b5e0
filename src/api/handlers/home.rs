use axum::Json;

use crate::api::dto::home::HomeResponse;

/// `GET /`
pub async fn home_handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome To This Awesome API",
    })
}
