//! 레시피 추천 API 라우트
//!
//! Spoonacular API를 프록시하여 랜덤 레시피를 제공합니다.
//! API 키가 구성되지 않은 경우 503을 반환합니다.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::{ApiErrorResponse, ApiResult};
use crate::metrics::record_recipe_fetch;
use crate::services::{Recipe, RecipeError};
use crate::state::AppState;

/// GET /recipes - 랜덤 레시피 조회
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "레시피 목록", body = Vec<Recipe>),
        (status = 502, description = "업스트림 오류", body = ApiErrorResponse),
        (status = 503, description = "레시피 API 미구성", body = ApiErrorResponse)
    )
)]
pub(crate) async fn get_recipes(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Recipe>>> {
    let client = state.recipes.as_ref().ok_or_else(|| {
        warn!("Recipe request received but no API key is configured");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiErrorResponse::new(
                "RECIPE_API_NOT_CONFIGURED",
                "레시피 기능이 구성되지 않았습니다",
            )),
        )
    })?;

    match client.random_recipes().await {
        Ok(recipes) => {
            record_recipe_fetch("success");
            Ok(Json(recipes))
        }
        Err(e) => {
            record_recipe_fetch("error");
            match &e {
                RecipeError::Status(code) => {
                    error!(status = code, "Recipe upstream returned error status")
                }
                other => error!(error = %other, "Recipe upstream request failed"),
            }
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ApiErrorResponse::new(
                    "UPSTREAM_ERROR",
                    "레시피를 가져오지 못했습니다",
                )),
            ))
        }
    }
}

/// 레시피 라우터 생성.
pub fn recipes_router() -> Router<Arc<AppState>> {
    Router::new().route("/recipes", get(get_recipes))
}
