//! 영양 목표 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /goals` - 목표 설정/갱신 (보호됨)
//! - `GET /goals` - 현재 목표 조회 (보호됨)

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::repository::GoalsRepository;
use crate::state::AppState;
use nutrition_core::MacroGoals;

/// 목표 설정 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetGoalsRequest {
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein: f64,
    #[validate(range(min = 0.0))]
    pub carbs: f64,
    #[validate(range(min = 0.0))]
    pub fats: f64,
}

/// 목표 설정 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoalsResponse {
    pub message: String,
    pub goals: MacroGoals,
}

/// POST /goals - 목표 설정/갱신
#[utoipa::path(
    post,
    path = "/goals",
    tag = "goals",
    request_body = SetGoalsRequest,
    responses(
        (status = 200, description = "목표 갱신됨", body = GoalsResponse),
        (status = 400, description = "잘못된 입력", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn set_goals(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetGoalsRequest>,
) -> ApiResult<Json<GoalsResponse>> {
    request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::with_details(
                "VALIDATION_ERROR",
                "잘못된 입력입니다",
                json!(e),
            )),
        )
    })?;

    let goals = MacroGoals {
        calories: request.calories,
        protein: request.protein,
        carbs: request.carbs,
        fats: request.fats,
    };

    let record = GoalsRepository::upsert_goals(&state.db_pool, user.account_id, goals)
        .await
        .map_err(|e| {
            error!(error = %e, account_id = %user.account_id, "Goals upsert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", "목표 저장에 실패했습니다")),
            )
        })?;

    debug!(account_id = %user.account_id, "Goals updated");

    Ok(Json(GoalsResponse {
        message: "Goals updated".to_string(),
        goals: record.macros(),
    }))
}

/// GET /goals - 현재 목표 조회
#[utoipa::path(
    get,
    path = "/goals",
    tag = "goals",
    responses(
        (status = 200, description = "현재 목표", body = MacroGoals),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 404, description = "목표 미설정", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_goals(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MacroGoals>> {
    let record = GoalsRepository::get_goals(&state.db_pool, user.account_id)
        .await
        .map_err(|e| {
            error!(error = %e, account_id = %user.account_id, "Goals fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", "목표 조회에 실패했습니다")),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse::simple(
                    "GOALS_NOT_SET",
                    "아직 설정된 목표가 없습니다",
                )),
            )
        })?;

    Ok(Json(record.macros()))
}

/// 목표 라우터 생성.
pub fn goals_router() -> Router<Arc<AppState>> {
    Router::new().route("/goals", post(set_goals).get(get_goals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_goal_rejected() {
        let request = SetGoalsRequest {
            calories: 2000.0,
            protein: -1.0,
            carbs: 200.0,
            fats: 70.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_zero_goals_allowed() {
        let request = SetGoalsRequest {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        };
        assert!(request.validate().is_ok());
    }
}
