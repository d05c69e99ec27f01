//! 음식 기록 및 진행 상황 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /log` - 음식 기록 추가 (보호됨)
//! - `GET /progress` - 기록 목록 및 섭취 요약 조회 (보호됨)

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
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
use crate::repository::{FoodEntryRepository, GoalsRepository};
use crate::state::AppState;
use nutrition_core::{FoodEntry, MacroGoals, NewFoodEntry};

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 음식 기록 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LogFoodRequest {
    /// 음식 이름
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein: f64,
    #[validate(range(min = 0.0))]
    pub carbs: f64,
    #[validate(range(min = 0.0))]
    pub fats: f64,
}

/// 음식 기록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogFoodResponse {
    pub message: String,
    pub entry: FoodEntry,
}

/// 섭취 합계.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConsumedSummary {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// 진행 상황 응답.
///
/// 기록 목록과 함께 섭취 합계, 목표가 설정된 경우 남은 양을 제공합니다.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    /// 기록 목록 (최신순)
    pub entries: Vec<FoodEntry>,
    /// 전체 섭취 합계
    pub consumed: ConsumedSummary,
    /// 설정된 목표 (없으면 null)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<MacroGoals>,
    /// 목표 대비 남은 양 (목표 미설정 시 null)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<MacroGoals>,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /log - 음식 기록 추가
#[utoipa::path(
    post,
    path = "/log",
    tag = "food-log",
    request_body = LogFoodRequest,
    responses(
        (status = 201, description = "기록 생성됨", body = LogFoodResponse),
        (status = 400, description = "잘못된 입력", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn log_food(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogFoodRequest>,
) -> ApiResult<(StatusCode, Json<LogFoodResponse>)> {
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

    let new_entry = NewFoodEntry {
        name: request.name,
        calories: request.calories,
        protein: request.protein,
        carbs: request.carbs,
        fats: request.fats,
    };

    let entry = FoodEntryRepository::insert_entry(&state.db_pool, user.account_id, &new_entry)
        .await
        .map_err(|e| {
            error!(error = %e, account_id = %user.account_id, "Food entry insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", "음식 기록에 실패했습니다")),
            )
        })?;

    debug!(account_id = %user.account_id, entry_id = %entry.id, "Food logged");

    Ok((
        StatusCode::CREATED,
        Json(LogFoodResponse {
            message: "Food logged".to_string(),
            entry,
        }),
    ))
}

/// GET /progress - 기록 목록 및 섭취 요약 조회
#[utoipa::path(
    get,
    path = "/progress",
    tag = "food-log",
    responses(
        (status = 200, description = "진행 상황", body = ProgressResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_progress(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProgressResponse>> {
    let db_error = |e: sqlx::Error| {
        error!(error = %e, account_id = %user.account_id, "Progress fetch failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("DB_ERROR", "진행 상황 조회에 실패했습니다")),
        )
    };

    let entries = FoodEntryRepository::list_for_account(&state.db_pool, user.account_id)
        .await
        .map_err(db_error)?;

    let totals = FoodEntryRepository::totals_for_account(&state.db_pool, user.account_id)
        .await
        .map_err(db_error)?;

    let goals = GoalsRepository::get_goals(&state.db_pool, user.account_id)
        .await
        .map_err(db_error)?
        .map(|r| r.macros());

    let remaining = goals.map(|g| MacroGoals {
        calories: g.calories - totals.calories,
        protein: g.protein - totals.protein,
        carbs: g.carbs - totals.carbs,
        fats: g.fats - totals.fats,
    });

    Ok(Json(ProgressResponse {
        entries,
        consumed: ConsumedSummary {
            calories: totals.calories,
            protein: totals.protein,
            carbs: totals.carbs,
            fats: totals.fats,
        },
        goals,
        remaining,
    }))
}

/// 음식 기록 라우터 생성.
pub fn food_log_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/log", post(log_food))
        .route("/progress", get(get_progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_validation() {
        let valid = LogFoodRequest {
            name: "닭가슴살".to_string(),
            calories: 165.0,
            protein: 31.0,
            carbs: 0.0,
            fats: 3.6,
        };
        assert!(valid.validate().is_ok());

        let empty_name = LogFoodRequest {
            name: "".to_string(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_progress_response_omits_unset_goals() {
        let response = ProgressResponse {
            entries: vec![],
            consumed: ConsumedSummary {
                calories: 0.0,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
            },
            goals: None,
            remaining: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("goals"));
        assert!(!json.contains("remaining"));
    }
}
