//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/register` - 계정 등록
//! - `/login` - 로그인 및 토큰 발급
//! - `/goals` - 영양 목표 설정/조회 (보호됨)
//! - `/log` - 음식 기록 추가 (보호됨)
//! - `/progress` - 기록 목록 및 섭취 요약 (보호됨)
//! - `/recipes` - 랜덤 레시피 조회

pub mod auth;
pub mod food_log;
pub mod goals;
pub mod health;
pub mod recipes;

pub use auth::{auth_router, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use food_log::{
    food_log_router, ConsumedSummary, LogFoodRequest, LogFoodResponse, ProgressResponse,
};
pub use goals::{goals_router, GoalsResponse, SetGoalsRequest};
pub use health::{
    health_router, ComponentHealth, ComponentStatus, LivenessResponse, ReadinessResponse,
};
pub use recipes::recipes_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 계정/인증 엔드포인트
        .merge(auth_router())
        // 목표, 기록, 레시피 엔드포인트
        .merge(goals_router())
        .merge(food_log_router())
        .merge(recipes_router())
}
