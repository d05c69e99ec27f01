//! 영양 추적 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 (등록/로그인)
//! - 영양 목표 및 음식 기록 관리
//! - 외부 레시피 API 프록시
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰 발급/검증 및 비밀번호 해싱
//! - [`repository`]: 데이터베이스 접근 계층
//! - [`services`]: 외부 서비스 클라이언트 (레시피 API)
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{
    hash_password, issue_token, verify_password, AuthConfig, AuthError, AuthenticatedUser, Claims,
    TokenError,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::*;
pub use services::{Recipe, RecipeClient, RecipeError};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
