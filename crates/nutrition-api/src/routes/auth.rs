//! 계정 등록 및 로그인 API.
//!
//! # 엔드포인트
//!
//! - `POST /register` - 계정 등록
//! - `POST /login` - 로그인 및 토큰 발급
//!
//! # 열거 공격 방어
//!
//! 로그인 실패는 "존재하지 않는 사용자"와 "비밀번호 불일치"를 구분하지
//! 않고 동일한 400 응답을 반환합니다. 존재하지 않는 사용자 경로에서도
//! 더미 해시 검증을 수행하여 두 경로의 비용을 맞춥니다.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{hash_password, issue_token, verify_password, Claims, DUMMY_HASH};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::metrics::{record_login, record_registration};
use crate::repository::{AccountRepository, InsertAccountError};
use crate::state::AppState;
use nutrition_core::Account;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 계정 등록 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// 사용자 이름 (3~64자, 전역 유일)
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// 비밀번호 (8자 이상)
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// 계정 등록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    /// 생성된 계정의 공개 프로젝션 (해시 미포함)
    pub account: Account,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 로그인 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// 서명된 신원 토큰 (1시간 유효)
    pub token: String,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 로그인 실패 공통 응답.
///
/// 존재하지 않는 사용자와 비밀번호 불일치 모두 이 함수 하나를 거치므로
/// 두 경로의 상태 코드와 본문은 구조적으로 동일합니다.
fn invalid_credentials_response() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::simple(
            "INVALID_CREDENTIALS",
            "Invalid credentials",
        )),
    )
}

/// POST /register - 계정 등록
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "등록 성공", body = RegisterResponse),
        (status = 400, description = "잘못된 입력", body = ApiErrorResponse),
        (status = 409, description = "이미 존재하는 사용자 이름", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    request.validate().map_err(|e| {
        record_registration("invalid");
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::with_details(
                "VALIDATION_ERROR",
                "잘못된 입력입니다",
                json!(e),
            )),
        )
    })?;

    // 해싱 실패는 요청에 치명적이며 일반 서버 에러로만 노출
    let password_hash = hash_password(&request.password).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        record_registration("error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("INTERNAL_ERROR", "등록 처리에 실패했습니다")),
        )
    })?;

    // 유일성은 데이터베이스 제약이 중재. 두 번째 등록은 덮어쓰지 않고 실패한다.
    let record = AccountRepository::insert_account(&state.db_pool, &request.username, &password_hash)
        .await
        .map_err(|e| match e {
            InsertAccountError::Duplicate => {
                record_registration("duplicate");
                (
                    StatusCode::CONFLICT,
                    Json(ApiErrorResponse::new(
                        "DUPLICATE_USERNAME",
                        format!("사용자 이름 '{}'은 이미 사용 중입니다", request.username),
                    )),
                )
            }
            InsertAccountError::Database(e) => {
                error!(error = %e, "Account insert failed");
                record_registration("error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse::new("DB_ERROR", "등록 처리에 실패했습니다")),
                )
            }
        })?;

    info!(username = %record.username, account_id = %record.id, "Account registered");
    record_registration("success");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully!".to_string(),
            account: record.to_public(),
        }),
    ))
}

/// POST /login - 로그인 및 토큰 발급
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "잘못된 자격증명", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let account = AccountRepository::find_by_username(&state.db_pool, &request.username)
        .await
        .map_err(|e| {
            error!(error = %e, "Account lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", "로그인 처리에 실패했습니다")),
            )
        })?;

    // 존재하지 않는 사용자와 비밀번호 불일치는 동일한 응답을 공유
    let verified = match &account {
        Some(record) => verify_password(&request.password, &record.password_hash).is_ok(),
        None => {
            // 계정 존재 여부가 응답 시간으로 드러나지 않도록 더미 검증 수행
            let _ = verify_password(&request.password, DUMMY_HASH);
            false
        }
    };

    if !verified {
        warn!(username = %request.username, "Login failed");
        record_login("failure");
        return Err(invalid_credentials_response());
    }

    // 이 지점에서 account는 반드시 Some
    let record = account.ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("INTERNAL_ERROR", "로그인 처리에 실패했습니다")),
        )
    })?;

    let claims = Claims::new(record.id, state.auth.token_ttl_secs);
    let token = issue_token(&claims, &state.auth.jwt_secret).map_err(|e| {
        error!(error = %e, "Token issuance failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("INTERNAL_ERROR", "로그인 처리에 실패했습니다")),
        )
    })?;

    info!(account_id = %record.id, "Login succeeded");
    record_login("success");

    Ok(Json(LoginResponse { token }))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "bob".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "ab".to_string(),
            password: "secret123".to_string(),
        };
        assert!(short_username.validate().is_err());

        let short_password = RegisterRequest {
            username: "bob".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_response_contains_only_token() {
        let response = LoginResponse {
            token: "header.payload.signature".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("token").is_some());
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_login_failure_body_is_uniform() {
        // 모든 로그인 실패 경로가 거치는 단일 응답. 타임스탬프가 없으므로
        // 호출 시점과 무관하게 바이트 단위로 동일해야 한다.
        let (status_a, body_a) = invalid_credentials_response();
        let (status_b, body_b) = invalid_credentials_response();

        assert_eq!(status_a, StatusCode::BAD_REQUEST);
        assert_eq!(status_a, status_b);

        let bytes_a = serde_json::to_vec(&body_a.0).unwrap();
        let bytes_b = serde_json::to_vec(&body_b.0).unwrap();
        assert_eq!(bytes_a, bytes_b);

        let json: serde_json::Value = serde_json::from_slice(&bytes_a).unwrap();
        assert_eq!(json["code"], "INVALID_CREDENTIALS");
        assert_eq!(json["message"], "Invalid credentials");
        assert!(json.get("token").is_none());
        assert!(json.get("timestamp").is_none());
    }

    mod db {
        //! 실행 중인 PostgreSQL이 필요한 테스트.
        //!
        //! `DATABASE_URL`을 설정하고 `cargo test -- --ignored`로 실행합니다.

        use super::*;
        use crate::auth::AuthConfig;
        use crate::state::AppState;
        use axum::body::{to_bytes, Body, Bytes};
        use axum::http::{header, Method, Request};
        use std::sync::Arc;
        use tower::ServiceExt;
        use uuid::Uuid;

        async fn test_app() -> Router {
            let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(2)
                .connect(&url)
                .await
                .expect("database connection failed");

            let state = Arc::new(AppState::new(
                pool,
                AuthConfig::new("test-secret-key-for-auth-minimum-32-chars", 3600),
                None,
            ));
            auth_router().with_state(state)
        }

        async fn post_json(
            app: &Router,
            path: &str,
            body: serde_json::Value,
        ) -> (StatusCode, Bytes) {
            let request = Request::builder()
                .method(Method::POST)
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap();

            let response = app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, bytes)
        }

        #[tokio::test]
        #[ignore = "requires PostgreSQL (DATABASE_URL)"]
        async fn test_duplicate_registration_rejected() {
            let app = test_app().await;
            let username = format!("dup-{}", Uuid::new_v4());
            let body = json!({"username": username, "password": "secret123"});

            let (status, _) = post_json(&app, "/register", body.clone()).await;
            assert_eq!(status, StatusCode::CREATED);

            // 같은 이름의 두 번째 등록은 덮어쓰지 않고 409로 실패해야 한다
            let (status, bytes) = post_json(&app, "/register", body).await;
            assert_eq!(status, StatusCode::CONFLICT);

            let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(error["code"], "DUPLICATE_USERNAME");
        }

        #[tokio::test]
        #[ignore = "requires PostgreSQL (DATABASE_URL)"]
        async fn test_login_failure_paths_are_indistinguishable() {
            let app = test_app().await;
            let username = format!("known-{}", Uuid::new_v4());

            let (status, _) = post_json(
                &app,
                "/register",
                json!({"username": username, "password": "secret123"}),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);

            // 존재하는 사용자 + 잘못된 비밀번호
            let (status_wrong, body_wrong) = post_json(
                &app,
                "/login",
                json!({"username": username, "password": "wrongpass"}),
            )
            .await;

            // 존재하지 않는 사용자
            let (status_unknown, body_unknown) = post_json(
                &app,
                "/login",
                json!({"username": format!("ghost-{}", Uuid::new_v4()), "password": "secret123"}),
            )
            .await;

            // 두 실패 경로의 상태 코드와 본문이 바이트 단위로 동일해야 한다
            assert_eq!(status_wrong, StatusCode::BAD_REQUEST);
            assert_eq!(status_wrong, status_unknown);
            assert_eq!(body_wrong, body_unknown);
        }
    }
}
