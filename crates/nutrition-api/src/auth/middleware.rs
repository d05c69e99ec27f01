//! 인증 게이트웨이.
//!
//! 보호된 라우트 앞에서 토큰을 추출/검증하고 인증된 신원을 핸들러에
//! 주입하는 axum 추출기입니다. 검증 실패 시 다운스트림 핸들러는
//! 호출되지 않습니다.
//!
//! 서명 비밀 키는 `FromRef`를 통해 애플리케이션 상태에서 주입됩니다.
//! 환경 변수 폴백 같은 암묵적 전역 상태는 사용하지 않습니다.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use super::{decode_token, Claims, TokenError};

/// 인증 설정.
///
/// 시작 시 로드된 불변 서명 비밀 키와 토큰 유효 기간을 담습니다.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs,
        }
    }
}

/// 인증된 사용자.
///
/// 보호된 핸들러에서 추출기로 사용합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("account: {}", user.account_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 토큰 subject에서 해석된 계정 ID
    pub account_id: Uuid,
    /// 검증된 토큰 페이로드
    pub claims: Claims,
}

/// 인증 실패 에러.
///
/// 내부적으로는 원인을 구분하지만 (테스트 가능성), 외부 응답은
/// 모든 변형이 동일한 401 본문으로 평탄화됩니다. 실패 원인이
/// 자격증명 추측에 도움이 되지 않도록 하기 위함입니다.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("인증 토큰이 없습니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    MalformedHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("토큰 서명이 유효하지 않습니다")]
    InvalidSignature,
    #[error("잘못된 토큰")]
    Malformed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // 변형과 무관하게 단일한 응답. 원인은 로그에만 남김.
        tracing::debug!(reason = %self, "Request rejected by auth gateway");

        let body = Json(json!({
            "error": {
                "code": "UNAUTHORIZED",
                "message": "Unauthorized"
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AuthConfig: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        // Bearer 토큰 형식 확인
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MalformedHeader)?;

        // 상태에서 주입된 비밀 키로 검증
        let config = AuthConfig::from_ref(state);
        let token_data = decode_token(token, &config.jwt_secret)?;

        let account_id = token_data.claims.account_id()?;

        Ok(AuthenticatedUser {
            account_id,
            claims: token_data.claims,
        })
    }
}
