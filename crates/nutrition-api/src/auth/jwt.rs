//! 토큰 발급 및 검증.
//!
//! 서명된 상태 비저장(stateless) 신원 토큰을 생성/검증합니다.
//! 토큰은 서버에 저장되지 않으며, 만료 시각이 지나면 암묵적으로 소멸합니다.
//! 폐기 목록은 없습니다. 발급 후 삭제된 계정의 토큰은 만료까지 구조적으로
//! 유효합니다 (알려진 제한).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 토큰 페이로드.
///
/// 계정 식별자와 발급/만료 시각만 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 계정 ID
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `account_id` - 계정 ID
    /// * `ttl_secs` - 유효 기간 (초)
    pub fn new(account_id: Uuid, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// subject를 계정 ID로 파싱합니다.
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }
}

/// 토큰 처리 에러.
///
/// 내부적으로는 원인을 구분하지만, 외부 응답에서는 게이트웨이가
/// 모든 변형을 단일 unauthorized 응답으로 평탄화합니다.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패")]
    Encoding,
    #[error("잘못된 토큰 형식")]
    Malformed,
    #[error("토큰 서명이 유효하지 않습니다")]
    InvalidSignature,
    #[error("토큰이 만료되었습니다")]
    Expired,
}

/// 토큰 발급.
///
/// # Arguments
///
/// * `claims` - 토큰 페이로드
/// * `secret` - 프로세스 전역 서명 비밀 키
///
/// # Returns
///
/// 인코딩된 HS256 JWT 문자열
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encoding)
}

/// 토큰 디코딩 및 검증.
///
/// 서명 유효성, 만료 여부, 페이로드 형식을 모두 확인합니다.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn test_issue_and_decode_token() {
        let account_id = Uuid::new_v4();
        let claims = Claims::new(account_id, 3600);

        let token = issue_token(&claims, TEST_SECRET).unwrap();
        assert!(!token.is_empty());

        let decoded = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded.claims.sub, account_id.to_string());
        assert_eq!(decoded.claims.account_id().unwrap(), account_id);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        // 발급 시각과 만료 시각 모두 과거 (검증기의 기본 leeway보다 큼)
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        assert!(claims.is_expired());

        let token = issue_token(&claims, TEST_SECRET).unwrap();
        let err = decode_token(&token, TEST_SECRET).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let claims = Claims::new(Uuid::new_v4(), 3600);
        let token = issue_token(&claims, TEST_SECRET).unwrap();

        // 서명 세그먼트의 마지막 문자 한 개 변조
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        let err = decode_token(&tampered, TEST_SECRET).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(Uuid::new_v4(), 3600);
        let token = issue_token(&claims, TEST_SECRET).unwrap();

        let err = decode_token(&token, "wrong-secret-key-for-testing-minimum-32ch").unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let err = decode_token("not.a.token", TEST_SECRET).unwrap_err();
        assert_eq!(err, TokenError::Malformed);
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        assert_eq!(claims.account_id().unwrap_err(), TokenError::Malformed);
    }
}
