//! 영양 추적 시스템의 에러 타입.
//!
//! 이 모듈은 서비스 전반에서 사용되는 에러 타입을 정의합니다.
//! 내부적으로는 원인별 변형을 유지하고, 외부 응답으로의 평탄화는
//! API 경계(`IntoResponse`)에서만 수행됩니다.

use thiserror::Error;

/// 핵심 서비스 에러.
#[derive(Debug, Error)]
pub enum NutritionError {
    /// 설정 에러 (필수 환경변수 누락 등, 시작 시 치명적)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 이미 존재하는 사용자 이름
    #[error("이미 존재하는 사용자 이름: {0}")]
    DuplicateUsername(String),

    /// 로그인 실패 (존재하지 않는 사용자와 비밀번호 불일치를 구분하지 않음)
    #[error("잘못된 자격증명")]
    InvalidCredentials,

    /// 인증 에러 (토큰 누락/형식 오류/서명 불일치/만료)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 외부 레시피 API 에러
    #[error("업스트림 에러: {0}")]
    Upstream(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Persistence(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type NutritionResult<T> = Result<T, NutritionError>;

impl NutritionError {
    /// 호출자 잘못으로 분류되는 에러인지 확인합니다 (4xx 계열).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NutritionError::Validation(_)
                | NutritionError::DuplicateUsername(_)
                | NutritionError::InvalidCredentials
                | NutritionError::Auth(_)
        )
    }

    /// 프로세스를 종료해야 하는 에러인지 확인합니다.
    ///
    /// 시작 설정 누락만 치명적이며, 런타임 에러는 요청 단위로 처리됩니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NutritionError::Config(_))
    }
}

impl From<serde_json::Error> for NutritionError {
    fn from(err: serde_json::Error) -> Self {
        NutritionError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(NutritionError::InvalidCredentials.is_client_error());
        assert!(NutritionError::DuplicateUsername("alice".to_string()).is_client_error());
        assert!(NutritionError::Auth("expired".to_string()).is_client_error());

        assert!(!NutritionError::Persistence("connection refused".to_string()).is_client_error());
        assert!(!NutritionError::Upstream("timeout".to_string()).is_client_error());
    }

    #[test]
    fn test_only_config_is_fatal() {
        assert!(NutritionError::Config("JWT_SECRET not set".to_string()).is_fatal());

        assert!(!NutritionError::Persistence("down".to_string()).is_fatal());
        assert!(!NutritionError::Upstream("down".to_string()).is_fatal());
        assert!(!NutritionError::InvalidCredentials.is_fatal());
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        // 존재하지 않는 사용자와 비밀번호 불일치가 같은 메시지를 공유해야 함
        let err = NutritionError::InvalidCredentials;
        assert_eq!(err.to_string(), "잘못된 자격증명");
    }
}
