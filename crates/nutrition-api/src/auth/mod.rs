//! 인증.
//!
//! 토큰 기반 인증의 전체 흐름을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: 토큰 페이로드 구조체 (subject / 발급 / 만료)
//! - [`AuthenticatedUser`]: 보호된 라우트용 인증 추출기
//! - [`hash_password`] / [`verify_password`]: Argon2id 비밀번호 처리
//! - 토큰 발급/검증 함수
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 보호된 라우트에서 AuthenticatedUser 추출기 사용
//! async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user.account_id)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{decode_token, issue_token, Claims, TokenError};
pub use middleware::{AuthConfig, AuthError, AuthenticatedUser};
pub use password::{hash_password, verify_password, PasswordError, DUMMY_HASH};
