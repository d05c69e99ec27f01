//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
}

/// 열거 공격 방어용 더미 해시.
///
/// 존재하지 않는 사용자로 로그인을 시도해도 실제 검증과 같은 비용의
/// 검증을 수행하여 응답 시간으로 계정 존재 여부가 드러나지 않게 합니다.
/// 어떤 입력과도 일치하지 않는 형식상 유효한 Argon2id PHC 해시입니다.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하여 비밀번호를 해싱합니다.
/// 솔트는 자동으로 생성되므로 같은 평문이라도 호출마다 다른 해시가 나옵니다.
///
/// # Arguments
///
/// * `password` - 해싱할 평문 비밀번호
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 비교합니다. 비교는 argon2 내부에서
/// 상수 시간으로 수행됩니다. 불일치는 정상적인 부정 결과이며 예외가 아닙니다.
///
/// # Arguments
///
/// * `password` - 검증할 평문 비밀번호
/// * `hash` - 저장된 PHC 형식 해시
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "secret123";
        let hash = hash_password(password).unwrap();

        // 해시 형식 확인 (argon2id)
        assert!(hash.starts_with("$argon2id$"));

        // 올바른 비밀번호 검증
        assert!(verify_password(password, &hash).is_ok());

        // 잘못된 비밀번호 검증
        assert!(verify_password("wrongpass", &hash).is_err());
    }

    #[test]
    fn test_different_salts_different_hashes() {
        let hash1 = hash_password("secret123").unwrap();
        let hash2 = hash_password("secret123").unwrap();

        // 같은 비밀번호라도 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);

        // 하지만 둘 다 원본 평문으로 검증 가능
        assert!(verify_password("secret123", &hash1).is_ok());
        assert!(verify_password("secret123", &hash2).is_ok());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("anything", "not-a-phc-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        // 더미 해시는 파싱 가능해야 하며, 어떤 실제 비밀번호와도 일치하지 않아야 함
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(verify_password("secret123", DUMMY_HASH).is_err());
    }
}
