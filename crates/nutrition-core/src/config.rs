//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! 설정은 파일(`config` 크레이트) 또는 환경 변수에서 로드됩니다.
//! 데이터베이스 연결 문자열과 토큰 서명 비밀 키는 필수이며,
//! 누락 시 시작 단계에서 치명적 에러로 처리됩니다. 어떤 비밀 값도
//! 소스 코드에 기본값으로 존재하지 않습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NutritionError, NutritionResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthSettings,
    /// 외부 레시피 API 설정
    #[serde(default)]
    pub recipes: RecipeApiConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 문자열 (필수)
    pub url: String,
    /// 최대 연결 수
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}
fn default_connection_timeout() -> u64 {
    10
}

/// 인증 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// 토큰 서명 비밀 키 (필수, 기본값 없음)
    pub jwt_secret: String,
    /// 토큰 유효 기간 (초)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

fn default_token_ttl() -> i64 {
    3600
}

/// 외부 레시피 API 설정.
///
/// API 키가 없으면 레시피 프록시는 비활성화됩니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecipeApiConfig {
    /// Spoonacular API 키
    #[serde(default)]
    pub api_key: Option<String>,
    /// API 기본 URL
    #[serde(default = "default_recipe_base_url")]
    pub base_url: String,
    /// 요청당 레시피 수
    #[serde(default = "default_recipe_count")]
    pub count: u32,
}

fn default_recipe_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}
fn default_recipe_count() -> u32 {
    5
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 `NUTRITION__` 접두사와 `__` 구분자를 사용하여
    /// 파일 값을 오버라이드합니다 (예: `NUTRITION__AUTH__JWT_SECRET`).
    pub fn load<P: AsRef<Path>>(path: P) -> NutritionResult<Self> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")
            .map_err(|e| NutritionError::Config(e.to_string()))?
            .set_default("server.port", 5000)
            .map_err(|e| NutritionError::Config(e.to_string()))?
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("NUTRITION")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| NutritionError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 환경 변수만으로 설정을 로드합니다.
    ///
    /// # 환경변수
    ///
    /// - `DATABASE_URL`: PostgreSQL 연결 문자열 (필수)
    /// - `JWT_SECRET`: 토큰 서명 비밀 키 (필수)
    /// - `API_HOST` / `API_PORT`: 바인딩 주소 (기본값: 127.0.0.1:5000)
    /// - `TOKEN_TTL_SECS`: 토큰 유효 기간 (기본값: 3600)
    /// - `SPOONACULAR_API_KEY`: 레시피 API 키 (없으면 /recipes 비활성화)
    /// - `SPOONACULAR_BASE_URL`: 레시피 API 기본 URL
    /// - `RUST_LOG` / `LOG_FORMAT`: 로깅 레벨과 형식
    pub fn from_env() -> NutritionResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| NutritionError::Config("DATABASE_URL이 설정되지 않았습니다".to_string()))?;
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| NutritionError::Config("JWT_SECRET이 설정되지 않았습니다".to_string()))?;

        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);
        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_token_ttl);

        let config = Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections: default_max_connections(),
                connection_timeout_secs: default_connection_timeout(),
            },
            auth: AuthSettings {
                jwt_secret,
                token_ttl_secs,
            },
            recipes: RecipeApiConfig {
                api_key: std::env::var("SPOONACULAR_API_KEY").ok(),
                base_url: std::env::var("SPOONACULAR_BASE_URL")
                    .unwrap_or_else(|_| default_recipe_base_url()),
                count: default_recipe_count(),
            },
            logging: LoggingConfig {
                level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
                format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 필수 값 검증.
    ///
    /// 비어 있는 비밀 키나 연결 문자열은 시작 시 치명적입니다.
    pub fn validate(&self) -> NutritionResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(NutritionError::Config(
                "데이터베이스 연결 문자열이 비어 있습니다".to_string(),
            ));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(NutritionError::Config(
                "토큰 서명 비밀 키가 비어 있습니다".to_string(),
            ));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(NutritionError::Config(
                "토큰 유효 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/nutrition".to_string(),
                max_connections: default_max_connections(),
                connection_timeout_secs: default_connection_timeout(),
            },
            auth: AuthSettings {
                jwt_secret: "test-secret-key-minimum-32-characters".to_string(),
                token_ttl_secs: 3600,
            },
            recipes: RecipeApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        let mut config = valid_config();
        config.auth.jwt_secret = "".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_empty_database_url_is_fatal() {
        let mut config = valid_config();
        config.database.url = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = valid_config();
        config.auth.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 5000);
    }
}
