//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 요청 간 가변 공유 상태는 없습니다. 서명 비밀 키는 시작 시 로드된
//! 불변 값이고, 나머지는 연결 풀과 HTTP 클라이언트뿐입니다.

use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::services::RecipeClient;

/// 애플리케이션 공유 상태.
///
/// 이 구조체는 모든 API 핸들러에서 접근할 수 있는 공유 리소스를 포함합니다.
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: PgPool,

    /// 인증 설정 (서명 비밀 키, 토큰 유효 기간)
    pub auth: AuthConfig,

    /// 외부 레시피 API 클라이언트 (API 키 미설정 시 None)
    pub recipes: Option<RecipeClient>,

    /// 서버 시작 시각 (헬스 체크 업타임용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새 AppState 생성.
    pub fn new(db_pool: PgPool, auth: AuthConfig, recipes: Option<RecipeClient>) -> Self {
        Self {
            db_pool,
            auth,
            recipes,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 레시피 프록시가 설정되어 있는지 확인.
    pub fn has_recipe_client(&self) -> bool {
        self.recipes.is_some()
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

// 인증 추출기가 상태에서 비밀 키를 꺼낼 수 있도록 FromRef 제공
impl FromRef<Arc<AppState>> for AuthConfig {
    fn from_ref(state: &Arc<AppState>) -> AuthConfig {
        state.auth.clone()
    }
}

/// 테스트용 AppState 생성.
///
/// 연결을 지연(lazy)하는 풀을 사용하므로 실행 중인 데이터베이스가 없어도
/// 상태 구성과 라우터 조립을 테스트할 수 있습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> Arc<AppState> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy("postgres://localhost/nutrition_test")
        .expect("lazy pool construction should not fail");

    Arc::new(AppState::new(
        pool,
        AuthConfig::new("test-secret-key-for-state-minimum-32-chars", 3600),
        None,
    ))
}
