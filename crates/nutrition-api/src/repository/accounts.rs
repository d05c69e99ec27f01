//! Account Repository
//!
//! 계정 관련 데이터베이스 연산을 담당합니다.
//!
//! 사용자 이름 유일성은 애플리케이션이 아니라 데이터베이스의 UNIQUE
//! 제약이 중재합니다. 같은 이름으로 동시에 등록을 시도하면 정확히
//! 하나만 성공하고 나머지는 unique violation을 받습니다.

use chrono::{DateTime, Utc};
use nutrition_core::Account;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 계정 레코드.
///
/// 비밀번호 해시를 포함하므로 절대 직렬화하지 않습니다.
/// 외부 응답에는 [`AccountRecord::to_public`] 프로젝션만 사용합니다.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    /// 해시를 제외한 공개 프로젝션으로 변환합니다.
    pub fn to_public(&self) -> Account {
        Account {
            id: self.id,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// 계정 생성 에러.
#[derive(Debug, thiserror::Error)]
pub enum InsertAccountError {
    /// 이미 존재하는 사용자 이름 (UNIQUE 제약 위반)
    #[error("이미 존재하는 사용자 이름")]
    Duplicate,
    /// 기타 데이터베이스 에러
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Account Repository
pub struct AccountRepository;

impl AccountRepository {
    /// 새 계정 생성.
    ///
    /// 중복 사용자 이름은 UNIQUE 제약 위반으로 감지되며, 기존 레코드를
    /// 덮어쓰는 일은 없습니다.
    pub async fn insert_account(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<AccountRecord, InsertAccountError> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return InsertAccountError::Duplicate;
                }
            }
            InsertAccountError::Database(e)
        })?;

        Ok(record)
    }

    /// 사용자 이름으로 계정 조회.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            "SELECT id, username, password_hash, created_at FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// ID로 계정 조회.
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            "SELECT id, username, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
