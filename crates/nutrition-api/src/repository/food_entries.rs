//! Food Entry Repository
//!
//! 음식 기록의 데이터베이스 연산을 담당합니다.

use nutrition_core::{FoodEntry, NewFoodEntry};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 섭취 합계.
///
/// `/progress` 응답의 요약 계산에 사용됩니다.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ConsumedTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Food Entry Repository
pub struct FoodEntryRepository;

impl FoodEntryRepository {
    /// 음식 기록 추가.
    pub async fn insert_entry(
        pool: &PgPool,
        account_id: Uuid,
        entry: &NewFoodEntry,
    ) -> Result<FoodEntry, sqlx::Error> {
        sqlx::query_as::<_, FoodEntry>(
            r#"
            INSERT INTO food_entries (account_id, name, calories, protein, carbs, fats)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, account_id, name, calories, protein, carbs, fats, logged_at
            "#,
        )
        .bind(account_id)
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fats)
        .fetch_one(pool)
        .await
    }

    /// 계정의 모든 기록 조회 (최신순).
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Vec<FoodEntry>, sqlx::Error> {
        sqlx::query_as::<_, FoodEntry>(
            r#"
            SELECT id, account_id, name, calories, protein, carbs, fats, logged_at
            FROM food_entries
            WHERE account_id = $1
            ORDER BY logged_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }

    /// 계정의 섭취 합계 조회.
    pub async fn totals_for_account(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<ConsumedTotals, sqlx::Error> {
        sqlx::query_as::<_, ConsumedTotals>(
            r#"
            SELECT
                COALESCE(SUM(calories), 0)::double precision AS calories,
                COALESCE(SUM(protein), 0)::double precision AS protein,
                COALESCE(SUM(carbs), 0)::double precision AS carbs,
                COALESCE(SUM(fats), 0)::double precision AS fats
            FROM food_entries
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_one(pool)
        .await
    }
}
