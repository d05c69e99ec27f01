//! Goals Repository
//!
//! 계정별 영양 목표의 데이터베이스 연산을 담당합니다.
//!
//! 목표는 계정과 분리된 `account_goals` 테이블에 저장됩니다.
//! 계정당 하나의 행만 존재하며, 설정은 upsert로 처리됩니다.

use chrono::{DateTime, Utc};
use nutrition_core::MacroGoals;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 영양 목표 레코드.
#[derive(Debug, Clone, FromRow)]
pub struct GoalsRecord {
    pub account_id: Uuid,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub updated_at: DateTime<Utc>,
}

impl GoalsRecord {
    /// 도메인 타입으로 변환합니다.
    pub fn macros(&self) -> MacroGoals {
        MacroGoals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

/// Goals Repository
pub struct GoalsRepository;

impl GoalsRepository {
    /// 목표 설정 (upsert).
    pub async fn upsert_goals(
        pool: &PgPool,
        account_id: Uuid,
        goals: MacroGoals,
    ) -> Result<GoalsRecord, sqlx::Error> {
        sqlx::query_as::<_, GoalsRecord>(
            r#"
            INSERT INTO account_goals (account_id, calories, protein, carbs, fats)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_id) DO UPDATE
            SET calories = EXCLUDED.calories,
                protein = EXCLUDED.protein,
                carbs = EXCLUDED.carbs,
                fats = EXCLUDED.fats,
                updated_at = NOW()
            RETURNING account_id, calories, protein, carbs, fats, updated_at
            "#,
        )
        .bind(account_id)
        .bind(goals.calories)
        .bind(goals.protein)
        .bind(goals.carbs)
        .bind(goals.fats)
        .fetch_one(pool)
        .await
    }

    /// 현재 목표 조회.
    pub async fn get_goals(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Option<GoalsRecord>, sqlx::Error> {
        sqlx::query_as::<_, GoalsRecord>(
            r#"
            SELECT account_id, calories, protein, carbs, fats, updated_at
            FROM account_goals
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_to_macros() {
        let record = GoalsRecord {
            account_id: Uuid::new_v4(),
            calories: 2000.0,
            protein: 150.0,
            carbs: 200.0,
            fats: 70.0,
            updated_at: Utc::now(),
        };

        let macros = record.macros();
        assert_eq!(macros.calories, 2000.0);
        assert_eq!(macros.protein, 150.0);
        assert!(macros.is_valid());
    }
}
