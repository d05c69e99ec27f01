//! 핵심 도메인 모델.
//!
//! 계정, 영양 목표, 음식 기록 등 서비스 전반에서 공유되는 타입을 정의합니다.
//! 데이터베이스 레코드 타입은 API 크레이트의 repository 모듈에 있으며,
//! 이 모듈의 타입은 외부로 노출 가능한 형태만 담습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 계정의 공개 프로젝션.
///
/// 비밀번호 해시는 포함하지 않습니다. 해시는 repository 레코드에만 존재하며
/// 어떤 응답에도 직렬화되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Account {
    /// 시스템이 부여한 불투명 식별자
    pub id: Uuid,
    /// 사용자 이름 (생성 후 불변, 전역 유일)
    pub username: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

/// 일일 영양 목표.
///
/// 칼로리는 kcal, 나머지는 그램 단위입니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MacroGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroGoals {
    /// 모든 값이 0인 목표.
    pub fn zero() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }

    /// 모든 값이 음수가 아닌지 확인합니다.
    pub fn is_valid(&self) -> bool {
        self.calories >= 0.0 && self.protein >= 0.0 && self.carbs >= 0.0 && self.fats >= 0.0
    }
}

/// 음식 섭취 기록.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct FoodEntry {
    pub id: Uuid,
    /// 기록 소유 계정
    pub account_id: Uuid,
    /// 음식 이름
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    /// 기록 시각 (기본값: 현재 시각)
    pub logged_at: DateTime<Utc>,
}

/// 새 음식 기록 입력.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NewFoodEntry {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_goals_validity() {
        let goals = MacroGoals {
            calories: 2000.0,
            protein: 150.0,
            carbs: 200.0,
            fats: 70.0,
        };
        assert!(goals.is_valid());

        let negative = MacroGoals {
            calories: -1.0,
            ..goals
        };
        assert!(!negative.is_valid());

        assert!(MacroGoals::zero().is_valid());
    }

    #[test]
    fn test_account_serialization_has_no_password_field() {
        let account = Account {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(!json.contains("password"));
    }
}
