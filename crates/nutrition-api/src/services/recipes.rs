//! 외부 레시피 제안 서비스.
//!
//! Spoonacular API를 통해 무작위 레시피 제안을 가져옵니다.
//! 단일 네트워크 호출이며 내부 재시도나 백프레셔 로직은 없습니다.
//! 실패는 호출자에게 [`RecipeError`]로 전달됩니다.

use nutrition_core::RecipeApiConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// 레시피 조회 에러.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    /// 업스트림 호출 실패 (네트워크/타임아웃)
    #[error("레시피 API 호출 실패: {0}")]
    Request(String),
    /// 업스트림이 비정상 상태 코드를 반환
    #[error("레시피 API 응답 에러: HTTP {0}")]
    Status(u16),
    /// 응답 본문 파싱 실패
    #[error("레시피 API 응답 파싱 실패")]
    Decode,
}

/// 레시피 객체.
///
/// 업스트림 응답을 그대로 통과시키되, 필드 누락에 관대한 형태로 모델링합니다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Spoonacular 무작위 레시피 응답 래퍼.
#[derive(Debug, Deserialize)]
struct RandomRecipesResponse {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// 레시피 API 클라이언트.
///
/// API 키는 설정에서만 주입됩니다. 키가 없으면 클라이언트 자체가
/// 생성되지 않으며 `/recipes` 라우트는 비활성 응답을 반환합니다.
#[derive(Clone)]
pub struct RecipeClient {
    base_url: String,
    api_key: String,
    count: u32,
    client: reqwest::Client,
}

impl RecipeClient {
    /// 새 레시피 클라이언트를 생성합니다.
    ///
    /// 설정에 API 키가 없으면 None을 반환합니다.
    pub fn from_config(config: &RecipeApiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        if api_key.trim().is_empty() {
            return None;
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .ok()?;

        Some(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            count: config.count,
            client,
        })
    }

    /// 무작위 레시피 제안을 가져옵니다.
    pub async fn random_recipes(&self) -> Result<Vec<Recipe>, RecipeError> {
        let url = format!("{}/recipes/random", self.base_url);

        debug!(url = %url, count = self.count, "Fetching recipe suggestions");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("number", self.count.to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Recipe API request failed");
                RecipeError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Recipe API returned error status");
            return Err(RecipeError::Status(status.as_u16()));
        }

        let body: RandomRecipesResponse =
            response.json().await.map_err(|_| RecipeError::Decode)?;

        Ok(body.recipes)
    }
}
