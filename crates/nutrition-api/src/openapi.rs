//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 자동 생성 구조
//!
//! 각 라우트 모듈은 자체 스키마를 정의하고, 중앙 `ApiDoc`에서 집계합니다.
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

// ==================== 각 모듈에서 스키마 Import ====================

use crate::error::ApiErrorResponse;
use crate::routes::{
    ComponentHealth, ComponentStatus, ConsumedSummary, GoalsResponse, LivenessResponse,
    LogFoodRequest, LogFoodResponse, LoginRequest, LoginResponse, ProgressResponse,
    ReadinessResponse, RegisterRequest, RegisterResponse, SetGoalsRequest,
};
use crate::services::Recipe;
use nutrition_core::{Account, FoodEntry, MacroGoals};

// ==================== OpenAPI 문서 정의 ====================

/// Nutrition API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrition Tracker API",
        version = "0.1.0",
        description = r#"
# 영양 추적 REST API

계정 기반 영양 목표 관리와 음식 기록을 위한 REST API입니다.

## 주요 기능

- **계정**: 등록 및 로그인 (JWT 발급)
- **목표**: 일일 칼로리/매크로 목표 설정 및 조회
- **기록**: 음식 섭취 기록과 진행 상황 요약
- **레시피**: 외부 레시피 API 프록시 (랜덤 추천)

## 인증

`/goals`, `/log`, `/progress` 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "계정 - 등록 및 로그인"),
        (name = "goals", description = "목표 - 영양 목표 설정/조회"),
        (name = "food-log", description = "기록 - 음식 기록 및 진행 상황"),
        (name = "recipes", description = "레시피 - 외부 레시피 추천")
    ),
    modifiers(&SecurityAddon),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Common =====
            ApiErrorResponse,

            // ===== Health =====
            LivenessResponse,
            ReadinessResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Auth =====
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            Account,

            // ===== Goals =====
            SetGoalsRequest,
            GoalsResponse,
            MacroGoals,

            // ===== Food Log =====
            LogFoodRequest,
            LogFoodResponse,
            ConsumedSummary,
            ProgressResponse,
            FoodEntry,

            // ===== Recipes =====
            Recipe,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,

        // ===== Goals =====
        crate::routes::goals::set_goals,
        crate::routes::goals::get_goals,

        // ===== Food Log =====
        crate::routes::food_log::log_food,
        crate::routes::food_log::get_progress,

        // ===== Recipes =====
        crate::routes::recipes::get_recipes,
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        // 기본 정보 확인
        assert!(json.contains("Nutrition Tracker API"));

        // 태그 확인
        assert!(json.contains("health"));
        assert!(json.contains("auth"));
        assert!(json.contains("goals"));
        assert!(json.contains("recipes"));

        // 경로 확인
        assert!(json.contains("/health"));
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/register"));
        assert!(json.contains("/login"));
        assert!(json.contains("/goals"));
        assert!(json.contains("/log"));
        assert!(json.contains("/progress"));
        assert!(json.contains("/recipes"));
    }

    #[test]
    fn test_every_registered_tag_has_paths() {
        let spec = ApiDoc::openapi();

        // 선언된 태그마다 해당 태그를 쓰는 경로가 적어도 하나 있어야 함
        let tags: Vec<String> = spec
            .tags
            .iter()
            .flatten()
            .map(|t| t.name.clone())
            .collect();
        assert!(!tags.is_empty());

        let json = serde_json::to_value(&spec).unwrap();
        let paths = json["paths"].as_object().unwrap();
        for tag in tags {
            let used = paths.values().any(|item| {
                item.as_object().into_iter().flatten().any(|(_, op)| {
                    op["tags"]
                        .as_array()
                        .map(|t| t.iter().any(|v| v == tag.as_str()))
                        .unwrap_or(false)
                })
            });
            assert!(used, "tag without endpoints: {}", tag);
        }
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("ApiErrorResponse"));
        assert!(json.contains("RegisterRequest"));
        assert!(json.contains("MacroGoals"));
        assert!(json.contains("FoodEntry"));
        assert!(json.contains("Recipe"));
        assert!(json.contains("bearer_auth"));
    }
}
