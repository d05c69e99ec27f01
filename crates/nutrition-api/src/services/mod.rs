//! 외부 서비스 연동 모듈.

mod recipes;

pub use recipes::{Recipe, RecipeClient, RecipeError};
