//! 데이터베이스 repository 모듈.
//!
//! 영속성 계층은 런타임 `query_as`를 사용합니다. 컴파일 타임 매크로를
//! 쓰지 않으므로 실행 중인 데이터베이스 없이도 빌드됩니다.
//! 스키마는 `migrations/`에 있습니다.

mod accounts;
mod food_entries;
mod goals;

pub use accounts::{AccountRecord, AccountRepository, InsertAccountError};
pub use food_entries::{ConsumedTotals, FoodEntryRepository};
pub use goals::{GoalsRecord, GoalsRepository};
