//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical cover of a book.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cover_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverType {
    #[sea_orm(string_value = "HARD")]
    Hard,
    #[sea_orm(string_value = "SOFT")]
    Soft,
}
