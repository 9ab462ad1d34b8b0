//! `SeaORM` entity definitions for the library schema.

pub mod sea_orm_active_enums;

pub mod books;
pub mod borrowings;
pub mod users;
