//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod book;
pub mod borrowing;
pub mod user;

pub use book::{BookError, BookRepository, CreateBookInput, UpdateBookInput};
pub use borrowing::{
    BorrowingDetail, BorrowingError, BorrowingFilter, BorrowingRepository, BorrowingSummary,
    CreateBorrowingInput,
};
pub use user::{UpdateUserInput, UserRepository};
