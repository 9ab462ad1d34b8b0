//! Borrowing repository for the borrowing lifecycle and inventory bookkeeping.
//!
//! Borrow and return both mutate a book's inventory together with the
//! borrowing ledger, so each runs as a single database transaction that
//! locks the rows it mutates. Conflicting operations on the same book
//! serialize on its row lock; the loser of a race over the last copy sees
//! the same unavailable error it would have seen sequentially.
//!
//! Lock order is borrowing row first, then book row. Create takes only the
//! book lock, so the two operations cannot deadlock each other.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use shelfmark_core::circulation::{DateRuleViolation, validate_borrowing_dates};
use shelfmark_core::clock::Clock;
use shelfmark_core::policy::BorrowingScope;

use crate::entities::{books, borrowings, users};

/// Error types for borrowing operations.
#[derive(Debug, thiserror::Error)]
pub enum BorrowingError {
    /// Referenced book not found.
    #[error("Book not found: {0}")]
    BookNotFound(Uuid),

    /// Book has no copies left to borrow.
    #[error("This book is not available - inventory is 0.")]
    BookNotAvailable {
        /// Title of the unavailable book.
        title: String,
    },

    /// Date ordering rules were violated.
    #[error("Borrowing dates failed validation")]
    InvalidDates(Vec<DateRuleViolation>),

    /// Borrowing not found, or not visible to the caller.
    #[error("Borrowing not found: {0}")]
    NotFound(Uuid),

    /// Borrowing was already returned; a return happens exactly once.
    #[error("'{title}' was already returned on {returned_on}")]
    AlreadyReturned {
        /// Title of the borrowed book.
        title: String,
        /// Date the borrowing was first returned.
        returned_on: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a borrowing.
///
/// The borrow date is not an input: it is stamped from the repository's
/// clock at creation time.
#[derive(Debug, Clone)]
pub struct CreateBorrowingInput {
    /// Borrowing user (the caller).
    pub user_id: Uuid,
    /// Book to borrow.
    pub book_id: Uuid,
    /// Date the caller promises to return the book.
    pub expected_return_date: NaiveDate,
}

/// Filter options for listing borrowings.
#[derive(Debug, Clone, Default)]
pub struct BorrowingFilter {
    /// Activity filter: `Some(true)` keeps only active borrowings,
    /// `Some(false)` only returned ones, `None` keeps both.
    pub is_active: Option<bool>,
}

/// Borrowing with display keys for list rendering.
#[derive(Debug, Clone)]
pub struct BorrowingSummary {
    /// The borrowing record.
    pub borrowing: borrowings::Model,
    /// Title of the borrowed book.
    pub book_title: String,
    /// Email of the borrowing user.
    pub user_email: String,
}

/// Borrowing with the full book record for detail rendering.
#[derive(Debug, Clone)]
pub struct BorrowingDetail {
    /// The borrowing record.
    pub borrowing: borrowings::Model,
    /// The borrowed book.
    pub book: books::Model,
    /// Email of the borrowing user.
    pub user_email: String,
}

/// Borrowing repository handling the borrow/return lifecycle.
#[derive(Debug, Clone)]
pub struct BorrowingRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl BorrowingRepository {
    /// Creates a new borrowing repository.
    ///
    /// The clock supplies the current date for borrow and return stamps.
    #[must_use]
    pub const fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Borrows a book: decrements its inventory and records the borrowing.
    ///
    /// The borrow date is the clock's current date. The inventory check,
    /// decrement, and insert run in one transaction holding the book's row
    /// lock, so two concurrent borrows of the last copy cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The expected return date precedes the borrow date
    /// - The book does not exist
    /// - The book's inventory is 0
    pub async fn create_borrowing(
        &self,
        input: CreateBorrowingInput,
    ) -> Result<borrowings::Model, BorrowingError> {
        let borrow_date = self.clock.today();

        // Reject bad dates before touching the store
        if let Err(violations) =
            validate_borrowing_dates(borrow_date, Some(input.expected_return_date), None)
        {
            return Err(BorrowingError::InvalidDates(violations));
        }

        let txn = self.db.begin().await?;

        let book = books::Entity::find_by_id(input.book_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(BorrowingError::BookNotFound(input.book_id))?;

        if book.inventory < 1 {
            // Dropping the transaction rolls it back
            return Err(BorrowingError::BookNotAvailable { title: book.title });
        }

        let now = chrono::Utc::now().into();

        let inventory = book.inventory;
        let mut book_active: books::ActiveModel = book.into();
        book_active.inventory = Set(inventory - 1);
        book_active.updated_at = Set(now);
        book_active.update(&txn).await?;

        let borrowing = borrowings::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            book_id: Set(input.book_id),
            borrow_date: Set(borrow_date),
            expected_return_date: Set(input.expected_return_date),
            actual_return_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let borrowing = borrowing.insert(&txn).await?;

        txn.commit().await?;

        Ok(borrowing)
    }

    /// Returns a borrowed book: stamps the actual return date and increments
    /// the book's inventory.
    ///
    /// The return date is always the clock's current date. The borrowing and
    /// book rows are locked for the duration of the transaction, so a second
    /// concurrent return observes the first one's stamp and fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The borrowing does not exist or the scope does not allow it
    /// - The borrowing was already returned
    /// - The clock's date precedes the borrow date
    pub async fn return_borrowing(
        &self,
        id: Uuid,
        scope: &BorrowingScope,
    ) -> Result<borrowings::Model, BorrowingError> {
        let txn = self.db.begin().await?;

        let mut query = borrowings::Entity::find_by_id(id);
        if let Some(user_id) = scope.user_filter() {
            query = query.filter(borrowings::Column::UserId.eq(user_id));
        }

        let borrowing = query
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(BorrowingError::NotFound(id))?;

        let book = books::Entity::find_by_id(borrowing.book_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(BorrowingError::BookNotFound(borrowing.book_id))?;

        if let Some(returned_on) = borrowing.actual_return_date {
            return Err(BorrowingError::AlreadyReturned {
                title: book.title,
                returned_on,
            });
        }

        let today = self.clock.today();
        if let Err(violations) = validate_borrowing_dates(borrowing.borrow_date, None, Some(today))
        {
            return Err(BorrowingError::InvalidDates(violations));
        }

        let now = chrono::Utc::now().into();

        let inventory = book.inventory;
        let mut book_active: books::ActiveModel = book.into();
        book_active.inventory = Set(inventory + 1);
        book_active.updated_at = Set(now);
        book_active.update(&txn).await?;

        let mut active: borrowings::ActiveModel = borrowing.into();
        active.actual_return_date = Set(Some(today));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        Ok(updated)
    }

    /// Lists borrowings visible in the scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_borrowings(
        &self,
        scope: &BorrowingScope,
        filter: BorrowingFilter,
    ) -> Result<Vec<BorrowingSummary>, BorrowingError> {
        #[derive(Debug, FromQueryResult)]
        struct BorrowingRow {
            id: Uuid,
            user_id: Uuid,
            book_id: Uuid,
            borrow_date: NaiveDate,
            expected_return_date: NaiveDate,
            actual_return_date: Option<NaiveDate>,
            created_at: chrono::DateTime<chrono::FixedOffset>,
            updated_at: chrono::DateTime<chrono::FixedOffset>,
            book_title: String,
            user_email: String,
        }

        let mut query = borrowings::Entity::find()
            .join(JoinType::InnerJoin, borrowings::Relation::Books.def())
            .join(JoinType::InnerJoin, borrowings::Relation::Users.def())
            .column_as(books::Column::Title, "book_title")
            .column_as(users::Column::Email, "user_email");

        if let Some(user_id) = scope.user_filter() {
            query = query.filter(borrowings::Column::UserId.eq(user_id));
        }

        if let Some(is_active) = filter.is_active {
            if is_active {
                query = query.filter(borrowings::Column::ActualReturnDate.is_null());
            } else {
                query = query.filter(borrowings::Column::ActualReturnDate.is_not_null());
            }
        }

        let rows: Vec<BorrowingRow> = query
            .order_by_desc(borrowings::Column::BorrowDate)
            .order_by_desc(borrowings::Column::CreatedAt)
            .into_model::<BorrowingRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| BorrowingSummary {
                borrowing: borrowings::Model {
                    id: row.id,
                    user_id: row.user_id,
                    book_id: row.book_id,
                    borrow_date: row.borrow_date,
                    expected_return_date: row.expected_return_date,
                    actual_return_date: row.actual_return_date,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                book_title: row.book_title,
                user_email: row.user_email,
            })
            .collect())
    }

    /// Finds a borrowing by ID within the scope, with its full book record.
    ///
    /// Returns `None` when the borrowing does not exist or belongs to a user
    /// outside the scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_borrowing(
        &self,
        id: Uuid,
        scope: &BorrowingScope,
    ) -> Result<Option<BorrowingDetail>, BorrowingError> {
        let mut query = borrowings::Entity::find_by_id(id);
        if let Some(user_id) = scope.user_filter() {
            query = query.filter(borrowings::Column::UserId.eq(user_id));
        }

        let Some((borrowing, book)) = query.find_also_related(books::Entity).one(&self.db).await?
        else {
            return Ok(None);
        };

        let Some(book) = book else {
            return Ok(None);
        };

        let Some(user) = users::Entity::find_by_id(borrowing.user_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(BorrowingDetail {
            borrowing,
            book,
            user_email: user.email,
        }))
    }
}
