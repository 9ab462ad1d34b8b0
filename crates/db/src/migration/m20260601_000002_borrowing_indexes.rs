//! Partial indexes for borrowing list filters.
//!
//! The borrowing list is most often queried for a user's active loans, so
//! index the active subset directly.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACTIVE_INDEXES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP INDEX IF EXISTS idx_borrowings_user_active; \
             DROP INDEX IF EXISTS idx_borrowings_book_active;",
        )
        .await?;
        Ok(())
    }
}

const ACTIVE_INDEXES_SQL: &str = r"
-- Index for a user's active borrowings (is_active=true listing)
CREATE INDEX idx_borrowings_user_active ON borrowings(user_id, borrow_date DESC)
    WHERE actual_return_date IS NULL;

-- Index for active borrowings of a book (outstanding copies)
CREATE INDEX idx_borrowings_book_active ON borrowings(book_id)
    WHERE actual_return_date IS NULL;
";
