//! Book repository for catalog database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use shelfmark_core::catalog::{CatalogRuleViolation, validate_book_fields};

use crate::entities::{books, sea_orm_active_enums::CoverType};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// Title and author pair already exists.
    #[error("Book '{title}' by {author} already exists")]
    DuplicateTitleAuthor {
        /// Conflicting title.
        title: String,
        /// Conflicting author.
        author: String,
    },

    /// One or more catalog field rules were violated.
    #[error("Book fields failed validation")]
    Invalid(Vec<CatalogRuleViolation>),

    /// Book not found.
    #[error("Book not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a book.
#[derive(Debug, Clone)]
pub struct CreateBookInput {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Cover type.
    pub cover: CoverType,
    /// Copies available to borrow.
    pub inventory: i32,
    /// Fee charged per day on loan.
    pub daily_fee: Decimal,
}

/// Input for updating a book. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookInput {
    /// Book title.
    pub title: Option<String>,
    /// Book author.
    pub author: Option<String>,
    /// Cover type.
    pub cover: Option<CoverType>,
    /// Copies available to borrow.
    pub inventory: Option<i32>,
    /// Fee charged per day on loan.
    pub daily_fee: Option<Decimal>,
}

/// Book repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    db: DatabaseConnection,
}

impl BookRepository {
    /// Creates a new book repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new book with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field violates the catalog rules (blank/overlong title or author,
    ///   negative inventory, out-of-range daily fee)
    /// - A book with the same title and author already exists
    pub async fn create_book(&self, input: CreateBookInput) -> Result<books::Model, BookError> {
        if let Err(violations) =
            validate_book_fields(&input.title, &input.author, input.inventory, input.daily_fee)
        {
            return Err(BookError::Invalid(violations));
        }

        // Validate unique (title, author) pair
        let existing = books::Entity::find()
            .filter(books::Column::Title.eq(&input.title))
            .filter(books::Column::Author.eq(&input.author))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(BookError::DuplicateTitleAuthor {
                title: input.title,
                author: input.author,
            });
        }

        let now = chrono::Utc::now().into();
        let book = books::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            author: Set(input.author),
            cover: Set(input.cover),
            inventory: Set(input.inventory),
            daily_fee: Set(input.daily_fee),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let book = book.insert(&self.db).await?;
        Ok(book)
    }

    /// Lists all books ordered by title, then author.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_books(&self) -> Result<Vec<books::Model>, BookError> {
        let books = books::Entity::find()
            .order_by_asc(books::Column::Title)
            .order_by_asc(books::Column::Author)
            .all(&self.db)
            .await?;

        Ok(books)
    }

    /// Finds a book by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_book_by_id(&self, id: Uuid) -> Result<Option<books::Model>, BookError> {
        let book = books::Entity::find_by_id(id).one(&self.db).await?;
        Ok(book)
    }

    /// Updates a book with validation.
    ///
    /// The merged record (current values overlaid with the changes) must
    /// satisfy the same rules as a freshly created book.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Book not found
    /// - The merged fields violate the catalog rules
    /// - The new title and author pair collides with another book
    pub async fn update_book(
        &self,
        id: Uuid,
        input: UpdateBookInput,
    ) -> Result<books::Model, BookError> {
        let book = books::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BookError::NotFound(id))?;

        let title = input.title.as_deref().unwrap_or(&book.title);
        let author = input.author.as_deref().unwrap_or(&book.author);
        let inventory = input.inventory.unwrap_or(book.inventory);
        let daily_fee = input.daily_fee.unwrap_or(book.daily_fee);

        if let Err(violations) = validate_book_fields(title, author, inventory, daily_fee) {
            return Err(BookError::Invalid(violations));
        }

        // If the identifying pair changes, validate uniqueness
        if title != book.title || author != book.author {
            let existing = books::Entity::find()
                .filter(books::Column::Title.eq(title))
                .filter(books::Column::Author.eq(author))
                .filter(books::Column::Id.ne(id))
                .one(&self.db)
                .await?;

            if existing.is_some() {
                return Err(BookError::DuplicateTitleAuthor {
                    title: title.to_string(),
                    author: author.to_string(),
                });
            }
        }

        let now = chrono::Utc::now().into();
        let mut active: books::ActiveModel = book.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(author) = input.author {
            active.author = Set(author);
        }
        if let Some(cover) = input.cover {
            active.cover = Set(cover);
        }
        if let Some(inventory) = input.inventory {
            active.inventory = Set(inventory);
        }
        if let Some(daily_fee) = input.daily_fee {
            active.daily_fee = Set(daily_fee);
        }
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a book.
    ///
    /// Borrowings referencing the book are removed by the cascading
    /// foreign key.
    ///
    /// # Errors
    ///
    /// Returns an error if the book is not found or the delete fails.
    pub async fn delete_book(&self, id: Uuid) -> Result<(), BookError> {
        let result = books::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(BookError::NotFound(id));
        }

        Ok(())
    }

    /// Checks if a title and author pair is already cataloged.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn title_author_exists(&self, title: &str, author: &str) -> Result<bool, BookError> {
        let count = books::Entity::find()
            .filter(books::Column::Title.eq(title))
            .filter(books::Column::Author.eq(author))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = BookError::DuplicateTitleAuthor {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
        };
        assert!(err.to_string().contains("Dune"));
        assert!(err.to_string().contains("already exists"));

        let err = BookError::NotFound(Uuid::new_v4());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_error_carries_violations() {
        let violations = validate_book_fields("", "Frank Herbert", -1, dec!(5.00))
            .expect_err("blank title and negative inventory should be rejected");
        let err = BookError::Invalid(violations);

        match err {
            BookError::Invalid(v) => {
                assert_eq!(v.len(), 2);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_update_input_default_changes_nothing() {
        let input = UpdateBookInput::default();
        assert!(input.title.is_none());
        assert!(input.author.is_none());
        assert!(input.cover.is_none());
        assert!(input.inventory.is_none());
        assert!(input.daily_fee.is_none());
    }
}
