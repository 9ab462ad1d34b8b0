//! Caller capability checks and visibility scoping.
//!
//! Capability-based policy: a single `is_staff` flag grants catalog writes
//! and all-borrowings visibility. There is no role hierarchy.

use uuid::Uuid;

/// Whether the caller may create, update, or delete catalog records.
///
/// Catalog reads are open to everyone, including anonymous callers.
#[must_use]
pub const fn can_manage_catalog(is_staff: bool) -> bool {
    is_staff
}

/// The set of borrowings a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowingScope {
    /// Every record (staff without a user filter).
    All,
    /// Records owned by one user.
    User(Uuid),
}

impl BorrowingScope {
    /// Resolves the visibility scope for a caller.
    ///
    /// Staff see everything, optionally narrowed to one user. Non-staff are
    /// always pinned to their own records; a supplied `user_id` filter is
    /// ignored for them.
    #[must_use]
    pub fn for_caller(caller_id: Uuid, is_staff: bool, requested_user_id: Option<Uuid>) -> Self {
        if is_staff {
            match requested_user_id {
                Some(user_id) => Self::User(user_id),
                None => Self::All,
            }
        } else {
            Self::User(caller_id)
        }
    }

    /// Returns the user the scope is narrowed to, if any.
    #[must_use]
    pub const fn user_filter(self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::User(user_id) => Some(user_id),
        }
    }

    /// Whether a record owned by `owner_id` is visible in this scope.
    #[must_use]
    pub fn allows(self, owner_id: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::User(user_id) => user_id == owner_id,
        }
    }
}
