use thiserror::Error;

/// Errors surfaced at the repository and use-case boundary.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisted state that cannot be decoded (bad decimal, uuid, timestamp).
    #[error("Invalid persisted data: {0}")]
    InvalidData(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn user_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "User",
            name: name.into(),
        }
    }

    pub fn account_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Account",
            name: name.into(),
        }
    }

    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Category",
            name: name.into(),
        }
    }

    pub fn transaction_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Transaction",
            name: name.into(),
        }
    }

    pub fn budget_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Budget",
            name: name.into(),
        }
    }

    pub fn goal_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Savings goal",
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
