//! Error types for menu composition
//!
//! Lenient input handling (bad links, dangling attachment targets, hidden
//! pages) never produces an error. Errors come from two places only:
//! - a collaborator (page repository, access control, navigation feed,
//!   configuration store) failing, which is passed through unchanged
//! - strict identifier validation, when enabled

use crate::page::PageId;

/// Failure reported by an external collaborator
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// Page repository could not be read
    #[error("page repository failed: {0}")]
    Repository(String),

    /// Page lookup by id failed for a reason other than absence
    #[error("page {id} could not be loaded: {message}")]
    PageLookup {
        /// Requested page
        id: PageId,
        /// Failure description
        message: String,
    },

    /// Role or capability resolution failed
    #[error("access control failed: {0}")]
    AccessControl(String),

    /// Host navigation feed failed
    #[error("navigation feed failed: {0}")]
    Navigation(String),

    /// Configuration store failed
    #[error("configuration store failed: {0}")]
    Config(String),
}

impl CollaboratorError {
    /// Create repository error
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository(message.into())
    }

    /// Create page lookup error
    pub fn page_lookup(id: PageId, message: impl Into<String>) -> Self {
        Self::PageLookup {
            id,
            message: message.into(),
        }
    }

    /// Create access control error
    pub fn access_control(message: impl Into<String>) -> Self {
        Self::AccessControl(message.into())
    }

    /// Create navigation error
    pub fn navigation(message: impl Into<String>) -> Self {
        Self::Navigation(message.into())
    }

    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

}

/// Menu build error
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// A collaborator failed; the build is abandoned
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Strict mode found the same identifier on two nodes
    #[error("duplicate menu identifier: {identifier}")]
    DuplicateIdentifier {
        /// The shared identifier
        identifier: String,
    },
}

impl MenuError {
    /// Create duplicate identifier error
    pub fn duplicate_identifier(identifier: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Whether the error came from a collaborator rather than menu logic
    #[inline]
    #[must_use]
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Collaborator(_))
    }
}

/// Result type alias for menu operations
pub type MenuResult<T> = Result<T, MenuError>;
