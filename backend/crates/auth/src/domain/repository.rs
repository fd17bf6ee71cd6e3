//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::admin_account::AdminAccount;
use crate::error::AuthResult;
use kernel::id::AdminId;

/// Admin account repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Create a new admin account
    async fn create(&self, account: &AdminAccount) -> AuthResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>>;

    /// Find account by username (exact match)
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<AdminAccount>>;

    /// Find account by email (stored lowercase)
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<AdminAccount>>;

    /// Find account by the digest of a presented reset token
    async fn find_by_reset_token_hash(&self, token_hash: &str)
    -> AuthResult<Option<AdminAccount>>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool>;

    /// Check if an email is registered
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;

    /// Update an account (all mutable fields)
    async fn update(&self, account: &AdminAccount) -> AuthResult<()>;
}
