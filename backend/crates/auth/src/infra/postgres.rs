//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AdminId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, email::Email, reset_token::ResetToken};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed admin repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        username,
        email,
        password_hash,
        reset_token_hash,
        reset_token_expires_at,
        last_login_at,
        created_at,
        updated_at
    FROM admin_accounts
"#;

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_account(self) -> AuthResult<AdminAccount> {
        let reset_token = match (self.reset_token_hash, self.reset_token_expires_at) {
            (Some(hash), Some(expires_at)) => Some(ResetToken::from_parts(hash, expires_at)),
            _ => None,
        };

        Ok(AdminAccount {
            admin_id: AdminId::from_string(self.id),
            username: AdminName::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(format!("Stored hash unreadable: {e}")))?,
            reset_token,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ============================================================================
// Admin Repository Implementation
// ============================================================================

impl AdminRepository for PgAdminRepository {
    async fn create(&self, account: &AdminAccount) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_accounts (
                id,
                username,
                email,
                password_hash,
                reset_token_hash,
                reset_token_expires_at,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.admin_id.as_str())
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.reset_token.as_ref().map(|t| t.token_hash()))
        .bind(account.reset_token.as_ref().map(|t| t.expires_at()))
        .bind(account.last_login_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(admin_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!("{SELECT_COLUMNS} WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!("{SELECT_COLUMNS} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "{SELECT_COLUMNS} WHERE reset_token_hash = $1"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_accounts WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_accounts WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &AdminAccount) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE admin_accounts SET
                username = $2,
                email = $3,
                password_hash = $4,
                reset_token_hash = $5,
                reset_token_expires_at = $6,
                last_login_at = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(account.admin_id.as_str())
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.reset_token.as_ref().map(|t| t.token_hash()))
        .bind(account.reset_token.as_ref().map(|t| t.expires_at()))
        .bind(account.last_login_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
