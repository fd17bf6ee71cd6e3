//! Unit tests for the admin authentication flow
//!
//! Use cases run against an in-memory repository, so the suite needs no
//! database.

use std::sync::{Arc, Mutex};

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::token::{decode_token, issue_token};
use crate::application::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SetupInput, SetupUseCase, UpdateProfileInput, UpdateProfileUseCase, VerifyTokenUseCase,
};
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::reset_token::ResetToken;
use crate::error::{AuthError, AuthResult};
use kernel::id::AdminId;

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryAdminRepository {
    accounts: Arc<Mutex<Vec<AdminAccount>>>,
}

impl InMemoryAdminRepository {
    fn snapshot(&self) -> Vec<AdminAccount> {
        self.accounts.lock().unwrap().clone()
    }
}

impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, account: &AdminAccount) -> AuthResult<()> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|a| a.admin_id == *admin_id))
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<AdminAccount>> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|a| a.username.as_str() == username))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<AdminAccount>> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|a| a.email.as_str() == email))
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> AuthResult<Option<AdminAccount>> {
        Ok(self.snapshot().into_iter().find(|a| {
            a.reset_token
                .as_ref()
                .is_some_and(|t| t.token_hash() == token_hash)
        }))
    }

    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        Ok(self
            .snapshot()
            .iter()
            .any(|a| a.username.as_str() == username))
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        Ok(self.snapshot().iter().any(|a| a.email.as_str() == email))
    }

    async fn update(&self, account: &AdminAccount) -> AuthResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(slot) = accounts
            .iter_mut()
            .find(|a| a.admin_id == account.admin_id)
        {
            *slot = account.clone();
        }
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::development())
}

fn test_mailer() -> Arc<Mailer> {
    Arc::new(Mailer::new(
        None,
        "noreply@techkwiz.test",
        "http://localhost:3000",
    ))
}

async fn setup_admin(
    repo: &Arc<InMemoryAdminRepository>,
    config: &Arc<AuthConfig>,
    username: &str,
    password: &str,
    email: Option<&str>,
) -> AuthResult<AdminAccount> {
    SetupUseCase::new(repo.clone(), config.clone())
        .execute(SetupInput {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(str::to_string),
        })
        .await
}

// ============================================================================
// Setup / Login / Verify
// ============================================================================

#[tokio::test]
async fn test_setup_then_login_then_verify_roundtrip() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    let account = setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();
    assert!(account.last_login_at.is_none());

    let login = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            username: "quizadmin".to_string(),
            password: "Secr3t!".to_string(),
        })
        .await
        .unwrap();

    let username = VerifyTokenUseCase::new(repo.clone(), config.clone())
        .execute(&login.access_token)
        .await
        .unwrap();
    assert_eq!(username, "quizadmin");

    // last_login was recorded by the successful login
    let stored = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_duplicate_setup_conflicts() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    let first = setup_admin(&repo, &config, "quizadmin", "Secr3t!", Some("a@techkwiz.com"))
        .await
        .unwrap();

    let second = setup_admin(&repo, &config, "quizadmin", "0therPass!", Some("b@techkwiz.com"))
        .await;
    assert!(matches!(second, Err(AuthError::UsernameTaken)));

    // First account is unaffected
    let stored = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    assert_eq!(stored.admin_id, first.admin_id);
    assert_eq!(stored.email.as_str(), "a@techkwiz.com");
    assert_eq!(repo.snapshot().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "first", "Secr3t!", Some("a@techkwiz.com"))
        .await
        .unwrap();

    let second = setup_admin(&repo, &config, "second", "Secr3t!", Some("a@techkwiz.com")).await;
    assert!(matches!(second, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn test_login_wrong_password_leaves_last_login_untouched() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();

    let result = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            username: "quizadmin".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    let stored = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    assert!(stored.last_login_at.is_none());
}

#[tokio::test]
async fn test_login_unknown_username() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    let result = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            username: "ghost".to_string(),
            password: "whatever1".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_verify_rejects_token_after_rename() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();

    let token = issue_token("quizadmin", &config).unwrap();
    assert!(decode_token(&token, &config).is_ok());

    // Rename the account; the old token's subject no longer exists
    UpdateProfileUseCase::new(repo.clone(), config.clone())
        .execute(
            "quizadmin",
            UpdateProfileInput {
                current_password: "Secr3t!".to_string(),
                username: Some("renamed".to_string()),
                email: None,
                new_password: None,
            },
        )
        .await
        .unwrap();

    let result = VerifyTokenUseCase::new(repo.clone(), config.clone())
        .execute(&token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

// ============================================================================
// Forgot / Reset password
// ============================================================================

#[tokio::test]
async fn test_forgot_password_same_outcome_for_any_email() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", Some("admin@techkwiz.com"))
        .await
        .unwrap();

    let use_case = ForgotPasswordUseCase::new(repo.clone(), config.clone(), test_mailer());

    // Known, unknown, and malformed addresses all succeed identically; the
    // handler then answers each with the same fixed message.
    assert!(use_case.execute("admin@techkwiz.com").await.is_ok());
    assert!(use_case.execute("nobody@techkwiz.com").await.is_ok());
    assert!(use_case.execute("not-an-email").await.is_ok());

    // Only the real account got a token
    let stored = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    assert!(stored.has_valid_reset_token());
}

#[tokio::test]
async fn test_forgot_password_responses_are_byte_identical() {
    use crate::presentation::dto::ForgotPasswordRequest;
    use crate::presentation::handlers::{self, AuthAppState};
    use axum::{Json, extract::State};

    let state = AuthAppState {
        repo: Arc::new(InMemoryAdminRepository::default()),
        config: test_config(),
        mailer: test_mailer(),
    };

    setup_admin(
        &state.repo,
        &state.config,
        "quizadmin",
        "Secr3t!",
        Some("admin@techkwiz.com"),
    )
    .await
    .unwrap();

    let respond = |email: &str| {
        let state = state.clone();
        let email = email.to_string();
        async move {
            let Json(body) = handlers::forgot_password(
                State(state),
                Json(ForgotPasswordRequest { email }),
            )
            .await
            .unwrap();
            body.message
        }
    };

    let for_existing = respond("admin@techkwiz.com").await;
    let for_unknown = respond("nobody@techkwiz.com").await;
    assert_eq!(for_existing, for_unknown);
    assert_eq!(for_existing, handlers::FORGOT_PASSWORD_MESSAGE);
}

#[tokio::test]
async fn test_reset_password_single_use() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();

    // Issue a token the way forgot-password does, keeping the raw value
    let (token, raw) = ResetToken::issue(config.reset_token_ttl_chrono());
    let mut account = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    account.set_reset_token(token);
    repo.update(&account).await.unwrap();

    let use_case = ResetPasswordUseCase::new(repo.clone(), config.clone());

    use_case
        .execute(ResetPasswordInput {
            token: raw.clone(),
            new_password: "BrandNew1!".to_string(),
        })
        .await
        .unwrap();

    // New password works, old one does not
    let login = LoginUseCase::new(repo.clone(), config.clone());
    assert!(
        login
            .execute(LoginInput {
                username: "quizadmin".to_string(),
                password: "BrandNew1!".to_string(),
            })
            .await
            .is_ok()
    );
    assert!(matches!(
        login
            .execute(LoginInput {
                username: "quizadmin".to_string(),
                password: "Secr3t!".to_string(),
            })
            .await,
        Err(AuthError::InvalidCredentials)
    ));

    // The token was consumed
    let replay = use_case
        .execute(ResetPasswordInput {
            token: raw,
            new_password: "An0therOne!".to_string(),
        })
        .await;
    assert!(matches!(replay, Err(AuthError::ResetTokenInvalid)));
}

#[tokio::test]
async fn test_reset_password_expired_token() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();

    // Backdate the expiry past the 1-hour window
    let raw = "backdated-token";
    let mut account = repo.find_by_username("quizadmin").await.unwrap().unwrap();
    account.set_reset_token(ResetToken::from_parts(
        ResetToken::hash_of(raw),
        chrono::Utc::now() - chrono::Duration::minutes(61),
    ));
    repo.update(&account).await.unwrap();

    let result = ResetPasswordUseCase::new(repo.clone(), config.clone())
        .execute(ResetPasswordInput {
            token: raw.to_string(),
            new_password: "BrandNew1!".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::ResetTokenInvalid)));
}

#[tokio::test]
async fn test_reset_password_unknown_token() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    let result = ResetPasswordUseCase::new(repo.clone(), config.clone())
        .execute(ResetPasswordInput {
            token: "never-issued".to_string(),
            new_password: "BrandNew1!".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::ResetTokenInvalid)));
}

// ============================================================================
// Profile update
// ============================================================================

#[tokio::test]
async fn test_profile_update_wrong_current_password() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "quizadmin", "Secr3t!", None)
        .await
        .unwrap();

    let result = UpdateProfileUseCase::new(repo.clone(), config.clone())
        .execute(
            "quizadmin",
            UpdateProfileInput {
                current_password: "wrong".to_string(),
                username: None,
                email: Some("new@techkwiz.com".to_string()),
                new_password: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_profile_update_applies_only_provided_fields() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    let before = setup_admin(&repo, &config, "quizadmin", "Secr3t!", Some("a@techkwiz.com"))
        .await
        .unwrap();

    let after = UpdateProfileUseCase::new(repo.clone(), config.clone())
        .execute(
            "quizadmin",
            UpdateProfileInput {
                current_password: "Secr3t!".to_string(),
                username: None,
                email: Some("b@techkwiz.com".to_string()),
                new_password: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(after.username.as_str(), "quizadmin");
    assert_eq!(after.email.as_str(), "b@techkwiz.com");
    assert!(after.updated_at > before.updated_at);

    // Password unchanged
    assert!(
        LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                username: "quizadmin".to_string(),
                password: "Secr3t!".to_string(),
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_profile_update_username_collision() {
    let repo = Arc::new(InMemoryAdminRepository::default());
    let config = test_config();

    setup_admin(&repo, &config, "first", "Secr3t!", Some("a@techkwiz.com"))
        .await
        .unwrap();
    setup_admin(&repo, &config, "second", "Secr3t!", Some("b@techkwiz.com"))
        .await
        .unwrap();

    let result = UpdateProfileUseCase::new(repo.clone(), config.clone())
        .execute(
            "second",
            UpdateProfileInput {
                current_password: "Secr3t!".to_string(),
                username: Some("first".to_string()),
                email: None,
                new_password: None,
            },
        )
        .await;

    match result {
        Err(AuthError::Validation(msg)) => assert!(msg.contains("already taken")),
        other => panic!("expected validation error, got {other:?}"),
    }
}
