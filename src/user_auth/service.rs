use std::sync::Arc;
use thiserror::Error;

use super::models::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, UserInfo, normalize_email,
};
use super::repository::UserRepository;
use crate::auth::{CredentialHasher, Role, TokenError, TokenService};

#[derive(Debug, Error)]
pub enum UserAuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct UserAuthService {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    tokens: Arc<TokenService>,
}

impl UserAuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: CredentialHasher,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new customer account
    pub async fn register(&self, req: RegisterRequest) -> Result<i64, UserAuthError> {
        // 1. Hash password
        let password_hash = self
            .hasher
            .hash(&req.password)
            .map_err(|e| UserAuthError::Hashing(e.to_string()))?;

        // 2. Insert into DB (self-registration never grants admin)
        let user_id = self
            .users
            .insert(NewUser {
                name: req.name.trim().to_string(),
                email: normalize_email(&req.email),
                password_hash,
                role: Role::Customer,
            })
            .await?;

        tracing::info!(user_id, "User registered");
        Ok(user_id)
    }

    /// Login user and issue a token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserAuthError> {
        // 1. Find user by email
        let user = self
            .users
            .find_by_email(&normalize_email(&req.email))
            .await?
            .ok_or(UserAuthError::InvalidCredentials)?;

        // 2. Verify password
        if !self.hasher.verify(&req.password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(UserAuthError::InvalidCredentials);
        }

        // 3. Issue token
        let token = self.tokens.issue(user.id, &user.email, user.role)?;

        Ok(LoginResponse {
            token,
            user: UserInfo::from(&user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::fast_hasher;
    use crate::user_auth::repository::MockUserRepository;

    fn setup() -> (UserAuthService, Arc<MockUserRepository>, Arc<TokenService>) {
        let repo = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(TokenService::new("svc-secret", 24));
        let svc = UserAuthService::new(repo.clone(), fast_hasher(), tokens.clone());
        (svc, repo, tokens)
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (svc, repo, _) = setup();
        let id = svc.register(register_req("asha@example.com")).await.unwrap();

        let stored = repo.get("asha@example.com").unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.role, Role::Customer);
        assert_ne!(stored.password_hash, "password123");
        assert!(!stored.password_hash.contains("password123"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_once_stored() {
        let (svc, repo, _) = setup();
        svc.register(register_req("asha@example.com")).await.unwrap();

        let second = svc.register(register_req("ASHA@example.com")).await;
        assert!(matches!(second, Err(UserAuthError::DuplicateEmail)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (svc, _, tokens) = setup();
        let id = svc.register(register_req("asha@example.com")).await.unwrap();

        let resp = svc
            .login(LoginRequest {
                email: "asha@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.user.id, id);
        let claims = tokens.verify(&resp.token).unwrap();
        assert_eq!(claims.user_id, id);
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.email, "asha@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (svc, _, _) = setup();
        svc.register(register_req("asha@example.com")).await.unwrap();

        let wrong_password = svc
            .login(LoginRequest {
                email: "asha@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await;
        let unknown_email = svc
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(
            wrong_password,
            Err(UserAuthError::InvalidCredentials)
        ));
        assert!(matches!(
            unknown_email,
            Err(UserAuthError::InvalidCredentials)
        ));
    }
}
