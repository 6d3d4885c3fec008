//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Token issuance, verification and bearer extraction
//! - Role resolution (including the legacy admin flag)
//! - Authorization predicates
//! - Credential store registration and login semantics

#[cfg(test)]
mod tests {
    use crate::auth::extractors::AuthedUser;
    use crate::auth::models::{LoginInput, RegisterInput, Role, User};
    use crate::auth::services::UserService;
    use crate::auth::tokens::{self, TokenError};
    use crate::auth::validators::{LoginValidator, RegistrationValidator};
    use crate::common::{ApiError, Validator};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use std::collections::HashSet;

    const SECRET: &str = "test_secret_key";

    fn test_user(role: &str, is_admin: i64) -> User {
        User {
            id: "U_TEST01".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role: role.to_string(),
            is_admin,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            updated_at: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    fn authed(role: Role) -> AuthedUser {
        AuthedUser {
            id: "U_TEST01".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        crate::common::migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    // ========================================================================
    // Token Service
    // ========================================================================

    #[test]
    fn test_token_roundtrip() {
        let user = test_user("user", 0);
        let token = tokens::issue(&user, SECRET, 24).expect("Failed to issue token");

        let claims = tokens::verify(&token, SECRET).expect("Failed to verify token");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_token_carries_effective_role() {
        // Legacy flag folds into the role claim
        let user = test_user("user", 1);
        let token = tokens::issue(&user, SECRET, 24).unwrap();
        let claims = tokens::verify(&token, SECRET).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_verify_fails_with_wrong_secret() {
        let user = test_user("user", 0);
        let token = tokens::issue(&user, SECRET, 24).unwrap();

        let result = tokens::verify(&token, "wrong_secret_key");
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_distinguishes_expired_from_invalid() {
        let user = test_user("user", 0);

        // Issued two hours in the past
        let expired = tokens::issue(&user, SECRET, -2).unwrap();
        assert!(matches!(
            tokens::verify(&expired, SECRET),
            Err(TokenError::Expired)
        ));

        assert!(matches!(
            tokens::verify("not.a.token", SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_missing_secret_is_a_config_error() {
        let user = test_user("user", 0);
        assert!(matches!(
            tokens::issue(&user, "", 24),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            tokens::verify("whatever", ""),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(tokens::extract_bearer("Bearer abc123"), Some("abc123"));

        // Anything but exactly "Bearer <token>" is rejected
        assert_eq!(tokens::extract_bearer("abc123"), None);
        assert_eq!(tokens::extract_bearer("Bearer"), None);
        assert_eq!(tokens::extract_bearer("Bearer a b"), None);
        assert_eq!(tokens::extract_bearer("bearer abc123"), None);
        assert_eq!(tokens::extract_bearer(""), None);
    }

    // ========================================================================
    // Roles and Authorization Predicates
    // ========================================================================

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("user"), Some(Role::User));
        assert_eq!(Role::from_str("superuser"), None);
    }

    #[test]
    fn test_effective_role_folds_legacy_flag() {
        assert_eq!(test_user("admin", 0).effective_role(), Role::Admin);
        assert_eq!(test_user("user", 1).effective_role(), Role::Admin);
        assert_eq!(test_user("user", 0).effective_role(), Role::User);
        // Unknown role strings degrade to user
        assert_eq!(test_user("mystery", 0).effective_role(), Role::User);
    }

    #[test]
    fn test_require_admin() {
        assert!(authed(Role::Admin).require_admin().is_ok());

        let result = authed(Role::User).require_admin();
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_require_role() {
        let user = authed(Role::User);
        assert!(user.require_role(&[Role::User, Role::Admin]).is_ok());

        let result = user.require_role(&[Role::Admin]);
        match result {
            Err(ApiError::Forbidden(msg)) => {
                assert!(msg.contains("admin"), "message should list allowed roles")
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_require_owner_or_admin() {
        let admin = authed(Role::Admin);
        assert!(admin.require_owner_or_admin("U_OTHER9").is_ok());

        let user = authed(Role::User);
        assert!(user.require_owner_or_admin("U_TEST01").is_ok());
        assert!(matches!(
            user.require_owner_or_admin("U_OTHER9"),
            Err(ApiError::Forbidden(_))
        ));
    }

    // ========================================================================
    // Input Validators
    // ========================================================================

    #[test]
    fn test_registration_validator() {
        let valid = RegisterInput {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(RegistrationValidator.validate(&valid).is_valid());

        let missing_name = RegisterInput {
            name: "   ".to_string(),
            ..valid_input()
        };
        let result = RegistrationValidator.validate(&missing_name);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "name"));

        let bad_email = RegisterInput {
            email: "not-an-email".to_string(),
            ..valid_input()
        };
        let result = RegistrationValidator.validate(&bad_email);
        assert!(result.errors.iter().any(|e| e.field == "email"));
    }

    fn valid_input() -> RegisterInput {
        RegisterInput {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "hunter2!".to_string(),
        }
    }

    #[test]
    fn test_login_validator() {
        let result = LoginValidator.validate(&LoginInput {
            email: "".to_string(),
            password: "pw".to_string(),
        });
        assert!(!result.is_valid());

        let result = LoginValidator.validate(&LoginInput {
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
        });
        assert!(result.is_valid());
    }

    // ========================================================================
    // Credential Store
    // ========================================================================

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        let user = service
            .register(
                RegisterInput {
                    name: "  Asha  ".to_string(),
                    email: "  Asha@Example.COM ".to_string(),
                    password: "hunter2!".to_string(),
                },
                &HashSet::new(),
            )
            .await
            .expect("registration should succeed");

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.name, "Asha");
        assert_eq!(user.role, "user");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email_any_case() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        service
            .register(valid_registration("asha@example.com"), &HashSet::new())
            .await
            .unwrap();

        let result = service
            .register(valid_registration("ASHA@EXAMPLE.COM"), &HashSet::new())
            .await;

        assert!(matches!(result, Err(ApiError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_bootstraps_admin_from_allowlist() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        let mut admin_emails = HashSet::new();
        admin_emails.insert("boss@example.com".to_string());

        let user = service
            .register(valid_registration("Boss@example.com"), &admin_emails)
            .await
            .unwrap();

        assert_eq!(user.effective_role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_login_roundtrip_and_enumeration_resistance() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        let registered = service
            .register(valid_registration("asha@example.com"), &HashSet::new())
            .await
            .unwrap();

        // Correct credentials return the same account, and the issued token
        // verifies back to the same user id
        let user = service
            .login(LoginInput {
                email: "Asha@Example.com".to_string(),
                password: "hunter2!".to_string(),
            })
            .await
            .expect("login should succeed");
        assert_eq!(user.id, registered.id);

        let token = tokens::issue(&user, SECRET, 24).unwrap();
        let claims = tokens::verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, registered.id);

        // Wrong password and unknown email fail identically
        let wrong_password = service
            .login(LoginInput {
                email: "asha@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        let unknown_email = service
            .login(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "hunter2!".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        let registered = service
            .register(valid_registration("asha@example.com"), &HashSet::new())
            .await
            .unwrap();

        let found = service.find_by_id(&registered.id).await.unwrap();
        assert_eq!(found.email, "asha@example.com");

        let missing = service.find_by_id("U_MISSING").await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }

    fn valid_registration(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "hunter2!".to_string(),
        }
    }
}
