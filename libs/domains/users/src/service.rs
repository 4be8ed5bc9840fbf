use std::sync::Arc;

use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::oauth::OAuthUserInfo;
use crate::repository::UserRepository;

/// Turns provider profiles into stored users.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Find or create the user behind a provider sign-in.
    ///
    /// A profile without an email is denied. Emails are matched
    /// case-insensitively; the user record is created on first sign-in and
    /// left as-is afterwards.
    #[instrument(skip(self, profile), fields(provider_user_id = %profile.provider_user_id))]
    pub async fn sign_in(&self, profile: &OAuthUserInfo) -> UserResult<User> {
        let email = profile
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| UserError::AccessDenied("provider profile has no email".into()))?;

        let name = profile
            .name
            .as_deref()
            .or(profile.username.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email_local_part(&email));

        self.repository
            .upsert_by_email(NewUser {
                email,
                name,
                image: profile.avatar_url.clone(),
            })
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository
            .find_by_email(&email.trim().to_lowercase())
            .await
    }
}

fn email_local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn profile(email: Option<&str>, name: Option<&str>, login: Option<&str>) -> OAuthUserInfo {
        OAuthUserInfo {
            provider_user_id: "42".into(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            username: login.map(str::to_string),
            avatar_url: Some("https://avatars.example.com/42".into()),
        }
    }

    #[tokio::test]
    async fn test_sign_in_without_email_is_denied_before_storage() {
        let mut mock = MockUserRepository::new();
        mock.expect_upsert_by_email().never();

        let service = UserService::new(mock);
        for email in [None, Some(""), Some("   ")] {
            let result = service.sign_in(&profile(email, Some("Alice"), None)).await;
            assert!(matches!(result, Err(UserError::AccessDenied(_))));
        }
    }

    #[tokio::test]
    async fn test_sign_in_normalizes_email() {
        let mut mock = MockUserRepository::new();
        mock.expect_upsert_by_email()
            .withf(|input| input.email == "alice@example.com" && input.name == "Alice")
            .times(1)
            .returning(|input| Ok(User::new(input)));

        let service = UserService::new(mock);
        let user = service
            .sign_in(&profile(Some(" Alice@Example.COM "), Some("Alice"), Some("alice-gh")))
            .await
            .unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.image.as_deref(), Some("https://avatars.example.com/42"));
    }

    #[tokio::test]
    async fn test_display_name_falls_back_to_login_then_email() {
        let mut mock = MockUserRepository::new();
        mock.expect_upsert_by_email()
            .returning(|input| Ok(User::new(input)));
        let service = UserService::new(mock);

        let user = service
            .sign_in(&profile(Some("bob@example.com"), None, Some("bob-gh")))
            .await
            .unwrap();
        assert_eq!(user.name, "bob-gh");

        let user = service
            .sign_in(&profile(Some("carol@example.com"), Some(" "), None))
            .await
            .unwrap();
        assert_eq!(user.name, "carol");
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock = MockUserRepository::new();
        mock.expect_upsert_by_email()
            .returning(|_| Err(UserError::Database("write concern".into())));

        let service = UserService::new(mock);
        let result = service
            .sign_in(&profile(Some("alice@example.com"), Some("Alice"), None))
            .await;
        assert!(matches!(result, Err(UserError::Database(_))));
    }
}
