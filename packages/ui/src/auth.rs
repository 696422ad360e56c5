//! Authentication state for the sign-in and profile screens.

use api::{ApiError, AuthService, UserProfile};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
    /// Last auth error, shown verbatim under the form.
    pub error: Option<String>,
}

impl AuthState {
    /// Restore the signed-in user from the persisted credential.
    pub fn load(auth: &impl AuthService) -> Self {
        Self {
            user: auth.current_user(),
            loading: false,
            error: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn login(
        &mut self,
        auth: &impl AuthService,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return self.fail(ApiError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }
        self.settle(auth.login(email, password).await)
    }

    pub async fn register(
        &mut self,
        auth: &impl AuthService,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return self.fail(ApiError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }
        self.settle(auth.register(email, password, name.trim()).await)
    }

    /// Sign out locally. The user is cleared even if the store fails.
    pub fn logout(&mut self, auth: &impl AuthService) {
        if let Err(e) = auth.logout() {
            tracing::warn!("Failed to clear credential: {}", e);
        }
        self.user = None;
        self.error = None;
    }

    /// Reload the profile including comic and character counts.
    pub async fn refresh_profile(&mut self, auth: &impl AuthService) -> Result<(), ApiError> {
        self.loading = true;
        let result = auth.fetch_profile().await;
        self.loading = false;
        match result {
            Ok(profile) => {
                self.user = Some(profile);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn rename(&mut self, auth: &impl AuthService, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return self.fail(ApiError::InvalidInput("Name is required".to_string()));
        }
        match auth.update_profile(name).await {
            Ok(profile) => {
                // Keep counts from the last refresh; the update response omits them.
                let counts = self
                    .user
                    .as_ref()
                    .map(|u| (u.comics_count, u.characters_count));
                let mut profile = profile;
                if let Some((comics, characters)) = counts {
                    profile.comics_count = profile.comics_count.or(comics);
                    profile.characters_count = profile.characters_count.or(characters);
                }
                self.user = Some(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn settle(&mut self, result: Result<api::Credential, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(credential) => {
                tracing::info!(user = credential.user.id, "Signed in");
                self.user = Some(credential.user);
                self.error = None;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: ApiError) -> Result<(), ApiError> {
        self.error = Some(error.to_string());
        Err(error)
    }
}
