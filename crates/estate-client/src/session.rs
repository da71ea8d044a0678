// File: src/session.rs
// Purpose: Signed-in state backed by an injected credential store

use std::sync::Arc;

use estate_forms::LeadForm;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::credentials::{CredentialStore, TOKEN_KEY, USER_KEY};
use crate::error::ApiError;
use crate::models::User;

/// Token and user of the current sign-in.
///
/// Only the store knows where credentials live; the session just reads and
/// writes the `token` and `user` keys.
pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
    token: Option<String>,
    user: Option<User>,
}

impl AuthSession {
    /// Signed-out session.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            token: None,
            user: None,
        }
    }

    /// Picks up a previous sign-in. A stored user that no longer parses is
    /// dropped; the token is kept.
    pub fn restore(store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let token = store.get(TOKEN_KEY)?;
        let user = match &token {
            Some(_) => match store.get(USER_KEY)? {
                Some(raw) => match serde_json::from_str::<User>(&raw) {
                    Ok(user) => Some(user),
                    Err(err) => {
                        warn!(error = %err, "stored user is unreadable, keeping token only");
                        None
                    }
                },
                None => None,
            },
            None => None,
        };

        Ok(Self { store, token, user })
    }

    pub async fn login(&mut self, client: &ApiClient, email: &str, password: &str) -> Result<&User, ApiError> {
        let auth = client.login(email, password).await?;

        self.store.set(TOKEN_KEY, &auth.token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&auth.user)?)?;
        info!(user_id = auth.user.id, "signed in");

        self.token = Some(auth.token);
        Ok(&*self.user.insert(auth.user))
    }

    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.token = None;
        self.user = None;
        info!("signed out");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// A copy of `client` carrying this session's token.
    pub fn authorized(&self, client: &ApiClient) -> ApiClient {
        let mut client = client.clone();
        client.set_token(self.token.clone());
        client
    }

    /// Lead form suited to the signed-in user.
    pub fn lead_form(&self) -> LeadForm {
        match &self.user {
            Some(user) if user.is_client() => LeadForm::for_client(user.id),
            _ => LeadForm::for_agent(),
        }
    }
}
