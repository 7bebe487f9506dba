use lostfound_core::{ItemFilter, View};

use crate::error::{ClientError, ClientResult};

/// Page state for one user: who is signed in, which view is active and the
/// current filters. Passed explicitly to every operation that needs it.
#[derive(Debug, Clone, Default)]
pub struct AppSession {
    user_email: Option<String>,
    view: View,
    filter: ItemFilter,
}

impl AppSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a user resolved by the identity provider.
    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            user_email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn require_user(&self) -> ClientResult<&str> {
        self.user_email().ok_or(ClientError::NotSignedIn)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_email.is_some()
    }

    /// The email last used to post becomes the session identity.
    pub fn remember_email(&mut self, email: &str) {
        self.user_email = Some(email.to_string());
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// My-posts needs a signed-in user.
    pub fn set_view(&mut self, view: View) -> ClientResult<()> {
        if view == View::MyPosts && !self.is_authenticated() {
            return Err(ClientError::NotSignedIn);
        }
        self.view = view;
        Ok(())
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ItemFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = Some(term.into());
    }
}
