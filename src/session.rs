//! Application state shared across views: bootstrap outcome plus session.
//!
//! All changes go through [`AppStore::reduce`], which returns a new store.
//! The bootstrap outcome is written once; the session is written by the
//! login and logout flows only.

use crate::bootstrap::BootState;
use crate::endpoints::Endpoints;

/// Who is logged in, if anyone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub username: Option<String>,
    /// URL of the logged-in user's own document.
    pub user_url: Option<String>,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    BootstrapFinished(BootState),
    LoggedIn {
        username: String,
        user_url: Option<String>,
    },
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppStore {
    pub boot: BootState,
    pub session: SessionState,
}

impl AppStore {
    pub fn endpoints(&self) -> Option<&Endpoints> {
        self.boot.endpoints()
    }

    pub fn reduce(&self, action: AppAction) -> AppStore {
        let mut next = self.clone();
        match action {
            AppAction::BootstrapFinished(state) => {
                if self.boot.loaded() {
                    log::warn!("Bootstrap already finished, ignoring second result");
                } else {
                    next.boot = state;
                }
            }
            AppAction::LoggedIn { username, user_url } => {
                log::info!("Logged in as {username}");
                next.session = SessionState {
                    username: Some(username),
                    user_url,
                };
            }
            AppAction::LoggedOut => {
                next.session = SessionState::default();
            }
        }
        next
    }
}
