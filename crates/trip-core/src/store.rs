//! # Application State
//!
//! Client-side state for auth, packages and bookings. State only changes
//! through [`reduce`], a pure function over tagged [`Action`]s; [`Store`]
//! owns one state value and is passed to whoever needs it.

use crate::booking::Booking;
use crate::package::Package;
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.user, Some(User { role: Role::Admin, .. }))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagesState {
    pub items: Vec<Package>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PackagesState {
    pub fn find(&self, package_id: &str) -> Option<&Package> {
        self.items.iter().find(|p| p.id == package_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingsState {
    pub items: Vec<Booking>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id of the booking created by the last checkout attempt
    pub last_created: Option<String>,
}

/// Whole client state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientState {
    pub auth: AuthState,
    pub packages: PackagesState,
    pub bookings: BookingsState,
}

/// Everything that can change [`ClientState`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    LoginStarted,
    LoginSucceeded { user: User, token: String },
    LoginFailed { message: String },
    Logout,
    PackagesRequested,
    PackagesLoaded { packages: Vec<Package> },
    PackagesFailed { message: String },
    BookingsRequested,
    BookingsLoaded { bookings: Vec<Booking> },
    BookingsFailed { message: String },
    BookingCreated { booking_id: String },
}

/// Apply one action
pub fn reduce(mut state: ClientState, action: Action) -> ClientState {
    match action {
        Action::LoginStarted => {
            state.auth.loading = true;
            state.auth.error = None;
        }
        Action::LoginSucceeded { user, token } => {
            state.auth = AuthState {
                user: Some(user),
                token: Some(token),
                loading: false,
                error: None,
            };
        }
        Action::LoginFailed { message } => {
            state.auth = AuthState {
                error: Some(message),
                ..AuthState::default()
            };
        }
        Action::Logout => {
            // user-scoped data goes with the session; the catalog stays
            state.auth = AuthState::default();
            state.bookings = BookingsState::default();
        }
        Action::PackagesRequested => {
            state.packages.loading = true;
            state.packages.error = None;
        }
        Action::PackagesLoaded { packages } => {
            state.packages = PackagesState {
                items: packages,
                loading: false,
                error: None,
            };
        }
        Action::PackagesFailed { message } => {
            state.packages.loading = false;
            state.packages.error = Some(message);
        }
        Action::BookingsRequested => {
            state.bookings.loading = true;
            state.bookings.error = None;
        }
        Action::BookingsLoaded { bookings } => {
            state.bookings.items = bookings;
            state.bookings.loading = false;
            state.bookings.error = None;
        }
        Action::BookingsFailed { message } => {
            state.bookings.loading = false;
            state.bookings.error = Some(message);
        }
        Action::BookingCreated { booking_id } => {
            state.bookings.last_created = Some(booking_id);
        }
    }
    state
}

/// Owner of the current state
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: ClientState,
}

impl Store {
    pub fn new(initial: ClientState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &ClientState {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn admin() -> User {
        User {
            id: "u1".into(),
            name: "Ayesha".into(),
            email: "ayesha@example.com".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_login_cycle() {
        let mut store = Store::default();

        store.dispatch(Action::LoginStarted);
        assert!(store.state().auth.loading);

        store.dispatch(Action::LoginSucceeded {
            user: admin(),
            token: "jwt".into(),
        });
        assert!(store.state().auth.is_authenticated());
        assert!(store.state().auth.is_admin());
        assert!(!store.state().auth.loading);
    }

    #[test]
    fn test_login_failure_clears_session() {
        let state = reduce(
            ClientState::default(),
            Action::LoginSucceeded {
                user: admin(),
                token: "jwt".into(),
            },
        );
        let state = reduce(
            state,
            Action::LoginFailed {
                message: "Invalid credentials".into(),
            },
        );

        assert!(!state.auth.is_authenticated());
        assert_eq!(state.auth.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_logout_keeps_catalog() {
        let package: Package =
            serde_json::from_value(json!({ "_id": "pkg_1", "title": "Sylhet Tea Trail" }))
                .unwrap();
        let mut store = Store::default();
        store.dispatch(Action::PackagesLoaded {
            packages: vec![package],
        });
        store.dispatch(Action::BookingCreated {
            booking_id: "b1".into(),
        });

        store.dispatch(Action::Logout);

        assert!(store.state().packages.find("pkg_1").is_some());
        assert_eq!(store.state().bookings.last_created, None);
    }

    #[test]
    fn test_failures_stop_loading() {
        let mut store = Store::default();
        store.dispatch(Action::BookingsRequested);
        store.dispatch(Action::BookingsFailed {
            message: "Unauthorized".into(),
        });

        assert!(!store.state().bookings.loading);
        assert_eq!(store.state().bookings.error.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_actions_from_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "booking_created",
            "payload": { "booking_id": "b9" }
        }))
        .unwrap();
        let state = reduce(ClientState::default(), action);
        assert_eq!(state.bookings.last_created.as_deref(), Some("b9"));

        let action: Action = serde_json::from_value(json!({ "type": "logout" })).unwrap();
        assert!(matches!(action, Action::Logout));
    }
}
