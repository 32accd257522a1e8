//! In-memory user directory backing the sign-in gate and the user
//! management page. There is no account store: every demo user shares one
//! password.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Role, User};

// Demo credentials - every seeded account signs in with this.
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No account found for {0}")]
    UnknownUser(String),
    #[error("Invalid credentials")]
    InvalidPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn demo() -> Self {
        let user = |id: &str, email: &str, name: &str, role: Role| User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            avatar: None,
        };
        Self::new(vec![
            user("1", "john.doe@company.com", "John Doe", Role::Admin),
            user("2", "sarah.wilson@company.com", "Sarah Wilson", Role::Editor),
            user("3", "mike.chen@company.com", "Mike Chen", Role::Viewer),
        ])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .find_by_email(email)
            .ok_or_else(|| AuthError::UnknownUser(email.trim().to_string()))?;
        if password != DEMO_PASSWORD {
            return Err(AuthError::InvalidPassword);
        }
        log::info!("{} signed in as {}", user.email, user.role.label());
        Ok(user.clone())
    }

    pub fn count_by_role(&self, role: Role) -> usize {
        self.users.iter().filter(|u| u.role == role).count()
    }
}
