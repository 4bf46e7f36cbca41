//! User accounts created through access-code registration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Role;

/// Store-assigned account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public view of an account, without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

/// Account together with its stored password hash, used only for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub account: UserAccount,
    pub password_hash: String,
}

/// Insert payload for a freshly registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}
