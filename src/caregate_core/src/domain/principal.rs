use std::collections::HashSet;

use crate::domain::{account::AccountId, role::Role};

/// Authenticated caller, extracted from a validated access token.
///
/// Derived, never persisted. Anything the authorization policy decides is a
/// pure function of this value and the target resource's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: AccountId,
    roles: HashSet<Role>,
}

impl Principal {
    pub fn new(subject: AccountId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            subject,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn subject(&self) -> AccountId {
        self.subject
    }

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
