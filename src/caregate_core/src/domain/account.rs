use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{email::Email, role::Role};

/// Opaque account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identity record held by the credential store.
///
/// The password hash stays inside the store - an `Account` only carries what
/// token minting and authorization need.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: Email,
    roles: HashSet<Role>,
}

impl Account {
    pub fn new(id: AccountId, email: Email, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            email,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_account_deduplicates_roles() {
        let email = Email::try_from(Secret::from("nurse@example.com".to_string())).unwrap();
        let account = Account::new(AccountId::new(), email, [Role::Nurse, Role::Nurse]);
        assert_eq!(account.roles().len(), 1);
    }

    #[test]
    fn test_account_id_round_trips_through_string() {
        let id = AccountId::new();
        assert_eq!(id.to_string().parse::<AccountId>().unwrap(), id);
    }
}
