use std::collections::HashSet;

use crate::domain::{account::AccountId, principal::Principal, role::Role};

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Ownership-based access policy shared by every resource controller.
///
/// The same decision applies to patients, medical records, appointments,
/// healthcare plans and dashboard data: a principal may act on a resource
/// when it holds an override role, or when it is the owner. The override
/// list comes from configuration, not from the call site.
///
/// Evaluation never fails - when ownership cannot be determined the answer
/// is `Deny`.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    override_roles: HashSet<Role>,
}

impl AccessPolicy {
    pub fn new(override_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            override_roles: override_roles.into_iter().collect(),
        }
    }

    /// Decide access for a resource owned by `owner`.
    pub fn evaluate(&self, principal: &Principal, owner: &AccountId) -> AccessDecision {
        if principal
            .roles()
            .iter()
            .any(|role| self.override_roles.contains(role))
        {
            return AccessDecision::Allow;
        }
        if principal.subject() == *owner {
            return AccessDecision::Allow;
        }
        AccessDecision::Deny
    }

    /// Like [`evaluate`](Self::evaluate), for call sites where the owner may
    /// be missing from the route or payload. No owner means `Deny`.
    pub fn evaluate_owner(
        &self,
        principal: &Principal,
        owner: Option<&AccountId>,
    ) -> AccessDecision {
        match owner {
            Some(owner) => self.evaluate(principal, owner),
            None => AccessDecision::Deny,
        }
    }

    /// Decide access for an arbitrary resource through a per-type owner-id
    /// extractor, keeping the engine itself resource-type-agnostic.
    pub fn evaluate_resource<R>(
        &self,
        principal: &Principal,
        resource: &R,
        owner_of: impl Fn(&R) -> Option<AccountId>,
    ) -> AccessDecision {
        self.evaluate_owner(principal, owner_of(resource).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use uuid::Uuid;

    fn account_id(seed: u64) -> AccountId {
        Uuid::from_u64_pair(seed, !seed)
            .to_string()
            .parse()
            .unwrap()
    }

    fn policy() -> AccessPolicy {
        AccessPolicy::new([Role::Provider, Role::Admin])
    }

    #[test]
    fn test_owner_is_allowed() {
        let owner = AccountId::new();
        let principal = Principal::new(owner, [Role::Patient]);
        assert_eq!(policy().evaluate(&principal, &owner), AccessDecision::Allow);
    }

    #[test]
    fn test_non_owner_without_override_is_denied() {
        let principal = Principal::new(AccountId::new(), [Role::Patient]);
        let other = AccountId::new();
        assert_eq!(policy().evaluate(&principal, &other), AccessDecision::Deny);
    }

    #[test]
    fn test_override_role_allows_regardless_of_ownership() {
        let principal = Principal::new(AccountId::new(), [Role::Provider]);
        let other = AccountId::new();
        assert_eq!(policy().evaluate(&principal, &other), AccessDecision::Allow);
    }

    #[test]
    fn test_role_outside_override_list_does_not_override() {
        let principal = Principal::new(AccountId::new(), [Role::Nurse]);
        let other = AccountId::new();
        assert_eq!(policy().evaluate(&principal, &other), AccessDecision::Deny);
    }

    #[test]
    fn test_missing_owner_fails_closed() {
        let principal = Principal::new(AccountId::new(), [Role::Patient]);
        assert_eq!(
            policy().evaluate_owner(&principal, None),
            AccessDecision::Deny
        );
    }

    #[test]
    fn test_missing_owner_fails_closed_even_for_override_role() {
        // The extractor coming up empty is a malformed request, not a
        // decidable ownership question.
        let principal = Principal::new(AccountId::new(), [Role::Admin]);
        assert_eq!(
            policy().evaluate_owner(&principal, None),
            AccessDecision::Deny
        );
    }

    #[test]
    fn test_extractor_drives_resource_evaluation() {
        struct MedicalRecord {
            patient_id: AccountId,
        }

        let patient = AccountId::new();
        let record = MedicalRecord {
            patient_id: patient,
        };
        let principal = Principal::new(patient, [Role::Patient]);

        let decision =
            policy().evaluate_resource(&principal, &record, |r| Some(r.patient_id));
        assert_eq!(decision, AccessDecision::Allow);
    }

    #[quickcheck]
    fn prop_decision_matches_ownership_rule(
        subject_seed: u64,
        owner_seed: u64,
        has_override: bool,
    ) -> bool {
        let subject = account_id(subject_seed);
        let owner = account_id(owner_seed);
        let roles = if has_override {
            vec![Role::Patient, Role::Admin]
        } else {
            vec![Role::Patient]
        };
        let principal = Principal::new(subject, roles);

        let expected = if has_override || subject == owner {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        };
        policy().evaluate(&principal, &owner) == expected
    }
}
