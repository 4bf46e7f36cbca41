//! Route access policies evaluated against the session identity.
//!
//! A policy either requires a bound identity, restricts roles, or both. The
//! login check always runs first so an anonymous request never reaches a
//! role comparison.

use super::{Role, SessionIdentity};

/// Result of evaluating a policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Anonymous request on a login-guarded route.
    RedirectToLogin,
    /// Identity missing or role outside the allowed set.
    Forbidden,
}

/// Access rule attached to a route.
///
/// # Examples
/// ```
/// use clinic_backend::domain::{AccessDecision, AccessPolicy, Role, SessionIdentity, UserId};
///
/// let medico = SessionIdentity {
///     user_id: UserId::new(1),
///     username: "jdoe".into(),
///     role: Role::Medico,
/// };
/// let policy = AccessPolicy::login().require_role(Role::Admin);
/// assert_eq!(policy.evaluate(Some(&medico)), AccessDecision::Forbidden);
/// assert_eq!(policy.evaluate(None), AccessDecision::RedirectToLogin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    login: bool,
    roles: Option<Vec<Role>>,
}

impl AccessPolicy {
    /// Only requires a bound identity.
    pub fn login() -> Self {
        Self {
            login: true,
            roles: None,
        }
    }

    /// Role restriction without the login redirect: anonymous requests are
    /// forbidden rather than redirected.
    pub fn roles_only(roles: &[Role]) -> Self {
        Self {
            login: false,
            roles: Some(roles.to_vec()),
        }
    }

    /// Restrict to exactly one role.
    pub fn require_role(self, role: Role) -> Self {
        self.allow_roles(&[role])
    }

    /// Restrict to a set of roles. An empty set denies everyone.
    pub fn allow_roles(mut self, roles: &[Role]) -> Self {
        self.roles = Some(roles.to_vec());
        self
    }

    pub fn evaluate(&self, identity: Option<&SessionIdentity>) -> AccessDecision {
        let Some(identity) = identity else {
            return if self.login {
                AccessDecision::RedirectToLogin
            } else {
                AccessDecision::Forbidden
            };
        };
        match &self.roles {
            None => AccessDecision::Allow,
            Some(roles) if roles.contains(&identity.role) => AccessDecision::Allow,
            Some(_) => AccessDecision::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    fn identity(role: Role) -> SessionIdentity {
        SessionIdentity {
            user_id: UserId::new(1),
            username: "someone".into(),
            role,
        }
    }

    #[rstest]
    #[case(Role::Admin, AccessDecision::Allow)]
    #[case(Role::Medico, AccessDecision::Forbidden)]
    #[case(Role::Patient, AccessDecision::Forbidden)]
    fn require_admin(#[case] role: Role, #[case] expected: AccessDecision) {
        let policy = AccessPolicy::login().require_role(Role::Admin);
        assert_eq!(policy.evaluate(Some(&identity(role))), expected);
    }

    #[rstest]
    #[case(Role::Admin, AccessDecision::Allow)]
    #[case(Role::Medico, AccessDecision::Allow)]
    #[case(Role::Patient, AccessDecision::Forbidden)]
    fn allow_staff(#[case] role: Role, #[case] expected: AccessDecision) {
        let policy = AccessPolicy::login().allow_roles(&[Role::Admin, Role::Medico]);
        assert_eq!(policy.evaluate(Some(&identity(role))), expected);
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::Medico)]
    #[case(Role::Patient)]
    fn empty_role_set_denies_everyone(#[case] role: Role) {
        let policy = AccessPolicy::login().allow_roles(&[]);
        assert_eq!(
            policy.evaluate(Some(&identity(role))),
            AccessDecision::Forbidden
        );
    }

    #[test]
    fn login_only_admits_any_role() {
        assert_eq!(
            AccessPolicy::login().evaluate(Some(&identity(Role::Patient))),
            AccessDecision::Allow
        );
    }

    #[test]
    fn anonymous_requests_redirect_before_role_check() {
        let policy = AccessPolicy::login().allow_roles(&[]);
        assert_eq!(policy.evaluate(None), AccessDecision::RedirectToLogin);
    }

    #[test]
    fn roles_only_forbids_anonymous_requests() {
        let policy = AccessPolicy::roles_only(&[Role::Admin, Role::Medico]);
        assert_eq!(policy.evaluate(None), AccessDecision::Forbidden);
        assert_eq!(
            policy.evaluate(Some(&identity(Role::Medico))),
            AccessDecision::Allow
        );
    }
}
