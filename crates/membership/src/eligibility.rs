//! Eligibility gate for deluxe enrollment

use orchard_shared::{MembershipStatus, UserRole};

use crate::error::{MembershipError, MembershipResult};

/// Which roles are barred from enrolling. A pre-enrollment gate only:
/// an existing member is reported as a member regardless of role.
#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    ineligible_roles: Vec<UserRole>,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            ineligible_roles: vec![UserRole::Admin, UserRole::Accountant],
        }
    }
}

impl EligibilityPolicy {
    pub fn new(ineligible_roles: Vec<UserRole>) -> Self {
        Self { ineligible_roles }
    }

    /// Decide whether an upgrade attempt may proceed.
    ///
    /// The already-member check runs first: the two rejections carry
    /// distinct client-facing messages, and a member is reported as
    /// such even when their role would bar fresh enrollment. Pure
    /// function of the passed state; no side effects.
    pub fn check(&self, role: UserRole, status: MembershipStatus) -> MembershipResult<()> {
        if status.is_deluxe() {
            return Err(MembershipError::AlreadyMember);
        }
        if self.ineligible_roles.contains(&role) {
            return Err(MembershipError::IneligibleRole);
        }
        Ok(())
    }
}
