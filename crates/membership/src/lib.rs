//! Orchard Membership Engine
//!
//! The decision engine behind the deluxe-membership upgrade: an
//! eligibility gate on role and current membership state, a payment
//! reference validator, and the transactional ledger that commits at
//! most one membership record per user.

pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod payment;

pub use eligibility::EligibilityPolicy;
pub use error::{MembershipError, MembershipResult};
pub use ledger::{MembershipLedger, MEMBERSHIP_COST};
pub use payment::{PaymentId, PaymentReference};
