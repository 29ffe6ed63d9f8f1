//! Domain models shared by the manager, the policy hooks and the host adapter.

pub mod decision;
pub mod guild;

pub use decision::{AuditReport, Decision, LeaveOrigin, LeaveReason};
pub use guild::{GuildSnapshot, MemberInfo};

#[cfg(test)]
mod test;
