use crate::{DenyReason, GateDecision};

/// Query-parameter gate: access iff the parameter equals a fixed literal.
///
/// The comparison is on the raw string, never on a parsed number, so `024`,
/// `24.0` or `24 ` are all rejected. That exactness is the point of the demo.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccessGate {
    pub param: &'static str,
    pub expected: &'static str,
}

impl AccessGate {
    /// The `/conditional.html?value=24` gate.
    pub const VALUE_24: AccessGate = AccessGate {
        param: "value",
        expected: "24",
    };

    pub fn check(&self, value: Option<&str>) -> GateDecision {
        if value == Some(self.expected) {
            GateDecision::Granted
        } else {
            GateDecision::Denied(DenyReason::WrongValue)
        }
    }
}
