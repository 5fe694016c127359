/// Result of comparing a requested resource id with the caller's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Strict equality: a caller may only touch the record that carries its own id.
pub fn authorize(requested_id: i64, caller_id: i64) -> Access {
    if requested_id == caller_id {
        Access::Allow
    } else {
        Access::Deny
    }
}
