//! IAM policy mutation.

use gcf_common::{ALL_USERS, Binding, INVOKER_ROLE, Policy};

/// Append a binding that lets anyone invoke the function.
///
/// The binding is appended unconditionally: applying this twice leaves two
/// identical bindings in the policy. The etag is left as fetched.
pub fn grant_public_invoker(policy: &mut Policy) {
    policy.bindings.push(Binding {
        role: INVOKER_ROLE.to_string(),
        members: vec![ALL_USERS.to_string()],
        condition: None,
    });
}
