//! Cause resolution for host-dispatch faults.
//!
//! Calling a user-exposed function or method goes through a generic
//! invocation mechanism, and the error that comes back out is a wrapper
//! around whatever the callable actually raised. Diagnostics must never
//! report the plumbing as the cause, so every cause passes through
//! [`unwrap_cause`] exactly once, at construction.

use std::error::Error;
use std::fmt;

/// Boxed fault stored as a diagnostic's cause.
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Error raised inside an invoked host callable, re-wrapped by the dispatch
/// machinery.
#[derive(Debug, thiserror::Error)]
#[error("host invocation raised: {0}")]
pub struct InvocationError(#[source] pub Cause);

/// Error smuggled through a host interface adapter that only passes declared
/// fault types.
#[derive(Debug, thiserror::Error)]
#[error("undeclared host fault: {0}")]
pub struct BridgeError(#[source] pub Cause);

/// Resolves a host-dispatch wrapper to the fault it carries.
///
/// Either wrapper kind yields its inner error; anything else passes through
/// unchanged. Wrap depth is one by construction, so the result is never a
/// wrapper itself.
pub fn unwrap_cause(fault: Cause) -> Cause {
    let fault = match fault.downcast::<InvocationError>() {
        Ok(wrapped) => return wrapped.0,
        Err(fault) => fault,
    };
    match fault.downcast::<BridgeError>() {
        Ok(wrapped) => wrapped.0,
        Err(fault) => fault,
    }
}

/// Marker fault evaluation code attaches when an operator failed on a null
/// operand, instead of allocating a dedicated error kind.
///
/// Checked by type identity, never by message text: an unrelated error that
/// happens to print the same words does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullOperand;

impl fmt::Display for NullOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null operand")
    }
}

impl Error for NullOperand {}

/// The shared marker value; import this rather than constructing ad hoc.
pub const NULL_OPERAND: NullOperand = NullOperand;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("division by zero")]
    struct Arithmetic;

    #[test]
    fn invocation_wrapper_unwraps_to_target_fault() {
        let wrapped: Cause = Box::new(InvocationError(Box::new(Arithmetic)));
        let resolved = unwrap_cause(wrapped);
        assert!(resolved.downcast_ref::<Arithmetic>().is_some());
    }

    #[test]
    fn bridge_wrapper_unwraps_to_target_fault() {
        let wrapped: Cause = Box::new(BridgeError(Box::new(Arithmetic)));
        let resolved = unwrap_cause(wrapped);
        assert!(resolved.downcast_ref::<Arithmetic>().is_some());
    }

    #[test]
    fn non_wrapper_passes_through_unchanged() {
        let plain: Cause = Box::new(Arithmetic);
        let resolved = unwrap_cause(plain);
        assert!(resolved.downcast_ref::<Arithmetic>().is_some());
        // A second pass is a no-op.
        let resolved = unwrap_cause(resolved);
        assert!(resolved.downcast_ref::<Arithmetic>().is_some());
    }

    #[test]
    fn null_operand_matches_by_type_not_text() {
        #[derive(Debug, thiserror::Error)]
        #[error("null operand")]
        struct Impostor;

        let marker: Cause = Box::new(NULL_OPERAND);
        let impostor: Cause = Box::new(Impostor);
        assert!(marker.downcast_ref::<NullOperand>().is_some());
        assert!(impostor.downcast_ref::<NullOperand>().is_none());
        assert_eq!(marker.to_string(), impostor.to_string());
    }
}
