//! Error and control-flow signaling.
//!
//! Break/continue/return all ride the same `Result` channel as real
//! errors, caught selectively at loop/function boundaries — the same
//! `EvalError{ control_flow: Option<ControlFlow>, .. }` shape the teacher
//! uses to avoid a second, parallel propagation mechanism for non-local
//! control transfer.

use crate::value::Value;
use jsi_ir::{Name, Span};

pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug)]
pub enum ControlFlow {
    Break(Option<Name>),
    Continue(Option<Name>),
    Return(Value),
}

/// The error taxonomy named by the error-handling design.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    SyntaxError,
    TypeError,
    ReferenceError,
    RangeError,
    /// A value thrown by interpreted code (`throw <expr>`); carries an
    /// arbitrary `Value`, not just a string.
    UserThrown,
    /// Recursion budget or wall-clock deadline exceeded. Not catchable by
    /// interpreted `try`/`catch` — it unwinds past every handler.
    ResourceExhausted,
}

#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
    /// The thrown value, set only for `UserThrown` (an interpreted
    /// `throw` can throw any value, not just a string).
    pub propagated_value: Option<Value>,
    /// Set instead of `kind`'s usual meaning when this "error" is
    /// actually break/continue/return propagating out of a statement.
    pub control_flow: Option<ControlFlow>,
    pub span: Option<Span>,
}

impl EvalError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            propagated_value: None,
            control_flow: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn break_signal(label: Option<Name>) -> Self {
        EvalError {
            kind: ErrorKind::UserThrown,
            message: String::new(),
            propagated_value: None,
            control_flow: Some(ControlFlow::Break(label)),
            span: None,
        }
    }

    #[must_use]
    pub fn continue_signal(label: Option<Name>) -> Self {
        EvalError {
            kind: ErrorKind::UserThrown,
            message: String::new(),
            propagated_value: None,
            control_flow: Some(ControlFlow::Continue(label)),
            span: None,
        }
    }

    #[must_use]
    pub fn return_signal(value: Value) -> Self {
        EvalError {
            kind: ErrorKind::UserThrown,
            message: String::new(),
            propagated_value: None,
            control_flow: Some(ControlFlow::Return(value)),
            span: None,
        }
    }

    #[must_use]
    pub fn user_thrown(value: Value) -> Self {
        EvalError {
            kind: ErrorKind::UserThrown,
            message: String::new(),
            propagated_value: Some(value),
            control_flow: None,
            span: None,
        }
    }

    #[must_use]
    pub const fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }

    /// Whether interpreted `catch` may intercept this error at all
    /// (spec: `ResourceExhausted` is the one kind that unwinds past every
    /// handler).
    #[must_use]
    pub const fn is_catchable(&self) -> bool {
        !matches!(self.kind, ErrorKind::ResourceExhausted) && self.control_flow.is_none()
    }
}

#[cold]
#[must_use]
pub fn syntax_error(message: impl Into<String>, span: Span) -> EvalError {
    EvalError::new(ErrorKind::SyntaxError, message).with_span(span)
}

#[cold]
#[must_use]
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ErrorKind::TypeError, message)
}

#[cold]
#[must_use]
pub fn reference_error(name: &str) -> EvalError {
    EvalError::new(ErrorKind::ReferenceError, format!("{name} is not defined"))
}

#[cold]
#[must_use]
pub fn range_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ErrorKind::RangeError, message)
}

#[cold]
#[must_use]
pub fn not_a_function(name: &str) -> EvalError {
    type_error(format!("{name} is not a function"))
}

#[cold]
#[must_use]
pub fn cannot_read_property_of(property: &str, of: &str) -> EvalError {
    type_error(format!("Cannot read properties of {of} (reading '{property}')"))
}

#[cold]
#[must_use]
pub fn invalid_regex(pattern: &str, detail: &str) -> EvalError {
    syntax_error(
        format!("Invalid regular expression: /{pattern}/: {detail}"),
        Span::DUMMY,
    )
}

#[cold]
#[must_use]
pub fn resource_exhausted(message: impl Into<String>) -> EvalError {
    EvalError::new(ErrorKind::ResourceExhausted, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_exhausted_is_never_catchable() {
        let err = resource_exhausted("recursion limit exceeded");
        assert!(!err.is_catchable());
    }

    #[test]
    fn control_flow_is_not_catchable_by_try() {
        let err = EvalError::return_signal(Value::Undefined);
        assert!(!err.is_catchable());
        assert!(err.is_control_flow());
    }

    #[test]
    fn ordinary_type_error_is_catchable() {
        let err = type_error("boom");
        assert!(err.is_catchable());
    }
}
