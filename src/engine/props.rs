//! Property bag - tagged property values in declaration order.
//!
//! The parser hands over properties already typed (string, number, boolean).
//! A property may also reference a state signal directly; the binding
//! resolver turns such references into one-way bindings.

use std::fmt;

use indexmap::IndexMap;

use crate::signal::Signal;

/// Ordered mapping from property name to value.
pub type Props = IndexMap<String, PropValue>;

// =============================================================================
// PropValue
// =============================================================================

/// A typed property value.
#[derive(Clone)]
pub enum PropValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Reference to a state signal.
    Signal(Signal<PropValue>),
}

impl PropValue {
    /// Numeric view of the value.
    ///
    /// Strings are parsed leniently (`"12"`, `" 4.5 "`, `"16px"`); booleans
    /// are not numbers. Signal references read through to the current value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => {
                let trimmed = s.trim();
                let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
                trimmed.trim().parse::<f64>().ok()
            }
            Self::Bool(_) => None,
            Self::Signal(signal) => signal.with(Self::as_number),
        }
    }

    /// String view of the value (only for string values).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view. Accepts `true`/`false` strings as written in markup.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) => match s.trim() {
                "true" | "" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Self::Number(n) => Some(*n != 0.0),
            Self::Signal(signal) => signal.with(Self::as_bool),
        }
    }

    /// Text shown when the value is written into a content slot.
    pub fn to_display(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Signal(signal) => signal.with(Self::to_display),
        }
    }

    /// The value with any signal reference replaced by the signal's current value.
    pub fn resolved(&self) -> PropValue {
        match self {
            Self::Signal(signal) => signal.get(),
            other => other.clone(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Signal(a), Self::Signal(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Signal(_) => f.write_str("Signal(..)"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Signal<PropValue>> for PropValue {
    fn from(value: Signal<PropValue>) -> Self {
        Self::Signal(value)
    }
}
