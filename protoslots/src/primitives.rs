use std::{any::Any, fmt, sync::Arc};

use crate::{Error, Object, Result};

/// Name of the slot `send_message_with_parameters` binds its argument to.
pub const PARAMETER_SLOT: &str = "parameter";

/// Structured payload supplied by the host.
///
/// Implemented for every `Display + Debug` type that can cross threads.
pub trait HostValue: Any + fmt::Display + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> HostValue for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque host data embedded in an object.
///
/// The engine never inspects a payload, it only carries it across copies
/// and renders it.
#[derive(Debug, Clone)]
pub enum PrimitiveValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Arc<str>),
    Host(Arc<dyn HostValue>),
}

impl PrimitiveValue {
    pub fn host(value: impl HostValue) -> Self {
        PrimitiveValue::Host(Arc::new(value))
    }

    pub fn as_host(&self) -> Option<&Arc<dyn HostValue>> {
        match self {
            PrimitiveValue::Host(value) => Some(value),
            _ => None,
        }
    }

    pub fn downcast_ref<T: HostValue>(&self) -> Option<&T> {
        // deref past the Arc, which is itself a HostValue
        let host: &dyn HostValue = &**self.as_host()?;
        host.as_any().downcast_ref::<T>()
    }
}

// host payloads compare by identity
impl PartialEq for PrimitiveValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PrimitiveValue::Boolean(a), PrimitiveValue::Boolean(b)) => a == b,
            (PrimitiveValue::Integer(a), PrimitiveValue::Integer(b)) => a == b,
            (PrimitiveValue::Float(a), PrimitiveValue::Float(b)) => a == b,
            (PrimitiveValue::String(a), PrimitiveValue::String(b)) => a == b,
            (PrimitiveValue::Host(a), PrimitiveValue::Host(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Boolean(value) => write!(f, "{value}"),
            PrimitiveValue::Integer(value) => write!(f, "{value}"),
            // keeps the fractional part of whole numbers, `1.0` not `1`
            PrimitiveValue::Float(value) => write!(f, "{value:?}"),
            PrimitiveValue::String(value) => f.write_str(value),
            PrimitiveValue::Host(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for PrimitiveValue {
    fn from(value: bool) -> Self {
        PrimitiveValue::Boolean(value)
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        PrimitiveValue::Integer(value)
    }
}

impl From<i32> for PrimitiveValue {
    fn from(value: i32) -> Self {
        PrimitiveValue::Integer(value.into())
    }
}

impl From<f64> for PrimitiveValue {
    fn from(value: f64) -> Self {
        PrimitiveValue::Float(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::String(value.into())
    }
}

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::String(value.into())
    }
}

impl From<Arc<dyn HostValue>> for PrimitiveValue {
    fn from(value: Arc<dyn HostValue>) -> Self {
        PrimitiveValue::Host(value)
    }
}

type NativeFn = dyn Fn(Object) -> Result<Object> + Send + Sync;

/// Native behavior embedded in an object.
///
/// Called with a copy of the receiver; arguments arrive in the copy's
/// [`PARAMETER_SLOT`].
#[derive(Clone)]
pub struct PrimitiveFunction(Arc<NativeFn>);

impl PrimitiveFunction {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(Object) -> Result<Object> + Send + Sync + 'static,
    {
        Self(Arc::new(function))
    }

    #[inline]
    pub fn call(&self, receiver: Object) -> Result<Object> {
        (self.0)(receiver)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PrimitiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrimitiveFunction")
    }
}

/// The argument bound by `send_message_with_parameters`.
pub fn parameter(receiver: &Object) -> Result<Object> {
    receiver
        .slot(PARAMETER_SLOT)
        .ok_or_else(|| Error::SlotNotFound(PARAMETER_SLOT.to_string()))
}
