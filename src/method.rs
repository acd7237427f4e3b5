//! Runnable methods for trellis.
//!
//! The builder never invokes anything itself, but the work items it produces
//! have to be executable by whatever engine walks them later. A
//! [`MethodDescriptor`] therefore pairs a method name with a callable
//! [`MethodHandle`] so that a leaf work item is self-contained: the engine
//! reads the handle off the target test and calls it.
//!
//! How a method body is resolved (reflection, registration macros, manual
//! tables) is up to the caller; this crate only stores the handle.

use std::{borrow::Cow, fmt::Debug, panic::RefUnwindSafe};

/// A descriptor for a runnable method declared by the caller.
///
/// Descriptors are shared: the declared test node and any node the
/// synthesizer fabricates for the same method both reference one
/// descriptor.
#[derive(Debug, Default)]
pub struct MethodDescriptor {
    pub name: Cow<'static, str>,
    pub handle: MethodHandle,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, handle: MethodHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// A handle to a method body.
#[non_exhaustive]
pub enum MethodHandle {
    Ptr(fn() -> MethodResult),
    Owned(Box<dyn TestMethod + Send + Sync + RefUnwindSafe>),
    Static(&'static (dyn TestMethod + Send + Sync + RefUnwindSafe)),
}

impl Debug for MethodHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ptr(ptr) => f.debug_tuple("Ptr").field(ptr).finish(),
            Self::Owned(_) => write!(f, "Owned(...)"),
            Self::Static(_) => write!(f, "Static(...)"),
        }
    }
}

impl Default for MethodHandle {
    fn default() -> Self {
        Self::Static(&|| {})
    }
}

impl MethodHandle {
    pub const fn from_const_fn(f: fn() -> MethodResult) -> Self {
        Self::Ptr(f)
    }

    pub fn from_boxed<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<MethodResult>,
    {
        Self::Owned(Box::new(f))
    }

    pub const fn from_static_obj(f: &'static (dyn TestMethod + Send + Sync + RefUnwindSafe)) -> Self {
        Self::Static(f)
    }

    pub fn call(&self) -> MethodResult {
        match self {
            Self::Ptr(f) => f(),
            Self::Owned(f) => f.call_method(),
            Self::Static(f) => f.call_method(),
        }
    }
}

pub trait TestMethod {
    fn call_method(&self) -> MethodResult;
}

impl<F, T> TestMethod for F
where
    F: Fn() -> T,
    T: Into<MethodResult>,
{
    fn call_method(&self) -> MethodResult {
        (self)().into()
    }
}

/// The result of invoking a method body.
#[derive(Debug)]
pub struct MethodResult(pub Result<(), Box<str>>);

impl From<()> for MethodResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Debug> From<Result<(), E>> for MethodResult {
    fn from(v: Result<(), E>) -> Self {
        MethodResult(v.map_err(|e| format!("{e:#?}").into_boxed_str()))
    }
}
