//! Test properties for trellis.
//!
//! Properties attach named values to a test node. A property name can carry
//! more than one value, and both the names and the values under a name keep
//! their insertion order. This is what lets callers express things like an
//! execution priority or a thread affinity without the tree model having to
//! know about every possible annotation upfront.
//!
//! The names the crate itself interprets live in [`keys`].

use std::borrow::Cow;

/// Property names the crate interprets.
pub mod keys {
    /// Execution priority of a test within its parent suite.
    ///
    /// Expected to hold an integer value. Tests carrying this property are
    /// placed before their unordered siblings, ascending by value.
    pub const ORDER: &str = "Order";

    /// Thread affinity requirement of a test.
    ///
    /// Expected to hold `"main"` or `"dedicated"`.
    pub const THREAD_AFFINITY: &str = "ThreadAffinity";
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Int(i64),
    Str(Cow<'static, str>),
    Bool(bool),
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&'static str> for PropertyValue {
    fn from(value: &'static str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An ordered multimap from property names to lists of values.
///
/// Lookups are linear over the stored entries. Property bags are tiny in
/// practice, so this keeps the type free of hashing requirements while
/// preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(Cow<'static, str>, Vec<PropertyValue>)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the list stored under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<PropertyValue>,
    ) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.0.push((name, vec![value.into()])),
        }
    }

    /// Builder-style [`Self::insert`].
    pub fn with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.insert(name, value);
        self
    }

    /// All values stored under `name`, in insertion order.
    pub fn values(&self, name: &str) -> &[PropertyValue] {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// The first value stored under `name`.
    pub fn first(&self, name: &str) -> Option<&PropertyValue> {
        self.values(name).first()
    }

    /// The first value stored under `name`, if it is an integer.
    pub fn first_int(&self, name: &str) -> Option<i64> {
        match self.first(name)? {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The first value stored under `name`, if it is a string.
    pub fn first_str(&self, name: &str) -> Option<&str> {
        match self.first(name)? {
            PropertyValue::Str(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Whether `name` is present with at least one value.
    pub fn contains(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
