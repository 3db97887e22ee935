//! Types routed to the fallback converter.

use std::any::type_name;
use std::collections::HashSet;
use std::sync::Arc;

use crate::marker::LocalActivityMarkerHeader;

/// Read-only set of type names that are always handled by the fallback
/// converter.
///
/// Names are matched exactly against [`std::any::type_name`]. Cloning is
/// cheap and the set cannot be changed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSet {
    names: Arc<HashSet<String>>,
}

impl FallbackSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// A set that routes nothing to the fallback converter
    pub fn none() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Name of the local activity marker header written by other clients
    pub fn default_type_names() -> Vec<String> {
        vec![type_name::<LocalActivityMarkerHeader>().to_string()]
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    /// Whether values of type `T` go through the fallback converter
    pub fn routes<T: ?Sized>(&self) -> bool {
        self.contains(type_name::<T>())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for FallbackSet {
    fn default() -> Self {
        Self::new(Self::default_type_names())
    }
}
