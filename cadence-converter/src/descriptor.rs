//! Runtime descriptions of expected argument types.
//!
//! Rust generics are monomorphized, so the concrete type parameter already
//! carries its full generic shape. A [`TypeDescriptor`] only records what the
//! codec needs at runtime: the type name used for fallback routing and error
//! reports, and whether the type is the unit marker or a primitive with a
//! canonical zero value.

use std::any::type_name;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

const UNIT_TYPE: &str = "()";

const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Category of an expected type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// The "no value" marker `()`
    Unit,
    /// bool, char and the numeric primitives
    Primitive,
    /// Everything else
    Reference,
}

/// Expected type of a single argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe the type `T`
    pub fn of<T: ?Sized>() -> Self {
        let name = type_name::<T>();
        let kind = if name == UNIT_TYPE {
            TypeKind::Unit
        } else if PRIMITIVE_TYPES.contains(&name) {
            TypeKind::Primitive
        } else {
            TypeKind::Reference
        };
        Self { name, kind }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_unit(&self) -> bool {
        self.kind == TypeKind::Unit
    }

    /// The tree node standing in for an absent argument of this type.
    ///
    /// Primitives get their canonical zero, everything else gets `null`.
    pub fn zero_node(&self) -> Value {
        match (self.kind, self.name) {
            (TypeKind::Primitive, "bool") => Value::Bool(false),
            (TypeKind::Primitive, "char") => Value::String("\0".to_string()),
            (TypeKind::Primitive, "f32" | "f64") => Value::from(0.0),
            (TypeKind::Primitive, _) => Value::from(0),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Name of the type behind any number of references, so that `&T` is
/// routed like `T`.
pub fn referent_name(mut name: &'static str) -> &'static str {
    loop {
        if let Some(rest) = name.strip_prefix("&mut ") {
            name = rest;
        } else if let Some(rest) = name.strip_prefix('&') {
            name = rest;
        } else {
            return name;
        }
    }
}

/// Zero value of `T` for an argument missing from the payload.
///
/// Returns `None` when `T` cannot represent the zero node, e.g. a `String`
/// cannot be null.
pub(crate) fn zero_value<T: DeserializeOwned>() -> Option<T> {
    serde_json::from_value(TypeDescriptor::of::<T>().zero_node()).ok()
}
