//! Ordered argument lists.
//!
//! Call arguments have no names, only positions. A list of values to encode
//! is anything implementing [`Arguments`]: `()`, tuples of serializable
//! values and slices or vectors of one serializable type. A list of expected
//! types is a tuple implementing [`ArgumentTypes`].

use std::any::type_name;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::converter::TreeConverter;
use crate::descriptor::{zero_value, TypeDescriptor};
use crate::error::CodecError;

/// Receives the values of an [`Arguments`] list, split by arity.
pub trait ArgumentEncoder {
    type Output;

    /// The list has no values
    fn encode_none(&self) -> Self::Output;

    /// The list has exactly one value
    fn encode_one<T: Serialize + ?Sized>(&self, value: &T) -> Self::Output;

    /// The list has two or more values; `values` serializes as a sequence
    fn encode_many<T: Serialize + ?Sized>(
        &self,
        values: &T,
        type_names: &[&'static str],
    ) -> Self::Output;
}

/// An ordered list of values to encode
pub trait Arguments {
    fn type_names(&self) -> Vec<&'static str>;

    fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output;
}

/// An ordered list of expected argument types
pub trait ArgumentTypes: Sized {
    const ARITY: usize;

    fn descriptors() -> Vec<TypeDescriptor>;

    fn descriptor_names() -> Vec<&'static str> {
        Self::descriptors().iter().map(TypeDescriptor::name).collect()
    }

    /// Build the list from positional tree nodes.
    ///
    /// Missing trailing nodes are replaced by the zero value of their type.
    fn from_nodes<C: TreeConverter>(converter: &C, nodes: Vec<Value>) -> Result<Self, CodecError>;

    /// Decode a payload written for this list
    fn decode<C: TreeConverter>(converter: &C, data: &[u8]) -> Result<Self, CodecError> {
        let root = converter.parse_tree(data)?;
        Self::from_nodes(converter, array_elements(root))
    }
}

/// Elements of an array root; any other root counts as a one-element array.
pub(crate) fn array_elements(root: Value) -> Vec<Value> {
    match root {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn element<T, C>(converter: &C, node: Option<Value>, index: usize) -> Result<T, CodecError>
where
    T: DeserializeOwned,
    C: TreeConverter,
{
    match node {
        Some(node) => converter.convert_node(node),
        None => zero_value::<T>().ok_or(CodecError::MissingArgument {
            index,
            type_name: type_name::<T>(),
        }),
    }
}

impl Arguments for () {
    fn type_names(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output {
        encoder.encode_none()
    }
}

impl ArgumentTypes for () {
    const ARITY: usize = 0;

    fn descriptors() -> Vec<TypeDescriptor> {
        Vec::new()
    }

    fn from_nodes<C: TreeConverter>(_converter: &C, _nodes: Vec<Value>) -> Result<Self, CodecError> {
        Ok(())
    }

    fn decode<C: TreeConverter>(_converter: &C, _data: &[u8]) -> Result<Self, CodecError> {
        Ok(())
    }
}

impl<A: Serialize> Arguments for (A,) {
    fn type_names(&self) -> Vec<&'static str> {
        vec![type_name::<A>()]
    }

    fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output {
        encoder.encode_one(&self.0)
    }
}

impl<A: DeserializeOwned> ArgumentTypes for (A,) {
    const ARITY: usize = 1;

    fn descriptors() -> Vec<TypeDescriptor> {
        vec![TypeDescriptor::of::<A>()]
    }

    fn from_nodes<C: TreeConverter>(converter: &C, nodes: Vec<Value>) -> Result<Self, CodecError> {
        Ok((element::<A, C>(converter, nodes.into_iter().next(), 0)?,))
    }

    // A single argument is never array-wrapped.
    fn decode<C: TreeConverter>(converter: &C, data: &[u8]) -> Result<Self, CodecError> {
        Ok((converter.decode::<A>(data)?,))
    }
}

macro_rules! tuple_arguments {
    ($len:expr => $($name:ident $idx:tt),+) => {
        impl<$($name: Serialize),+> Arguments for ($($name,)+) {
            fn type_names(&self) -> Vec<&'static str> {
                vec![$(type_name::<$name>()),+]
            }

            fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output {
                encoder.encode_many(self, &self.type_names())
            }
        }

        impl<$($name: DeserializeOwned),+> ArgumentTypes for ($($name,)+) {
            const ARITY: usize = $len;

            fn descriptors() -> Vec<TypeDescriptor> {
                vec![$(TypeDescriptor::of::<$name>()),+]
            }

            fn from_nodes<C: TreeConverter>(
                converter: &C,
                nodes: Vec<Value>,
            ) -> Result<Self, CodecError> {
                let mut nodes = nodes.into_iter();
                Ok(($(element::<$name, C>(converter, nodes.next(), $idx)?,)+))
            }
        }
    };
}

tuple_arguments!(2 => A0 0, A1 1);
tuple_arguments!(3 => A0 0, A1 1, A2 2);
tuple_arguments!(4 => A0 0, A1 1, A2 2, A3 3);
tuple_arguments!(5 => A0 0, A1 1, A2 2, A3 3, A4 4);
tuple_arguments!(6 => A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
tuple_arguments!(7 => A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
tuple_arguments!(8 => A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);

impl<T: Serialize> Arguments for [T] {
    fn type_names(&self) -> Vec<&'static str> {
        vec![type_name::<T>(); self.len()]
    }

    fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output {
        match self {
            [] => encoder.encode_none(),
            [value] => encoder.encode_one(value),
            values => encoder.encode_many(values, &self.type_names()),
        }
    }
}

impl<T: Serialize> Arguments for Vec<T> {
    fn type_names(&self) -> Vec<&'static str> {
        self.as_slice().type_names()
    }

    fn encode_with<E: ArgumentEncoder>(&self, encoder: &E) -> E::Output {
        self.as_slice().encode_with(encoder)
    }
}
