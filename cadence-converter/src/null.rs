//! Null detection for values about to be encoded.
//!
//! Only an absent value (`None`, or a reference to one) is null. Values that
//! a converter happens to write as JSON `null`, such as `()`, a unit struct
//! or `serde_json::Value::Null`, are present values and must round-trip.

use std::fmt;

use serde::ser::{self, Impossible, Serialize, Serializer};

/// Whether `value` is the absent value.
pub(crate) fn is_null<T: Serialize + ?Sized>(value: &T) -> bool {
    value.serialize(NullCheck).unwrap_or(false)
}

/// Serializer that answers `true` from `serialize_none` and `false` from
/// every other scalar. Compound values stop at the first call with
/// [`NotNull`].
struct NullCheck;

#[derive(Debug)]
struct NotNull;

impl fmt::Display for NotNull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value is not null")
    }
}

impl std::error::Error for NotNull {}

impl ser::Error for NotNull {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        NotNull
    }
}

impl Serializer for NullCheck {
    type Ok = bool;
    type Error = NotNull;

    type SerializeSeq = Impossible<bool, NotNull>;
    type SerializeTuple = Impossible<bool, NotNull>;
    type SerializeTupleStruct = Impossible<bool, NotNull>;
    type SerializeTupleVariant = Impossible<bool, NotNull>;
    type SerializeMap = Impossible<bool, NotNull>;
    type SerializeStruct = Impossible<bool, NotNull>;
    type SerializeStructVariant = Impossible<bool, NotNull>;

    fn serialize_none(self) -> Result<bool, NotNull> {
        Ok(true)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_bool(self, _v: bool) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_i8(self, _v: i8) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_i16(self, _v: i16) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_i32(self, _v: i32) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_i64(self, _v: i64) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_i128(self, _v: i128) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_u8(self, _v: u8) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_u16(self, _v: u16) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_u32(self, _v: u32) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_u64(self, _v: u64) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_u128(self, _v: u128) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_f32(self, _v: f32) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_f64(self, _v: f64) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_char(self, _v: char) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_str(self, _v: &str) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_unit(self) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _value: &T,
    ) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool, NotNull> {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NotNull> {
        Err(NotNull)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NotNull> {
        Err(NotNull)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, NotNull> {
        Err(NotNull)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NotNull> {
        Err(NotNull)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NotNull> {
        Err(NotNull)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, NotNull> {
        Err(NotNull)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NotNull> {
        Err(NotNull)
    }
}
