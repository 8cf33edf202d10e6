//! Flattening serde values into dash entries.
//!
//! This module provides the [`Serializer`] that turns any `T: Serialize`
//! into a [`DashDb`] by applying the format's transformation rule:
//!
//! - struct fields and map keys become name segments
//! - sequence and tuple positions become index segments
//! - scalars become values at the key built so far
//! - `None` and unit values produce no entry
//! - unit variants store their name; newtype, tuple and struct variants
//!   nest under their name
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use dashdb::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Kernel { name: String, partitioning: char }
//!
//! #[derive(Serialize)]
//! struct Program { kernels: Vec<Kernel> }
//!
//! let program = Program {
//!     kernels: vec![
//!         Kernel { name: "update_positions".to_string(), partitioning: 'x' },
//!         Kernel { name: "update_speed".to_string(), partitioning: 'x' },
//!     ],
//! };
//!
//! assert_eq!(
//!     to_string(&program).unwrap(),
//!     "kernels-0-name=update_positions\n\
//!      kernels-0-partitioning=x\n\
//!      kernels-1-name=update_speed\n\
//!      kernels-1-partitioning=x\n"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use dashdb::{DashOptions, Serializer};
//! use serde::Serialize;
//! use std::collections::BTreeMap;
//!
//! let mut serializer = Serializer::new(DashOptions::new());
//! let mut data = BTreeMap::new();
//! data.insert("tags", vec!["a", "b"]);
//! data.serialize(&mut serializer).unwrap();
//!
//! let db = serializer.into_inner();
//! assert_eq!(db.key("tags").length(), 2);
//! ```

use crate::key::KeyPath;
use crate::value::ToDashValue;
use crate::{DashDb, DashOptions, Error, Result};
use serde::ser::{self, Impossible, SerializeMap as _};
use serde::Serialize;

/// The flattening serializer.
///
/// Created via [`Serializer::new`]; the filled store is taken out with
/// [`Serializer::into_inner`].
pub struct Serializer {
    db: DashDb,
    path: KeyPath,
}

impl Serializer {
    pub fn new(options: DashOptions) -> Self {
        Serializer {
            db: DashDb::with_options(options),
            path: KeyPath::new(),
        }
    }

    pub fn into_inner(self) -> DashDb {
        self.db
    }

    fn write_value<V: ToDashValue>(&mut self, value: V) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::custom(
                "a top-level value must be a struct, map or sequence",
            ));
        }
        self.db.store(self.path.clone(), value.to_dash_value())
    }

    fn nested<P, F>(&mut self, push: P, f: F) -> Result<()>
    where
        P: FnOnce(&mut KeyPath),
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let parent = self.path.clone();
        push(&mut self.path);
        let result = f(self);
        self.path = parent;
        result
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_value(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        let mut seq = Compound::new(self, None);
        for byte in v {
            seq.element(byte)?;
        }
        seq.finish()
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write_value(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.nested(|path| path.push_name(variant), |ser| value.serialize(ser))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Compound::new(self, None))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let parent = self.path.clone();
        self.path.push_name(variant);
        Ok(Compound::new(self, Some(parent)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Compound::new(self, None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(Compound::new(self, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let parent = self.path.clone();
        self.path.push_name(variant);
        Ok(Compound::new(self, Some(parent)))
    }
}

/// State shared by every compound value: the next list index, a map key
/// waiting for its value, and the key to restore once a variant is done.
pub struct Compound<'a> {
    ser: &'a mut Serializer,
    next_index: usize,
    pending_key: Option<String>,
    restore: Option<KeyPath>,
}

impl<'a> Compound<'a> {
    fn new(ser: &'a mut Serializer, restore: Option<KeyPath>) -> Self {
        Compound {
            ser,
            next_index: 0,
            pending_key: None,
            restore,
        }
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let index = self.next_index;
        self.next_index += 1;
        self.ser
            .nested(|path| path.push_index(index), |ser| value.serialize(ser))
    }

    fn field<T>(&mut self, name: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser
            .nested(|path| path.push_name(name), |ser| value.serialize(ser))
    }

    fn finish(self) -> Result<()> {
        if let Some(parent) = self.restore {
            self.ser.path = parent;
        }
        Ok(())
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(&key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Renders map keys as name segments.
struct MapKeySerializer;

fn key_must_be_scalar() -> Error {
    Error::custom("map keys must be strings, characters, booleans or integers")
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_scalar())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_scalar())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_scalar())
    }
}

/// A store serializes as a map of its entries, sorted by key.
impl Serialize for DashDb {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.entries().sorted() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
