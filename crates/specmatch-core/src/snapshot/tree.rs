//! Tagged value tree built from any `Serialize` value.
//!
//! `serde` is the introspection facility: a record describes its own shape
//! to [`NodeSerializer`], which keeps what a JSON tree would lose and the
//! flattener needs: the static type name of each record and the native width
//! of each scalar.

use crate::errors::{Result, SpecMatchError};
use crate::snapshot::leaf::{Kind, LeafValue};
use serde::ser::{self, Serialize};

/// One node of the tagged value tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// `None`, `()` or a unit struct: contributes no leaves
    Absent,
    Leaf(LeafValue, Kind),
    Record {
        type_name: &'static str,
        fields: Vec<(String, Node)>,
    },
    List(Vec<Node>),
    /// Entries whose key has no text form carry `None` and are not comparable
    Map(Vec<(Option<String>, Node)>),
}

impl Node {
    /// Scalar stored under `field` if this node is a record or map.
    pub(crate) fn field_value(&self, field: &str) -> Option<&LeafValue> {
        let child = match self {
            Node::Record { fields, .. } => fields
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(field))
                .map(|(_, node)| node),
            Node::Map(entries) => entries
                .iter()
                .find(|(key, _)| key.as_deref() == Some(field))
                .map(|(_, node)| node),
            _ => None,
        }?;
        match child {
            Node::Leaf(value, _) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> Option<&'static str> {
        match self {
            Node::Record { type_name, .. } => Some(*type_name),
            _ => None,
        }
    }
}

/// Serialize `value` into a [`Node`] tree.
pub(crate) fn to_tree<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    value.serialize(NodeSerializer)
}

fn leaf(value: LeafValue, kind: Kind) -> Result<Node> {
    Ok(Node::Leaf(value, kind))
}

/// Wraps `inner` under a variant segment, mirroring serde's external tagging.
fn tagged(type_name: &'static str, variant: &'static str, inner: Node) -> Node {
    Node::Record {
        type_name,
        fields: vec![(variant.to_string(), inner)],
    }
}

pub(crate) struct NodeSerializer;

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = SpecMatchError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        leaf(LeafValue::Bool(v), Kind::Bool)
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        leaf(LeafValue::Int(v.into()), Kind::Int8)
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        leaf(LeafValue::Int(v.into()), Kind::Int16)
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        leaf(LeafValue::Int(v.into()), Kind::Int32)
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        leaf(LeafValue::Int(v.into()), Kind::Int64)
    }

    fn serialize_i128(self, v: i128) -> Result<Node> {
        leaf(LeafValue::Int(v), Kind::Int128)
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        leaf(LeafValue::Uint(v.into()), Kind::Uint8)
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        leaf(LeafValue::Uint(v.into()), Kind::Uint16)
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        leaf(LeafValue::Uint(v.into()), Kind::Uint32)
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        leaf(LeafValue::Uint(v.into()), Kind::Uint64)
    }

    fn serialize_u128(self, v: u128) -> Result<Node> {
        leaf(LeafValue::Uint(v), Kind::Uint128)
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        leaf(LeafValue::Float(v.into()), Kind::Float32)
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        leaf(LeafValue::Float(v), Kind::Float64)
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        leaf(LeafValue::Char(v), Kind::Char)
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        leaf(LeafValue::String(v.to_string()), Kind::String)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        leaf(LeafValue::Bytes(v.to_vec()), Kind::Bytes)
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::Absent)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Node> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        Ok(Node::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Node> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node> {
        Ok(tagged(name, variant, value.serialize(NodeSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name,
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or_default()),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord {
            type_name: name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name,
            variant,
            fields: Vec::with_capacity(len),
        })
    }
}

pub(crate) struct SerializeList {
    items: Vec<Node>,
}

impl SerializeList {
    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::List(self.items))
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::List(self.items))
    }
}

pub(crate) struct SerializeTupleVariant {
    name: &'static str,
    variant: &'static str,
    items: Vec<Node>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(tagged(self.name, self.variant, Node::List(self.items)))
    }
}

pub(crate) struct SerializeMap {
    entries: Vec<(Option<String>, Node)>,
    pending_key: Option<Option<String>>,
}

/// Map keys are serialized like any value; only scalars have a text form.
fn key_text<T: Serialize + ?Sized>(key: &T) -> Result<Option<String>> {
    Ok(match key.serialize(NodeSerializer)? {
        Node::Leaf(value, _) => value.as_key(),
        _ => None,
    })
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(key_text(key)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| <SpecMatchError as ser::Error>::custom("map value without a key"))?;
        self.entries.push((key, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Map(self.entries))
    }
}

pub(crate) struct SerializeRecord {
    type_name: &'static str,
    fields: Vec<(String, Node)>,
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.fields
            .push((key.to_string(), value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Record {
            type_name: self.type_name,
            fields: self.fields,
        })
    }
}

pub(crate) struct SerializeStructVariant {
    name: &'static str,
    variant: &'static str,
    fields: Vec<(String, Node)>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Node;
    type Error = SpecMatchError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.fields
            .push((key.to_string(), value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        let inner = Node::Record {
            type_name: self.variant,
            fields: self.fields,
        };
        Ok(tagged(self.name, self.variant, inner))
    }
}
