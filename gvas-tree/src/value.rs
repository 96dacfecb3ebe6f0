use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    Box, Color, Double, FGuid, Float, IntPoint, IntVector, LinearColor, Quat, Rotator, Vector,
    Vector2D,
};

/// A decoded property or collection element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(Float),
    Double(Double),
    Str(String),
    Name(String),
    /// Plain byte, from a `ByteProperty` without an enum type
    Byte(u8),
    Enum { enum_type: String, member: String },
    Object(String),
    SoftObject { path: String, sub_path: String },
    Text(Text),
    Struct(StructValue),
    Array(Vec<Value>),
    Map(Map),
    Set(Vec<Value>),
    /// Type tag the decoder has no rule for; nothing after it at the same
    /// level could be decoded
    Unknown { type_name: String },
}

/// Localized text. Only the culture invariant history (kind 255) is decoded,
/// other kinds keep their kind and no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub flags: u32,
    pub history_kind: u8,
    pub text: Option<String>,
}

impl Text {
    pub const CULTURE_INVARIANT: u8 = 255;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StructValue {
    Guid(FGuid),
    DateTime(u64),
    Timespan(i64),
    Vector2D(Vector2D),
    Vector(Vector),
    IntVector(IntVector),
    Box(Box),
    IntPoint(IntPoint),
    Quat(Quat),
    LinearColor(LinearColor),
    Color(Color),
    Rotator(Rotator),
    /// User defined struct which is simply a list of properties
    Struct {
        struct_type: String,
        properties: Properties,
    },
}

impl StructValue {
    pub fn type_name(&self) -> &str {
        match self {
            StructValue::Guid(_) => "Guid",
            StructValue::DateTime(_) => "DateTime",
            StructValue::Timespan(_) => "Timespan",
            StructValue::Vector2D(_) => "Vector2D",
            StructValue::Vector(_) => "Vector",
            StructValue::IntVector(_) => "IntVector",
            StructValue::Box(_) => "Box",
            StructValue::IntPoint(_) => "IntPoint",
            StructValue::Quat(_) => "Quat",
            StructValue::LinearColor(_) => "LinearColor",
            StructValue::Color(_) => "Color",
            StructValue::Rotator(_) => "Rotator",
            StructValue::Struct { struct_type, .. } => struct_type,
        }
    }
    pub fn properties(&self) -> Option<&Properties> {
        match self {
            StructValue::Struct { properties, .. } => Some(properties),
            _ => None,
        }
    }
}

/// Ordered property sequence, as found at the root and inside every user
/// defined struct.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Properties(pub IndexMap<String, Value>);
impl Properties {
    pub(crate) fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        self.0.insert(name, value)
    }
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}
impl std::ops::Index<&str> for Properties {
    type Output = Value;
    fn index(&self, index: &str) -> &Self::Output {
        &self.0[index]
    }
}
impl<'a> IntoIterator for &'a Properties {
    type Item = <&'a IndexMap<String, Value> as IntoIterator>::Item;
    type IntoIter = <&'a IndexMap<String, Value> as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// Map entries in stream order. Keys may be structs and may repeat, so the
/// entries are kept as a list rather than collapsed into a native map.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Map {
    pub entries: Vec<MapEntry>,
}
impl Map {
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Lookup index keyed by [`Value::key_string`]. Later duplicates win.
    pub fn index(&self) -> IndexMap<String, &Value> {
        self.entries
            .iter()
            .map(|e| (e.key.key_string(), &e.value))
            .collect()
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key.key_string() == key)
            .map(|e| &e.value)
    }
}

impl Value {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown { .. })
    }
    /// Whether this value or one of its direct elements is a placeholder for
    /// bytes that were never read.
    pub fn has_unknown(&self) -> bool {
        match self {
            Value::Unknown { .. } => true,
            Value::Array(v) | Value::Set(v) => v.iter().any(Value::is_unknown),
            Value::Map(m) => m
                .entries
                .iter()
                .any(|e| e.key.is_unknown() || e.value.is_unknown()),
            _ => false,
        }
    }
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) | Value::Set(v) => Some(v),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Name(s) | Value::Object(s) => Some(s),
            _ => None,
        }
    }

    /// String form used to index map entries: text values as-is, enums by
    /// member name, everything else through [`Display`].
    pub fn key_string(&self) -> String {
        match self {
            Value::Str(s) | Value::Name(s) | Value::Object(s) => s.clone(),
            Value::Enum { member, .. } => member.clone(),
            other => other.to_string(),
        }
    }

    /// Number of leaf values in this subtree. Containers count their contents.
    pub fn item_count(&self) -> usize {
        match self {
            Value::Struct(StructValue::Struct { properties, .. }) => {
                properties.iter().map(|(_, v)| v.item_count()).sum()
            }
            Value::Array(v) | Value::Set(v) => v.iter().map(Value::item_count).sum(),
            Value::Map(m) => m
                .entries
                .iter()
                .map(|e| e.key.item_count() + e.value.item_count())
                .sum(),
            _ => 1,
        }
    }
}

fn write_list<'a, I>(f: &mut Formatter<'_>, open: &str, items: I, close: &str) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    f.write_str(open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Str(v) | Value::Name(v) => write!(f, "{v:?}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Enum { enum_type, member } => write!(f, "{enum_type}::{member}"),
            Value::Object(path) => write!(f, "<{path}>"),
            Value::SoftObject { path, sub_path } if sub_path.is_empty() => write!(f, "<{path}>"),
            Value::SoftObject { path, sub_path } => write!(f, "<{path}:{sub_path}>"),
            Value::Text(Text { text: Some(t), .. }) => write!(f, "{t:?}"),
            Value::Text(Text { history_kind, .. }) => write!(f, "<Text:{history_kind}>"),
            Value::Struct(s) => write!(f, "{s}"),
            Value::Array(v) => write_list(f, "[", v, "]"),
            Value::Set(v) => write_list(f, "{", v, "}"),
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, e) in m.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", e.key, e.value)?;
                }
                f.write_str("}")
            }
            Value::Unknown { type_name } => write!(f, "<{type_name}>"),
        }
    }
}

impl Display for StructValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StructValue::Guid(g) => write!(f, "{g}"),
            StructValue::DateTime(t) => write!(f, "DateTime({t})"),
            StructValue::Timespan(t) => write!(f, "Timespan({t})"),
            StructValue::Vector2D(v) => write!(f, "({}, {})", v.x, v.y),
            StructValue::Vector(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            StructValue::IntVector(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            StructValue::IntPoint(v) => write!(f, "({}, {})", v.x, v.y),
            StructValue::Box(b) => write!(
                f,
                "Box(({}, {}, {}), ({}, {}, {}), {})",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z, b.is_valid
            ),
            StructValue::Quat(q) => write!(f, "({}, {}, {}, {})", q.x, q.y, q.z, q.w),
            StructValue::LinearColor(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            StructValue::Color(c) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a),
            StructValue::Rotator(r) => write!(f, "({}, {}, {})", r.pitch, r.yaw, r.roll),
            StructValue::Struct {
                struct_type,
                properties,
            } => {
                write!(f, "{struct_type} {{")?;
                for (i, (name, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {name}: {value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}
