//! Struct, array, map and set payloads.

use tracing::instrument;

use crate::context::Context;
use crate::{
    ArchiveReader, Color, Error, FGuid, IntPoint, IntVector, LinearColor, Map, MapEntry,
    PropertyType, Quat, Result, Rotator, StructType, StructValue, Value, Vector, Vector2D,
};

/// Upper bound for preallocation. Every element occupies at least one byte, so
/// a count larger than the remaining input can only come from a corrupt stream.
fn capacity(count: u32, remaining: usize) -> usize {
    (count as usize).min(remaining)
}

/// How the keys or the values of a map are encoded.
#[derive(Debug)]
enum Slot {
    Struct(StructType),
    /// Enum keys carry their member name as a string
    Enum(String),
    Element(PropertyType),
}

impl Slot {
    fn unsupported(&self) -> Option<&PropertyType> {
        match self {
            Slot::Element(t) if !t.is_element() => Some(t),
            _ => None,
        }
    }
    fn is_struct(&self) -> bool {
        matches!(self, Slot::Struct(_))
    }
}

impl Context<'_> {
    /// Flag, struct type, flag and module path.
    fn read_struct_name(&mut self) -> Result<StructType> {
        let _flag = self.read_u32()?;
        let struct_type = self.read_string()?;
        let _module_flag = self.read_u32()?;
        let _module = self.read_string()?;
        Ok(StructType::from(struct_type))
    }

    /// Struct name followed by an unknown u32, the declared size and padding.
    fn read_struct_tag(&mut self) -> Result<(StructType, u32)> {
        let struct_type = self.read_struct_name()?;
        let _unknown = self.read_u32()?;
        let size = self.read_u32()?;
        self.skip(1)?;
        Ok((struct_type, size))
    }

    #[instrument(name = "StructProperty_read", skip_all)]
    pub(crate) fn read_struct_property(&mut self) -> Result<Value> {
        let (struct_type, size) = self.read_struct_tag()?;
        let start = self.position();
        let value = self.read_struct_value(struct_type)?;
        let consumed = self.position() - start;
        if value.properties().is_some() && consumed != size as usize {
            tracing::debug!(
                "struct {} at 0x{start:X} declared {size} bytes, consumed {consumed}",
                value.type_name()
            );
        }
        Ok(Value::Struct(value))
    }

    #[instrument(name = "StructValue_read", skip_all, fields(struct_type = struct_type.as_str()))]
    pub(crate) fn read_struct_value(&mut self, struct_type: StructType) -> Result<StructValue> {
        Ok(match struct_type {
            StructType::Guid => StructValue::Guid(FGuid::read(self)?),
            StructType::DateTime => StructValue::DateTime(self.read_u64()?),
            StructType::Timespan => StructValue::Timespan(self.read_i64()?),
            StructType::Vector2D => StructValue::Vector2D(Vector2D::read(self)?),
            StructType::Vector => StructValue::Vector(Vector::read(self)?),
            StructType::IntVector => StructValue::IntVector(IntVector::read(self)?),
            StructType::Box => StructValue::Box(crate::Box::read(self)?),
            StructType::IntPoint => StructValue::IntPoint(IntPoint::read(self)?),
            StructType::Quat => StructValue::Quat(Quat::read(self)?),
            StructType::LinearColor => StructValue::LinearColor(LinearColor::read(self)?),
            StructType::Color => StructValue::Color(Color::read(self)?),
            StructType::Rotator => StructValue::Rotator(Rotator::read(self)?),
            StructType::Struct(struct_type) => {
                let properties = self.read_properties_until_none();
                StructValue::Struct {
                    struct_type,
                    properties,
                }
            }
        })
    }

    /// Decides what to do after a struct element consumed nothing: out of
    /// input is an error, the depth ceiling ends the collection.
    fn check_stalled(&self, start: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < 8 {
            return Err(Error::UnexpectedEnd {
                offset: start,
                needed: 8,
                remaining,
            });
        }
        Ok(())
    }

    fn read_structs(&mut self, struct_type: StructType, count: u32) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(capacity(count, self.remaining()));
        for _ in 0..count {
            let start = self.position();
            let value = self.read_struct_value(struct_type.clone())?;
            if self.position() == start {
                self.check_stalled(start)?;
                break;
            }
            values.push(Value::Struct(value));
        }
        Ok(values)
    }

    #[instrument(name = "ArrayProperty_read", skip_all)]
    pub(crate) fn read_array_property(&mut self) -> Result<Value> {
        let _flag = self.read_u32()?;
        let inner = PropertyType::from(self.read_string()?.as_str());
        let values = match inner {
            PropertyType::StructProperty => {
                let (struct_type, size) = self.read_struct_tag()?;
                let count = self.read_u32()?;
                if count > 0 {
                    // size covers the count and the padding byte
                    let start = self.position();
                    tracing::debug!(
                        "struct array {} x{count}, size {size}, range 0x{start:X}-0x{:X}",
                        struct_type.as_str(),
                        start.saturating_add(size as usize).saturating_sub(5)
                    );
                }
                self.read_structs(struct_type, count)?
            }
            PropertyType::EnumProperty => {
                let enum_type = self.read_enum_type()?;
                let _size = self.read_u32()?;
                self.skip(1)?;
                let count = self.read_u32()?;
                let mut values = Vec::with_capacity(capacity(count, self.remaining()));
                for _ in 0..count {
                    values.push(Value::Enum {
                        enum_type: enum_type.clone(),
                        member: self.read_string()?,
                    });
                }
                values
            }
            inner => {
                self.skip(4)?;
                let _size = self.read_u32()?;
                self.skip(1)?;
                let count = self.read_u32()?;
                self.read_elements(&inner, count)?
            }
        };
        Ok(Value::Array(values))
    }

    #[instrument(name = "SetProperty_read", skip_all)]
    pub(crate) fn read_set_property(&mut self) -> Result<Value> {
        let _flag = self.read_u32()?;
        let inner = PropertyType::from(self.read_string()?.as_str());
        let _unknown = self.read_u32()?;
        let _size = self.read_u32()?;
        self.skip(1)?;
        let _removed = self.read_u32()?;
        let count = self.read_u32()?;
        Ok(Value::Set(self.read_elements(&inner, count)?))
    }

    #[instrument(name = "MapProperty_read", skip_all)]
    pub(crate) fn read_map_property(&mut self) -> Result<Value> {
        let _flag = self.read_u32()?;
        let key_type = PropertyType::from(self.read_string()?.as_str());
        let key_slot = match key_type {
            PropertyType::StructProperty => {
                let struct_type = self.read_struct_name()?;
                self.skip(4)?;
                Slot::Struct(struct_type)
            }
            // the enum's inner type comes before the value type
            PropertyType::EnumProperty => Slot::Enum(self.read_enum_type()?),
            other => {
                let _flag = self.read_u32()?;
                Slot::Element(other)
            }
        };
        let value_type = PropertyType::from(self.read_string()?.as_str());
        let value_slot = match value_type {
            PropertyType::StructProperty => Slot::Struct(self.read_struct_name()?),
            other => Slot::Element(other),
        };
        // 4 unknown bytes, or padding when key and value are both structs
        self.skip(4)?;
        let _size = self.read_u32()?;
        self.skip(1)?;
        let _removed = self.read_u32()?;
        let count = self.read_u32()?;
        tracing::debug!("map {key_slot:?} -> {value_slot:?} x{count}");

        let mut limit = count as usize;
        for unsupported in [key_slot.unsupported(), value_slot.unsupported()]
            .into_iter()
            .flatten()
        {
            if count > 0 {
                let offset = self.position();
                self.record(
                    offset,
                    Error::UnrecognizedType {
                        type_name: unsupported.get_name().to_owned(),
                    },
                );
                limit = limit.min(self.remaining());
            }
        }

        let mut entries = Vec::with_capacity(capacity(count, self.remaining()));
        for _ in 0..limit {
            let start = self.position();
            let key = self.read_slot(&key_slot)?;
            let value = self.read_slot(&value_slot)?;
            if self.position() == start && (key_slot.is_struct() || value_slot.is_struct()) {
                self.check_stalled(start)?;
                break;
            }
            entries.push(MapEntry { key, value });
        }
        Ok(Value::Map(Map { entries }))
    }

    fn read_slot(&mut self, slot: &Slot) -> Result<Value> {
        Ok(match slot {
            Slot::Struct(struct_type) => {
                Value::Struct(self.read_struct_value(struct_type.clone())?)
            }
            Slot::Enum(enum_type) => Value::Enum {
                enum_type: enum_type.clone(),
                member: self.read_string()?,
            },
            Slot::Element(type_) => self.read_element(type_)?,
        })
    }

    /// `count` elements of an array or set. An unsupported element type is
    /// reported once and yields placeholders that consume nothing.
    fn read_elements(&mut self, type_: &PropertyType, count: u32) -> Result<Vec<Value>> {
        let mut count = count as usize;
        if !type_.is_element() && count > 0 {
            let offset = self.position();
            self.record(
                offset,
                Error::UnrecognizedType {
                    type_name: type_.get_name().to_owned(),
                },
            );
            count = count.min(self.remaining());
        }
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(self.read_element(type_)?);
        }
        Ok(values)
    }

    /// Collection elements have no reserved or padding bytes.
    fn read_element(&mut self, type_: &PropertyType) -> Result<Value> {
        Ok(match type_ {
            PropertyType::IntProperty => Value::Int(self.read_i32()?),
            PropertyType::UInt32Property => Value::UInt32(self.read_u32()?),
            PropertyType::Int64Property => Value::Int64(self.read_i64()?),
            PropertyType::UInt64Property => Value::UInt64(self.read_u64()?),
            PropertyType::FloatProperty => Value::Float(self.read_f32()?.into()),
            PropertyType::DoubleProperty => Value::Double(self.read_f64()?.into()),
            PropertyType::BoolProperty => Value::Bool(self.read_u8()? != 0),
            PropertyType::ByteProperty => Value::Byte(self.read_u8()?),
            PropertyType::StrProperty | PropertyType::EnumProperty => {
                Value::Str(self.read_string()?)
            }
            PropertyType::NameProperty => Value::Name(self.read_string()?),
            PropertyType::ObjectProperty => Value::Object(self.read_string()?),
            other => Value::Unknown {
                type_name: other.get_name().to_owned(),
            },
        })
    }
}
