//! Property sequences and the per-type payload rules of named properties.

use tracing::instrument;

use crate::context::Context;
use crate::{ArchiveReader, Error, Properties, PropertyType, Result, Text, Value};

/// Sentinel name terminating a property sequence
pub(crate) const NONE: &str = "None";

/// Element size and array index written before every named scalar. Both are
/// zero in practice and carry no information.
const RESERVED: usize = 8;

impl Context<'_> {
    /// Reads properties until a terminator, a failed property or the depth
    /// ceiling. Failures are recorded as diagnostics, never returned.
    #[instrument(skip_all)]
    pub(crate) fn read_properties_until_none(&mut self) -> Properties {
        let mut properties = Properties::default();
        let top_level = self.state.depth == 0;
        while let Some((name, value)) = self.read_property() {
            if top_level {
                tracing::debug!(index = properties.len(), offset = self.position(), "{name}");
            }
            let unknown = value.has_unknown();
            properties.insert(name, value);
            if unknown {
                // position after an unknown payload or element is meaningless
                break;
            }
        }
        if top_level {
            tracing::debug!(
                "top-level properties ended at 0x{:X} after {} properties",
                self.position(),
                properties.len()
            );
        }
        properties
    }

    fn read_property(&mut self) -> Option<(String, Value)> {
        self.nested(|ar| {
            let start = ar.position();
            let (name, type_) = match ar.read_tag() {
                Ok(tag) => tag?,
                Err(e) => {
                    ar.record(start, e);
                    return None;
                }
            };
            let value = ar.with_scope(&name, |ar| {
                ar.read_value(&type_)
                    .inspect_err(|e| ar.record(start, e.clone()))
                    .ok()
            })?;
            Some((name, value))
        })
        .flatten()
    }

    /// Name and type tag, or `None` at a terminator.
    #[instrument(name = "PropertyTag_read", skip_all)]
    fn read_tag(&mut self) -> Result<Option<(String, PropertyType)>> {
        // a name and a type tag take at least 8 bytes
        if self.remaining() < 8 {
            return Ok(None);
        }
        let name = self.read_string()?;
        if name.is_empty() || name == NONE {
            return Ok(None);
        }
        let type_name = self.read_string()?;
        if type_name.is_empty() {
            return Ok(None);
        }
        Ok(Some((name, PropertyType::from(type_name.as_str()))))
    }

    fn skip_scalar_header(&mut self) -> Result<()> {
        self.skip(RESERVED + 1)
    }

    #[instrument(name = "Property_read", skip_all, fields(type_ = %type_))]
    fn read_value(&mut self, type_: &PropertyType) -> Result<Value> {
        Ok(match type_ {
            PropertyType::BoolProperty => {
                // the value sits where the padding byte would be
                self.skip(RESERVED)?;
                Value::Bool(self.read_u8()? != 0)
            }
            PropertyType::IntProperty => {
                self.skip_scalar_header()?;
                Value::Int(self.read_i32()?)
            }
            PropertyType::UInt32Property => {
                self.skip_scalar_header()?;
                Value::UInt32(self.read_u32()?)
            }
            PropertyType::Int64Property => {
                self.skip_scalar_header()?;
                Value::Int64(self.read_i64()?)
            }
            PropertyType::UInt64Property => {
                self.skip_scalar_header()?;
                Value::UInt64(self.read_u64()?)
            }
            PropertyType::FloatProperty => {
                self.skip_scalar_header()?;
                Value::Float(self.read_f32()?.into())
            }
            PropertyType::DoubleProperty => {
                self.skip_scalar_header()?;
                Value::Double(self.read_f64()?.into())
            }
            PropertyType::StrProperty => {
                self.skip_scalar_header()?;
                Value::Str(self.read_string()?)
            }
            PropertyType::NameProperty => {
                self.skip_scalar_header()?;
                Value::Name(self.read_string()?)
            }
            PropertyType::TextProperty => {
                self.skip_scalar_header()?;
                Value::Text(self.read_text()?)
            }
            PropertyType::ByteProperty => self.read_byte()?,
            PropertyType::EnumProperty => self.read_enum()?,
            PropertyType::ObjectProperty => {
                self.skip_scalar_header()?;
                Value::Object(self.read_string()?)
            }
            PropertyType::SoftObjectProperty => {
                self.skip_scalar_header()?;
                Value::SoftObject {
                    path: self.read_string()?,
                    sub_path: self.read_string()?,
                }
            }
            PropertyType::StructProperty => self.read_struct_property()?,
            PropertyType::ArrayProperty => self.read_array_property()?,
            PropertyType::MapProperty => self.read_map_property()?,
            PropertyType::SetProperty => self.read_set_property()?,
            PropertyType::Unsupported(type_name) => {
                let offset = self.position();
                self.record(
                    offset,
                    Error::UnrecognizedType {
                        type_name: type_name.clone(),
                    },
                );
                Value::Unknown {
                    type_name: type_name.clone(),
                }
            }
        })
    }

    #[instrument(name = "Text_read", skip_all)]
    fn read_text(&mut self) -> Result<Text> {
        let flags = self.read_u32()?;
        let history_kind = self.read_u8()?;
        let text = if history_kind == Text::CULTURE_INVARIANT {
            let _culture_count = self.read_u32()?;
            Some(self.read_string()?)
        } else {
            None
        };
        Ok(Text {
            flags,
            history_kind,
            text,
        })
    }

    /// A raw byte, or an enum member when the tag names an enum type.
    #[instrument(name = "Byte_read", skip_all)]
    fn read_byte(&mut self) -> Result<Value> {
        let size = self.read_u32()?;
        let _index = self.read_u32()?;
        if size == 0 {
            self.skip(1)?;
            return Ok(Value::Byte(self.read_u8()?));
        }
        let enum_type = self.read_string()?;
        self.skip(1)?;
        Ok(if enum_type == NONE {
            Value::Byte(self.read_u8()?)
        } else {
            Value::Enum {
                enum_type,
                member: self.read_string()?,
            }
        })
    }

    #[instrument(name = "Enum_read", skip_all)]
    fn read_enum(&mut self) -> Result<Value> {
        let enum_type = self.read_enum_type()?;
        let _size = self.read_u32()?;
        self.skip(1)?;
        Ok(Value::Enum {
            enum_type,
            member: self.read_string()?,
        })
    }

    /// Enum metadata shared by enum properties and enum arrays: flag, enum
    /// type, flag, module path, 4 unknown bytes, inner type (normally
    /// "ByteProperty"), 4 unknown bytes.
    pub(crate) fn read_enum_type(&mut self) -> Result<String> {
        let _flag = self.read_u32()?;
        let enum_type = self.read_string()?;
        let _module_flag = self.read_u32()?;
        let _module = self.read_string()?;
        self.skip(4)?;
        let inner = self.read_string()?;
        if inner != "ByteProperty" {
            tracing::debug!("enum {enum_type} has underlying type {inner}");
        }
        self.skip(4)?;
        Ok(enum_type)
    }
}
