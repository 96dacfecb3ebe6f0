use serde::Serialize;

/// Type tag of a property or of the elements of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyType {
    IntProperty,
    UInt32Property,
    Int64Property,
    UInt64Property,
    FloatProperty,
    DoubleProperty,
    BoolProperty,
    ByteProperty,
    EnumProperty,
    StrProperty,
    NameProperty,
    TextProperty,
    ObjectProperty,
    SoftObjectProperty,
    StructProperty,
    ArrayProperty,
    MapProperty,
    SetProperty,
    /// Any tag outside the recognized set, kept verbatim
    Unsupported(String),
}
impl PropertyType {
    pub fn get_name(&self) -> &str {
        match self {
            PropertyType::IntProperty => "IntProperty",
            PropertyType::UInt32Property => "UInt32Property",
            PropertyType::Int64Property => "Int64Property",
            PropertyType::UInt64Property => "UInt64Property",
            PropertyType::FloatProperty => "FloatProperty",
            PropertyType::DoubleProperty => "DoubleProperty",
            PropertyType::BoolProperty => "BoolProperty",
            PropertyType::ByteProperty => "ByteProperty",
            PropertyType::EnumProperty => "EnumProperty",
            PropertyType::StrProperty => "StrProperty",
            PropertyType::NameProperty => "NameProperty",
            PropertyType::TextProperty => "TextProperty",
            PropertyType::ObjectProperty => "ObjectProperty",
            PropertyType::SoftObjectProperty => "SoftObjectProperty",
            PropertyType::StructProperty => "StructProperty",
            PropertyType::ArrayProperty => "ArrayProperty",
            PropertyType::MapProperty => "MapProperty",
            PropertyType::SetProperty => "SetProperty",
            PropertyType::Unsupported(name) => name,
        }
    }
    /// Whether the scalar element rule can decode values of this type.
    pub(crate) fn is_element(&self) -> bool {
        matches!(
            self,
            PropertyType::IntProperty
                | PropertyType::UInt32Property
                | PropertyType::Int64Property
                | PropertyType::UInt64Property
                | PropertyType::FloatProperty
                | PropertyType::DoubleProperty
                | PropertyType::BoolProperty
                | PropertyType::ByteProperty
                | PropertyType::StrProperty
                | PropertyType::NameProperty
                | PropertyType::EnumProperty
                | PropertyType::ObjectProperty
        )
    }
}
impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        match name {
            "IntProperty" => PropertyType::IntProperty,
            "UInt32Property" => PropertyType::UInt32Property,
            "Int64Property" => PropertyType::Int64Property,
            "UInt64Property" => PropertyType::UInt64Property,
            "FloatProperty" => PropertyType::FloatProperty,
            "DoubleProperty" => PropertyType::DoubleProperty,
            "BoolProperty" => PropertyType::BoolProperty,
            "ByteProperty" => PropertyType::ByteProperty,
            "EnumProperty" => PropertyType::EnumProperty,
            "StrProperty" => PropertyType::StrProperty,
            "NameProperty" => PropertyType::NameProperty,
            "TextProperty" => PropertyType::TextProperty,
            "ObjectProperty" => PropertyType::ObjectProperty,
            "SoftObjectProperty" => PropertyType::SoftObjectProperty,
            "StructProperty" => PropertyType::StructProperty,
            "ArrayProperty" => PropertyType::ArrayProperty,
            "MapProperty" => PropertyType::MapProperty,
            "SetProperty" => PropertyType::SetProperty,
            other => PropertyType::Unsupported(other.to_owned()),
        }
    }
}
impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_name())
    }
}

/// Struct type names with a fixed binary layout, plus user defined structs which
/// are encoded as a nested property sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StructType {
    Guid,
    DateTime,
    Timespan,
    Vector2D,
    Vector,
    IntVector,
    Box,
    IntPoint,
    Quat,
    Rotator,
    LinearColor,
    Color,
    Struct(String),
}
impl From<&str> for StructType {
    fn from(t: &str) -> Self {
        match t {
            "Guid" => StructType::Guid,
            "DateTime" => StructType::DateTime,
            "Timespan" => StructType::Timespan,
            "Vector2D" => StructType::Vector2D,
            "Vector" => StructType::Vector,
            "IntVector" => StructType::IntVector,
            "Box" => StructType::Box,
            "IntPoint" => StructType::IntPoint,
            "Quat" => StructType::Quat,
            "Rotator" => StructType::Rotator,
            "LinearColor" => StructType::LinearColor,
            "Color" => StructType::Color,
            _ => StructType::Struct(t.to_owned()),
        }
    }
}
impl From<String> for StructType {
    fn from(t: String) -> Self {
        match StructType::from(t.as_str()) {
            StructType::Struct(_) => StructType::Struct(t),
            primitive => primitive,
        }
    }
}
impl StructType {
    pub fn as_str(&self) -> &str {
        match self {
            StructType::Guid => "Guid",
            StructType::DateTime => "DateTime",
            StructType::Timespan => "Timespan",
            StructType::Vector2D => "Vector2D",
            StructType::Vector => "Vector",
            StructType::IntVector => "IntVector",
            StructType::Box => "Box",
            StructType::IntPoint => "IntPoint",
            StructType::Quat => "Quat",
            StructType::Rotator => "Rotator",
            StructType::LinearColor => "LinearColor",
            StructType::Color => "Color",
            StructType::Struct(t) => t,
        }
    }
    /// Encoded size in bytes for fixed-layout structs, `None` for property structs.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            StructType::Guid => Some(16),
            StructType::DateTime | StructType::Timespan => Some(8),
            StructType::Vector2D => Some(16),
            StructType::Vector | StructType::Rotator => Some(24),
            StructType::IntVector => Some(12),
            StructType::Box => Some(49),
            StructType::IntPoint => Some(8),
            StructType::Quat => Some(32),
            StructType::LinearColor => Some(16),
            StructType::Color => Some(4),
            StructType::Struct(_) => None,
        }
    }
    pub fn is_primitive(&self) -> bool {
        self.fixed_size().is_some()
    }
}
