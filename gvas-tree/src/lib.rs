/*!
A schema-free reader for Unreal Engine save files (commonly referred to as
GVAS), as written by UE 5.5 games such as Manor Lords.

No type information is needed up front: every property carries its own type
tag and the decoder follows it. Decoding is best-effort. Errors inside a
property are recorded as [`Diagnostic`]s and the rest of the file is still
decoded, only an unreadable header is fatal.

The decoded tree implements [`serde::Serialize`] so it can be rendered with any
serde format.

# Example

```no_run
use gvas_tree::{Save, Value};

let data = std::fs::read("saveGame.sav")?;
let save = Save::read(&data)?;
if let Some(Value::Int(gold)) = save.properties.get("Gold") {
    println!("{gold} gold");
}
for diagnostic in &save.diagnostics {
    eprintln!("{diagnostic}");
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

mod archive;
mod composite;
mod context;
mod cursor;
mod error;
mod header;
mod property;
mod structs;
mod types;
mod value;


pub use archive::ArchiveReader;
pub use context::Progress;
pub use cursor::{ByteCursor, StringPolicy};
pub use error::{Diagnostic, Error, ParseError};
pub use header::{CustomFormatData, Header, PackageVersion, MAGIC};
pub use structs::{
    Box, Color, Double, FGuid, Float, IntPoint, IntVector, LinearColor, Quat, Rotator, Vector,
    Vector2D,
};
pub use types::{PropertyType, StructType};
pub use value::{Map, MapEntry, Properties, StructValue, Text, Value};

use serde::Serialize;
use tracing::instrument;

use crate::context::Context;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Nesting ceiling applied unless [`SaveReader::max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Save {
    pub header: Header,
    pub properties: Properties,
    /// Property level errors, in the order they were hit
    pub diagnostics: Vec<Diagnostic>,
    pub progress: Progress,
}
impl Save {
    /// Reads a save with the default [`SaveReader`] settings
    #[instrument(name = "Save_read", skip_all)]
    pub fn read(data: &[u8]) -> Result<Self, ParseError> {
        SaveReader::new().read(data)
    }
    /// Number of leaf values in the decoded tree
    pub fn item_count(&self) -> usize {
        self.properties.iter().map(|(_, v)| v.item_count()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SaveReader {
    max_depth: usize,
    strings: StringPolicy,
}
impl Default for SaveReader {
    fn default() -> Self {
        Self::new()
    }
}
impl SaveReader {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strings: StringPolicy::default(),
        }
    }
    /// Property nesting beyond this depth is treated as the end of the sequence
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
    pub fn string_policy(mut self, strings: StringPolicy) -> Self {
        self.strings = strings;
        self
    }
    pub fn read(self, data: &[u8]) -> Result<Save, ParseError> {
        let mut reader = Context::new(data, self.max_depth, self.strings);

        let header = Header::read(&mut reader).map_err(|error| ParseError {
            offset: reader.position(),
            error,
            progress: Progress::new(0, data.len()),
        })?;

        let properties = reader.read_properties_until_none();
        let progress = reader.progress();
        let trailer = reader.peek_bytes(reader.remaining()).unwrap_or_default();
        if trailer != [0; 4] {
            tracing::debug!(
                "{} bytes left after the properties, save may not have been decoded completely",
                trailer.len()
            );
        }

        Ok(Save {
            header,
            properties,
            diagnostics: reader.into_diagnostics(),
            progress,
        })
    }
}
