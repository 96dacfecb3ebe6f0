use serde::{Serialize, Serializer};
use tracing::instrument;

use crate::{ArchiveReader, Error, FGuid, Result};

pub const MAGIC: [u8; 4] = *b"GVAS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomFormatData {
    pub id: FGuid,
    pub value: u32,
}
impl CustomFormatData {
    #[instrument(name = "CustomFormatData_read", skip_all)]
    fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        Ok(CustomFormatData {
            id: FGuid::read(ar)?,
            value: ar.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVersion {
    pub ue4: u32,
    pub ue5: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    #[serde(serialize_with = "serialize_magic")]
    pub magic: [u8; 4],
    pub save_game_version: u32,
    pub package_version: PackageVersion,
    pub engine_version_major: u16,
    pub engine_version_minor: u16,
    pub engine_version_patch: u16,
    pub engine_version_build: u32,
    pub engine_version: String,
    pub custom_format_version: u32,
    pub custom_format: Vec<CustomFormatData>,
    /// Class of the root save game object
    pub save_game_type: String,
    /// Whether a zero byte followed the save game type
    pub has_padding_byte: bool,
}

fn serialize_magic<S>(magic: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(magic))
}

impl Header {
    #[instrument(name = "Header_read", skip_all)]
    pub(crate) fn read<A: ArchiveReader>(ar: &mut A) -> Result<Self> {
        let mut magic = [0; 4];
        magic.copy_from_slice(ar.read_bytes(4)?);
        if magic != MAGIC {
            return Err(Error::BadMagic { found: magic });
        }
        let save_game_version = ar.read_u32()?;
        let package_version = PackageVersion {
            ue4: ar.read_u32()?,
            ue5: ar.read_u32()?,
        };
        let engine_version_major = ar.read_u16()?;
        let engine_version_minor = ar.read_u16()?;
        let engine_version_patch = ar.read_u16()?;
        let engine_version_build = ar.read_u32()?;
        let engine_version = ar.read_string()?;
        let custom_format_version = ar.read_u32()?;
        let count = ar.read_u32()?;
        // each record is 20 bytes, never reserve more than the buffer could hold
        let mut custom_format = Vec::with_capacity((count as usize).min(ar.remaining() / 20));
        for _ in 0..count {
            custom_format.push(CustomFormatData::read(ar)?);
        }
        let save_game_type = ar.read_string()?;

        // UE 5.5 writes one zero byte before the properties, older producers do not
        let has_padding_byte = ar.peek_bytes(1) == Some(&[0][..]);
        if has_padding_byte {
            ar.skip(1)?;
        }

        tracing::debug!(
            "GVAS {}.{}.{} ({engine_version}), save class {save_game_type}",
            engine_version_major,
            engine_version_minor,
            engine_version_patch
        );

        Ok(Header {
            magic,
            save_game_version,
            package_version,
            engine_version_major,
            engine_version_minor,
            engine_version_patch,
            engine_version_build,
            engine_version,
            custom_format_version,
            custom_format,
            save_game_type,
            has_padding_byte,
        })
    }
}
