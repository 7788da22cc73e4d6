use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use super::{LanguageResource, ResourceError};

pub const MAGIC: &[u8; 4] = b"MRLX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 3 + 4 + 4; // magic + version + reserved + body_len + crc32 = 16

/// Whether `data` starts with the compiled-resource magic bytes.
pub fn is_compiled(data: &[u8]) -> bool {
    data.get(..4) == Some(MAGIC.as_slice())
}

impl LanguageResource {
    pub fn to_bytes(&self) -> Result<Vec<u8>, ResourceError> {
        let body = bincode::serialize(self).map_err(ResourceError::Serialize)?;
        let body_len: u32 = body
            .len()
            .try_into()
            .map_err(|_| ResourceError::Incomplete("resource body exceeds u32::MAX".into()))?;
        let crc = crc32fast::hash(&body);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&body_len.to_le_bytes());
        buf.extend_from_slice(&crc.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ResourceError> {
        if data.len() < 5 {
            return Err(ResourceError::InvalidHeader);
        }
        if !is_compiled(data) {
            return Err(ResourceError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(ResourceError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(ResourceError::InvalidHeader);
        }

        let body_len = read_u32(&data[8..12]) as usize;
        let expected_crc = read_u32(&data[12..16]);
        let body = data
            .get(HEADER_SIZE..HEADER_SIZE + body_len)
            .ok_or(ResourceError::InvalidHeader)?;

        let actual_crc = crc32fast::hash(body);
        if actual_crc != expected_crc {
            return Err(ResourceError::Checksum {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        bincode::deserialize(body).map_err(ResourceError::Deserialize)
    }

    /// Open a compiled resource file, using mmap to avoid doubling peak memory.
    ///
    /// The resource is deserialized from the mapped region, then the mapping
    /// is dropped.
    pub fn open(path: &Path) -> Result<Self, ResourceError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after deserialization completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), ResourceError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}
