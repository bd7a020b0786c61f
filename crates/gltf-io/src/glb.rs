//! Binary glTF (GLB) container.
//!
//! Layout: a 12-byte header (`magic`, `version`, `length`) followed by
//! chunks of `chunkLength`, `chunkType` and payload, all little-endian.

use std::io;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::{GltfError, Result};

/// `"glTF"` read as a little-endian `u32`.
pub const MAGIC: u32 = 0x4654_6C67;
pub const VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
pub const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// A parsed GLB container borrowing its chunks from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glb<'a> {
    /// Total length declared in the header.
    pub length: u32,
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

/// Returns true if `data` starts with the GLB magic.
pub fn is_glb(data: &[u8]) -> bool {
    data.len() >= 4 && LittleEndian::read_u32(&data[..4]) == MAGIC
}

fn invalid(message: impl Into<String>) -> GltfError {
    GltfError::InvalidContainerFormat(message.into())
}

impl<'a> Glb<'a> {
    /// Splits a GLB container into its JSON and binary chunks.
    ///
    /// Unknown chunk types are skipped. Bytes after the declared length are
    /// ignored.
    pub fn from_slice(data: &'a [u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(invalid(format!(
                "{} bytes is too short for the {}-byte header",
                data.len(),
                HEADER_LEN
            )));
        }

        let magic = LittleEndian::read_u32(&data[0..4]);
        if magic != MAGIC {
            return Err(invalid(format!("bad magic 0x{:08X}", magic)));
        }
        let version = LittleEndian::read_u32(&data[4..8]);
        if version != VERSION {
            return Err(invalid(format!("unsupported container version {}", version)));
        }
        let length = LittleEndian::read_u32(&data[8..12]);
        let end = length as usize;
        if end > data.len() {
            return Err(invalid(format!(
                "declared length {} exceeds the {} bytes available",
                length,
                data.len()
            )));
        }
        if end < HEADER_LEN {
            return Err(invalid(format!("declared length {} is smaller than the header", length)));
        }

        let mut json = None;
        let mut bin = None;
        let mut offset = HEADER_LEN;
        while offset < end {
            if end - offset < CHUNK_HEADER_LEN {
                return Err(invalid(format!(
                    "chunk header at byte {} runs past the declared length",
                    offset
                )));
            }
            let chunk_length = LittleEndian::read_u32(&data[offset..offset + 4]) as usize;
            let chunk_type = LittleEndian::read_u32(&data[offset + 4..offset + 8]);
            let start = offset + CHUNK_HEADER_LEN;
            if chunk_length > end - start {
                return Err(invalid(format!(
                    "chunk at byte {} ({} bytes) runs past the declared length",
                    offset, chunk_length
                )));
            }
            let payload = &data[start..start + chunk_length];
            offset = start + chunk_length;

            match chunk_type {
                CHUNK_JSON => {
                    if json.replace(payload).is_some() {
                        return Err(invalid("more than one JSON chunk"));
                    }
                }
                CHUNK_BIN => {
                    if bin.replace(payload).is_some() {
                        return Err(invalid("more than one BIN chunk"));
                    }
                }
                other => log::debug!("skipping unknown GLB chunk type 0x{:08X}", other),
            }
        }

        let json = json.ok_or_else(|| invalid("missing JSON chunk"))?;
        Ok(Glb { length, json, bin })
    }
}

/// Assembles a GLB container.
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros to a
/// 4-byte boundary.
pub fn write(json: &[u8], bin: Option<&[u8]>) -> io::Result<Vec<u8>> {
    let json_padded = padded_len(json.len());
    let bin_padded = bin.map(|b| padded_len(b.len()));
    let total = HEADER_LEN
        + CHUNK_HEADER_LEN
        + json_padded
        + bin_padded.map_or(0, |len| CHUNK_HEADER_LEN + len);
    let total = u32::try_from(total).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "GLB would exceed 4 GiB")
    })?;

    let mut output = Vec::with_capacity(total as usize);
    output.write_u32::<LittleEndian>(MAGIC)?;
    output.write_u32::<LittleEndian>(VERSION)?;
    output.write_u32::<LittleEndian>(total)?;

    output.write_u32::<LittleEndian>(json_padded as u32)?;
    output.write_u32::<LittleEndian>(CHUNK_JSON)?;
    output.extend_from_slice(json);
    output.resize(output.len() + json_padded - json.len(), b' ');

    if let (Some(bin), Some(bin_padded)) = (bin, bin_padded) {
        output.write_u32::<LittleEndian>(bin_padded as u32)?;
        output.write_u32::<LittleEndian>(CHUNK_BIN)?;
        output.extend_from_slice(bin);
        output.resize(output.len() + bin_padded - bin.len(), 0);
    }

    Ok(output)
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(chunks: &[(u32, &str)]) -> Vec<u8> {
        let body: usize = chunks.iter().map(|(_, p)| CHUNK_HEADER_LEN + p.len()).sum();
        let mut data = Vec::new();
        data.write_u32::<LittleEndian>(MAGIC).unwrap();
        data.write_u32::<LittleEndian>(VERSION).unwrap();
        data.write_u32::<LittleEndian>((HEADER_LEN + body) as u32).unwrap();
        for (kind, payload) in chunks {
            data.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
            data.write_u32::<LittleEndian>(*kind).unwrap();
            data.extend_from_slice(payload.as_bytes());
        }
        data
    }

    #[test]
    fn test_write_then_split() {
        let glb = write(br#"{"asset":{}}"#, Some(&[1u8, 2, 3][..])).unwrap();
        assert_eq!(glb.len() % 4, 0);
        assert!(is_glb(&glb));

        let parsed = Glb::from_slice(&glb).unwrap();
        assert_eq!(parsed.length as usize, glb.len());
        assert_eq!(parsed.json, br#"{"asset":{}}"#);
        assert_eq!(parsed.bin, Some(&[1, 2, 3, 0][..]));
    }

    #[test]
    fn test_json_padding_is_whitespace() {
        let glb = write(b"{}", None).unwrap();
        let parsed = Glb::from_slice(&glb).unwrap();
        assert_eq!(parsed.json, b"{}  ");
        assert_eq!(parsed.bin, None);
    }

    #[test]
    fn test_unknown_chunks_are_skipped() {
        let data = container(&[(CHUNK_JSON, "{}"), (0x1234_5678, "xxxx"), (CHUNK_BIN, "ab")]);
        let parsed = Glb::from_slice(&data).unwrap();
        assert_eq!(parsed.bin, Some(&b"ab"[..]));
    }

    #[test]
    fn test_rejects_bad_containers() {
        let cases: Vec<(&str, Vec<u8>)> = vec![
            ("short", b"glTF".to_vec()),
            ("magic", {
                let mut d = container(&[(CHUNK_JSON, "{}")]);
                d[0] = b'x';
                d
            }),
            ("version", {
                let mut d = container(&[(CHUNK_JSON, "{}")]);
                d[4] = 1;
                d
            }),
            ("length", {
                let mut d = container(&[(CHUNK_JSON, "{}")]);
                d[8] += 4;
                d
            }),
            ("chunk overrun", {
                let mut d = container(&[(CHUNK_JSON, "{}")]);
                d[12] = 40;
                d
            }),
            ("truncated chunk header", {
                let mut d = container(&[(CHUNK_JSON, "{}")]);
                d.extend_from_slice(&[0, 0, 0, 0]);
                let len = d.len() as u32;
                d[8..12].copy_from_slice(&len.to_le_bytes());
                d
            }),
            ("no json", container(&[(CHUNK_BIN, "abcd")])),
            ("two json", container(&[(CHUNK_JSON, "{}"), (CHUNK_JSON, "{}")])),
            ("two bin", container(&[(CHUNK_JSON, "{}"), (CHUNK_BIN, ""), (CHUNK_BIN, "")])),
        ];
        for (name, data) in cases {
            match Glb::from_slice(&data) {
                Err(GltfError::InvalidContainerFormat(_)) => {}
                other => panic!("{}: expected container error, got {:?}", name, other),
            }
        }
    }
}
