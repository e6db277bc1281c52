//! The fixed 100-byte shapefile header.

use std::io::{self, Cursor, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use electionmap_core::{DecodeError, GeoBounds};

use crate::record::ShapeKind;

/// Decoded file header.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapefileHeader {
    pub file_code: i32,
    /// Declared file length in 16-bit words, header included.
    pub file_length_words: i32,
    pub version: i32,
    pub shape_type: i32,
    pub mbr: GeoBounds,
    pub z_range: (f64, f64),
    pub m_range: (f64, f64),
}

impl ShapefileHeader {
    pub const FILE_CODE: i32 = 9994;
    pub const VERSION: i32 = 1000;
    pub const LEN: usize = 100;

    const FILE_LENGTH_OFFSET: usize = 24;
    const VERSION_OFFSET: usize = 28;
    const MBR_OFFSET: usize = 36;

    /// Header for a file holding `shape_type` records inside `mbr`.
    pub fn new(shape_type: i32, mbr: GeoBounds) -> Self {
        Self {
            file_code: Self::FILE_CODE,
            file_length_words: (Self::LEN / 2) as i32,
            version: Self::VERSION,
            shape_type,
            mbr,
            z_range: (0.0, 0.0),
            m_range: (0.0, 0.0),
        }
    }

    /// Parses the header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < Self::LEN {
            return Err(DecodeError::TruncatedRecord {
                offset: 0,
                record: None,
                needed: Self::LEN,
                available: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(&bytes[..Self::LEN]);
        let header = Self::read_fields(&mut cursor).map_err(|_| DecodeError::TruncatedRecord {
            offset: 0,
            record: None,
            needed: Self::LEN,
            available: bytes.len(),
        })?;

        if header.file_code != Self::FILE_CODE {
            return Err(DecodeError::HeaderMismatch {
                field: "file code",
                offset: 0,
                expected: Self::FILE_CODE.to_string(),
                found: header.file_code.to_string(),
            });
        }
        if header.version != Self::VERSION {
            return Err(DecodeError::HeaderMismatch {
                field: "version",
                offset: Self::VERSION_OFFSET,
                expected: Self::VERSION.to_string(),
                found: header.version.to_string(),
            });
        }
        if header.file_length_bytes() < Self::LEN {
            return Err(DecodeError::HeaderMismatch {
                field: "file length",
                offset: Self::FILE_LENGTH_OFFSET,
                expected: format!(">= {} words", Self::LEN / 2),
                found: format!("{} words", header.file_length_words),
            });
        }
        if let Some(value) = header.mbr.to_array().into_iter().find(|v| !v.is_finite()) {
            return Err(DecodeError::HeaderMismatch {
                field: "mbr",
                offset: Self::MBR_OFFSET,
                expected: "finite bounds".to_string(),
                found: value.to_string(),
            });
        }
        Ok(header)
    }

    fn read_fields(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        let file_code = cursor.read_i32::<BigEndian>()?;
        for _ in 0..5 {
            cursor.read_i32::<BigEndian>()?;
        }
        let file_length_words = cursor.read_i32::<BigEndian>()?;
        let version = cursor.read_i32::<LittleEndian>()?;
        let shape_type = cursor.read_i32::<LittleEndian>()?;
        let mut mbr = [0.0; 4];
        for value in mbr.iter_mut() {
            *value = cursor.read_f64::<LittleEndian>()?;
        }
        let z_range = (
            cursor.read_f64::<LittleEndian>()?,
            cursor.read_f64::<LittleEndian>()?,
        );
        let m_range = (
            cursor.read_f64::<LittleEndian>()?,
            cursor.read_f64::<LittleEndian>()?,
        );
        Ok(Self {
            file_code,
            file_length_words,
            version,
            shape_type,
            mbr: GeoBounds::from_array(mbr),
            z_range,
            m_range,
        })
    }

    /// Writes the header in its on-disk layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<BigEndian>(self.file_code)?;
        for _ in 0..5 {
            writer.write_i32::<BigEndian>(0)?;
        }
        writer.write_i32::<BigEndian>(self.file_length_words)?;
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_i32::<LittleEndian>(self.shape_type)?;
        for value in self.mbr.to_array() {
            writer.write_f64::<LittleEndian>(value)?;
        }
        writer.write_f64::<LittleEndian>(self.z_range.0)?;
        writer.write_f64::<LittleEndian>(self.z_range.1)?;
        writer.write_f64::<LittleEndian>(self.m_range.0)?;
        writer.write_f64::<LittleEndian>(self.m_range.1)?;
        Ok(())
    }

    /// Declared file length in bytes; negative word counts read as zero.
    pub fn file_length_bytes(&self) -> usize {
        self.file_length_words.max(0) as usize * 2
    }

    /// Shape kind declared for the whole file, if supported.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        ShapeKind::from_code(self.shape_type)
    }
}
