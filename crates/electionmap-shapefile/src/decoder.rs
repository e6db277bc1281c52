//! Shapefile decoder
//!
//! Turns the raw bytes of a `.shp` file into a [`Shapefile`]: the parsed
//! header plus one [`GeometryRecord`] per record. Decoding is all or
//! nothing; the first inconsistency aborts with a [`DecodeError`] that
//! names the byte offset (and record number, once known) where it was
//! found.

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use electionmap_core::{DecodeError, GeoBounds};

use crate::header::ShapefileHeader;
use crate::record::{GeometryRecord, ShapeKind};

/// Record header: record number and content length, both big-endian.
const RECORD_HEADER_LEN: usize = 8;

/// Shape type, bounding box, part count and point count.
const FIXED_BODY_LEN: usize = 4 + 32 + 4 + 4;

/// A fully decoded `.shp` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Shapefile {
    pub header: ShapefileHeader,
    pub records: Vec<GeometryRecord>,
}

/// Stateless decoder for the shapefile binary geometry format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapefileDecoder;

impl ShapefileDecoder {
    /// Decodes a complete `.shp` byte buffer.
    ///
    /// Records are read until the file length declared in the header is
    /// consumed; anything after it is ignored. Record numbers are assigned
    /// sequentially in decode order starting at 1.
    pub fn decode(bytes: &[u8]) -> Result<Shapefile, DecodeError> {
        let header = ShapefileHeader::parse(bytes)?;
        let declared = header.file_length_bytes();
        let data = &bytes[..declared.min(bytes.len())];

        let mut records = Vec::new();
        let mut offset = ShapefileHeader::LEN;
        while offset < declared {
            let sequence = records.len() as i32 + 1;
            let (record, next) = decode_record(data, offset, sequence)?;
            tracing::trace!(
                record = record.record_number(),
                kind = %record.kind(),
                parts = record.num_parts(),
                points = record.num_points(),
                "Decoded record"
            );
            records.push(record);
            offset = next;
        }

        tracing::debug!(
            records = records.len(),
            bytes = declared,
            shape_type = header.shape_type,
            "Decoded shapefile"
        );
        Ok(Shapefile { header, records })
    }
}

/// Decodes the record starting at `offset`, returning it with the offset of the next record.
///
/// `data` is the stream cut at the declared file length.
fn decode_record(
    data: &[u8],
    offset: usize,
    sequence: i32,
) -> Result<(GeometryRecord, usize), DecodeError> {
    let remaining = data.len().saturating_sub(offset);
    if remaining < RECORD_HEADER_LEN {
        return Err(DecodeError::TruncatedRecord {
            offset,
            record: None,
            needed: RECORD_HEADER_LEN,
            available: remaining,
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + RECORD_HEADER_LEN]);
    let (disk_number, content_words) = read_record_header(&mut cursor).map_err(|_| {
        DecodeError::TruncatedRecord {
            offset,
            record: None,
            needed: RECORD_HEADER_LEN,
            available: remaining,
        }
    })?;
    let record = Some(sequence);

    if content_words < 0 {
        return Err(DecodeError::MalformedRecord {
            offset,
            record,
            reason: format!("negative content length {content_words}"),
        });
    }
    if disk_number != sequence {
        tracing::warn!(
            offset,
            on_disk = disk_number,
            assigned = sequence,
            "Record number differs from decode order"
        );
    }

    let content_len = content_words as usize * 2;
    let body_start = offset + RECORD_HEADER_LEN;
    let available = remaining - RECORD_HEADER_LEN;
    if available < content_len {
        return Err(DecodeError::TruncatedRecord {
            offset,
            record,
            needed: content_len,
            available,
        });
    }

    let body = &data[body_start..body_start + content_len];
    let geometry = decode_body(body, offset, sequence)?;
    Ok((geometry, body_start + content_len))
}

fn read_record_header(cursor: &mut Cursor<&[u8]>) -> std::io::Result<(i32, i32)> {
    let number = cursor.read_i32::<BigEndian>()?;
    let words = cursor.read_i32::<BigEndian>()?;
    Ok((number, words))
}

fn decode_body(body: &[u8], offset: usize, sequence: i32) -> Result<GeometryRecord, DecodeError> {
    let record = Some(sequence);
    let malformed = |reason: String| DecodeError::MalformedRecord {
        offset,
        record,
        reason,
    };

    if body.len() < 4 {
        return Err(malformed(format!(
            "content of {} bytes cannot hold a shape type",
            body.len()
        )));
    }

    let mut cursor = Cursor::new(body);
    let shape_type = cursor
        .read_i32::<LittleEndian>()
        .map_err(|e| malformed(e.to_string()))?;
    let kind = ShapeKind::from_code(shape_type).ok_or(DecodeError::UnsupportedShapeType {
        offset,
        record,
        shape_type,
    })?;

    if body.len() < FIXED_BODY_LEN {
        return Err(malformed(format!(
            "content of {} bytes is shorter than the {FIXED_BODY_LEN} byte {kind} header",
            body.len()
        )));
    }

    let (bounding_box, num_parts, num_points) =
        read_counts(&mut cursor).map_err(|e| malformed(e.to_string()))?;
    if num_parts < 0 || num_points < 0 {
        return Err(malformed(format!(
            "negative counts: {num_parts} parts, {num_points} points"
        )));
    }

    let num_parts = num_parts as usize;
    let num_points = num_points as usize;
    let needed = FIXED_BODY_LEN as u64 + 4 * num_parts as u64 + 16 * num_points as u64;
    if needed > body.len() as u64 {
        return Err(malformed(format!(
            "{num_parts} parts and {num_points} points need {needed} bytes, content has {}",
            body.len()
        )));
    }

    let (parts, xs, ys) =
        read_geometry(&mut cursor, num_parts, num_points).map_err(|e| malformed(e.to_string()))?;
    let parts = parts
        .into_iter()
        .map(|start| usize::try_from(start).map_err(|_| format!("negative part offset {start}")))
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    GeometryRecord::new(sequence, kind, bounding_box, parts, xs, ys)
        .map_err(|e| malformed(e.to_string()))
}

fn read_counts(cursor: &mut Cursor<&[u8]>) -> std::io::Result<(GeoBounds, i32, i32)> {
    let mut bbox = [0.0; 4];
    for value in bbox.iter_mut() {
        *value = cursor.read_f64::<LittleEndian>()?;
    }
    let num_parts = cursor.read_i32::<LittleEndian>()?;
    let num_points = cursor.read_i32::<LittleEndian>()?;
    Ok((GeoBounds::from_array(bbox), num_parts, num_points))
}

type RawGeometry = (Vec<i32>, Vec<f64>, Vec<f64>);

fn read_geometry(
    cursor: &mut Cursor<&[u8]>,
    num_parts: usize,
    num_points: usize,
) -> std::io::Result<RawGeometry> {
    let mut parts = Vec::with_capacity(num_parts);
    for _ in 0..num_parts {
        parts.push(cursor.read_i32::<LittleEndian>()?);
    }
    let mut xs = Vec::with_capacity(num_points);
    let mut ys = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        xs.push(cursor.read_f64::<LittleEndian>()?);
        ys.push(cursor.read_f64::<LittleEndian>()?);
    }
    Ok((parts, xs, ys))
}
