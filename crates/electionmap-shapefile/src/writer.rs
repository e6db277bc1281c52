//! Shapefile writer
//!
//! Encodes records back into the `.shp` layout read by
//! [`ShapefileDecoder`](crate::decoder::ShapefileDecoder).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use electionmap_core::GeoBounds;

use crate::header::ShapefileHeader;
use crate::record::{GeometryRecord, ShapeKind};

/// Writes polygon or polyline records as a `.shp` file.
#[derive(Debug, Clone)]
pub struct ShapefileWriter {
    kind: ShapeKind,
    mbr: Option<GeoBounds>,
}

impl ShapefileWriter {
    /// Writer declaring `kind` as the file's shape type.
    pub fn new(kind: ShapeKind) -> Self {
        Self { kind, mbr: None }
    }

    /// Overrides the header MBR, which otherwise is the union of the record boxes.
    pub fn with_mbr(mut self, mbr: GeoBounds) -> Self {
        self.mbr = Some(mbr);
        self
    }

    /// Header describing `records`.
    pub fn header_for(&self, records: &[GeometryRecord]) -> io::Result<ShapefileHeader> {
        let mbr = self.mbr.unwrap_or_else(|| {
            records
                .iter()
                .map(GeometryRecord::bounding_box)
                .reduce(|acc, b| acc.union(&b))
                .unwrap_or_default()
        });
        let total: usize = ShapefileHeader::LEN
            + records
                .iter()
                .map(|r| 8 + r.content_len_bytes())
                .sum::<usize>();
        let mut header = ShapefileHeader::new(self.kind.code(), mbr);
        header.file_length_words = words(total)?;
        Ok(header)
    }

    /// Encodes `records` into an in-memory `.shp` image.
    pub fn encode(&self, records: &[GeometryRecord]) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(records, &mut bytes)?;
        Ok(bytes)
    }

    /// Writes `records` to `writer`; records keep their own record numbers.
    pub fn write_to<W: Write>(&self, records: &[GeometryRecord], writer: &mut W) -> io::Result<()> {
        self.header_for(records)?.write_to(writer)?;
        for record in records {
            write_record(record, writer)?;
        }
        Ok(())
    }

    /// Writes `records` to a file at `path`.
    pub fn write_file(&self, records: &[GeometryRecord], path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_to(records, &mut writer)?;
        writer.flush()?;
        tracing::debug!(
            path = %path.as_ref().display(),
            records = records.len(),
            "Wrote shapefile"
        );
        Ok(())
    }
}

fn words(bytes: usize) -> io::Result<i32> {
    i32::try_from(bytes / 2).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{bytes} bytes exceed the shapefile length field"),
        )
    })
}

fn count(value: usize) -> io::Result<i32> {
    i32::try_from(value)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "count exceeds i32"))
}

fn write_record<W: Write>(record: &GeometryRecord, writer: &mut W) -> io::Result<()> {
    writer.write_i32::<BigEndian>(record.record_number())?;
    writer.write_i32::<BigEndian>(words(record.content_len_bytes())?)?;

    writer.write_i32::<LittleEndian>(record.kind().code())?;
    for value in record.bounding_box().to_array() {
        writer.write_f64::<LittleEndian>(value)?;
    }
    writer.write_i32::<LittleEndian>(count(record.num_parts())?)?;
    writer.write_i32::<LittleEndian>(count(record.num_points())?)?;
    for &start in record.parts() {
        writer.write_i32::<LittleEndian>(count(start)?)?;
    }
    for (x, y) in record.points_x().iter().zip(record.points_y()) {
        writer.write_f64::<LittleEndian>(*x)?;
        writer.write_f64::<LittleEndian>(*y)?;
    }
    Ok(())
}
