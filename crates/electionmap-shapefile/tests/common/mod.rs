//! Raw `.shp` byte builder for decoder tests.
//!
//! Unlike `ShapefileWriter` this writes whatever it is told, so tests can
//! produce files the writer would refuse to emit.

#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

pub struct RawRecord {
    pub number: i32,
    pub shape_type: i32,
    pub bbox: [f64; 4],
    pub parts: Vec<i32>,
    pub points: Vec<(f64, f64)>,
    /// Overrides the declared part count.
    pub num_parts: Option<i32>,
    /// Overrides the declared point count.
    pub num_points: Option<i32>,
    /// Extra bytes appended inside the record content.
    pub padding: usize,
}

impl RawRecord {
    pub fn polygon(number: i32, parts: Vec<i32>, points: Vec<(f64, f64)>) -> Self {
        let xs = points.iter().map(|p| p.0);
        let ys = points.iter().map(|p| p.1);
        let bbox = [
            xs.clone().fold(f64::INFINITY, f64::min),
            ys.clone().fold(f64::INFINITY, f64::min),
            xs.fold(f64::NEG_INFINITY, f64::max),
            ys.fold(f64::NEG_INFINITY, f64::max),
        ];
        Self {
            number,
            shape_type: 5,
            bbox,
            parts,
            points,
            num_parts: None,
            num_points: None,
            padding: 0,
        }
    }

    /// Axis-aligned square ring with its lower-left corner at `(x, y)`.
    pub fn square(number: i32, x: f64, y: f64, size: f64) -> Self {
        Self::polygon(
            number,
            vec![0],
            vec![
                (x, y),
                (x, y + size),
                (x + size, y + size),
                (x + size, y),
                (x, y),
            ],
        )
    }

    pub fn content(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_i32::<LittleEndian>(self.shape_type).unwrap();
        for v in self.bbox {
            out.write_f64::<LittleEndian>(v).unwrap();
        }
        out.write_i32::<LittleEndian>(self.num_parts.unwrap_or(self.parts.len() as i32))
            .unwrap();
        out.write_i32::<LittleEndian>(self.num_points.unwrap_or(self.points.len() as i32))
            .unwrap();
        for p in &self.parts {
            out.write_i32::<LittleEndian>(*p).unwrap();
        }
        for (x, y) in &self.points {
            out.write_f64::<LittleEndian>(*x).unwrap();
            out.write_f64::<LittleEndian>(*y).unwrap();
        }
        out.extend(std::iter::repeat(0u8).take(self.padding));
        out
    }
}

pub struct ShpBuilder {
    pub file_code: i32,
    pub version: i32,
    pub shape_type: i32,
    pub mbr: [f64; 4],
    pub records: Vec<RawRecord>,
    /// Overrides the declared file length (in 16-bit words).
    pub file_length_words: Option<i32>,
}

impl ShpBuilder {
    pub fn new(mbr: [f64; 4]) -> Self {
        Self {
            file_code: 9994,
            version: 1000,
            shape_type: 5,
            mbr,
            records: Vec::new(),
            file_length_words: None,
        }
    }

    pub fn record(mut self, record: RawRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for record in &self.records {
            let content = record.content();
            body.write_i32::<BigEndian>(record.number).unwrap();
            body.write_i32::<BigEndian>((content.len() / 2) as i32)
                .unwrap();
            body.extend(content);
        }

        let total_words = ((100 + body.len()) / 2) as i32;
        let mut out = Vec::new();
        out.write_i32::<BigEndian>(self.file_code).unwrap();
        for _ in 0..5 {
            out.write_i32::<BigEndian>(0).unwrap();
        }
        out.write_i32::<BigEndian>(self.file_length_words.unwrap_or(total_words))
            .unwrap();
        out.write_i32::<LittleEndian>(self.version).unwrap();
        out.write_i32::<LittleEndian>(self.shape_type).unwrap();
        for v in self.mbr {
            out.write_f64::<LittleEndian>(v).unwrap();
        }
        for _ in 0..4 {
            out.write_f64::<LittleEndian>(0.0).unwrap();
        }
        out.extend(body);
        out
    }
}
