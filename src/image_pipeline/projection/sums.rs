use std::io::{self, Write};

use crate::image_pipeline::canonical::types::CANONICAL_CHANNELS;
use crate::image_pipeline::canonical::CanonicalSink;

/// BT.601 luma of an 8-bit RGB triple, in 8-bit fixed point.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b) + 128) >> 8) as u8
}

/// Which projections a sums file carries. Rows always come before columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axes {
    Rows,
    Columns,
    #[default]
    Both,
}

impl Axes {
    pub fn rows(self) -> bool {
        matches!(self, Axes::Rows | Axes::Both)
    }

    pub fn columns(self) -> bool {
        matches!(self, Axes::Columns | Axes::Both)
    }
}

/// Per-row and per-column luma sums of one canonical image.
///
/// Filled as a [`CanonicalSink`], one call per display row, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSums {
    width: u32,
    height: u32,
    rows: Vec<u64>,
    columns: Vec<u64>,
}

impl ProjectionSums {
    /// Empty sums, ready to receive `height` rows.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rows: Vec::with_capacity(height as usize),
            columns: vec![0; width as usize],
        }
    }

    /// Sums with every row already present and zero.
    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rows: vec![0; height as usize],
            columns: vec![0; width as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    pub fn columns(&self) -> &[u64] {
        &self.columns
    }

    /// Removes `background` element-wise, clamping at zero.
    pub fn subtract(&mut self, background: &ProjectionSums) {
        for (value, bg) in self.rows.iter_mut().zip(&background.rows) {
            *value = value.saturating_sub(*bg);
        }
        for (value, bg) in self.columns.iter_mut().zip(&background.columns) {
            *value = value.saturating_sub(*bg);
        }
    }

    pub(crate) fn accumulate(&mut self, other: &ProjectionSums) {
        for (total, value) in self.rows.iter_mut().zip(&other.rows) {
            *total = total.saturating_add(*value);
        }
        for (total, value) in self.columns.iter_mut().zip(&other.columns) {
            *total = total.saturating_add(*value);
        }
    }

    pub(crate) fn divided_by(&self, count: u64) -> ProjectionSums {
        ProjectionSums {
            width: self.width,
            height: self.height,
            rows: self.rows.iter().map(|v| v / count).collect(),
            columns: self.columns.iter().map(|v| v / count).collect(),
        }
    }

    /// Writes the selected sums as little-endian u64, rows then columns.
    pub fn write_to<W: Write>(&self, axes: Axes, writer: &mut W) -> io::Result<()> {
        if axes.rows() {
            for value in &self.rows {
                writer.write_all(&value.to_le_bytes())?;
            }
        }
        if axes.columns() {
            for value in &self.columns {
                writer.write_all(&value.to_le_bytes())?;
            }
        }
        Ok(())
    }
}

impl CanonicalSink for ProjectionSums {
    fn write_row(&mut self, row: &[u8]) {
        let mut row_sum = 0u64;
        for (column, px) in self.columns.iter_mut().zip(row.chunks_exact(CANONICAL_CHANNELS)) {
            let value = u64::from(luma(px[0], px[1], px[2]));
            *column += value;
            row_sum += value;
        }
        self.rows.push(row_sum);
    }
}
