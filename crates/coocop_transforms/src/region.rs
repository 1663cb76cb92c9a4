//! Random placement of the copied rectangle.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use coocop_core::{CoreError, Result};

/// A destination rectangle and the origin of the equally sized source block.
///
/// Both sides always have the same height and width. A region may be empty
/// when the centre lands on an edge or `extent < 2`; copying it is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Destination rows.
    pub dst_rows: Range<usize>,
    /// Destination columns.
    pub dst_cols: Range<usize>,
    /// First source row.
    pub src_row: usize,
    /// First source column.
    pub src_col: usize,
}

impl Region {
    /// Rows covered by the region.
    #[must_use]
    pub fn height(&self) -> usize {
        self.dst_rows.len()
    }

    /// Columns covered by the region.
    #[must_use]
    pub fn width(&self) -> usize {
        self.dst_cols.len()
    }

    /// True if the region covers no pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dst_rows.is_empty() || self.dst_cols.is_empty()
    }

    /// Source rows matching [`Region::dst_rows`].
    #[must_use]
    pub fn src_rows(&self) -> Range<usize> {
        self.src_row..self.src_row + self.height()
    }

    /// Source columns matching [`Region::dst_cols`].
    #[must_use]
    pub fn src_cols(&self) -> Range<usize> {
        self.src_col..self.src_col + self.width()
    }
}

/// Samples square regions of side `extent` centred at a random pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSampler {
    extent: usize,
}

impl RegionSampler {
    /// Create a sampler for squares of side `extent`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `extent` is zero.
    pub fn new(extent: usize) -> Result<Self> {
        if extent == 0 {
            return Err(CoreError::invalid_config("extent", "> 0", extent));
        }
        Ok(Self { extent })
    }

    /// Side length of the square.
    #[must_use]
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Place a region in a `dst` image fed from a `src` image.
    ///
    /// Both sizes are `(height, width)` and must be non-zero. The centre is
    /// uniform over the destination, the square spans `extent / 2` on each
    /// side of it and is clipped to the destination. If the source is
    /// smaller than the clipped square along an axis, the square is cut
    /// down to the source size on that axis. The source origin is uniform
    /// over `[0, src - size)` per axis, or 0 when that range is empty.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        dst: (usize, usize),
        src: (usize, usize),
        rng: &mut R,
    ) -> Region {
        let (dst_h, dst_w) = dst;
        let (src_h, src_w) = src;

        let y = rng.gen_range(0..dst_h);
        let x = rng.gen_range(0..dst_w);

        let dst_rows = self.span(y, dst_h, src_h);
        let dst_cols = self.span(x, dst_w, src_w);

        let src_row = origin(src_h, dst_rows.len(), rng);
        let src_col = origin(src_w, dst_cols.len(), rng);

        Region {
            dst_rows,
            dst_cols,
            src_row,
            src_col,
        }
    }

    /// Clipped span around `center` along one axis.
    fn span(&self, center: usize, bound: usize, src_bound: usize) -> Range<usize> {
        let half = self.extent / 2;
        let start = center.saturating_sub(half).min(bound);
        let end = (center + half).min(bound);
        let len = (end - start).min(src_bound);
        start..start + len
    }
}

/// Random origin in `[0, bound - size)`, 0 if empty.
fn origin<R: Rng + ?Sized>(bound: usize, size: usize, rng: &mut R) -> usize {
    match bound.saturating_sub(size) {
        0 => 0,
        upper => rng.gen_range(0..upper),
    }
}
