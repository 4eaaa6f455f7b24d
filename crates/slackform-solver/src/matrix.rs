use std::ops::{Index, IndexMut, Range};

/// Dense row-major matrix of `f64` values.
///
/// The buffer is sized once at construction and never resized; the solver only
/// reads, writes and combines rows in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// A `rows` x `cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Multiply every entry of row `i` by `factor`
    pub fn scale_row(&mut self, i: usize, factor: f64) {
        for value in self.row_mut(i) {
            *value *= factor;
        }
    }

    /// `row[target] -= factor * row[source]`
    pub fn sub_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        if target == source {
            self.scale_row(target, 1.0 - factor);
            return;
        }

        let cols = self.cols;
        let (src, dst) = if source < target {
            let (head, tail) = self.data.split_at_mut(target * cols);
            (&head[source * cols..(source + 1) * cols], &mut tail[..cols])
        } else {
            let (head, tail) = self.data.split_at_mut(source * cols);
            (&tail[..cols], &mut head[target * cols..(target + 1) * cols])
        };

        for (d, s) in dst.iter_mut().zip(src) {
            *d -= factor * s;
        }
    }

    /// Column index and value of the smallest entry of row `i` within `cols`.
    ///
    /// Ties resolve to the lowest index. Returns `None` for an empty range.
    pub fn argmin_in_row(&self, i: usize, cols: Range<usize>) -> Option<(usize, f64)> {
        let offset = cols.start;
        self.row(i)[cols]
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (j, &value)| match best {
                Some((_, min)) if value >= min => best,
                _ => Some((offset + j, value)),
            })
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        debug_assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        &mut self.data[i * self.cols + j]
    }
}
