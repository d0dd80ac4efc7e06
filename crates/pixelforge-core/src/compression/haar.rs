//! Multi-level 2D Haar wavelet transform on square, power-of-two matrices.
//!
//! Each level runs a 1D pass over every active row and then every active
//! column, pairing `(2k, 2k + 1)`:
//! ```text
//! average    = (a + b) / √2   → first half
//! difference = (a − b) / √2   → second half
//! ```
//! The active region halves after each level (`size, size/2, …, 2`);
//! coefficients outside it are left alone. The inverse walks the levels in
//! the opposite order and undoes columns before rows.

use std::f64::consts::SQRT_2;

/// Square `size × size` matrix of coefficients, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Build from rows. Every row must be as long as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, v: f64) {
        self.data[row * self.size + col] = v;
    }

    /// All coefficients, row-major.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Forward transform in place. `size` must be a power of two.
pub fn forward_2d(m: &mut Matrix) {
    let mut scratch = vec![0.0; m.size];
    let mut c = m.size;
    while c > 1 {
        for row in 0..c {
            load_row(m, row, c, &mut scratch);
            forward_1d(&mut scratch[..c]);
            store_row(m, row, &scratch[..c]);
        }
        for col in 0..c {
            load_col(m, col, c, &mut scratch);
            forward_1d(&mut scratch[..c]);
            store_col(m, col, &scratch[..c]);
        }
        c /= 2;
    }
}

/// Inverse of [`forward_2d`], in place.
pub fn inverse_2d(m: &mut Matrix) {
    let mut scratch = vec![0.0; m.size];
    let mut c = 2;
    while c <= m.size {
        for col in 0..c {
            load_col(m, col, c, &mut scratch);
            inverse_1d(&mut scratch[..c]);
            store_col(m, col, &scratch[..c]);
        }
        for row in 0..c {
            load_row(m, row, c, &mut scratch);
            inverse_1d(&mut scratch[..c]);
            store_row(m, row, &scratch[..c]);
        }
        c *= 2;
    }
}

/// One Haar level over `signal`: averages then differences.
fn forward_1d(signal: &mut [f64]) {
    let half = signal.len() / 2;
    let input = signal.to_vec();
    for k in 0..half {
        let (a, b) = (input[2 * k], input[2 * k + 1]);
        signal[k] = (a + b) / SQRT_2;
        signal[half + k] = (a - b) / SQRT_2;
    }
}

/// Re-interleave averages and differences produced by [`forward_1d`].
fn inverse_1d(signal: &mut [f64]) {
    let half = signal.len() / 2;
    let input = signal.to_vec();
    for k in 0..half {
        let (avg, diff) = (input[k], input[half + k]);
        signal[2 * k] = (avg + diff) / SQRT_2;
        signal[2 * k + 1] = (avg - diff) / SQRT_2;
    }
}

fn load_row(m: &Matrix, row: usize, len: usize, out: &mut [f64]) {
    out[..len].copy_from_slice(&m.data[row * m.size..row * m.size + len]);
}

fn store_row(m: &mut Matrix, row: usize, values: &[f64]) {
    let start = row * m.size;
    m.data[start..start + values.len()].copy_from_slice(values);
}

fn load_col(m: &Matrix, col: usize, len: usize, out: &mut [f64]) {
    for (row, slot) in out[..len].iter_mut().enumerate() {
        *slot = m.get(row, col);
    }
}

fn store_col(m: &mut Matrix, col: usize, values: &[f64]) {
    for (row, &v) in values.iter().enumerate() {
        m.set(row, col, v);
    }
}
