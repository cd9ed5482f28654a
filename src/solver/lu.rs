//! Dense LU factorization with partial pivoting.

use crate::error::{DesignError, Result};

/// Relative pivot tolerance.
///
/// A pivot counts as zero when it is smaller than this fraction of the
/// largest entry its column had before elimination. Scaling a column by any
/// factor therefore leaves the singularity decision unchanged.
pub const PIVOT_THRESHOLD: f64 = 1e-15;

/// LU decomposition of a square row-major matrix.
#[derive(Debug, Clone)]
pub struct DenseLu {
    /// Combined L (unit lower, below the diagonal) and U factors
    lu: Vec<f64>,
    /// Row permutation applied during pivoting
    pivots: Vec<usize>,
    size: usize,
}

impl DenseLu {
    /// Factor the `size x size` matrix `a`.
    ///
    /// Fails with [`DesignError::SingularMatrix`] when some column has no
    /// pivot above [`PIVOT_THRESHOLD`] relative to its own scale, which
    /// includes all-zero and NaN columns.
    pub fn factor(a: &[f64], size: usize) -> Result<Self> {
        debug_assert_eq!(a.len(), size * size);
        let n = size;
        let mut lu = a.to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let column_scale: Vec<f64> = (0..n)
            .map(|k| (0..n).map(|i| a[i * n + k].abs()).fold(0.0, f64::max))
            .collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            // Negated so a NaN pivot also counts as singular.
            if !(max_val > PIVOT_THRESHOLD * column_scale[k]) {
                return Err(DesignError::SingularMatrix);
            }

            if max_row != k {
                pivots.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(Self { lu, pivots, size })
    }

    /// Solve `A x = b` using the stored factors.
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.size;
        debug_assert_eq!(b.len(), n);

        let mut x: Vec<f64> = self.pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        x
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }
}
