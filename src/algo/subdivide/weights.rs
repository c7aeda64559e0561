//! Doo-Sabin averaging coefficients.
//!
//! A shrunken corner `i` of a face with `n` corners is the weighted sum of
//! all corners `j` of that face:
//!
//! ```text
//! w(n, i, j) = [i == j] / 4 + (3 + 2 cos(2π |i - j| / n)) / (4n)
//! ```
//!
//! For `n >= 2` the weights of a row sum to one, so every new point is an
//! affine combination of the face corners.

use std::sync::OnceLock;

use crate::error::{MeshError, Result};

/// Face order ceiling of the shared table.
pub const DEFAULT_MAX_FACE_ORDER: usize = 100;

static SHARED: OnceLock<WeightTable> = OnceLock::new();

/// Precomputed weights for every face order up to a ceiling.
///
/// The table is immutable once built and can be read from any number of
/// threads.
#[derive(Debug, Clone)]
pub struct WeightTable {
    max_order: usize,
    /// `cos(2πk/n)` for `k in 0..n`, for each `n in 1..=max_order`,
    /// stored back to back. Order `n` starts at `n(n-1)/2`.
    cosines: Vec<f64>,
}

impl WeightTable {
    /// Build a table covering face orders `1..=max_order`.
    pub fn new(max_order: usize) -> Result<Self> {
        if max_order == 0 {
            return Err(MeshError::invalid_param(
                "max_face_order",
                max_order,
                "must be at least 1",
            ));
        }

        Ok(Self::build(max_order))
    }

    /// The process-wide table with [`DEFAULT_MAX_FACE_ORDER`].
    ///
    /// Built on first call; concurrent first callers block until it is ready.
    pub fn shared() -> &'static WeightTable {
        SHARED.get_or_init(|| {
            log::debug!("building shared weight table (max face order {})", DEFAULT_MAX_FACE_ORDER);
            Self::build(DEFAULT_MAX_FACE_ORDER)
        })
    }

    fn build(max_order: usize) -> Self {
        let mut cosines = Vec::with_capacity(max_order * (max_order + 1) / 2);
        for n in 1..=max_order {
            let alpha = 2.0 * std::f64::consts::PI / n as f64;
            cosines.extend((0..n).map(|k| (alpha * k as f64).cos()));
        }
        Self { max_order, cosines }
    }

    /// Largest face order this table covers.
    #[inline]
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Check that faces of order `n` can be shrunk with this table.
    pub fn check_order(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(MeshError::invalid_param("face order", n, "must be at least 1"));
        }
        if n > self.max_order {
            return Err(MeshError::FaceOrderTooLarge {
                order: n,
                max: self.max_order,
            });
        }
        Ok(())
    }

    /// Weight of source corner `j` in destination corner `i` of an `n`-gon.
    pub fn weight(&self, n: usize, i: usize, j: usize) -> Result<f64> {
        self.check_order(n)?;
        if i >= n || j >= n {
            return Err(MeshError::invalid_param(
                "corner",
                i.max(j),
                "must be less than the face order",
            ));
        }
        Ok(self.weight_unchecked(n, i, j))
    }

    /// All weights contributing to destination corner `i`, in corner order.
    pub fn row(&self, n: usize, i: usize) -> Result<impl Iterator<Item = f64> + '_> {
        self.check_order(n)?;
        if i >= n {
            return Err(MeshError::invalid_param(
                "corner",
                i,
                "must be less than the face order",
            ));
        }
        Ok((0..n).map(move |j| self.weight_unchecked(n, i, j)))
    }

    #[inline]
    fn weight_unchecked(&self, n: usize, i: usize, j: usize) -> f64 {
        let k = i.abs_diff(j);
        let cos = self.cosines[n * (n - 1) / 2 + k];
        let diagonal = if k == 0 { 0.25 } else { 0.0 };
        diagonal + 0.25 * (3.0 + 2.0 * cos) / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sum_to_one() {
        let table = WeightTable::new(DEFAULT_MAX_FACE_ORDER).unwrap();
        for n in 2..=table.max_order() {
            for i in 0..n {
                let sum: f64 = table.row(n, i).unwrap().sum();
                assert!((sum - 1.0).abs() < 1e-12, "n={} i={} sum={}", n, i, sum);
            }
        }
    }

    #[test]
    fn test_quad_weights() {
        // Classic Doo-Sabin quad mask: 9/16, 3/16, 1/16, 3/16
        let table = WeightTable::shared();
        let expected = [9.0 / 16.0, 3.0 / 16.0, 1.0 / 16.0];
        for (j, &w) in expected.iter().enumerate() {
            assert!((table.weight(4, 0, j).unwrap() - w).abs() < 1e-12);
        }
        // |i - j| = 3 wraps around to the neighbor on the other side
        assert!((table.weight(4, 0, 3).unwrap() - 3.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_weights() {
        let table = WeightTable::shared();
        // (3 + 2) / 12 + 1/4 and (3 - 1) / 12
        assert!((table.weight(3, 1, 1).unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((table.weight(3, 1, 0).unwrap() - 1.0 / 6.0).abs() < 1e-12);
        assert!((table.weight(3, 1, 2).unwrap() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_order_too_large() {
        let table = WeightTable::new(6).unwrap();
        assert!(table.weight(6, 0, 5).is_ok());
        assert!(matches!(
            table.weight(7, 0, 0),
            Err(MeshError::FaceOrderTooLarge { order: 7, max: 6 })
        ));

        // Raising the ceiling resolves it
        let bigger = WeightTable::new(7).unwrap();
        assert!(bigger.weight(7, 0, 0).is_ok());
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            WeightTable::new(0),
            Err(MeshError::InvalidParameter { .. })
        ));
        let table = WeightTable::shared();
        assert!(table.weight(0, 0, 0).is_err());
        assert!(table.weight(3, 3, 0).is_err());
        assert!(table.row(3, 4).is_err());
    }

    #[test]
    fn test_shared_matches_fresh_table() {
        let shared = WeightTable::shared();
        let fresh = WeightTable::new(DEFAULT_MAX_FACE_ORDER).unwrap();
        assert_eq!(shared.max_order(), fresh.max_order());
        for n in [3, 4, 5, 17, 100] {
            for j in 0..n {
                assert_eq!(shared.weight(n, 0, j).unwrap(), fresh.weight(n, 0, j).unwrap());
            }
        }
    }
}
