//! Quantization of camera movements.
use crate::CodecError;

/// Maps bins of an `n_bins x n_bins` grid to camera deltas.
///
/// Each axis is quantized independently with a power-law curve:
///
/// ```text
/// value(i) = sign(i - c) * (base^(|i - c| / c) - 1),  c = n_bins / 2
/// ```
///
/// The center bin does not move the camera. Bins near the center give fine
/// control while the outermost bins reach `base - 1` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraQuantizer {
    n_bins: usize,
    base: f64,
    mapping: Vec<f64>,
}

impl CameraQuantizer {
    /// Constructs a quantizer. `n_bins` must be odd and at least 3, and `base`
    /// must be a finite number greater than 1.
    pub fn new(n_bins: usize, base: f64) -> Result<Self, CodecError> {
        if n_bins < 3 || n_bins % 2 == 0 {
            return Err(CodecError::Configuration(format!(
                "number of camera bins must be odd and >= 3, got {}",
                n_bins
            )));
        }
        if !base.is_finite() || base <= 1.0 {
            return Err(CodecError::Configuration(format!(
                "camera curve base must be finite and > 1, got {}",
                base
            )));
        }

        let center = (n_bins / 2) as i64;
        let mapping = (0..n_bins as i64)
            .map(|i| {
                let k = i - center;
                let magnitude = base.powf(k.abs() as f64 / center as f64) - 1.0;
                match k.signum() {
                    -1 => -magnitude,
                    1 => magnitude,
                    _ => 0.0,
                }
            })
            .collect();

        Ok(Self {
            n_bins,
            base,
            mapping,
        })
    }

    /// Number of bins per axis.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Base of the response curve.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Index of the bin without movement.
    pub fn center(&self) -> usize {
        self.n_bins / 2
    }

    /// Index of the cell without movement.
    pub fn center_cell(&self) -> usize {
        self.center() * (self.n_bins + 1)
    }

    /// Number of cells in the grid.
    pub fn n_cells(&self) -> usize {
        self.n_bins * self.n_bins
    }

    /// Camera delta of every bin along an axis.
    pub fn mapping(&self) -> &[f64] {
        &self.mapping
    }

    /// Camera delta of a bin along an axis.
    pub fn value(&self, bin: usize) -> Result<f64, CodecError> {
        self.mapping
            .get(bin)
            .copied()
            .ok_or_else(|| CodecError::out_of_range("camera bin", bin, self.n_bins))
    }

    /// Returns the camera delta `(dx, dy)` of a cell.
    pub fn decode(&self, bin_x: usize, bin_y: usize) -> Result<(f64, f64), CodecError> {
        Ok((self.value(bin_x)?, self.value(bin_y)?))
    }

    /// Returns the camera delta of a flattened cell index `bin_x * n_bins + bin_y`.
    pub fn decode_index(&self, cell: usize) -> Result<(f64, f64), CodecError> {
        if cell >= self.n_cells() {
            return Err(CodecError::out_of_range("camera cell", cell, self.n_cells()));
        }
        self.decode(cell / self.n_bins, cell % self.n_bins)
    }

    /// Returns the bin along an axis whose value is closest to `v`.
    ///
    /// Ties go to the bin nearer to the center. NaN maps to the center.
    pub fn nearest_bin(&self, v: f64) -> usize {
        if v.is_nan() {
            return self.center();
        }
        let center = self.center();
        let mut best = center;
        let mut best_err = (self.mapping[center] - v).abs();
        for offset in 1..=center {
            for bin in [center - offset, center + offset].iter().copied() {
                let err = (self.mapping[bin] - v).abs();
                if err < best_err {
                    best = bin;
                    best_err = err;
                }
            }
        }
        best
    }

    /// Returns the cell whose camera delta is closest to `(dx, dy)`.
    pub fn encode_nearest(&self, dx: f64, dy: f64) -> (usize, usize) {
        (self.nearest_bin(dx), self.nearest_bin(dy))
    }

    /// Flattened version of [`CameraQuantizer::encode_nearest`].
    pub fn encode_index(&self, dx: f64, dy: f64) -> usize {
        let (x, y) = self.encode_nearest(dx, dy);
        x * self.n_bins + y
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_center_is_still() {
        let q = CameraQuantizer::new(11, 11.0).unwrap();
        assert_eq!(q.center(), 5);
        assert_eq!(q.decode(5, 5).unwrap(), (0.0, 0.0));
        assert_eq!(q.center_cell(), 60);
        assert_eq!(q.decode_index(q.center_cell()).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_symmetry_and_monotonicity() {
        for &(n, base) in &[(3, 10.0), (11, 11.0), (11, 10.0), (21, 2.5)] {
            let q = CameraQuantizer::new(n, base).unwrap();
            let c = q.center();
            let mut prev = 0.0;
            for k in 1..=c {
                let up = q.value(c + k).unwrap();
                let down = q.value(c - k).unwrap();
                assert_eq!(down, -up);
                assert!(up > prev);
                prev = up;
            }
            assert!((q.value(n - 1).unwrap() - (base - 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_matches_reference_table() {
        // 11^(|k| / 5) - 1 for k = 1..=5
        let expected = [0.615_394_266, 1.609_498_635, 3.215_369_133, 5.809_483_128, 10.0];
        let q = CameraQuantizer::new(11, 11.0).unwrap();
        for (k, e) in expected.iter().enumerate() {
            assert!((q.value(6 + k).unwrap() - e).abs() < 1e-6);
        }
    }

    #[test]
    fn test_decode_index() {
        let q = CameraQuantizer::new(11, 11.0).unwrap();
        assert_eq!(q.n_cells(), 121);
        assert_eq!(q.decode_index(60).unwrap(), (0.0, 0.0));
        let (dx, dy) = q.decode_index(10 * 11 + 5).unwrap();
        assert_eq!(dx, 10.0);
        assert_eq!(dy, 0.0);
        assert_eq!(
            q.decode_index(121),
            Err(CodecError::OutOfRange {
                field: "camera cell",
                value: 121,
                bound: 121
            })
        );
        assert!(q.decode(11, 0).is_err());
    }

    #[test]
    fn test_encode_nearest() {
        let q = CameraQuantizer::new(11, 11.0).unwrap();
        for x in 0..11 {
            for y in 0..11 {
                let (dx, dy) = q.decode(x, y).unwrap();
                assert_eq!(q.encode_nearest(dx, dy), (x, y));
                assert_eq!(q.encode_index(dx, dy), x * 11 + y);
            }
        }
        assert_eq!(q.encode_nearest(100.0, -100.0), (10, 0));
        assert_eq!(q.encode_nearest(0.1, f64::NAN), (5, 5));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(CameraQuantizer::new(10, 11.0).is_err());
        assert!(CameraQuantizer::new(1, 11.0).is_err());
        assert!(CameraQuantizer::new(11, 1.0).is_err());
        assert!(CameraQuantizer::new(11, f64::INFINITY).is_err());
    }
}
