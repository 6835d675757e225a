//! Binary opacity mask built from a raster's alpha channel.

use ndarray::{s, Array2, Zip};

use crate::raster::Raster;

/// One flag per pixel, `true` where the pixel counts as sprite content.
#[derive(Clone, Debug)]
pub struct AlphaMask {
    opaque: Array2<bool>,
}

impl AlphaMask {
    /// Mark every pixel whose alpha is strictly greater than `cutoff`.
    ///
    /// Rows are classified in parallel.
    pub fn build(raster: &Raster, cutoff: u8) -> Self {
        let view = raster.view();
        let alpha = view.slice(s![.., .., 3]);
        let mut opaque = Array2::<bool>::from_elem(alpha.dim(), false);

        Zip::from(&mut opaque)
            .and(&alpha)
            .par_for_each(|m, &a| *m = a > cutoff);

        Self { opaque }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.opaque.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.opaque.dim().0
    }

    #[inline]
    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        self.opaque[[y, x]]
    }

    /// Total number of opaque pixels.
    pub fn count(&self) -> usize {
        self.opaque.iter().filter(|&&m| m).count()
    }

    /// For each row, whether it holds at least one opaque pixel.
    pub fn occupied_rows(&self) -> Vec<bool> {
        self.opaque.rows().into_iter().map(|row| row.iter().any(|&m| m)).collect()
    }

    /// For each column, whether it holds at least one opaque pixel.
    pub fn occupied_columns(&self) -> Vec<bool> {
        self.opaque
            .columns()
            .into_iter()
            .map(|col| col.iter().any(|&m| m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_with_alphas(width: usize, alphas: &[u8]) -> Raster {
        let height = alphas.len() / width;
        let data = alphas.iter().flat_map(|&a| [200, 100, 50, a]).collect();
        Raster::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_cutoff_is_strict() {
        let raster = raster_with_alphas(4, &[0, 1, 2, 255]);
        let mask = AlphaMask::build(&raster, 1);
        assert!(!mask.is_opaque(0, 0));
        assert!(!mask.is_opaque(1, 0));
        assert!(mask.is_opaque(2, 0));
        assert!(mask.is_opaque(3, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_threshold_cutoff() {
        let raster = raster_with_alphas(3, &[128, 129, 255]);
        let mask = AlphaMask::build(&raster, 128);
        assert_eq!(mask.count(), 2);
        assert!(!mask.is_opaque(0, 0));
    }

    #[test]
    fn test_dimensions_match() {
        let raster = Raster::transparent(7, 3).unwrap();
        let mask = AlphaMask::build(&raster, 1);
        assert_eq!((mask.width(), mask.height()), (7, 3));
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_occupancy() {
        // 3x3 with a single opaque pixel at (2, 1)
        let mut alphas = [0u8; 9];
        alphas[5] = 255;
        let mask = AlphaMask::build(&raster_with_alphas(3, &alphas), 1);
        assert_eq!(mask.occupied_rows(), vec![false, true, false]);
        assert_eq!(mask.occupied_columns(), vec![false, false, true]);
    }
}
