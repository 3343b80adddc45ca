//! Masked numeric arrays
//!
//! A [`MaskedArray`] pairs an `f64` array with a boolean mask of the same
//! shape. A `true` mask bit marks the element as invalid, the way catalog
//! services report missing values in numeric columns.

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::{ExoskyError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray {
    data: ArrayD<f64>,
    mask: ArrayD<bool>,
}

impl MaskedArray {
    /// Pair `data` with `mask`, which must have the same shape
    pub fn new(data: ArrayD<f64>, mask: ArrayD<bool>) -> Result<Self> {
        if data.shape() != mask.shape() {
            return Err(ExoskyError::DataError(format!(
                "Mask shape {:?} does not match data shape {:?}",
                mask.shape(),
                data.shape()
            )));
        }
        Ok(Self { data, mask })
    }

    /// One-dimensional array where `None` entries are masked
    pub fn from_options(values: &[Option<f64>]) -> Self {
        let shape = IxDyn(&[values.len()]);
        let data = ArrayD::from_shape_fn(shape.clone(), |idx| values[idx[0]].unwrap_or(0.0));
        let mask = ArrayD::from_shape_fn(shape, |idx| values[idx[0]].is_none());
        Self { data, mask }
    }

    /// View of the raw values, masked elements included
    pub fn data(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    pub fn mask(&self) -> ArrayViewD<'_, bool> {
        self.mask.view()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of masked elements
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Element `index` of a one-dimensional array, `None` when masked or out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        if self.data.ndim() != 1 {
            return None;
        }
        match self.mask.get(IxDyn(&[index])) {
            Some(false) => self.data.get(IxDyn(&[index])).copied(),
            _ => None,
        }
    }

    /// Copy of the data with masked elements replaced by `fill`
    pub fn filled(&self, fill: f64) -> ArrayD<f64> {
        let mut out = self.data.clone();
        out.zip_mut_with(&self.mask, |v, &masked| {
            if masked {
                *v = fill;
            }
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_from_options() {
        let column = MaskedArray::from_options(&[Some(1.5), None, Some(-2.0)]);
        assert_eq!(column.len(), 3);
        assert_eq!(column.data().shape(), &[3]);
        assert_eq!(column.masked_count(), 1);
        assert_eq!(column.get(0), Some(1.5));
        assert_eq!(column.get(1), None);
        assert_eq!(column.get(2), Some(-2.0));
        assert_eq!(column.get(3), None);
    }

    #[test]
    fn test_shape_mismatch() {
        let data = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let mask = ArrayD::from_elem(IxDyn(&[4]), false);
        let result = MaskedArray::new(data, mask);
        assert!(matches!(result, Err(ExoskyError::DataError(_))));
    }

    #[test]
    fn test_filled() {
        let column = MaskedArray::from_options(&[None, Some(7.0)]);
        let filled = column.filled(f64::NAN);
        assert!(filled[[0]].is_nan());
        assert_eq!(filled[[1]], 7.0);
    }

    #[test]
    fn test_get_on_2d_is_none() {
        let data = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let column = MaskedArray::new(data, ArrayD::from_elem(IxDyn(&[2, 2]), false)).unwrap();
        assert_eq!(column.masked_count(), 0);
        assert_eq!(column.get(0), None);
    }
}
