//! BoolNet Engine: Boolean Matrix
//!
//! Row-major storage with bounds-checked access. Used for topology,
//! mask and trajectory alike.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bits::{decode_bits, encode_bits};
use crate::error::{Result, ShapeMismatch};

/// Dense `rows × cols` boolean matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl BoolMatrix {
    /// All-false matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![false; rows * cols],
        }
    }

    /// Build from a flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<bool>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ShapeMismatch::FlatLength {
                rows,
                cols,
                len: data.len(),
            }
            .into());
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows. Every row must have the width of the first.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(ShapeMismatch::RaggedRow {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                }
                .into());
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Build from '0'/'1' row strings.
    pub fn from_bit_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let parsed = rows
            .iter()
            .enumerate()
            .map(|(i, r)| decode_bits(r.as_ref(), i))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(parsed)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Cell `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j).copied()
        } else {
            None
        }
    }

    /// Set cell `(i, j)`. Returns false when out of range.
    pub fn set(&mut self, i: usize, j: usize, value: bool) -> bool {
        if i < self.rows && j < self.cols {
            self.data[i * self.cols + j] = value;
            true
        } else {
            false
        }
    }

    /// Row `i` as a slice, or None when out of range.
    pub fn row(&self, i: usize) -> Option<&[bool]> {
        (i < self.rows).then(|| self.row_slice(i))
    }

    /// Row `i` without the range check. Callers guarantee `i < rows`.
    #[inline]
    pub(crate) fn row_slice(&self, i: usize) -> &[bool] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        (0..self.rows).map(move |i| self.row_slice(i))
    }

    /// Flat row-major view.
    pub fn as_flat(&self) -> &[bool] {
        &self.data
    }

    pub fn into_flat(self) -> Vec<bool> {
        self.data
    }

    /// Append a row. The first row pushed into a 0-column matrix fixes the width.
    pub fn push_row(&mut self, row: &[bool]) -> Result<()> {
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        }
        if row.len() != self.cols {
            return Err(ShapeMismatch::RaggedRow {
                row: self.rows,
                expected: self.cols,
                found: row.len(),
            }
            .into());
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn to_bit_rows(&self) -> Vec<String> {
        self.iter_rows().map(encode_bits).collect()
    }
}

impl Serialize for BoolMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_bit_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoolMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        BoolMatrix::from_bit_rows(&rows).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_from_rows_row_major() {
        let m = BoolMatrix::from_rows(vec![vec![true, false], vec![false, false]]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(0, 0), Some(true));
        assert_eq!(m.get(0, 1), Some(false));
        assert_eq!(m.as_flat(), &[true, false, false, false]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = BoolMatrix::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            EngineError::ShapeMismatch(ShapeMismatch::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_flat_length_checked() {
        assert!(BoolMatrix::from_flat(2, 3, vec![false; 6]).is_ok());
        let err = BoolMatrix::from_flat(2, 3, vec![false; 5]).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let m = BoolMatrix::zeros(2, 3);
        assert_eq!(m.get(1, 2), Some(false));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_row_is_bounds_checked() {
        let m = BoolMatrix::from_bit_rows(&["01", "10"]).unwrap();
        assert_eq!(m.row(1), Some(&[true, false][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(BoolMatrix::zeros(0, 0).row(0), None);
    }

    #[test]
    fn test_bit_rows_and_serde() {
        let m = BoolMatrix::from_bit_rows(&["010", "001", "100"]).unwrap();
        assert_eq!(m.get(0, 1), Some(true));
        assert_eq!(m.get(2, 0), Some(true));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"["010","001","100"]"#);
        let back: BoolMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<BoolMatrix>(r#"["01","1"]"#).is_err());
    }

    #[test]
    fn test_push_row_fixes_width() {
        let mut m = BoolMatrix::zeros(0, 0);
        m.push_row(&[true, false]).unwrap();
        m.push_row(&[false, false]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.push_row(&[true]).is_err());
    }
}
