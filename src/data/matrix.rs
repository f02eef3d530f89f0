//! Decision matrix storage and shape checks.

use crate::error::{ShapeError, ValidationError};

/// Alternatives × criteria matrix of finite values.
///
/// Stored row-major. Row `i` is alternative `i`, column `j` is criterion `j`.
///
/// # Examples
///
/// ```
/// use u_mcdm::data::DecisionMatrix;
///
/// let mtx = DecisionMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(mtx.shape(), (2, 2));
/// assert_eq!(mtx.column(1), vec![2.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Errors raised while building a [`DecisionMatrix`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<MatrixError> for crate::error::DecisionError {
    fn from(err: MatrixError) -> Self {
        match err {
            MatrixError::Shape(e) => e.into(),
            MatrixError::Validation(e) => e.into(),
        }
    }
}

impl DecisionMatrix {
    /// Builds a matrix from rows.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Empty`] when there are no rows or no columns
    /// - [`ShapeError::Ragged`] when rows differ in length
    /// - [`ValidationError::NonFiniteValue`] on NaN or infinite entries
    pub fn from_rows<R: AsRef<[f64]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, MatrixError> {
        let mut data = Vec::new();
        let mut cols = None;
        let mut n = 0usize;

        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ShapeError::Ragged {
                    row: i,
                    expected,
                    actual: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
            n += 1;
        }

        let cols = cols.unwrap_or(0);
        Self::from_vec(data, n, cols)
    }

    /// Builds a matrix from a row-major buffer.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty.into());
        }
        if data.len() != rows * cols {
            return Err(
                ShapeError::length_mismatch("matrix buffer", rows * cols, data.len()).into(),
            );
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteValue {
                row: pos / cols,
                col: pos % cols,
                value: data[pos],
            }
            .into());
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from columns of equal length.
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[C]) -> Result<Self, MatrixError> {
        let cols = columns.len();
        let rows = columns.first().map_or(0, |c| c.as_ref().len());
        if let Some(column) = columns.iter().find(|c| c.as_ref().len() != rows) {
            return Err(ShapeError::length_mismatch("column", rows, column.as_ref().len()).into());
        }
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend(columns.iter().map(|c| c.as_ref()[i]));
        }
        Self::from_vec(data, rows, cols)
    }

    /// Number of alternatives.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of criteria.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the entry at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }

    /// Copies column `j` out of the matrix.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows_iter().map(|row| row[j]).collect()
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Applies `f` to every column independently and rebuilds the matrix.
    ///
    /// `f` must return a column of the same length; otherwise a
    /// [`ShapeError::LengthMismatch`] is returned. Non-finite outputs are
    /// rejected like any other input.
    pub fn map_columns<F>(&self, mut f: F) -> Result<Self, MatrixError>
    where
        F: FnMut(usize, &[f64]) -> Vec<f64>,
    {
        let mut columns = Vec::with_capacity(self.cols);
        for j in 0..self.cols {
            let mapped = f(j, &self.column(j));
            if mapped.len() != self.rows {
                return Err(
                    ShapeError::length_mismatch("normalized column", self.rows, mapped.len())
                        .into(),
                );
            }
            columns.push(mapped);
        }
        Self::from_columns(&columns)
    }
}

/// Returns `true` if `candidate` is a non-empty rectangular 2-D array.
///
/// When `expected_shape` is given, the shape must also match exactly.
/// Never fails; callers decide whether a `false` is fatal.
///
/// ```
/// use u_mcdm::data::is_matrix;
///
/// assert!(is_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]], None));
/// assert!(!is_matrix(&[vec![1.0, 2.0], vec![3.0]], None));
/// assert!(!is_matrix(&[vec![1.0, 2.0]], Some((2, 2))));
/// ```
pub fn is_matrix<R: AsRef<[f64]>>(candidate: &[R], expected_shape: Option<(usize, usize)>) -> bool {
    let Some(first) = candidate.first() else {
        return false;
    };
    let cols = first.as_ref().len();
    if cols == 0 || candidate.iter().any(|row| row.as_ref().len() != cols) {
        return false;
    }
    match expected_shape {
        Some(shape) => shape == (candidate.len(), cols),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let mtx = DecisionMatrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(mtx.shape(), (2, 3));
        assert_eq!(mtx.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(mtx.column(2), vec![3.0, 6.0]);
        assert!((mtx.get(0, 1) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_empty_rejected() {
        let err = DecisionMatrix::from_rows(Vec::<Vec<f64>>::new()).unwrap_err();
        assert_eq!(err, MatrixError::Shape(ShapeError::Empty));

        let err = DecisionMatrix::from_rows(vec![Vec::<f64>::new()]).unwrap_err();
        assert_eq!(err, MatrixError::Shape(ShapeError::Empty));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = DecisionMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Shape(ShapeError::Ragged {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = DecisionMatrix::from_rows(vec![vec![1.0, 2.0], vec![f64::NAN, 3.0]]).unwrap_err();
        match err {
            MatrixError::Validation(ValidationError::NonFiniteValue { row, col, .. }) => {
                assert_eq!((row, col), (1, 0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(DecisionMatrix::from_rows(vec![vec![f64::INFINITY]]).is_err());
    }

    #[test]
    fn test_from_columns_transposes() {
        let mtx = DecisionMatrix::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(mtx.row(0), &[1.0, 3.0]);
        assert_eq!(mtx.row(1), &[2.0, 4.0]);
    }

    #[test]
    fn test_map_columns() {
        let mtx = DecisionMatrix::from_rows([[1.0, 10.0], [3.0, 30.0]]).unwrap();
        let scaled = mtx
            .map_columns(|j, col| col.iter().map(|v| v * (j + 1) as f64).collect())
            .unwrap();
        assert_eq!(scaled.as_slice(), &[1.0, 20.0, 3.0, 60.0]);

        let err = mtx.map_columns(|_, _| vec![1.0]).unwrap_err();
        assert!(matches!(err, MatrixError::Shape(ShapeError::LengthMismatch { .. })));
    }

    #[test]
    fn test_is_matrix() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        assert!(is_matrix(&rows, None));
        assert!(is_matrix(&rows, Some((3, 2))));
        assert!(!is_matrix(&rows, Some((2, 3))));
        assert!(!is_matrix(&Vec::<Vec<f64>>::new(), None));
        assert!(!is_matrix(&[Vec::<f64>::new()], None));
        assert!(!is_matrix(&[vec![1.0], vec![1.0, 2.0]], None));
    }
}
