//! The in-memory value types accepted by [`crate::Archive::insert`] and
//! returned by [`crate::Archive::extract`].

use std::collections::BTreeMap;

use ndarray::ArrayD;
use num_complex::Complex64;

/// A dense or sparse numeric payload, real or complex.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    /// A dense real-valued N-dimensional array.
    Real(ArrayD<f64>),
    /// A dense complex-valued N-dimensional array.
    Complex(ArrayD<Complex64>),
    /// A sparse real-valued matrix in coordinate (COO) form.
    SparseReal(SparseMatrix<f64>),
    /// A sparse complex-valued matrix in coordinate (COO) form.
    SparseComplex(SparseMatrix<Complex64>),
}

/// A sparse matrix in coordinate form: parallel `row`/`col`/`data`
/// vectors plus the logical `(rows, cols)` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    /// Number of rows in the logical (dense) shape.
    pub rows: usize,
    /// Number of columns in the logical (dense) shape.
    pub cols: usize,
    /// 0-based row index for each stored entry.
    pub row: Vec<usize>,
    /// 0-based column index for each stored entry.
    pub col: Vec<usize>,
    /// The stored value for each entry, parallel to `row`/`col`.
    pub data: Vec<T>,
}

impl<T> SparseMatrix<T> {
    /// Number of stored (nonzero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }
}

/// An N-dimensional array of `T`, stored as a flat, row-major `items`
/// vector alongside its logical `shape`.
///
/// This backs the two object-array record kinds ([`Value::Cell`],
/// [`Value::Structures`]) that MATLAB/SDA allow to be more than a
/// simple 1-D list; `shape` round-trips through the on-disk
/// `RecordSize` group attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedArray<T> {
    /// The array's logical shape, outermost dimension first.
    pub shape: Vec<usize>,
    /// Elements in row-major (C) order; `items.len()` equals the
    /// product of `shape`.
    pub items: Vec<T>,
}

impl<T> ShapedArray<T> {
    /// Wraps `items` as a 1-D array of its own length.
    #[must_use]
    pub fn vector(items: Vec<T>) -> Self {
        let shape = vec![items.len()];
        ShapedArray { shape, items }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Any value that can be stored in an SDA archive.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric array or scalar (dense/sparse, real/complex).
    Numeric(NumericArray),
    /// A boolean array or scalar, stored as an `ndarray` of `bool`.
    Logical(ArrayD<bool>),
    /// A text array or scalar. Each element is a single string; for a
    /// scalar `Character` value this holds exactly one element.
    Character(ArrayD<String>),
    /// Raw bytes, typically the contents of a file.
    File(Vec<u8>),
    /// An ordered heterogeneous, possibly N-dimensional list (MATLAB
    /// cell array).
    Cell(ShapedArray<Value>),
    /// A struct-like record with named fields, insertion order not
    /// significant (fields are sorted by name on write, per the MATLAB
    /// field-name ordering convention).
    Structure(BTreeMap<String, Value>),
    /// An N-dimensional array of struct-like records sharing the same
    /// field names.
    Structures(ShapedArray<BTreeMap<String, Value>>),
}

impl Value {
    /// Shorthand for constructing a [`Value::Numeric`] from a dense real
    /// array.
    #[must_use]
    pub fn real(array: ArrayD<f64>) -> Self {
        Value::Numeric(NumericArray::Real(array))
    }

    /// Shorthand for constructing a [`Value::Numeric`] from a dense
    /// complex array.
    #[must_use]
    pub fn complex(array: ArrayD<Complex64>) -> Self {
        Value::Numeric(NumericArray::Complex(array))
    }

    /// Shorthand for constructing a scalar [`Value::Numeric`] real
    /// value.
    #[must_use]
    pub fn scalar(x: f64) -> Self {
        Value::real(ArrayD::from_elem(ndarray::IxDyn(&[1, 1]), x))
    }
}
