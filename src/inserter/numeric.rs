//! Numeric record encoding: dense real/complex arrays and sparse
//! real/complex matrices.
//!
//! On disk, dense arrays are stored "atleast-2d and transposed": a
//! vector is first reshaped to a 1-row or 1-column matrix, then the
//! whole thing is transposed before writing, so that a column-major
//! reader sees the array in its natural shape. Complex arrays add a
//! leading axis of length 2 holding the real and imaginary parts before
//! that same atleast-2d-and-transpose treatment is applied.
//!
//! Sparse matrices are the one place this convention is not followed:
//! the flat index packed alongside each stored value uses row-major
//! (`numpy.ravel_multi_index` default) order over `(rows, cols)`,
//! regardless of whether the matrix is square.

use hdf5::Group;
use ndarray::{Array2, ArrayD};
use num_complex::Complex64;

use super::write_common_group_attrs;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::h5;
use crate::record::RecordType;
use crate::value::{NumericArray, SparseMatrix};

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    array: &NumericArray,
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    let group = parent.create_group(label)?;
    let (is_complex, is_sparse, empty) = match array {
        NumericArray::Real(a) => (false, false, is_empty_real(a)),
        NumericArray::Complex(a) => (true, false, is_empty_complex(a)),
        NumericArray::SparseReal(m) => (false, true, m.nnz() == 0),
        NumericArray::SparseComplex(m) => (true, true, m.nnz() == 0),
    };

    write_common_group_attrs(&group, RecordType::Numeric, description, options.deflate, empty)?;
    h5::set_attrs(
        &group,
        [
            ("Complex", if is_complex { "yes" } else { "no" }),
            ("Sparse", if is_sparse { "yes" } else { "no" }),
        ],
    )?;

    match array {
        NumericArray::Real(a) => write_dense_real(&group, a, options.deflate)?,
        NumericArray::Complex(a) => write_dense_complex(&group, a, options.deflate)?,
        NumericArray::SparseReal(m) => write_sparse_real(&group, m, options.deflate)?,
        NumericArray::SparseComplex(m) => write_sparse_complex(&group, m, options.deflate)?,
    }
    Ok(())
}

/// Empty iff zero-size, or the value reshaped to 1x1 is a single NaN.
fn is_empty_real(a: &ArrayD<f64>) -> bool {
    if a.len() == 0 {
        return true;
    }
    a.len() == 1 && a.iter().next().is_some_and(|v| v.is_nan())
}

fn is_empty_complex(a: &ArrayD<Complex64>) -> bool {
    if a.len() == 0 {
        return true;
    }
    a.len() == 1
        && a.iter()
            .next()
            .is_some_and(|v| v.re.is_nan() && v.im.is_nan())
}

/// Reshapes `a` to at least 2 dimensions (appending a length-1 axis if
/// it is a vector or scalar) and transposes it for on-disk storage.
fn atleast_2d_transpose(a: &ArrayD<f64>) -> Array2<f64> {
    let as2d = to_2d(a);
    as2d.t().to_owned()
}

fn to_2d(a: &ArrayD<f64>) -> Array2<f64> {
    match a.ndim() {
        0 => Array2::from_elem((1, 1), *a.iter().next().unwrap()),
        1 => {
            let len = a.len();
            Array2::from_shape_vec((1, len), a.iter().copied().collect()).unwrap()
        }
        _ => a
            .clone()
            .into_dimensionality::<ndarray::Ix2>()
            .expect("numeric arrays are at most 2-D"),
    }
}

fn write_dense_real(group: &Group, a: &ArrayD<f64>, deflate: u8) -> Result<()> {
    let transposed = atleast_2d_transpose(a);
    let mut builder = group.new_dataset_builder();
    if deflate > 0 {
        builder = builder.deflate(deflate);
    }
    builder.with_data(&transposed).create("data")?;
    h5::set_attr(group, "ArraySize", &format_shape(a.shape()))?;
    Ok(())
}

fn write_dense_complex(group: &Group, a: &ArrayD<Complex64>, deflate: u8) -> Result<()> {
    let real = a.mapv(|c| c.re);
    let imag = a.mapv(|c| c.im);
    let real2d = to_2d(&real);
    let imag2d = to_2d(&imag);

    // Stack real/imag as a leading axis of length 2, then transpose the
    // whole thing, matching the on-disk "interleaved 2xN rows" layout.
    let (rows, cols) = real2d.dim();
    let mut stacked = Array2::<f64>::zeros((2 * rows, cols));
    stacked.slice_mut(ndarray::s![0..rows, ..]).assign(&real2d);
    stacked.slice_mut(ndarray::s![rows..2 * rows, ..]).assign(&imag2d);
    let transposed = stacked.t().to_owned();

    let mut builder = group.new_dataset_builder();
    if deflate > 0 {
        builder = builder.deflate(deflate);
    }
    builder.with_data(&transposed).create("data")?;
    h5::set_attr(group, "ArraySize", &format_shape(a.shape()))?;
    Ok(())
}

fn write_sparse_real(group: &Group, m: &SparseMatrix<f64>, deflate: u8) -> Result<()> {
    let flat = flat_indices(m.rows, m.cols, &m.row, &m.col);
    let mut packed = Array2::<f64>::zeros((2, m.nnz()));
    for (i, (&idx, &val)) in flat.iter().zip(m.data.iter()).enumerate() {
        packed[[0, i]] = (idx + 1) as f64;
        packed[[1, i]] = val;
    }
    let mut builder = group.new_dataset_builder();
    if deflate > 0 {
        builder = builder.deflate(deflate);
    }
    builder.with_data(&packed).create("data")?;
    h5::set_attr(group, "ArraySize", &format!("{} {}", m.rows, m.cols))?;
    Ok(())
}

fn write_sparse_complex(group: &Group, m: &SparseMatrix<Complex64>, deflate: u8) -> Result<()> {
    let flat = flat_indices(m.rows, m.cols, &m.row, &m.col);
    let mut packed = Array2::<f64>::zeros((3, m.nnz()));
    for (i, (&idx, val)) in flat.iter().zip(m.data.iter()).enumerate() {
        packed[[0, i]] = (idx + 1) as f64;
        packed[[1, i]] = val.re;
        packed[[2, i]] = val.im;
    }
    let mut builder = group.new_dataset_builder();
    if deflate > 0 {
        builder = builder.deflate(deflate);
    }
    builder.with_data(&packed).create("data")?;
    h5::set_attr(group, "ArraySize", &format!("{} {}", m.rows, m.cols))?;
    Ok(())
}

/// Row-major (`numpy.ravel_multi_index` default) flat index over
/// `(rows, cols)`, used only for the sparse on-disk index packing.
fn flat_indices(_rows: usize, cols: usize, row: &[usize], col: &[usize]) -> Vec<usize> {
    row.iter().zip(col).map(|(&r, &c)| r * cols + c).collect()
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_real_is_zero_size_or_nan_scalar() {
        assert!(is_empty_real(&ArrayD::from_shape_vec(ndarray::IxDyn(&[0]), vec![]).unwrap()));
        assert!(is_empty_real(&ArrayD::from_elem(ndarray::IxDyn(&[1, 1]), f64::NAN)));
        assert!(!is_empty_real(&ArrayD::from_elem(ndarray::IxDyn(&[1, 1]), 0.0)));
        assert!(!is_empty_real(
            &ArrayD::from_shape_vec(ndarray::IxDyn(&[2]), vec![f64::NAN, f64::NAN]).unwrap()
        ));
    }

    #[test]
    fn sparse_flat_index_is_row_major() {
        // 2x3 matrix, entry at (1, 2) -> row-major flat index 1*3+2 = 5
        let idx = flat_indices(2, 3, &[1], &[2]);
        assert_eq!(idx, vec![5]);
    }
}
