//! The extractor pipeline: reads an HDF5 group back into a
//! [`crate::value::Value`], dispatching on the group's `RecordType`
//! attribute.

use std::collections::BTreeMap;

use hdf5::Group;
use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::h5;
use crate::naming;
use crate::record::RecordType;
use crate::value::{NumericArray, ShapedArray, SparseMatrix, Value};

/// Reads `group` into a [`Value`], dispatching on its `RecordType`
/// attribute and recursing into children for composite record types.
pub fn extract(group: &Group) -> Result<Value> {
    let record_type_str = h5::get_attr(group, "RecordType")?;
    let record_type = RecordType::parse(&record_type_str)
        .ok_or_else(|| Error::unsupported_record_type(record_type_str.clone()))?;

    match record_type {
        RecordType::Numeric => extract_numeric(group).map(Value::Numeric),
        RecordType::Logical => extract_logical(group),
        RecordType::Character => extract_character(group),
        RecordType::File => extract_file(group),
        RecordType::Cell => extract_cell(group),
        RecordType::Structure | RecordType::Object => extract_structure(group).map(Value::Structure),
        RecordType::Structures | RecordType::Objects => extract_structures(group),
    }
}

fn array_size(group: &Group) -> Result<Vec<usize>> {
    let raw = h5::get_attr(group, "ArraySize")?;
    raw.split_whitespace()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::corrupt(format!("invalid ArraySize component {s:?}")))
        })
        .collect()
}

/// Drops trailing dimensions of size 1 down to at least 2 dimensions,
/// the inverse of the writer's atleast-2d-and-transpose convention,
/// collapsing a stored row/column matrix back to the shape the caller
/// originally inserted.
fn reduce_array(data: Array2<f64>, shape: &[usize]) -> ArrayD<f64> {
    let transposed = data.t().to_owned();
    match shape.len() {
        0 => ArrayD::from_elem(IxDyn(&[]), transposed[[0, 0]]),
        1 => {
            let len = shape[0];
            let flat: Vec<f64> = transposed.iter().take(len).copied().collect();
            ArrayD::from_shape_vec(IxDyn(&[len]), flat).expect("length matches ArraySize")
        }
        _ => transposed.into_dyn(),
    }
}

fn extract_numeric(group: &Group) -> Result<NumericArray> {
    let complex = h5::get_attr(group, "Complex")? == "yes";
    let sparse = h5::get_attr(group, "Sparse")? == "yes";
    let shape = array_size(group)?;
    let dataset = group.dataset("data")?;

    if sparse {
        let (rows, cols) = (shape[0], shape[1]);
        let packed: Array2<f64> = dataset.read_2d()?;
        let n = packed.ncols();
        let mut row = Vec::with_capacity(n);
        let mut col = Vec::with_capacity(n);
        if complex {
            let mut data = Vec::with_capacity(n);
            for i in 0..n {
                let flat = packed[[0, i]] as usize - 1;
                row.push(flat / cols);
                col.push(flat % cols);
                data.push(Complex64::new(packed[[1, i]], packed[[2, i]]));
            }
            Ok(NumericArray::SparseComplex(SparseMatrix {
                rows,
                cols,
                row,
                col,
                data,
            }))
        } else {
            let mut data = Vec::with_capacity(n);
            for i in 0..n {
                let flat = packed[[0, i]] as usize - 1;
                row.push(flat / cols);
                col.push(flat % cols);
                data.push(packed[[1, i]]);
            }
            Ok(NumericArray::SparseReal(SparseMatrix {
                rows,
                cols,
                row,
                col,
                data,
            }))
        }
    } else if complex {
        let packed: Array2<f64> = dataset.read_2d()?;
        // On disk: transposed stack of [real rows; imag rows]. Undo the
        // transpose first, then split the leading axis back in half.
        let stacked = packed.t().to_owned();
        let half = stacked.nrows() / 2;
        let real = stacked.slice(ndarray::s![0..half, ..]).to_owned();
        let imag = stacked.slice(ndarray::s![half..2 * half, ..]).to_owned();
        let real = reduce_array(real.t().to_owned(), &shape);
        let imag = reduce_array(imag.t().to_owned(), &shape);
        let combined = ndarray::Zip::from(&real)
            .and(&imag)
            .map_collect(|&re, &im| Complex64::new(re, im));
        Ok(NumericArray::Complex(combined))
    } else {
        let packed: Array2<f64> = dataset.read_2d()?;
        Ok(NumericArray::Real(reduce_array(packed, &shape)))
    }
}

fn extract_logical(group: &Group) -> Result<Value> {
    let shape = array_size(group)?;
    let dataset = group.dataset("data")?;
    let packed: Array2<u8> = dataset.read_2d()?;
    let packed_f64 = packed.mapv(f64::from);
    let reduced = reduce_array(packed_f64, &shape);
    Ok(Value::Logical(reduced.mapv(|v| v != 0.0)))
}

fn extract_character(group: &Group) -> Result<Value> {
    let shape = array_size(group)?;
    let dataset = group.dataset("data")?;
    let packed: Array2<u8> = dataset.read_2d()?;
    let transposed = packed.t().to_owned();

    let rows: Vec<String> = transposed
        .rows()
        .into_iter()
        .map(|row| {
            let bytes: Vec<u8> = row.iter().copied().take_while(|&b| b != 0).collect();
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .collect();

    let total: usize = shape.iter().product::<usize>().max(1);
    let values = if rows.len() >= total {
        rows[..total].to_vec()
    } else {
        rows
    };
    let array = ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| Error::corrupt(format!("character array shape mismatch: {e}")))?;
    Ok(Value::Character(array))
}

fn extract_file(group: &Group) -> Result<Value> {
    let dataset = group.dataset("data")?;
    let packed: Array2<u8> = dataset.read_2d()?;
    Ok(Value::File(packed.iter().copied().collect()))
}

/// Reads the `RecordSize` attribute as a shape vector, falling back to a
/// flat `[len]` shape for records written before `RecordSize` existed.
fn record_size(group: &Group, len: usize) -> Result<Vec<usize>> {
    match h5::get_attr_opt(group, "RecordSize")? {
        Some(raw) if !raw.trim().is_empty() => raw
            .split_whitespace()
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|_| Error::corrupt(format!("invalid RecordSize component {s:?}")))
            })
            .collect(),
        _ => Ok(vec![len]),
    }
}

fn extract_cell(group: &Group) -> Result<Value> {
    let names = naming::sorted_element_names(group.member_names()?);
    let mut items = Vec::with_capacity(names.len());
    for name in &names {
        let child = group.group(name)?;
        items.push(extract(&child)?);
    }
    let shape = record_size(group, items.len())?;
    Ok(Value::Cell(ShapedArray { shape, items }))
}

fn extract_structure(group: &Group) -> Result<BTreeMap<String, Value>> {
    let field_names = h5::get_attr(group, "FieldNames")?;
    let mut fields = BTreeMap::new();
    for name in field_names.split_whitespace() {
        let child = group.group(name)?;
        fields.insert(name.to_string(), extract(&child)?);
    }
    Ok(fields)
}

fn extract_structures(group: &Group) -> Result<Value> {
    let names = naming::sorted_element_names(group.member_names()?);
    let mut records = Vec::with_capacity(names.len());
    for name in &names {
        let child = group.group(name)?;
        records.push(extract_structure(&child)?);
    }
    let shape = record_size(group, records.len())?;
    Ok(Value::Structures(ShapedArray {
        shape,
        items: records,
    }))
}
