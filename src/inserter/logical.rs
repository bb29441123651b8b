//! Logical (boolean) record encoding.
//!
//! Stored as a `numeric` dataset of `u8` 0/1 values under the same
//! atleast-2d-and-transpose convention as real numeric arrays, with
//! `RecordType="logical"` on the group instead of `"numeric"`.

use hdf5::Group;
use ndarray::{Array2, ArrayD};

use super::write_common_group_attrs;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::h5;
use crate::record::RecordType;

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    array: &ArrayD<bool>,
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    let group = parent.create_group(label)?;
    let empty = array.len() == 0;
    write_common_group_attrs(&group, RecordType::Logical, description, options.deflate, empty)?;

    let as_u8 = array.mapv(|b| u8::from(b));
    let as2d = to_2d(&as_u8);
    let transposed = as2d.t().to_owned();

    let mut builder = group.new_dataset_builder();
    if options.deflate > 0 {
        builder = builder.deflate(options.deflate);
    }
    builder.with_data(&transposed).create("data")?;
    h5::set_attr(&group, "ArraySize", &format_shape(array.shape()))?;
    Ok(())
}

fn to_2d(a: &ArrayD<u8>) -> Array2<u8> {
    match a.ndim() {
        0 => Array2::from_elem((1, 1), *a.iter().next().unwrap()),
        1 => {
            let len = a.len();
            Array2::from_shape_vec((1, len), a.iter().copied().collect()).unwrap()
        }
        _ => a
            .clone()
            .into_dimensionality::<ndarray::Ix2>()
            .expect("logical arrays are at most 2-D"),
    }
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
