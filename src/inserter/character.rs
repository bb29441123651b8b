//! Character (text) record encoding.
//!
//! Stored as a 2-D array of fixed-width ASCII rows, one row per string,
//! under the same atleast-2d-and-transpose convention as numeric data.

use hdf5::Group;
use ndarray::{Array2, ArrayD};

use super::write_common_group_attrs;
use crate::config::WriteOptions;
use crate::error::{Error, Result};
use crate::h5;
use crate::record::RecordType;

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    array: &ArrayD<String>,
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    for s in array {
        if !s.is_ascii() {
            return Err(Error::unsupported_value(format!(
                "character value is not ASCII: {s:?}"
            )));
        }
    }

    let group = parent.create_group(label)?;
    let empty = array.len() == 0;
    write_common_group_attrs(&group, RecordType::Character, description, options.deflate, empty)?;

    let rows: Vec<&String> = array.iter().collect();
    let width = rows.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut codes = Array2::<u8>::zeros((rows.len().max(1), width.max(1)));
    for (r, s) in rows.iter().enumerate() {
        for (c, byte) in s.as_bytes().iter().enumerate() {
            codes[[r, c]] = *byte;
        }
    }
    let transposed = codes.t().to_owned();

    let mut builder = group.new_dataset_builder();
    if options.deflate > 0 {
        builder = builder.deflate(options.deflate);
    }
    builder.with_data(&transposed).create("data")?;
    h5::set_attr(&group, "ArraySize", &format_shape(array.shape()))?;
    Ok(())
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
