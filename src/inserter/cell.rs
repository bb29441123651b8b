//! Cell array record encoding: an ordered, heterogeneous, possibly
//! N-dimensional list stored as a group of children named by their
//! 1-based position, plus a `RecordSize` attribute recording the
//! logical shape.

use hdf5::Group;

use super::{insert_value, write_common_group_attrs};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::h5;
use crate::naming;
use crate::record::RecordType;
use crate::value::{ShapedArray, Value};

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    cells: &ShapedArray<Value>,
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    let group = parent.create_group(label)?;
    let empty = cells.is_empty();
    write_common_group_attrs(&group, RecordType::Cell, description, options.deflate, empty)?;
    h5::set_attr(&group, "RecordSize", &format_shape(&cells.shape))?;

    for (i, item) in cells.items.iter().enumerate() {
        let child_label = naming::element_label(i);
        insert_value(&group, &child_label, item, "", options)?;
    }
    Ok(())
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
    fn format_shape_joins_dimensions_with_spaces() {
        assert_eq!(format_shape(&[2, 3]), "2 3");
        assert_eq!(format_shape(&[5]), "5");
    }
}
