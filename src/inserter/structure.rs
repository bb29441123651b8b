//! Structure (struct-like record) and structures (array of struct-like
//! records) encoding.

use std::collections::BTreeMap;

use hdf5::Group;

use super::{insert_value, write_common_group_attrs};
use crate::config::WriteOptions;
use crate::error::{Error, Result};
use crate::h5;
use crate::naming;
use crate::record::RecordType;
use crate::value::{ShapedArray, Value};

/// A valid MATLAB field label: starts with a letter, and contains only
/// letters, digits, and underscores.
pub(crate) fn is_valid_field_label(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    fields: &BTreeMap<String, Value>,
    description: &str,
    options: WriteOptions,
    record_type: RecordType,
) -> Result<()> {
    for key in fields.keys() {
        if !is_valid_field_label(key) {
            return Err(Error::invalid_label(
                key.clone(),
                "not a valid MATLAB field label",
            ));
        }
    }

    let group = parent.create_group(label)?;
    let empty = fields.is_empty();
    write_common_group_attrs(&group, record_type, description, options.deflate, empty)?;

    let field_names = fields.keys().cloned().collect::<Vec<_>>().join(" ");
    h5::set_attr(&group, "FieldNames", &field_names)?;
    // A lone structure is a 1x1 struct array in MATLAB terms.
    h5::set_attr(&group, "RecordSize", "1 1")?;

    for (key, value) in fields {
        insert_value(&group, key, value, "", options)?;
    }
    Ok(())
}

/// Inserts an array of structures (or, when `record_type` is `Objects`,
/// of objects): one child group per element, named by position, each
/// itself holding the element's fields, plus a `RecordSize` attribute
/// recording the array's logical shape.
pub(crate) fn insert_array(
    parent: &Group,
    label: &str,
    records: &ShapedArray<BTreeMap<String, Value>>,
    description: &str,
    options: WriteOptions,
    record_type: RecordType,
) -> Result<()> {
    let group = parent.create_group(label)?;
    let empty = records.is_empty();
    write_common_group_attrs(&group, record_type, description, options.deflate, empty)?;
    h5::set_attr(&group, "RecordSize", &format_shape(&records.shape))?;

    if let Some(first) = records.items.first() {
        let field_names = first.keys().cloned().collect::<Vec<_>>().join(" ");
        h5::set_attr(&group, "FieldNames", &field_names)?;
        for record in &records.items {
            let keys: Vec<&String> = record.keys().collect();
            let expected: Vec<&String> = first.keys().collect();
            if keys != expected {
                return Err(Error::validation_failed(
                    "all elements of a structures/objects array must share the same field names",
                ));
            }
        }
    }

    for (i, record) in records.items.iter().enumerate() {
        let child_label = naming::element_label(i);
        insert(
            &group,
            &child_label,
            record,
            "",
            options,
            RecordType::Structure,
        )?;
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
    fn field_label_must_start_with_a_letter() {
        assert!(is_valid_field_label("alpha_1"));
        assert!(!is_valid_field_label("1alpha"));
        assert!(!is_valid_field_label("_alpha"));
        assert!(!is_valid_field_label(""));
    }
}
