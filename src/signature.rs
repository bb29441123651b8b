//! Structural signatures used to compare two records (or two archives'
//! worth of records) for equivalence regardless of their actual data.

use hdf5::Group;

use crate::error::Result;
use crate::h5;
use crate::naming;
use crate::record::RecordType;

/// A `(path, record_type)` pair identifying one node in a record's
/// structure, where `path` is the dotted path from the record root
/// (empty for the root itself).
pub type Signature = Vec<(String, RecordType)>;

/// Breadth-first expansion of an in-memory [`crate::Value`] into its
/// signature: the sequence of `(path, record_type)` pairs naming every
/// node in the value's structure, in breadth-first order.
#[must_use]
pub fn unnest(value: &crate::value::Value) -> Signature {
    let mut queue = std::collections::VecDeque::new();
    let mut out = Vec::new();
    queue.push_back((String::new(), value));

    while let Some((path, value)) = queue.pop_front() {
        let record_type = record_type_of(value);
        out.push((path.clone(), record_type));

        match value {
            crate::value::Value::Cell(cells) => {
                for (i, item) in cells.items.iter().enumerate() {
                    let child_path = format!("{path}/{}", naming::element_label(i));
                    queue.push_back((child_path, item));
                }
            }
            crate::value::Value::Structure(fields) => {
                for (key, item) in fields {
                    let child_path = format!("{path}/{key}");
                    queue.push_back((child_path, item));
                }
            }
            crate::value::Value::Structures(records) => {
                for (i, fields) in records.items.iter().enumerate() {
                    let element_path = format!("{path}/{}", naming::element_label(i));
                    out.push((element_path.clone(), RecordType::Structure));
                    for (key, item) in fields {
                        let field_path = format!("{element_path}/{key}");
                        queue.push_back((field_path, item));
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn record_type_of(value: &crate::value::Value) -> RecordType {
    match value {
        crate::value::Value::Numeric(_) => RecordType::Numeric,
        crate::value::Value::Logical(_) => RecordType::Logical,
        crate::value::Value::Character(_) => RecordType::Character,
        crate::value::Value::File(_) => RecordType::File,
        crate::value::Value::Cell(_) => RecordType::Cell,
        crate::value::Value::Structure(_) => RecordType::Structure,
        crate::value::Value::Structures(_) => RecordType::Structures,
    }
}

/// Breadth-first expansion of an on-disk record (an HDF5 group) into its
/// signature, by reading each node's `RecordType` attribute and
/// recursing into `structure`/`cell`/`structures`/`objects` children.
pub fn unnest_record(root: &Group) -> Result<Signature> {
    let mut queue = std::collections::VecDeque::new();
    let mut out = Vec::new();
    queue.push_back((String::new(), root.clone()));

    while let Some((path, group)) = queue.pop_front() {
        let record_type_str = h5::get_attr(&group, "RecordType")?;
        let record_type = RecordType::parse(&record_type_str).ok_or_else(|| {
            crate::error::Error::unsupported_record_type(record_type_str.clone())
        })?;
        out.push((path.clone(), record_type));

        if !record_type.is_simple() {
            // `structure`/`object` children are named by `FieldNames`
            // order; `cell`/`structures`/`objects` children are named
            // `"element N"` and recovered by parsed index, matching
            // `extractor.rs`'s traversal so equivalence checks don't
            // depend on HDF5's member-name enumeration order.
            let child_names = match record_type {
                RecordType::Structure | RecordType::Object => {
                    let field_names = h5::get_attr(&group, "FieldNames")?;
                    field_names.split_whitespace().map(str::to_string).collect()
                }
                _ => naming::sorted_element_names(group.member_names()?),
            };
            for name in child_names {
                if let Ok(child) = group.group(&name) {
                    let child_path = format!("{path}/{name}");
                    queue.push_back((child_path, child));
                }
            }
        }
    }
    Ok(out)
}

/// Whether two signatures describe structurally equivalent records: the
/// same length, the same paths in the same order, and pairwise-
/// equivalent record types (per [`RecordType::is_equivalent`]).
#[must_use]
pub fn are_signatures_equivalent(a: &Signature, b: &Signature) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|((path_a, type_a), (path_b, type_b))| path_a == path_b && type_a.is_equivalent(*type_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::collections::BTreeMap;

    #[test]
    fn unnest_simple_value_has_single_entry() {
        let value = Value::scalar(1.0);
        let sig = unnest(&value);
        assert_eq!(sig, vec![(String::new(), RecordType::Numeric)]);
    }

    #[test]
    fn unnest_structure_visits_fields_breadth_first() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), Value::scalar(1.0));
        fields.insert("b".to_string(), Value::scalar(2.0));
        let value = Value::Structure(fields);
        let sig = unnest(&value);
        assert_eq!(sig.len(), 3);
        assert_eq!(sig[0], (String::new(), RecordType::Structure));
    }

    #[test]
    fn equivalent_signatures_allow_structure_object_swap() {
        let a = vec![(String::new(), RecordType::Structure)];
        let b = vec![(String::new(), RecordType::Object)];
        assert!(are_signatures_equivalent(&a, &b));
    }
}
