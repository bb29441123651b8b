//! The inserter pipeline: turns an in-memory [`crate::value::Value`]
//! into an HDF5 group (and, for simple records, the single dataset
//! inside it), and vice versa on read via [`crate::extractor`].
//!
//! Dispatch mirrors the Python implementation's `InserterRegistry`: each
//! value is matched in order against the record kinds below, and the
//! first accepting inserter handles it. Because the set of value kinds
//! this crate accepts is fixed at compile time (it comes through the
//! typed [`crate::value::Value`] enum rather than dynamically typed
//! Python objects), dispatch is a single `match` rather than a runtime
//! predicate scan; `can_insert`-style predicates only remain meaningful
//! for the convenience entry points (`insert_from_file`) that accept
//! values outside the `Value` enum.

mod cell;
mod character;
mod file;
mod logical;
mod numeric;
mod structure;

use hdf5::Group;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::h5;
use crate::record::RecordType;
use crate::value::{ShapedArray, Value};

/// Inserts `value` as a new child group named `label` under `parent`,
/// writing the `Description` attribute and dispatching to the
/// appropriate per-kind encoder.
///
/// When `options.as_structures` is set and `value` is a single
/// [`Value::Structure`], it is coerced into a one-element `structures`
/// record array instead, mirroring the Python `as_structures` flag on
/// `SDAFile.insert`. The flag has no effect on any other value kind.
pub fn insert_value(
    parent: &Group,
    label: &str,
    value: &Value,
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    if options.as_structures {
        if let Value::Structure(fields) = value {
            let coerced = ShapedArray::vector(vec![fields.clone()]);
            return structure::insert_array(
                parent,
                label,
                &coerced,
                description,
                options,
                RecordType::Structures,
            );
        }
    }

    match value {
        Value::Numeric(array) => numeric::insert(parent, label, array, description, options),
        Value::Logical(array) => logical::insert(parent, label, array, description, options),
        Value::Character(array) => character::insert(parent, label, array, description, options),
        Value::File(bytes) => file::insert(parent, label, bytes, description, options),
        Value::Cell(cells) => cell::insert(parent, label, cells, description, options),
        Value::Structure(fields) => structure::insert(
            parent,
            label,
            fields,
            description,
            options,
            RecordType::Structure,
        ),
        Value::Structures(records) => structure::insert_array(
            parent,
            label,
            records,
            description,
            options,
            RecordType::Structures,
        ),
    }
}

/// Writes the attributes shared by every record's group: `RecordType`,
/// `Description`, `Deflate`, `Empty`.
///
/// `Deflate` stores the actual gzip compression level (0-9), not just
/// whether compression is enabled, so that `probe`/`replace`/
/// `update_object` can recover the level a record was originally
/// written with.
pub(crate) fn write_common_group_attrs(
    group: &Group,
    record_type: RecordType,
    description: &str,
    deflate: u8,
    empty: bool,
) -> Result<()> {
    let deflate = deflate.to_string();
    h5::set_attrs(
        group,
        [
            ("RecordType", record_type.as_str()),
            ("Description", description),
            ("Deflate", deflate.as_str()),
            ("Empty", if empty { "yes" } else { "no" }),
        ],
    )
}
