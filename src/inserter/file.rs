//! File record encoding.
//!
//! Per the original implementation's `FileInserter`: the group itself is
//! tagged `RecordType="file"`, while the dataset inside it carries
//! `RecordType="numeric"` (a flat array of `u8`), since a file's raw
//! bytes are stored the same way a numeric byte array would be.

use hdf5::Group;
use ndarray::Array2;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::h5;
use crate::record::RecordType;

pub(crate) fn insert(
    parent: &Group,
    label: &str,
    bytes: &[u8],
    description: &str,
    options: WriteOptions,
) -> Result<()> {
    let group = parent.create_group(label)?;
    let empty = bytes.is_empty();
    let deflate = options.deflate.to_string();

    h5::set_attrs(
        &group,
        [
            ("RecordType", RecordType::File.as_str()),
            ("Description", description),
            ("Deflate", deflate.as_str()),
            ("Empty", if empty { "yes" } else { "no" }),
        ],
    )?;

    // Dataset-level attrs mirror a plain numeric, non-complex, non-sparse
    // array, per `FileInserter.record_dataset_attributes`.
    let data = Array2::from_shape_vec((1, bytes.len()), bytes.to_vec()).unwrap();

    let mut builder = group.new_dataset_builder();
    if options.deflate > 0 {
        builder = builder.deflate(options.deflate);
    }
    let dataset = builder.with_data(&data).create("data")?;
    h5::set_attrs(
        &dataset,
        [
            ("RecordType", "numeric"),
            ("Empty", if empty { "yes" } else { "no" }),
            ("Complex", "no"),
            ("Sparse", "no"),
        ],
    )?;
    Ok(())
}
