//! Thin helpers over the `hdf5` crate: ASCII-encoded scalar attributes,
//! dataset creation with compression, and the recursive copy used by
//! [`crate::Archive::remove`].
//!
//! SDA stores every attribute as a fixed- or variable-length ASCII
//! string, mirroring the Python implementation's `set_encoded`/
//! `get_decoded` helpers, which `str.encode('ascii')`/`bytes.decode('ascii')`
//! every attribute value on the way in and out.

use hdf5::{Group, Location};

use crate::error::{Error, Result};

/// Writes `value` as an ASCII-encoded string attribute named `name` on
/// `location`, overwriting any existing attribute of that name.
pub fn set_attr(location: &Location, name: &str, value: &str) -> Result<()> {
    if !value.is_ascii() {
        return Err(Error::unsupported_value(format!(
            "attribute {name:?} value is not ASCII: {value:?}"
        )));
    }
    if location.attr(name).is_ok() {
        location.delete_attr(name)?;
    }
    let attr = location
        .new_attr::<hdf5::types::VarLenUnicode>()
        .create(name)?;
    let encoded: hdf5::types::VarLenUnicode = value.parse().map_err(|_| {
        Error::unsupported_value(format!("attribute {name:?} could not be encoded"))
    })?;
    attr.write_scalar(&encoded)?;
    Ok(())
}

/// Reads an ASCII-encoded string attribute named `name` from `location`.
pub fn get_attr(location: &Location, name: &str) -> Result<String> {
    let attr = location
        .attr(name)
        .map_err(|_| Error::corrupt(format!("missing attribute {name:?}")))?;
    let value: hdf5::types::VarLenUnicode = attr.read_scalar()?;
    Ok(value.to_string())
}

/// Reads an ASCII-encoded string attribute, returning `None` if it is
/// absent rather than erroring.
pub fn get_attr_opt(location: &Location, name: &str) -> Result<Option<String>> {
    if location.attr(name).is_err() {
        return Ok(None);
    }
    Ok(Some(get_attr(location, name)?))
}

/// Writes every entry of `pairs` as an ASCII-encoded attribute, in the
/// manner of the Python implementation's `set_encoded(dict_like, **attrs)`.
pub fn set_attrs<'a, I>(location: &Location, pairs: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (name, value) in pairs {
        set_attr(location, name, value)?;
    }
    Ok(())
}

/// Recursively copies every attribute, dataset, and subgroup from `src`
/// into `dst`, preserving dataset creation properties (chunking,
/// compression, shuffle, fletcher32, fill value) exactly.
///
/// This underlies the atomic `remove` operation: HDF5 does not reclaim
/// space when an object is unlinked, so removing a label is implemented
/// by copying everything *except* that label into a fresh file and
/// swapping it into place.
pub fn copy_group_except(src: &Group, dst: &Group, skip: &[&str]) -> Result<()> {
    for name in src.attr_names()? {
        let value = get_attr(src, &name)?;
        set_attr(dst, &name, &value)?;
    }

    for name in src.member_names()? {
        if skip.contains(&name.as_str()) {
            continue;
        }
        if let Ok(group) = src.group(&name) {
            let new_group = dst.create_group(&name)?;
            copy_group_except(&group, &new_group, &[])?;
        } else {
            // A native HDF5 object copy preserves chunk layout,
            // compression, and fill values without re-reading the data.
            src.copy_to(&name, dst, &name)?;
        }
    }
    Ok(())
}
