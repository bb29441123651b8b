//! The archive façade: open/insert/extract/describe/replace/remove/
//! probe/update/labels, plus the header-backed properties.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hdf5::File as H5File;
use regex::Regex;

use crate::config::{OpenMode, WriteOptions};
use crate::error::{Error, Result};
use crate::extractor;
use crate::h5;
use crate::header::Header;
use crate::inserter;
use crate::probe::{ProbeRow, ProbeTable};
use crate::signature::{are_signatures_equivalent, unnest, unnest_record};
use crate::value::Value;

/// A handle onto an on-disk SDA archive.
///
/// Every mutating method opens the underlying HDF5 file for the
/// duration of the call and closes it again before returning, mirroring
/// the Python implementation's `_h5file` context manager; `Archive`
/// itself holds no long-lived file handle.
pub struct Archive {
    path: PathBuf,
    mode: OpenMode,
}

impl Archive {
    /// Opens (or creates) an archive at `path` in the given mode.
    ///
    /// When `mode` may create a new file and none exists yet, a fresh
    /// header is stamped with the current time.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let exists = path.exists();

        if !exists {
            if !mode.may_create() {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("archive not found: {}", path.display()),
                )));
            }
            let file = H5File::create(&path)?;
            let header = Header::new(now());
            write_header(&file, &header)?;
            drop(file);
        } else {
            // Validate the existing header up front so a corrupt file
            // is reported at `open` time rather than on first use.
            let file = if mode.is_writable() {
                H5File::append(&path)?
            } else {
                H5File::open(&path)?
            };
            let header = read_header(&file)?;
            header.validate()?;
        }

        Ok(Archive { path, mode })
    }

    fn open_handle(&self) -> Result<H5File> {
        if self.mode.is_writable() {
            Ok(H5File::append(&self.path)?)
        } else {
            Ok(H5File::open(&self.path)?)
        }
    }

    fn require_writable(&self, header: &Header) -> Result<()> {
        if !self.mode.is_writable() {
            return Err(Error::NotWritable);
        }
        if !header.writable {
            return Err(Error::NotWritable);
        }
        Ok(())
    }

    /// `FileFormat` header attribute (always `"SDA"`).
    pub fn file_format(&self) -> Result<String> {
        let file = self.open_handle()?;
        Ok(read_header(&file)?.file_format)
    }

    /// `FormatVersion` header attribute.
    pub fn format_version(&self) -> Result<String> {
        let file = self.open_handle()?;
        Ok(read_header(&file)?.format_version)
    }

    /// Whether the archive currently allows mutating operations.
    pub fn writable(&self) -> Result<bool> {
        let file = self.open_handle()?;
        Ok(read_header(&file)?.writable)
    }

    /// Sets the archive's `Writable` header attribute.
    pub fn set_writable(&self, writable: bool) -> Result<()> {
        let file = self.open_handle()?;
        let mut header = read_header(&file)?;
        header.writable = writable;
        write_header(&file, &header)?;
        Ok(())
    }

    /// `Created` header attribute.
    pub fn created(&self) -> Result<String> {
        let file = self.open_handle()?;
        Ok(read_header(&file)?.created)
    }

    /// `Updated` header attribute.
    pub fn updated(&self) -> Result<String> {
        let file = self.open_handle()?;
        Ok(read_header(&file)?.updated)
    }

    /// Inserts `value` under `label` with the given `description` and
    /// write options.
    pub fn insert(
        &self,
        label: &str,
        value: &Value,
        description: &str,
        options: WriteOptions,
    ) -> Result<()> {
        validate_label(label)?;
        validate_deflate(options.deflate)?;
        let file = self.open_handle()?;
        let mut header = read_header(&file)?;
        self.require_writable(&header)?;

        if file.group(label).is_ok() {
            return Err(Error::validation_failed(format!(
                "an object already exists with label {label:?}"
            )));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(label, "insert");

        inserter::insert_value(&file, label, value, description, options)?;
        header.touch(now());
        write_header(&file, &header)?;
        Ok(())
    }

    /// Inserts the contents of the file at `path` as a `file` record,
    /// using the file's base name as the label. Returns the label used.
    pub fn insert_from_file(
        &self,
        path: impl AsRef<Path>,
        description: &str,
        options: WriteOptions,
    ) -> Result<String> {
        let path = path.as_ref();
        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::path("path has no valid file name", path))?
            .to_string();
        let bytes = fs::read(path)?;
        self.insert(&label, &Value::File(bytes), description, options)?;
        Ok(label)
    }

    /// Extracts the object stored under `label`.
    pub fn extract(&self, label: &str) -> Result<Value> {
        let file = self.open_handle()?;
        let group = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        extractor::extract(&group)
    }

    /// Extracts a `file` record under `label` to `path` on disk.
    pub fn extract_to_file(&self, label: &str, path: impl AsRef<Path>) -> Result<()> {
        match self.extract(label)? {
            Value::File(bytes) => {
                fs::write(path, bytes)?;
                Ok(())
            }
            other => Err(Error::unsupported_value(format!(
                "label {label:?} is not a file record (found {other:?})"
            ))),
        }
    }

    /// Updates the `Description` attribute of the object stored under
    /// `label`, without touching its data.
    pub fn describe(&self, label: &str, text: &str) -> Result<()> {
        let file = self.open_handle()?;
        let mut header = read_header(&file)?;
        self.require_writable(&header)?;

        let group = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        h5::set_attr(&group, "Description", text)?;
        drop(group);

        header.touch(now());
        write_header(&file, &header)?;
        Ok(())
    }

    /// Inserts `value` (which must be a [`Value::Structure`] or
    /// [`Value::Structures`]) as an `object`/`objects` record tagged
    /// with `class`, the caller-supplied name of the type the structure
    /// stands in for (mirroring the Python `cls` argument to
    /// `SDAFile.insert`).
    pub fn insert_object(
        &self,
        label: &str,
        value: &Value,
        description: &str,
        class: &str,
        options: WriteOptions,
    ) -> Result<()> {
        let record_type = match value {
            Value::Structure(_) => "object",
            Value::Structures(_) => "objects",
            other => {
                return Err(Error::unsupported_value(format!(
                    "object/objects records must be inserted from a Structure or Structures value, found {other:?}"
                )));
            }
        };

        self.insert(label, value, description, options)?;

        let file = self.open_handle()?;
        let group = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        h5::set_attr(&group, "RecordType", record_type)?;
        h5::set_attr(&group, "Class", class)?;
        Ok(())
    }

    /// Replaces the object stored under `label` with `value`, provided
    /// the new value's structural signature is equivalent to the old
    /// one's. The existing `Description`, `Deflate` level, on-disk
    /// `RecordType` (e.g. `object` vs. `structure`), and `Class` (if
    /// any) are all preserved across the replacement.
    pub fn replace(&self, label: &str, value: &Value) -> Result<()> {
        let file = self.open_handle()?;
        let mut header = read_header(&file)?;
        self.require_writable(&header)?;

        let existing = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        let old_signature = unnest_record(&existing)?;
        let new_signature = unnest(value);
        if !are_signatures_equivalent(&old_signature, &new_signature) {
            return Err(Error::validation_failed(format!(
                "replacement value for {label:?} is not structurally equivalent to the existing record"
            )));
        }

        let old_record_type = h5::get_attr(&existing, "RecordType")?;
        let old_description = h5::get_attr_opt(&existing, "Description")?.unwrap_or_default();
        let old_deflate = h5::get_attr_opt(&existing, "Deflate")?
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(0);
        let old_class = h5::get_attr_opt(&existing, "Class")?;
        drop(existing);

        file.unlink(label)?;
        let options = WriteOptions::default().with_deflate(old_deflate);
        inserter::insert_value(&file, label, value, &old_description, options)?;

        let group = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        let new_record_type = h5::get_attr(&group, "RecordType")?;
        if new_record_type != old_record_type {
            h5::set_attr(&group, "RecordType", &old_record_type)?;
        }
        if let Some(class) = old_class {
            h5::set_attr(&group, "Class", &class)?;
        }
        drop(group);

        header.touch(now());
        write_header(&file, &header)?;
        Ok(())
    }

    /// Removes the object stored under `label`.
    ///
    /// HDF5 does not reclaim space when an object is unlinked, so this
    /// is implemented by copying every other top-level object into a
    /// fresh temporary file and swapping it into place atomically.
    pub fn remove(&self, label: &str) -> Result<()> {
        let file = self.open_handle()?;
        let mut header = read_header(&file)?;
        self.require_writable(&header)?;

        if file.group(label).is_err() {
            return Err(Error::label_not_found(label));
        }

        let tmp = tempfile::NamedTempFile::new_in(
            self.path.parent().unwrap_or_else(|| Path::new(".")),
        )?;
        let tmp_path = tmp.path().to_path_buf();
        drop(tmp);

        {
            let new_file = H5File::create(&tmp_path)?;
            // Copy first: `copy_group_except` copies the *source* file's
            // root attributes too, so writing the touched header before
            // the copy would have it immediately clobbered back to the
            // stale pre-mutation values.
            h5::copy_group_except(&file, &new_file, &[label])?;
            header.touch(now());
            write_header(&new_file, &header)?;
        }

        drop(file);
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Returns a [`ProbeTable`] summarizing every top-level object,
    /// optionally filtered to labels matching a regular expression.
    pub fn probe(&self, pattern: Option<&str>) -> Result<ProbeTable> {
        let file = self.open_handle()?;
        let mut names = file.member_names()?;
        names.sort();

        if let Some(pattern) = pattern {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::validation_failed(format!("invalid label pattern: {e}")))?;
            names.retain(|name| regex.is_match(name));
        }

        let mut rows = Vec::with_capacity(names.len());
        for name in names {
            let group = file.group(&name)?;
            rows.push(ProbeRow {
                label: name,
                record_type: h5::get_attr(&group, "RecordType")?,
                description: h5::get_attr_opt(&group, "Description")?.unwrap_or_default(),
                empty: h5::get_attr_opt(&group, "Empty")?.unwrap_or_else(|| "no".to_string()),
                deflate: h5::get_attr_opt(&group, "Deflate")?.unwrap_or_else(|| "0".to_string()),
                complex: h5::get_attr_opt(&group, "Complex")?,
                array_size: h5::get_attr_opt(&group, "ArraySize")?,
                sparse: h5::get_attr_opt(&group, "Sparse")?,
                record_size: h5::get_attr_opt(&group, "RecordSize")?,
                class: h5::get_attr_opt(&group, "Class")?,
                field_names: h5::get_attr_opt(&group, "FieldNames")?,
                command: h5::get_attr_opt(&group, "Command")?,
            });
        }
        Ok(ProbeTable { rows })
    }

    /// Returns every top-level label, optionally filtered by a regular
    /// expression.
    pub fn labels(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let file = self.open_handle()?;
        let mut names = file.member_names()?;
        names.sort();

        if let Some(pattern) = pattern {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::validation_failed(format!("invalid label pattern: {e}")))?;
            names.retain(|name| regex.is_match(name));
        }
        Ok(names)
    }

    /// Updates a single top-level `object`/`objects` record's data in
    /// place, keeping its label, description, `Deflate` level, and
    /// `Class`, provided the new value is structurally equivalent to the
    /// record's current on-disk signature.
    ///
    /// Errors if `label` does not currently hold a non-empty `object` or
    /// `objects` record: this operation is narrower than [`Self::replace`],
    /// which accepts any record kind.
    pub fn update_object(&self, label: &str, value: &Value) -> Result<()> {
        let file = self.open_handle()?;
        let group = file
            .group(label)
            .map_err(|_| Error::label_not_found(label))?;
        require_object_record(&group, label)?;
        drop(group);
        drop(file);

        self.replace(label, value)
    }

    /// Updates several top-level `object`/`objects` records in one call;
    /// `updates` maps label to new value. Every update is validated
    /// (existing record is a non-empty `object`/`objects` record, and
    /// the new value is structurally equivalent) before any of them are
    /// written.
    pub fn update_objects(&self, updates: &BTreeMap<String, Value>) -> Result<()> {
        let file = self.open_handle()?;
        for (label, value) in updates {
            let existing = file
                .group(label)
                .map_err(|_| Error::label_not_found(label.clone()))?;
            require_object_record(&existing, label)?;
            let old_signature = unnest_record(&existing)?;
            let new_signature = unnest(value);
            if !are_signatures_equivalent(&old_signature, &new_signature) {
                return Err(Error::validation_failed(format!(
                    "replacement value for {label:?} is not structurally equivalent to the existing record"
                )));
            }
        }
        drop(file);

        for (label, value) in updates {
            self.replace(label, value)?;
        }
        Ok(())
    }
}

/// Errors unless `group` is a non-empty `object`/`objects` record,
/// the narrower precondition [`Archive::update_object`]/
/// [`Archive::update_objects`] enforce beyond what [`Archive::replace`]
/// requires.
fn require_object_record(group: &hdf5::Group, label: &str) -> Result<()> {
    let record_type = h5::get_attr(group, "RecordType")?;
    if record_type != "object" && record_type != "objects" {
        return Err(Error::validation_failed(format!(
            "update_object(s) requires an existing object/objects record at {label:?}, found {record_type:?}"
        )));
    }
    if h5::get_attr_opt(group, "Empty")?.as_deref() == Some("yes") {
        return Err(Error::validation_failed(format!(
            "update_object(s) requires a non-empty existing record at {label:?}"
        )));
    }
    Ok(())
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn read_header(file: &H5File) -> Result<Header> {
    Ok(Header {
        file_format: h5::get_attr(file, "FileFormat")?,
        format_version: h5::get_attr(file, "FormatVersion")?,
        writable: h5::get_attr(file, "Writable")? == "yes",
        created: h5::get_attr(file, "Created")?,
        updated: h5::get_attr(file, "Updated")?,
    })
}

fn write_header(file: &H5File, header: &Header) -> Result<()> {
    h5::set_attrs(
        file,
        [
            ("FileFormat", header.file_format.as_str()),
            ("FormatVersion", header.format_version.as_str()),
            ("Writable", if header.writable { "yes" } else { "no" }),
            ("Created", header.created.as_str()),
            ("Updated", header.updated.as_str()),
        ],
    )
}

fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::invalid_label(label, "label must not be empty"));
    }
    if label.contains('/') || label.contains('\\') {
        return Err(Error::invalid_label(
            label,
            "label must not contain '/' or '\\'",
        ));
    }
    Ok(())
}

fn validate_deflate(deflate: u8) -> Result<()> {
    if deflate > 9 {
        return Err(Error::validation_failed(format!(
            "deflate level must be between 0 and 9, got {deflate}"
        )));
    }
    Ok(())
}
