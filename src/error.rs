//! Error types for this crate.
//!
//! This module defines the [`Error`] enum which represents all possible
//! errors that can occur during archive reading, writing, and validation.

use std::path::PathBuf;

/// The main error type for archive operations.
///
/// This enum covers all error conditions that can arise when working with
/// SDA archives, including I/O errors, HDF5 errors, format violations, and
/// validation failures.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HDF5 library reported an error.
    #[error("hdf5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// The archive's header attributes are missing or malformed.
    #[error("corrupt archive: {message}")]
    Corrupt {
        /// A description of what makes the archive corrupt.
        message: String,
    },

    /// A value could not be mapped to any known record type.
    #[error("unsupported value for insertion: {message}")]
    UnsupportedValue {
        /// A description of the offending value.
        message: String,
    },

    /// A group's `RecordType` attribute names a record type this crate
    /// does not know how to extract.
    #[error("unsupported record type: {record_type}")]
    UnsupportedRecordType {
        /// The record type found on disk.
        record_type: String,
    },

    /// Validation failed with one or more errors.
    #[error("validation failed: {message}")]
    ValidationFailed {
        /// A description of the validation failure.
        message: String,
    },

    /// The archive does not have an object with the requested label.
    #[error("label not found: {label}")]
    LabelNotFound {
        /// The label that was not found.
        label: String,
    },

    /// A label is not a valid MATLAB field label.
    #[error("{label:?} is not a valid label: {reason}")]
    InvalidLabel {
        /// The offending label.
        label: String,
        /// Why the label was rejected.
        reason: String,
    },

    /// The archive is not writable (its `Writable` header attribute is
    /// `"no"`), but a mutating operation was attempted.
    #[error("archive is not writable")]
    NotWritable,

    /// A file path error occurred.
    #[error("path error: {message} (path: {path:?})")]
    Path {
        /// A description of the path error.
        message: String,
        /// The problematic path.
        path: PathBuf,
    },
}

impl Error {
    /// Creates a new [`Error::Corrupt`] error.
    #[must_use]
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// Creates a new [`Error::UnsupportedValue`] error.
    #[must_use]
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            message: message.into(),
        }
    }

    /// Creates a new [`Error::ValidationFailed`] error.
    #[must_use]
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Creates a new [`Error::InvalidLabel`] error.
    #[must_use]
    pub fn invalid_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`Error::Path`] error.
    #[must_use]
    pub fn path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Path {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Creates a new [`Error::UnsupportedRecordType`] error.
    #[must_use]
    pub fn unsupported_record_type(record_type: impl Into<String>) -> Self {
        Self::UnsupportedRecordType {
            record_type: record_type.into(),
        }
    }

    /// Creates a new [`Error::LabelNotFound`] error.
    #[must_use]
    pub fn label_not_found(label: impl Into<String>) -> Self {
        Self::LabelNotFound {
            label: label.into(),
        }
    }
}

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
