//! # sda
//!
//! Sandia Data Archive (SDA) reader and writer, built on HDF5.
//!
//! `sda` provides a safe, typed Rust implementation of the SDA container
//! format: labelled, self-describing records (numeric, logical,
//! character, file, cell, structure, and struct/object arrays) stored in
//! an HDF5 file with a small, versioned header.
//!
//! ## Quick Start
//!
//! ### Creating and writing to an archive
//!
//! ```no_run
//! use sda::{Archive, OpenMode, WriteOptions, Value};
//!
//! let archive = Archive::open("data.sda", OpenMode::Create)?;
//! archive.insert("greeting", &Value::scalar(42.0), "the answer", WriteOptions::default())?;
//! # Ok::<(), sda::Error>(())
//! ```
//!
//! ### Reading an archive back
//!
//! ```no_run
//! use sda::{Archive, OpenMode};
//!
//! let archive = Archive::open("data.sda", OpenMode::Read)?;
//! let value = archive.extract("greeting")?;
//! let table = archive.probe(None)?;
//! println!("{table}");
//! # Ok::<(), sda::Error>(())
//! ```
//!
//! ## Entry Points
//!
//! The [`Archive`] struct provides all main functionality:
//!
//! - [`Archive::open`] - Open or create an archive
//! - [`Archive::insert`] / [`Archive::insert_from_file`] / [`Archive::insert_object`] - Add a record
//! - [`Archive::extract`] / [`Archive::extract_to_file`] - Read a record back
//! - [`Archive::probe`] / [`Archive::labels`] - Inspect without loading data
//! - [`Archive::describe`] - Update a record's description in place
//! - [`Archive::replace`] / [`Archive::update_object`] / [`Archive::update_objects`] - Mutate in place
//! - [`Archive::remove`] - Delete a record, reclaiming its space
//!
//! ## Data Types
//!
//! - [`Value`] - the in-memory tagged union accepted by `insert` and
//!   returned by `extract`
//! - [`value::NumericArray`] - dense/sparse, real/complex numeric payloads
//! - [`record::RecordType`] - the closed record-type taxonomy
//!
//! ## Feature Flags
//!
//! | Feature   | Description                                  |
//! |-----------|-----------------------------------------------|
//! | `serde`   | Serialization/deserialization support          |
//! | `tracing` | Structured logging with the `tracing` crate   |
//! | `full`    | All optional features                          |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

mod archive;
pub mod config;
mod error;
mod extractor;
pub mod h5;
pub mod header;
mod inserter;
mod naming;
pub mod probe;
pub mod record;
pub mod signature;
pub mod value;

pub use archive::Archive;
pub use config::{OpenMode, Verbosity, WriteOptions};
pub use error::{Error, Result};
pub use probe::{ProbeRow, ProbeTable};
pub use record::RecordType;
pub use value::{NumericArray, ShapedArray, SparseMatrix, Value};
