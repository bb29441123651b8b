//! The closed record-type taxonomy and equivalence rules.

use std::fmt;

/// The record types an SDA archive can store.
///
/// This is a closed set: anything on disk with a `RecordType` attribute
/// outside this list is rejected with
/// [`crate::Error::UnsupportedRecordType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// A dense or sparse, real or complex numeric array or scalar.
    Numeric,
    /// A boolean array or scalar.
    Logical,
    /// An ASCII/Latin-1 text array or scalar.
    Character,
    /// A file's raw byte contents, stored as a `numeric` dataset under a
    /// `file` group.
    File,
    /// A heterogeneous ordered list (MATLAB cell array).
    Cell,
    /// A single struct-like record with named fields.
    Structure,
    /// An array of struct-like records sharing the same field names.
    Structures,
    /// An opaque object, stored the same way as `structure`.
    Object,
    /// An array of opaque objects, stored the same way as `structures`.
    Objects,
}

impl RecordType {
    /// Parses the on-disk `RecordType` attribute string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "numeric" => RecordType::Numeric,
            "logical" => RecordType::Logical,
            "character" => RecordType::Character,
            "file" => RecordType::File,
            "cell" => RecordType::Cell,
            "structure" => RecordType::Structure,
            "structures" => RecordType::Structures,
            "object" => RecordType::Object,
            "objects" => RecordType::Objects,
            _ => return None,
        })
    }

    /// The on-disk `RecordType` attribute string for this record type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RecordType::Numeric => "numeric",
            RecordType::Logical => "logical",
            RecordType::Character => "character",
            RecordType::File => "file",
            RecordType::Cell => "cell",
            RecordType::Structure => "structure",
            RecordType::Structures => "structures",
            RecordType::Object => "object",
            RecordType::Objects => "objects",
        }
    }

    /// Whether this record type is a "simple" leaf record (a single
    /// dataset with metadata attributes) as opposed to a composite
    /// record backed by a group of child records.
    #[must_use]
    pub const fn is_simple(self) -> bool {
        matches!(
            self,
            RecordType::Numeric | RecordType::Logical | RecordType::Character | RecordType::File
        )
    }

    /// Whether `self` and `other` belong to the same equivalence class
    /// used by signature comparisons.
    ///
    /// `structure` and `object` are considered equivalent to each other,
    /// and `cell`, `objects`, and `structures` are considered equivalent
    /// to each other, because they share identical on-disk shapes and
    /// differ only in semantic intent.
    #[must_use]
    pub fn is_equivalent(self, other: Self) -> bool {
        const STRUCTURE_EQUIVALENT: [RecordType; 2] = [RecordType::Structure, RecordType::Object];
        const CELL_EQUIVALENT: [RecordType; 3] =
            [RecordType::Cell, RecordType::Objects, RecordType::Structures];

        self == other
            || (STRUCTURE_EQUIVALENT.contains(&self) && STRUCTURE_EQUIVALENT.contains(&other))
            || (CELL_EQUIVALENT.contains(&self) && CELL_EQUIVALENT.contains(&other))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_record_types() {
        for rt in [
            RecordType::Numeric,
            RecordType::Logical,
            RecordType::Character,
            RecordType::File,
            RecordType::Cell,
            RecordType::Structure,
            RecordType::Structures,
            RecordType::Object,
            RecordType::Objects,
        ] {
            assert_eq!(RecordType::parse(rt.as_str()), Some(rt));
        }
        assert_eq!(RecordType::parse("function"), None);
    }

    #[test]
    fn structure_and_object_are_equivalent() {
        assert!(RecordType::Structure.is_equivalent(RecordType::Object));
        assert!(!RecordType::Structure.is_equivalent(RecordType::Cell));
    }

    #[test]
    fn cell_objects_structures_are_mutually_equivalent() {
        assert!(RecordType::Cell.is_equivalent(RecordType::Objects));
        assert!(RecordType::Objects.is_equivalent(RecordType::Structures));
        assert!(RecordType::Structures.is_equivalent(RecordType::Cell));
    }
}
