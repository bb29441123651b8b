//! The tabular summary returned by [`crate::Archive::probe`].

use std::fmt;

/// One row of a [`ProbeTable`], describing a single top-level object in
/// an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRow {
    /// The object's label.
    pub label: String,
    /// The object's `RecordType` attribute.
    pub record_type: String,
    /// The object's `Description` attribute.
    pub description: String,
    /// The object's `Empty` attribute (`"yes"` or `"no"`).
    pub empty: String,
    /// The object's `Deflate` attribute (compression level, `"0"`-`"9"`).
    pub deflate: String,
    /// The object's `Complex` attribute (`numeric` records only).
    pub complex: Option<String>,
    /// The object's `ArraySize` attribute (simple records only).
    pub array_size: Option<String>,
    /// The object's `Sparse` attribute (`numeric` records only).
    pub sparse: Option<String>,
    /// The object's `RecordSize` attribute (composite records only).
    pub record_size: Option<String>,
    /// The object's `Class` attribute (`object`/`objects` records only).
    pub class: Option<String>,
    /// The object's `FieldNames` attribute (`structure`/`structures`/
    /// `object`/`objects` records only).
    pub field_names: Option<String>,
    /// The object's `Command` attribute, if the record carries one.
    pub command: Option<String>,
}

/// A fixed-column summary of every top-level object in an archive,
/// returned by [`crate::Archive::probe`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeTable {
    /// One row per top-level object, in the order the objects were
    /// visited (alphabetical by label).
    pub rows: Vec<ProbeRow>,
}

impl ProbeTable {
    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ProbeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {:<12} {:<8} {:<8} {}", "Label", "RecordType", "Empty", "Deflate", "Description")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} {:<12} {:<8} {:<8} {}",
                row.label, row.record_type, row.empty, row.deflate, row.description
            )?;
        }
        Ok(())
    }
}
