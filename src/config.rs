//! Configuration types for opening and writing archives.

/// How an archive is opened.
///
/// Mirrors the five textual modes `h5py`/MATLAB use for HDF5 files, as a
/// typed enum instead of a stringly-typed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Open an existing archive read-only. Fails if the file is missing.
    Read,
    /// Open an existing archive for read and write. Fails if the file is
    /// missing.
    ReadWrite,
    /// Create a new archive, truncating any existing file at the path.
    Create,
    /// Create a new archive. Fails if a file already exists at the path.
    CreateNew,
    /// Open an existing archive for read and write, creating it if it
    /// does not already exist.
    Append,
}

impl OpenMode {
    /// Whether this mode allows mutating operations (`insert`, `replace`,
    /// `remove`, `update_object`, `update_objects`).
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    /// Whether this mode may create a new file on disk.
    #[must_use]
    pub const fn may_create(self) -> bool {
        matches!(self, OpenMode::Create | OpenMode::CreateNew | OpenMode::Append)
    }
}

/// Per-call options controlling how a value is written into the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// gzip compression level (0-9) applied to datasets. `0` disables
    /// compression.
    pub deflate: u8,
    /// When `true`, dict-like values are coerced to `structures` record
    /// arrays instead of a single `structure`, mirroring the Python
    /// `as_structures` flag on `SDAFile.insert`.
    pub as_structures: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            deflate: 0,
            as_structures: false,
        }
    }
}

impl WriteOptions {
    /// Returns these options with the given deflate level.
    #[must_use]
    pub const fn with_deflate(mut self, deflate: u8) -> Self {
        self.deflate = deflate;
        self
    }

    /// Returns these options with `as_structures` set.
    #[must_use]
    pub const fn with_as_structures(mut self, as_structures: bool) -> Self {
        self.as_structures = as_structures;
        self
    }
}

/// Verbosity passed through to the optional `tracing` integration.
///
/// When the `tracing` feature is disabled this has no effect; archive
/// methods still accept and store it so that callers don't need
/// conditional compilation at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No logging.
    Silent,
    /// Log mutating operations at `debug` level.
    #[default]
    Debug,
    /// Log mutating operations at `info` level.
    Info,
}
