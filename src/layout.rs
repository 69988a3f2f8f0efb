//! Loads the reusable layout templates from the layouts directory into a
//! name-keyed table. The scan is non-recursive and a missing directory is
//! not an error: a site without layouts is still a valid site, its content
//! just renders unwrapped.

use crate::frontmatter::{self, Frontmatter};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A reusable template, keyed by a name derived from its filename.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The layout's name: its filename with the last dot-delimited
    /// extension segment stripped (`default.html` → `default`). A filename
    /// without an extension keeps its whole name.
    pub name: String,

    /// The layout's own front matter. Its `layout` key names a parent
    /// layout, which lets layouts nest.
    pub front: Frontmatter,

    /// The template source, with any front matter already removed.
    pub source: String,
}

impl Layout {
    /// Reads one layout file. The layout's name comes from `file_name`,
    /// not from the file's contents.
    pub fn load(dir: &Path, file_name: &str) -> Result<Layout> {
        let path = dir.join(file_name);
        let raw = fs::read_to_string(&path)?;
        let (front, source) = frontmatter::split(&raw)
            .map_err(|err| Error::Frontmatter { path, err })?;
        let name = match Path::new(file_name).file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => file_name.to_owned(),
        };
        Ok(Layout {
            name,
            front,
            source: source.to_owned(),
        })
    }
}

/// Reads every regular file directly inside `dir` into a layout table.
/// Directories inside `dir` are skipped. Files are read in sorted name
/// order, and on a name collision after extension stripping the
/// last-read layout wins. A missing `dir` yields an empty table.
pub fn load_layouts(dir: &Path) -> Result<HashMap<String, Layout>> {
    let mut layouts = HashMap::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => return Ok(layouts),
        Err(e) => return Err(Error::Io(e)),
    };

    let mut names = Vec::new();
    for result in entries {
        let entry = result?;
        if !entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort_unstable();

    for file_name in &names {
        let layout = Layout::load(dir, file_name)?;
        layouts.insert(layout.name.clone(), layout);
    }
    Ok(layouts)
}

/// The result of a layout-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading the layouts directory.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O failures other than a missing layouts directory.
    Io(io::Error),

    /// Returned when a layout file's front matter is malformed.
    Frontmatter {
        path: PathBuf,
        err: frontmatter::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Frontmatter { path, err } => {
                write!(f, "Reading layout '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Frontmatter { path: _, err } => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
