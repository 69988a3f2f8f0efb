//! Pages: templated files found anywhere in the source tree outside the
//! posts directory. A page keeps its place: it writes to the same
//! source-relative directory and file name it was read from.

use crate::frontmatter::{self, Frontmatter};
use crate::layout::Layout;
use crate::render::{self, Renderer};
use gtmpl_value::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A templated file that is not a post.
pub struct Page {
    /// The path the page was read from.
    pub source: PathBuf,

    /// The page's directory, relative to the source root. Empty for
    /// pages at the root.
    pub dir: PathBuf,

    /// The page's file name, kept unchanged in the output.
    pub name: String,

    /// The source file extension. Decides markup conversion. Empty when
    /// the file has none.
    pub ext: String,

    /// The page's front matter.
    pub front: Frontmatter,

    /// The unrendered body, with front matter stripped.
    pub content: String,

    /// The rendered output. `None` until [`Page::render`] runs.
    pub output: Option<String>,
}

impl Page {
    /// Reads and parses the page at `source_root/dir/name`.
    pub fn create(source_root: &Path, dir: &Path, name: &str) -> Result<Page> {
        let source = source_root.join(dir).join(name);
        let raw = fs::read_to_string(&source)?;
        let (front, body) = frontmatter::split(&raw)?;
        let ext = Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Page {
            source,
            dir: dir.to_owned(),
            name: name.to_owned(),
            ext,
            front,
            content: body.to_owned(),
            output: None,
        })
    }

    /// Renders the page against `site` and stores the result.
    pub fn render(&mut self, layouts: &HashMap<String, Layout>, site: &Value) -> Result<()> {
        let renderer = Renderer { layouts, site };
        let page = Value::from(&*self);
        let output = renderer.render(&self.content, &self.ext, &self.front, &page)?;
        self.output = Some(output);
        Ok(())
    }

    /// The page's file name without its extension. Used as the title
    /// fallback.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }

    /// The page's site-absolute URL, mirroring its source-relative path.
    pub fn url(&self) -> String {
        format!("/{}", self.dir.join(&self.name).display())
    }

    /// Writes the rendered output to `dest/dir/name`, creating the
    /// directories as needed.
    pub fn write(&self, dest: &Path) -> Result<()> {
        let output = self.output.as_ref().ok_or(Error::NotRendered)?;
        let dir = dest.join(&self.dir);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(&self.name), output)?;
        Ok(())
    }
}

/// The result of a page operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error encountered while reading, rendering, or writing
/// a page.
#[derive(Debug)]
pub enum Error {
    /// An error reading or writing the page.
    Io(io::Error),

    /// An error parsing the page's front matter.
    Frontmatter(frontmatter::Error),

    /// An error rendering the page's templates.
    Render(render::Error),

    /// A write was attempted before the page was rendered.
    NotRendered,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Frontmatter(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::NotRendered => write!(f, "Page was not rendered before writing"),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Frontmatter(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::NotRendered => None,
        }
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible io operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<frontmatter::Error> for Error {
    /// Converts a [`frontmatter::Error`] into an [`Error`]. It allows us
    /// to use the `?` operator when splitting front matter.
    fn from(err: frontmatter::Error) -> Error {
        Error::Frontmatter(err)
    }
}

impl From<render::Error> for Error {
    /// Converts a [`render::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for render operations.
    fn from(err: render::Error) -> Error {
        Error::Render(err)
    }
}
