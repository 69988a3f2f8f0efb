//! Posts: dated content items collected from a posts directory. A post's
//! file name carries its date and slug (`YYYY-MM-DD-slug.ext`); the file
//! itself carries front matter and a templated body. Posts order by date
//! and write to `<dest>/YYYY/MM/DD/<slug>`.

use crate::frontmatter::{self, Frontmatter};
use crate::layout::Layout;
use crate::render::{self, Renderer};
use chrono::{Datelike, NaiveDate};
use gtmpl_value::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single dated content item.
pub struct Post {
    /// The path the post was read from.
    pub source: PathBuf,

    /// The publication date, parsed from the file name.
    pub date: NaiveDate,

    /// The slug portion of the file name, without date or extension.
    pub slug: String,

    /// The source file extension. Decides markup conversion.
    pub ext: String,

    /// The post's front matter.
    pub front: Frontmatter,

    /// The post's category labels, in front-matter order without
    /// duplicates.
    pub categories: Vec<String>,

    /// The unrendered body, with front matter stripped.
    pub content: String,

    /// The rendered output. `None` until [`Post::render`] runs.
    pub output: Option<String>,
}

impl Post {
    /// Returns whether `name` is a well-formed post file name: a valid
    /// calendar date, a nonempty slug, and an extension.
    pub fn is_valid_name(name: &str) -> bool {
        parse_name(name).is_some()
    }

    /// Reads and parses the post `dir/name`. The name must satisfy
    /// [`Post::is_valid_name`].
    pub fn create(dir: &Path, name: &str) -> Result<Post> {
        let (date, slug, ext) =
            parse_name(name).ok_or_else(|| Error::InvalidName(name.to_owned()))?;
        let source = dir.join(name);
        let raw = fs::read_to_string(&source)?;
        let (front, body) = frontmatter::split(&raw)?;
        let categories = front.category_labels();
        Ok(Post {
            source,
            date,
            slug,
            ext,
            front,
            categories,
            content: body.to_owned(),
            output: None,
        })
    }

    /// Renders the post against `site` and stores the result. Rendering
    /// again replaces the stored output.
    pub fn render(&mut self, layouts: &HashMap<String, Layout>, site: &Value) -> Result<()> {
        let renderer = Renderer { layouts, site };
        let page = Value::from(&*self);
        let output = renderer.render(&self.content, &self.ext, &self.front, &page)?;
        self.output = Some(output);
        Ok(())
    }

    /// The date directory for this post, `YYYY/MM/DD`, zero padded.
    pub fn dir(&self) -> PathBuf {
        PathBuf::from(format!("{:04}", self.date.year()))
            .join(format!("{:02}", self.date.month()))
            .join(format!("{:02}", self.date.day()))
    }

    /// The post's site-absolute URL: `/YYYY/MM/DD/<slug>`.
    pub fn url(&self) -> String {
        format!(
            "/{:04}/{:02}/{:02}/{}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.slug
        )
    }

    /// Writes the rendered output beneath `dest`, creating the date
    /// directories as needed. The output file has no extension.
    pub fn write(&self, dest: &Path) -> Result<()> {
        let output = self.output.as_ref().ok_or(Error::NotRendered)?;
        let dir = dest.join(self.dir());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(&self.slug), output)?;
        Ok(())
    }
}

/// Parses `YYYY-MM-DD-slug.ext` into its parts. Returns `None` for
/// names that don't fit the shape or carry an impossible date.
fn parse_name(name: &str) -> Option<(NaiveDate, String, String)> {
    let mut parts = name.splitn(4, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    let rest = parts.next()?;
    let date =
        NaiveDate::parse_from_str(&format!("{}-{}-{}", year, month, day), "%Y-%m-%d").ok()?;
    let (slug, ext) = rest.rsplit_once('.')?;
    if slug.is_empty() {
        return None;
    }
    Some((date, slug.to_owned(), ext.to_owned()))
}

impl PartialEq for Post {
    /// Posts compare by date alone.
    fn eq(&self, other: &Post) -> bool {
        self.date == other.date
    }
}

impl Eq for Post {}

impl PartialOrd for Post {
    fn partial_cmp(&self, other: &Post) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Post {
    /// Posts compare by date alone; a stable sort keeps discovery order
    /// between posts sharing a date.
    fn cmp(&self, other: &Post) -> Ordering {
        self.date.cmp(&other.date)
    }
}

/// The result of a post operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error encountered while reading, rendering, or writing
/// a post.
#[derive(Debug)]
pub enum Error {
    /// A file name that doesn't fit `YYYY-MM-DD-slug.ext`.
    InvalidName(String),

    /// An error reading or writing the post.
    Io(io::Error),

    /// An error parsing the post's front matter.
    Frontmatter(frontmatter::Error),

    /// An error rendering the post's templates.
    Render(render::Error),

    /// A write was attempted before the post was rendered.
    NotRendered,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidName(name) => write!(f, "Invalid post file name '{}'", name),
            Error::Io(err) => err.fmt(f),
            Error::Frontmatter(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::NotRendered => write!(f, "Post was not rendered before writing"),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidName(_) => None,
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
