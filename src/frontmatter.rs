//! Splits a source file into its YAML front matter and its body. The
//! header is fenced by `---` markers at the very start of the file:
//!
//! ```text
//! ---
//! layout: default
//! title: Hello, world!
//! categories: [greetings]
//! ---
//! body...
//! ```
//!
//! Input without a leading fence is not an error: it has default (empty)
//! front matter and the whole input is the body.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

const FENCE: &str = "---";

/// The keys the builder itself understands, plus everything else the
/// author wrote, which is handed to templates untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Frontmatter {
    /// Name of the layout to wrap the rendered body in. Layouts may name
    /// their own parent layout, forming a chain.
    #[serde(default)]
    pub layout: Option<String>,

    /// Display title. Falls back to a name derived from the source file
    /// when absent.
    #[serde(default)]
    pub title: Option<String>,

    /// A single category label.
    #[serde(default)]
    pub category: Option<String>,

    /// Multiple category labels.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Every other key, preserved for templates.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// The union of `category` and `categories`, first occurrence wins on
    /// duplicates.
    pub fn category_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for label in self.category.iter().chain(self.categories.iter()) {
            if !labels.iter().any(|l| l == label) {
                labels.push(label.clone());
            }
        }
        labels
    }
}

/// Splits `input` into front matter and body. A missing leading fence
/// yields default front matter and the unmodified input; a leading fence
/// without a closing fence is an error. One newline following the closing
/// fence belongs to the fence, not the body.
pub fn split(input: &str) -> Result<(Frontmatter, &str)> {
    if !input.starts_with(FENCE) {
        return Ok((Frontmatter::default(), input));
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::MissingClosingFence),
        Some(offset) => {
            let yaml = &input[FENCE.len()..FENCE.len() + offset];
            let body = &input[FENCE.len() + offset + FENCE.len()..];
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            let front = if yaml.trim().is_empty() {
                // serde_yaml rejects a fully empty document for a struct
                // target, but an empty header is legal input.
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            Ok((front, body))
        }
    }
}

/// The result of splitting front matter from a source file.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed front-matter header.
#[derive(Debug)]
pub enum Error {
    /// Returned when the opening fence was found but the closing fence was
    /// missing.
    MissingClosingFence,

    /// Returned when the header is not valid YAML for the expected schema.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingClosingFence => write!(f, "Missing closing `---`"),
            Error::Yaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingClosingFence => None,
            Error::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for deserialization.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}
