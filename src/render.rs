//! Template execution. A [`Renderer`] turns one piece of templated
//! content into its final output: the body is itself a template, its
//! result is converted from markup if the source extension calls for it,
//! and the converted content is then wrapped by the layout chain named in
//! front matter. Every template runs against a context of the shape
//! `{site, page, content}`, where `content` is only present for layouts.

use crate::frontmatter::Frontmatter;
use crate::layout::Layout;
use crate::markdown;
use gtmpl::{Context, Template};
use gtmpl_value::Value;
use std::collections::HashMap;
use std::fmt;

/// Renders templated content against a layout table and a site payload.
pub struct Renderer<'a> {
    /// The layout table loaded at startup.
    pub layouts: &'a HashMap<String, Layout>,

    /// The site payload value for this render call. Freshness is the
    /// caller's concern: the payload must be rebuilt for every render.
    pub site: &'a Value,
}

impl Renderer<'_> {
    /// Renders `body` and wraps it in its layout chain. `ext` is the
    /// source file's extension (it decides markup conversion), `front` is
    /// the item's front matter (it names the first layout), and `page` is
    /// the item's own template value.
    ///
    /// An unknown layout name ends the chain without error; a layout
    /// naming one of its ancestors is a cycle and fails.
    pub fn render(
        &self,
        body: &str,
        ext: &str,
        front: &Frontmatter,
        page: &Value,
    ) -> Result<String> {
        let rendered = execute(body, self.context(page, None))?;
        let mut content = markdown::transform(ext, &rendered);

        let mut applied: Vec<&str> = Vec::new();
        let mut next = front.layout.as_deref();
        while let Some(name) = next {
            if applied.contains(&name) {
                return Err(Error::LayoutCycle(name.to_owned()));
            }
            let layout = match self.layouts.get(name) {
                Some(layout) => layout,
                None => break,
            };
            content = execute(&layout.source, self.context(page, Some(&content)))?;
            applied.push(name);
            next = layout.front.layout.as_deref();
        }

        Ok(content)
    }

    fn context(&self, page: &Value, content: Option<&str>) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("site".to_owned(), self.site.clone());
        m.insert("page".to_owned(), page.clone());
        if let Some(content) = content {
            m.insert("content".to_owned(), Value::String(content.to_owned()));
        }
        Value::Object(m)
    }
}

/// Parses `source` as a template and executes it against `context`,
/// returning the output.
fn execute(source: &str, context: Value) -> Result<String> {
    let mut template = Template::default();
    template.parse(source).map_err(Error::Template)?;
    let mut out = Vec::new();
    template.execute(&mut out, &Context::from(context).unwrap())?;
    String::from_utf8(out).map_err(|err| Error::Template(err.to_string()))
}

/// The result of a template-rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering templated content.
#[derive(Debug)]
pub enum Error {
    /// An error parsing or executing a template.
    Template(String),

    /// A layout chain that revisits a layout it already applied.
    LayoutCycle(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::LayoutCycle(name) => {
                write!(f, "Layout '{}' includes itself as an ancestor", name)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}
