//! The site orchestrator. [`Site::process`] drives a whole build: it
//! loads the layout table, walks the source tree transforming posts,
//! pages, and static files, and finally writes every collected post.
//!
//! The walk visits each directory's posts directory before anything
//! else there, so pages see every post discovered up to their own
//! position in the traversal. Posts rendered early are rendered again
//! whenever a later posts directory adds to the collection, so their
//! written output reflects the full collection; pages are rendered
//! exactly once and keep whatever the collection held at their turn.

use crate::classify::{classify, FileKind};
use crate::config::Config;
use crate::filter::filter_entries;
use crate::layout::{self, Layout};
use crate::page::{self, Page};
use crate::payload::Payload;
use crate::post::{self, Post};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A site build: configuration plus everything collected while it runs.
pub struct Site {
    /// The source tree root.
    pub source: PathBuf,

    /// The directory the rendered site is written into.
    pub destination: PathBuf,

    /// The layouts directory name, relative to the source root.
    pub layouts_dir: String,

    /// The posts directory name, looked for in every directory of the
    /// walk.
    pub posts_dir: String,

    /// The layout table, loaded once per build.
    pub layouts: HashMap<String, Layout>,

    /// Every post discovered so far. Sorted newest first after each
    /// posts directory is processed.
    pub posts: Vec<Post>,
}

impl Site {
    /// Creates an empty site from `config`. Nothing is read until
    /// [`Site::process`] runs.
    pub fn new(config: Config) -> Site {
        Site {
            source: config.source,
            destination: config.destination,
            layouts_dir: config.layouts_dir,
            posts_dir: config.posts_dir,
            layouts: HashMap::new(),
            posts: Vec::new(),
        }
    }

    /// Runs the whole build: layouts, then the source walk, then the
    /// post write-out. The first error stops the build; files already
    /// written stay written.
    pub fn process(&mut self) -> Result<()> {
        self.read_layouts()?;
        self.transform(Path::new(""))?;
        self.write_posts()?;
        Ok(())
    }

    fn read_layouts(&mut self) -> Result<()> {
        self.layouts = layout::load_layouts(&self.source.join(&self.layouts_dir))?;
        Ok(())
    }

    /// The post pipeline for one posts directory, in three phases:
    /// discover every well-named post file (in byte order of their
    /// names), render the ENTIRE collection against a payload rebuilt
    /// per post, then sort the collection newest first. Rendering the
    /// whole collection refreshes posts from earlier directories.
    fn read_posts(&mut self, dir: &Path) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(Error::Io(err)),
        };
        let mut names = Vec::new();
        for result in entries {
            let entry = result?;
            if !entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort_unstable();
        for name in &names {
            if Post::is_valid_name(name) {
                let post = Post::create(dir, name).map_err(|err| Error::Post {
                    path: dir.join(name),
                    err,
                })?;
                self.posts.push(post);
            }
        }

        for i in 0..self.posts.len() {
            let path = self.posts[i].source.clone();
            let site = Payload::build(&self.posts).to_value();
            self.posts[i]
                .render(&self.layouts, &site)
                .map_err(|err| Error::Post { path, err })?;
        }

        self.posts.sort_by(|a, b| b.cmp(a));
        Ok(())
    }

    fn write_posts(&self) -> Result<()> {
        for post in &self.posts {
            post.write(&self.destination).map_err(|err| Error::Post {
                path: post.source.clone(),
                err,
            })?;
        }
        Ok(())
    }

    /// Transforms one directory of the source tree, `dir` relative to
    /// the source root. The posts directory goes first; the remaining
    /// entries are handled in byte order of their names, recursing into
    /// subdirectories except the destination itself.
    fn transform(&mut self, dir: &Path) -> Result<()> {
        let base = self.source.join(dir);
        let mut names = Vec::new();
        for result in fs::read_dir(&base)? {
            let entry = result?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort_unstable();
        let mut entries = filter_entries(names, &self.posts_dir);

        if let Some(i) = entries.iter().position(|entry| entry == &self.posts_dir) {
            entries.remove(i);
            self.read_posts(&base.join(&self.posts_dir))?;
        }

        for name in entries {
            let path = base.join(&name);
            if path.is_dir() {
                if self.is_destination(&path) {
                    continue;
                }
                self.transform(&dir.join(&name))?;
            } else {
                match classify(&path)? {
                    FileKind::Templated => {
                        let mut page = Page::create(&self.source, dir, &name)
                            .map_err(|err| Error::Page {
                                path: path.clone(),
                                err,
                            })?;
                        let site = Payload::build(&self.posts).to_value();
                        page.render(&self.layouts, &site).map_err(|err| Error::Page {
                            path: path.clone(),
                            err,
                        })?;
                        page.write(&self.destination).map_err(|err| Error::Page {
                            path: path.clone(),
                            err,
                        })?;
                    }
                    FileKind::Static => {
                        let target_dir = self.destination.join(dir);
                        fs::create_dir_all(&target_dir)?;
                        fs::copy(&path, target_dir.join(&name)).map_err(|err| Error::Copy {
                            path: path.clone(),
                            err,
                        })?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether `path` is the destination directory. Compared first by
    /// path components, then by canonical paths when both resolve, so
    /// the destination is recognized however it was spelled.
    fn is_destination(&self, path: &Path) -> bool {
        if path == self.destination.as_path() {
            return true;
        }
        match (path.canonicalize(), self.destination.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// The result of a site operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error encountered while building a site.
#[derive(Debug)]
pub enum Error {
    /// An error loading the layout table.
    Layouts(layout::Error),

    /// An error processing the post at `path`.
    Post { path: PathBuf, err: post::Error },

    /// An error processing the page at `path`.
    Page { path: PathBuf, err: page::Error },

    /// An error copying the static file at `path`.
    Copy { path: PathBuf, err: io::Error },

    /// An error walking the source tree.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Layouts(err) => err.fmt(f),
            Error::Post { path, err } => {
                write!(f, "Processing post '{}': {}", path.display(), err)
            }
            Error::Page { path, err } => {
                write!(f, "Processing page '{}': {}", path.display(), err)
            }
            Error::Copy { path, err } => {
                write!(f, "Copying '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Layouts(err) => Some(err),
            Error::Post { err, .. } => Some(err),
            Error::Page { err, .. } => Some(err),
            Error::Copy { err, .. } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<layout::Error> for Error {
    /// Converts a [`layout::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator when loading layouts.
    fn from(err: layout::Error) -> Error {
        Error::Layouts(err)
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator when walking the source tree.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path)
            .unwrap()
            .write_all(contents.as_bytes())
            .unwrap();
    }

    fn build(source: &Path, dest: &Path) -> Result<Site> {
        let mut site = Site::new(Config::new(source.to_owned(), dest.to_owned()));
        site.process()?;
        Ok(site)
    }

    fn output_files(dest: &Path) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(dest)
            .into_iter()
            .map(|entry| entry.unwrap())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(dest)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        files.sort();
        files
    }

    fn slugs(site: &Site) -> Vec<String> {
        site.posts.iter().map(|post| post.slug.clone()).collect()
    }

    #[test]
    fn test_full_build() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write_file(
            &source.path().join("_layouts").join("default.html"),
            "<html><body>{{.content}}</body></html>",
        );
        write_file(
            &source.path().join("_posts").join("2020-01-01-first.md"),
            "---\ntitle: First\ncategories: [general]\n---\n# One",
        );
        write_file(
            &source.path().join("_posts").join("2020-06-01-second.md"),
            "---\ntitle: Second\n---\nSecond body",
        );
        write_file(
            &source.path().join("_posts").join("not-a-post.md"),
            "ignored",
        );
        write_file(
            &source.path().join("index.md"),
            "---\nlayout: default\ntitle: Home\n---\n\
             {{range .site.posts}}({{.slug}}){{end}}\
             {{range .site.categories.general}}[{{.slug}}]{{end}}",
        );
        write_file(&source.path().join("style.css"), "body { color: red; }");
        write_file(&source.path().join(".hidden.md"), "---\n---\nskipped");
        write_file(&source.path().join("junk.md~"), "skipped");
        write_file(&source.path().join("_drafts").join("note.md"), "skipped");

        let site = build(source.path(), dest.path())?;

        assert_eq!(vec!["second", "first"], slugs(&site));
        assert_eq!(
            vec![
                "2020/01/01/first",
                "2020/06/01/second",
                "index.md",
                "style.css",
            ],
            output_files(dest.path()),
        );

        let index = fs::read_to_string(dest.path().join("index.md"))?;
        assert!(index.starts_with("<html><body>"));
        assert!(index.contains("(second)(first)[first]"));

        let first =
            fs::read_to_string(dest.path().join("2020").join("01").join("01").join("first"))?;
        assert_eq!("<h1>One</h1>\n", first);

        let copied = fs::read_to_string(dest.path().join("style.css"))?;
        assert_eq!("body { color: red; }", copied);
        Ok(())
    }

    #[test]
    fn test_pages_see_posts_collected_before_them() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write_file(
            &source.path().join("a").join("_posts").join("2020-01-01-alpha.md"),
            "---\n---\n{{range .site.posts}}({{.slug}}){{end}}",
        );
        write_file(
            &source.path().join("m.md"),
            "---\n---\n{{range .site.posts}}({{.slug}}){{end}}",
        );
        write_file(
            &source.path().join("z").join("_posts").join("2020-02-01-zeta.md"),
            "---\n---\nz",
        );

        let site = build(source.path(), dest.path())?;

        // The page between the two posts directories saw only the first.
        let page = fs::read_to_string(dest.path().join("m.md"))?;
        assert!(page.contains("(alpha)"));
        assert!(!page.contains("zeta"));

        // The early post was rendered again once the later directory
        // added to the collection.
        let alpha =
            fs::read_to_string(dest.path().join("2020").join("01").join("01").join("alpha"))?;
        assert!(alpha.contains("(zeta)(alpha)"));

        assert_eq!(vec!["zeta", "alpha"], slugs(&site));
        Ok(())
    }

    #[test]
    fn test_destination_inside_source_is_skipped() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = source.path().join("out");
        write_file(&dest.join("marker.txt"), "stale");
        write_file(&source.path().join("a.md"), "---\n---\nhello");
        write_file(&source.path().join("b.txt"), "static");

        build(source.path(), &dest)?;

        assert_eq!("<p>hello</p>\n", fs::read_to_string(dest.join("a.md"))?);
        assert_eq!("static", fs::read_to_string(dest.join("b.txt"))?);
        assert!(dest.join("marker.txt").exists());
        assert!(!dest.join("out").exists());
        Ok(())
    }

    #[test]
    fn test_missing_posts_and_layouts_dirs_are_tolerated() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write_file(
            &source.path().join("index.md"),
            "---\nlayout: missing\n---\nbody",
        );

        let site = build(source.path(), dest.path())?;

        assert!(site.layouts.is_empty());
        assert!(site.posts.is_empty());
        // The unknown layout name ends the chain; the body still renders.
        assert_eq!(
            "<p>body</p>\n",
            fs::read_to_string(dest.path().join("index.md"))?
        );
        Ok(())
    }

    #[test]
    fn test_read_posts_missing_directory_is_a_no_op() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut site = Site::new(Config::new(
            source.path().to_owned(),
            dest.path().to_owned(),
        ));
        site.read_posts(&source.path().join("_posts"))?;
        assert!(site.posts.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_posts_on_a_file_fails() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        // Only absence is tolerated; a posts path that exists but is not
        // a directory is an ordinary error.
        write_file(&source.path().join("_posts"), "not a directory");
        let mut site = Site::new(Config::new(
            source.path().to_owned(),
            dest.path().to_owned(),
        ));
        assert!(site.read_posts(&source.path().join("_posts")).is_err());
    }

    #[test]
    fn test_missing_source_fails() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let missing = source.path().join("never");
        assert!(build(&missing, dest.path()).is_err());
    }

    #[test]
    fn test_malformed_post_is_an_error() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write_file(
            &source.path().join("_posts").join("2020-01-01-bad.md"),
            "---\ntitle: Bad\n",
        );
        let result = build(source.path(), dest.path());
        assert!(matches!(result, Err(Error::Post { .. })));
    }
}
