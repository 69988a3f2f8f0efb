//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: loading layouts,
//! walking the source tree ([`crate::site`]), and writing the collected
//! posts.

use crate::config::Config;
use crate::site::{Result, Site};

/// Builds the site described by `config` and returns it. [`Site::process`]
/// does the heavy-lifting; the returned value reports what was built.
pub fn build_site(config: Config) -> Result<Site> {
    let mut site = Site::new(config);
    site.process()?;
    Ok(site)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_build_site() -> Result<()> {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let posts = source.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::File::create(posts.join("2021-07-04-hello.md"))
            .unwrap()
            .write_all(b"---\ntitle: Hello\n---\nhi")
            .unwrap();

        let site = build_site(Config::new(
            source.path().to_owned(),
            dest.path().to_owned(),
        ))?;

        assert_eq!(1, site.posts.len());
        assert!(dest
            .path()
            .join("2021")
            .join("07")
            .join("04")
            .join("hello")
            .exists());
        Ok(())
    }
}
