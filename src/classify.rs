//! Classifies a regular file as templated content or a static asset by
//! sniffing its first bytes, so no manifest or extension allow-list is
//! needed. Any file that opens with the front-matter fence is treated as
//! source to be rendered; everything else is copied through verbatim.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// The front-matter fence marker. A file whose first three bytes equal
/// this marker is assumed to carry a YAML header.
pub const MARKER: &[u8; 3] = b"---";

/// The two ways the builder can handle a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// The file begins with the front-matter fence and should be rendered
    /// through the template pipeline.
    Templated,

    /// The file should be copied to the destination byte-for-byte.
    Static,
}

/// Reads exactly the first three bytes of `path` and classifies the file.
/// Files shorter than the marker are static assets, not errors; any other
/// I/O failure propagates to the caller.
pub fn classify(path: &Path) -> io::Result<FileKind> {
    let mut first = [0u8; 3];
    match File::open(path)?.read_exact(&mut first) {
        Ok(()) if &first == MARKER => Ok(FileKind::Templated),
        Ok(()) => Ok(FileKind::Static),
        Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(FileKind::Static),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn classify_bytes(contents: &[u8]) -> io::Result<FileKind> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("entry");
        File::create(&path)?.write_all(contents)?;
        classify(&path)
    }

    #[test]
    fn test_front_matter_fence_is_templated() -> io::Result<()> {
        assert_eq!(FileKind::Templated, classify_bytes(b"---\ntitle: x\n---\n")?);
        Ok(())
    }

    #[test]
    fn test_exactly_the_marker_is_templated() -> io::Result<()> {
        assert_eq!(FileKind::Templated, classify_bytes(b"---")?);
        Ok(())
    }

    #[test]
    fn test_other_bytes_are_static() -> io::Result<()> {
        assert_eq!(FileKind::Static, classify_bytes(b"<html></html>")?);
        assert_eq!(FileKind::Static, classify_bytes(b"--x leading dashes")?);
        assert_eq!(FileKind::Static, classify_bytes(&[0xff, 0xd8, 0xff, 0xe0])?);
        Ok(())
    }

    #[test]
    fn test_short_files_are_static() -> io::Result<()> {
        assert_eq!(FileKind::Static, classify_bytes(b"")?);
        assert_eq!(FileKind::Static, classify_bytes(b"-")?);
        assert_eq!(FileKind::Static, classify_bytes(b"--")?);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(classify(Path::new("/nonexistent/entry")).is_err());
    }
}
