use std::path::PathBuf;

/// The default layouts directory name.
pub const LAYOUTS_DIR: &str = "_layouts";

/// The default posts directory name.
pub const POSTS_DIR: &str = "_posts";

/// Settings for a single site build.
pub struct Config {
    /// The source tree root.
    pub source: PathBuf,

    /// The directory the rendered site is written into.
    pub destination: PathBuf,

    /// The layouts directory name, relative to the source root.
    pub layouts_dir: String,

    /// The posts directory name, looked for in every directory of the
    /// source tree.
    pub posts_dir: String,
}

impl Config {
    /// Creates a configuration with the default directory names.
    pub fn new(source: PathBuf, destination: PathBuf) -> Config {
        Config {
            source,
            destination,
            layouts_dir: LAYOUTS_DIR.to_owned(),
            posts_dir: POSTS_DIR.to_owned(),
        }
    }
}
