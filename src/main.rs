use almanac::build::build_site;
use almanac::config::Config;
use clap::{App, Arg};
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = App::new("almanac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transforms a source tree of posts, pages, and static files into a rendered site")
        .arg(
            Arg::with_name("SOURCE")
                .help("The site source directory (defaults to the current directory)")
                .index(1),
        )
        .arg(
            Arg::with_name("DESTINATION")
                .help("The directory to write the rendered site into (defaults to ./_site)")
                .index(2),
        )
        .get_matches();

    let config = Config::new(
        PathBuf::from(matches.value_of("SOURCE").unwrap_or(".")),
        PathBuf::from(matches.value_of("DESTINATION").unwrap_or("_site")),
    );

    match build_site(config) {
        Ok(site) => println!(
            "Wrote {} posts to {}",
            site.posts.len(),
            site.destination.display()
        ),
        Err(err) => {
            eprintln!("almanac: {}", err);
            process::exit(1);
        }
    }
}
