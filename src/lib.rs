//! The library code for the `almanac` static site generator. The
//! architecture can be generally broken down into three distinct steps:
//!
//! 1. Loading the layout table from the layouts directory
//!    ([`crate::layout`])
//! 2. Walking the source tree, transforming each entry
//!    ([`crate::site`])
//! 3. Writing the collected posts to disk ([`crate::post`])
//!
//! Of the three, the second step is the more involved. Each directory
//! is handled in the same order: its posts directory first, then every
//! surviving entry in byte order of its name. Post files parse into
//! dated, sluggable items ([`crate::post`]); other files either carry a
//! front-matter fence and render as pages ([`crate::page`]) or are
//! copied through untouched. Rendering runs every template against a
//! payload of site-wide data ([`crate::payload`]) rebuilt before each
//! render call, so a template's view of the site reflects exactly the
//! posts collected up to that moment of the walk. Posts render again
//! every time a later posts directory adds to the collection, which
//! keeps their written output current; pages render exactly once.
//!
//! The third step is pretty straight-forward: for each post, write its
//! stored output beneath the destination at `YYYY/MM/DD/<slug>`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod classify;
pub mod config;
pub mod filter;
pub mod frontmatter;
pub mod layout;
pub mod markdown;
pub mod page;
pub mod payload;
pub mod post;
pub mod render;
pub mod site;
pub mod value;
