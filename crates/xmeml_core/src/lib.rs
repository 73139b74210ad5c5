//! xmeml_core - Editorial XML interchange codec
//!
//! This crate contains the timeline data model and the two-way xmeml codec
//! with zero UI dependencies. Host-application automation (scene assembly,
//! playblast generation) supplies or consumes [`timeline::Sequence`] trees;
//! everything here is a pure, synchronous tree transformation.

pub mod codec;
pub mod logging;
pub mod timeline;

pub use codec::{parse_xml, parse_xml_file, render_xml, render_xml_with, to_edl, write_xml_file};
pub use timeline::{
    Clip, File, Media, Rate, Sequence, Track, Video, XmemlError, XmemlResult,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
