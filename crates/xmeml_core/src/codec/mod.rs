//! xmeml codec.
//!
//! This module handles parsing and rendering of the editorial XML
//! interchange format.
//!
//! # Features
//!
//! - **Parsing**: Read xmeml text or files into a [`Sequence`] tree
//! - **Rendering**: Write a [`Sequence`] back to byte-compatible xmeml
//! - **Diagnostics**: Injectable sink for non-fatal parse notices
//! - **EDL export**: Named extension point (not implemented)
//!
//! # Usage
//!
//! ```no_run
//! use xmeml_core::codec::{parse_xml_file, render_xml};
//!
//! let seq = parse_xml_file("cut.xml").unwrap();
//! let rendered = render_xml(&seq).unwrap();
//! println!("{rendered}");
//! ```
//!
//! [`Sequence`]: crate::timeline::Sequence

mod edl;
mod parser;
mod serializer;

pub use edl::to_edl;
pub use parser::{parse_xml, parse_xml_file, parse_xml_with_sink};
pub use serializer::{render_xml, render_xml_with, write_xml_file, DEFAULT_INDENTATION};
