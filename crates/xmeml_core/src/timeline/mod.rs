//! Timeline data model.
//!
//! This module provides:
//! - The owned entity tree (`Sequence` down to `File`)
//! - Shared field validation (`FieldValue` and the `validate_*` functions)
//! - The crate-wide error type
//!
//! # Example
//!
//! ```
//! use xmeml_core::timeline::{Clip, File, Media, Sequence, Track, Video};
//!
//! let file = File::new("plateA.mov", 48.0, "file:///plates/plateA.mov")?;
//! let clip = Clip::new("10", "plateA", 48.0, file)?.with_timing(0.0, 48.0, 0.0, 48.0);
//!
//! let mut track = Track::new();
//! track.add_clip(clip);
//! let mut video = Video::new(1280, 720);
//! video.add_track(track);
//! let mut media = Media::new();
//! media.add_video(video);
//!
//! let seq = Sequence::new("shot010").with_media(media);
//! assert_eq!(seq.media.as_ref().unwrap().video[0].tracks[0].len(), 1);
//! # Ok::<(), xmeml_core::timeline::XmemlError>(())
//! ```

mod types;
mod values;

pub use types::{Clip, File, Media, Rate, Sequence, Track, Video, XmemlError, XmemlResult};
pub use values::{validate_duration, validate_id, validate_name, validate_pathurl, FieldValue};
