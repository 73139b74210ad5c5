//! Timeline entities and error definitions.
//!
//! The timeline is an owned tree: `Sequence` → `Media` → `Video` → `Track`
//! → `Clip` → `File`. There are no back-references and no cycles; dropping
//! the root reclaims everything. Entities are either built programmatically
//! by a caller or populated by the parser in `codec::parser`.

use serde::{Deserialize, Serialize};

use super::values::{validate_duration, validate_id, validate_name, validate_pathurl, FieldValue};

/// Errors that can occur during timeline construction or codec operations.
#[derive(Debug, thiserror::Error)]
pub enum XmemlError {
    /// Wrong primitive type supplied to a validated setter.
    #[error("{entity}.{field} should be {expected}, not {actual}")]
    TypeMismatch {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Value is the right type but outside the allowed range.
    #[error("{entity}.{field} should be a non-negative float, got {value}")]
    ValueOutOfRange {
        entity: &'static str,
        field: &'static str,
        value: f64,
    },

    /// Missing or invalid XML structure, or unparsable field text.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Source document could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Render called on an incompletely constructed object.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A named extension point without an implementation yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl XmemlError {
    /// A required child tag is missing from its enclosing element.
    pub fn missing_tag(tag: &str, parent: &str) -> Self {
        XmemlError::MalformedDocument(format!("missing <{tag}> inside <{parent}>"))
    }

    /// A field's text could not be converted to its target type.
    pub fn bad_value(field: &str, text: &str) -> Self {
        XmemlError::MalformedDocument(format!("cannot parse <{field}> value '{text}'"))
    }
}

/// Result type for timeline and codec operations.
pub type XmemlResult<T> = Result<T, XmemlError>;

/// One source media file referenced by a clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct File {
    name: String,
    duration: f64,
    pathurl: String,
}

impl File {
    /// Create a file record. All three fields go through the shared
    /// validation functions.
    pub fn new(
        name: impl Into<FieldValue>,
        duration: impl Into<FieldValue>,
        pathurl: impl Into<FieldValue>,
    ) -> XmemlResult<Self> {
        Ok(Self {
            name: validate_name("File", name)?,
            duration: validate_duration("File", duration)?,
            pathurl: validate_pathurl("File", pathurl)?,
        })
    }

    /// File name as shown in the editing tool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration of the source media, in frames.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Location of the source media as a path URL.
    pub fn pathurl(&self) -> &str {
        &self.pathurl
    }

    /// Set the name. Fails with `TypeMismatch` for non-string input.
    pub fn set_name(&mut self, name: impl Into<FieldValue>) -> XmemlResult<()> {
        self.name = validate_name("File", name)?;
        Ok(())
    }

    /// Set the duration. Absent coerces to `0.0`; negative is rejected.
    pub fn set_duration(&mut self, duration: impl Into<FieldValue>) -> XmemlResult<()> {
        self.duration = validate_duration("File", duration)?;
        Ok(())
    }

    /// Set the pathurl. Fails with `TypeMismatch` for non-string input.
    pub fn set_pathurl(&mut self, pathurl: impl Into<FieldValue>) -> XmemlResult<()> {
        self.pathurl = validate_pathurl("File", pathurl)?;
        Ok(())
    }
}

/// One edit event: a placed instance of a source file on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    id: String,
    name: String,
    duration: f64,
    /// Timeline start, in frames.
    pub start: f64,
    /// Timeline end, in frames.
    pub end: f64,
    /// Whether the clip participates in playback.
    pub enabled: bool,
    /// Source-media in point.
    #[serde(rename = "in")]
    pub in_: f64,
    /// Source-media out point.
    pub out: f64,
    /// The source file this clip cuts from. Exclusively owned.
    pub file: File,
}

impl Clip {
    /// Create a clip over the given source file. Timing fields default to
    /// zero and `enabled` to true; use [`Clip::with_timing`] to place it.
    pub fn new(
        id: impl Into<FieldValue>,
        name: impl Into<FieldValue>,
        duration: impl Into<FieldValue>,
        file: File,
    ) -> XmemlResult<Self> {
        Ok(Self {
            id: validate_id("Clip", id)?,
            name: validate_name("Clip", name)?,
            duration: validate_duration("Clip", duration)?,
            start: 0.0,
            end: 0.0,
            enabled: true,
            in_: 0.0,
            out: 0.0,
            file,
        })
    }

    /// Set timeline placement and source trim points.
    ///
    /// `start <= end` is expected but not enforced; editing tools emit
    /// transient states that violate it.
    pub fn with_timing(mut self, start: f64, end: f64, in_: f64, out: f64) -> Self {
        self.start = start;
        self.end = end;
        self.in_ = in_;
        self.out = out;
        self
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Clip identifier, taken from the `id` attribute in XML.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Clip display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip duration, in frames.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Set the id. Absent coerces to the empty string.
    pub fn set_id(&mut self, id: impl Into<FieldValue>) -> XmemlResult<()> {
        self.id = validate_id("Clip", id)?;
        Ok(())
    }

    /// Set the name. Fails with `TypeMismatch` for non-string input.
    pub fn set_name(&mut self, name: impl Into<FieldValue>) -> XmemlResult<()> {
        self.name = validate_name("Clip", name)?;
        Ok(())
    }

    /// Set the duration. Absent coerces to `0.0`; negative is rejected.
    pub fn set_duration(&mut self, duration: impl Into<FieldValue>) -> XmemlResult<()> {
        self.duration = validate_duration("Clip", duration)?;
        Ok(())
    }
}

/// An ordered lane of clips. Clip order is timeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Whether the track is locked against editing.
    pub locked: bool,
    /// Whether the track participates in playback.
    pub enabled: bool,
    /// Clips in timeline order.
    pub clips: Vec<Clip>,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            locked: false,
            enabled: true,
            clips: Vec::new(),
        }
    }
}

impl Track {
    /// Create an empty, unlocked, enabled track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip, keeping timeline order.
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Number of clips on this track.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the track has no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Frame dimensions plus the video tracks.
///
/// The structure holds a list of tracks, but the parser currently honors
/// only the first `<track>` per `<video>` (see `codec::parser`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Video {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Video tracks.
    pub tracks: Vec<Track>,
}

impl Video {
    /// Create a video element with the given frame dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tracks: Vec::new(),
        }
    }

    /// Append a track.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }
}

/// Container for video (and, by extension, audio) elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Media {
    /// Video elements in document order.
    pub video: Vec<Video>,
    /// Audio placeholder. Present for interchange-shape parity; the parser
    /// does not populate it.
    pub audio: Vec<Video>,
}

impl Media {
    /// Create an empty media container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a video element.
    pub fn add_video(&mut self, video: Video) {
        self.video.push(video);
    }
}

/// Frame-rate description: NTSC flag plus nominal timebase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Drop-frame / non-integer-rate timecode semantics.
    pub ntsc: bool,
    /// Nominal frame rate denominator for timecode display, e.g. "24".
    pub timebase: String,
}

impl Default for Rate {
    fn default() -> Self {
        Self {
            ntsc: false,
            timebase: "24".to_string(),
        }
    }
}

/// The timeline root: one cut list plus format metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// Total duration, in frames.
    pub duration: f64,
    /// Sequence name.
    pub name: String,
    /// Frame-rate description.
    pub rate: Rate,
    /// Start timecode as `HH:MM:SS:FF`.
    pub timecode: String,
    /// Owned media container. `None` until populated; rendering a sequence
    /// without media fails with `InvalidArgument`.
    pub media: Option<Media>,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            duration: 0.0,
            name: String::new(),
            rate: Rate::default(),
            timecode: "00:00:00:00".to_string(),
            media: None,
        }
    }
}

impl Sequence {
    /// Create a named sequence with default rate and timecode.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach the media container.
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_construction_validates_fields() {
        let file = File::new("plateA.mov", 48.0, "file:///plates/plateA.mov").unwrap();
        assert_eq!(file.name(), "plateA.mov");
        assert_eq!(file.duration(), 48.0);
        assert_eq!(file.pathurl(), "file:///plates/plateA.mov");
    }

    #[test]
    fn file_rejects_non_string_pathurl() {
        let err = File::new("plateA.mov", 48.0, 42).unwrap_err();
        assert!(matches!(err, XmemlError::TypeMismatch { .. }));
        assert!(err.to_string().contains("File.pathurl"));
    }

    #[test]
    fn file_setters_keep_previous_value_on_error() {
        let mut file = File::new("plateA.mov", 48.0, "file:///a.mov").unwrap();
        assert!(file.set_duration(-5.0).is_err());
        assert_eq!(file.duration(), 48.0);
    }

    #[test]
    fn clip_builder_defaults() {
        let file = File::new("plateA.mov", 48.0, "file:///a.mov").unwrap();
        let clip = Clip::new("10", "plateA", 48.0, file).unwrap();
        assert_eq!(clip.id(), "10");
        assert!(clip.enabled);
        assert_eq!(clip.start, 0.0);

        let clip = clip.with_timing(0.0, 48.0, 0.0, 48.0).with_enabled(false);
        assert_eq!(clip.end, 48.0);
        assert!(!clip.enabled);
    }

    #[test]
    fn clip_id_absent_coerces_to_empty() {
        let file = File::new("plateA.mov", 48.0, "file:///a.mov").unwrap();
        let clip = Clip::new(Option::<&str>::None, "plateA", 48.0, file).unwrap();
        assert_eq!(clip.id(), "");
    }

    #[test]
    fn track_preserves_clip_order() {
        let mut track = Track::new();
        for id in ["1", "2", "3"] {
            let file = File::new("a.mov", 1.0, "file:///a.mov").unwrap();
            track.add_clip(Clip::new(id, "a", 1.0, file).unwrap());
        }
        let ids: Vec<&str> = track.clips.iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn sequence_defaults() {
        let seq = Sequence::new("shot010");
        assert_eq!(seq.name, "shot010");
        assert_eq!(seq.timecode, "00:00:00:00");
        assert_eq!(seq.rate.timebase, "24");
        assert!(!seq.rate.ntsc);
        assert!(seq.media.is_none());
    }

    #[test]
    fn model_serde_roundtrip() {
        let file = File::new("plateA.mov", 48.0, "file:///a.mov").unwrap();
        let clip = Clip::new("10", "plateA", 48.0, file)
            .unwrap()
            .with_timing(0.0, 48.0, 0.0, 48.0);
        let mut track = Track::new();
        track.add_clip(clip);
        let mut video = Video::new(1280, 720);
        video.add_track(track);
        let mut media = Media::new();
        media.add_video(video);
        let seq = Sequence::new("shot010").with_media(media);

        let json = serde_json::to_string(&seq).unwrap();
        assert!(json.contains("\"in\":0.0"));
        let back: Sequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }
}
