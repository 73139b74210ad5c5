//! xmeml rendering.
//!
//! Each entity renders a self-contained indented block for its own tag;
//! [`render_xml`] wraps the `Sequence` block in the fixed
//! `<xmeml version="1.0">` envelope. The output is byte-compatible with the
//! legacy interchange consumers, so the layout rules here are contractual:
//! booleans as uppercase `TRUE`/`FALSE`, floats with a trailing `.0`
//! preserved, children indented one `indentation` unit deeper than their
//! parent, blocks joined with single newlines.

use std::path::Path;

use crate::timeline::{Clip, File, Media, Sequence, Track, Video, XmemlError, XmemlResult};

/// Spaces per nesting level used by the default entry points.
pub const DEFAULT_INDENTATION: usize = 2;

/// Render a sequence as a complete xmeml document.
///
/// Fails with `InvalidArgument` if the sequence has no media attached.
pub fn render_xml(seq: &Sequence) -> XmemlResult<String> {
    render_xml_with(seq, DEFAULT_INDENTATION, 0)
}

/// Render with explicit `indentation` (spaces per level) and `pre_indent`
/// (spaces already applied by the caller).
pub fn render_xml_with(seq: &Sequence, indentation: usize, pre_indent: usize) -> XmemlResult<String> {
    Ok(format!(
        "<xmeml version=\"1.0\">\n{}\n</xmeml>\n",
        seq.to_xml(indentation, indentation + pre_indent)?
    ))
}

/// Render a sequence and write it to a file.
pub fn write_xml_file(seq: &Sequence, path: impl AsRef<Path>) -> XmemlResult<()> {
    let xml = render_xml(seq)?;
    std::fs::write(path.as_ref(), xml)?;
    Ok(())
}

impl Sequence {
    /// Render this sequence as an indented `<sequence>` block.
    ///
    /// Fails with `InvalidArgument` if no media is attached; a sequence
    /// under construction is not renderable.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> XmemlResult<String> {
        let media = self.media.as_ref().ok_or_else(|| {
            XmemlError::InvalidArgument(
                "cannot render a Sequence without media attached".to_string(),
            )
        })?;

        let p = " ".repeat(pre_indent);
        let i = " ".repeat(indentation);
        Ok(format!(
            "{p}<sequence>\n\
             {p}{i}<duration>{duration}</duration>\n\
             {p}{i}<name>{name}</name>\n\
             {p}{i}<rate>\n\
             {p}{i}{i}<ntsc>{ntsc}</ntsc>\n\
             {p}{i}{i}<timebase>{timebase}</timebase>\n\
             {p}{i}</rate>\n\
             {p}{i}<timecode>\n\
             {p}{i}{i}<string>{timecode}</string>\n\
             {p}{i}</timecode>\n\
             {media}\n\
             {p}</sequence>",
            duration = fmt_float(self.duration),
            name = escape_xml(&self.name),
            ntsc = fmt_bool(self.rate.ntsc),
            timebase = escape_xml(&self.rate.timebase),
            timecode = escape_xml(&self.timecode),
            media = media.to_xml(indentation, pre_indent + indentation),
        ))
    }
}

impl Media {
    /// Render this container as an indented `<media>` block.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> String {
        let p = " ".repeat(pre_indent);
        let videos: Vec<String> = self
            .video
            .iter()
            .map(|v| v.to_xml(indentation, pre_indent + indentation))
            .collect();
        format!("{p}<media>\n{}\n{p}</media>", videos.join("\n"))
    }
}

impl Video {
    /// Render this element as an indented `<video>` block.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> String {
        let p = " ".repeat(pre_indent);
        let i = " ".repeat(indentation);
        let tracks: Vec<String> = self
            .tracks
            .iter()
            .map(|t| t.to_xml(indentation, pre_indent + indentation))
            .collect();
        format!(
            "{p}<video>\n\
             {p}{i}<format>\n\
             {p}{i}{i}<samplecharacteristics>\n\
             {p}{i}{i}{i}<width>{width}</width>\n\
             {p}{i}{i}{i}<height>{height}</height>\n\
             {p}{i}{i}</samplecharacteristics>\n\
             {p}{i}</format>\n\
             {tracks}\n\
             {p}</video>",
            width = self.width,
            height = self.height,
            tracks = tracks.join("\n"),
        )
    }
}

impl Track {
    /// Render this track as an indented `<track>` block.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> String {
        let p = " ".repeat(pre_indent);
        let i = " ".repeat(indentation);
        let clips: Vec<String> = self
            .clips
            .iter()
            .map(|c| c.to_xml(indentation, pre_indent + indentation))
            .collect();
        format!(
            "{p}<track>\n\
             {p}{i}<locked>{locked}</locked>\n\
             {p}{i}<enabled>{enabled}</enabled>\n\
             {clips}\n\
             {p}</track>",
            locked = fmt_bool(self.locked),
            enabled = fmt_bool(self.enabled),
            clips = clips.join("\n"),
        )
    }
}

impl Clip {
    /// Render this clip as an indented `<clipitem>` block.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> String {
        let p = " ".repeat(pre_indent);
        let i = " ".repeat(indentation);
        format!(
            "{p}<clipitem id=\"{id}\">\n\
             {p}{i}<end>{end}</end>\n\
             {p}{i}<name>{name}</name>\n\
             {p}{i}<enabled>{enabled}</enabled>\n\
             {p}{i}<start>{start}</start>\n\
             {p}{i}<in>{in_}</in>\n\
             {p}{i}<duration>{duration}</duration>\n\
             {p}{i}<out>{out}</out>\n\
             {file}\n\
             {p}</clipitem>",
            id = escape_xml(self.id()),
            end = fmt_float(self.end),
            name = escape_xml(self.name()),
            enabled = fmt_bool(self.enabled),
            start = fmt_float(self.start),
            in_ = fmt_float(self.in_),
            duration = fmt_float(self.duration()),
            out = fmt_float(self.out),
            file = self.file.to_xml(indentation, pre_indent + indentation),
        )
    }
}

impl File {
    /// Render this file record as an indented `<file>` block.
    pub fn to_xml(&self, indentation: usize, pre_indent: usize) -> String {
        let p = " ".repeat(pre_indent);
        let i = " ".repeat(indentation);
        format!(
            "{p}<file>\n\
             {p}{i}<duration>{duration}</duration>\n\
             {p}{i}<name>{name}</name>\n\
             {p}{i}<pathurl>{pathurl}</pathurl>\n\
             {p}</file>",
            duration = fmt_float(self.duration()),
            name = escape_xml(self.name()),
            pathurl = escape_xml(self.pathurl()),
        )
    }
}

/// Locale-independent float formatting with the trailing `.0` kept for
/// whole values, matching what the consuming tools emit themselves.
fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Boolean text tokens used by the legacy interchange format.
fn fmt_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Escape special XML characters in text content and attribute values.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::parser::parse_xml;
    use crate::timeline::Rate;

    fn sample_sequence() -> Sequence {
        let file = File::new("plateA.mov", 48.0, "file:///plates/plateA.mov").unwrap();
        let clip = Clip::new("10", "plateA", 48.0, file)
            .unwrap()
            .with_timing(0.0, 48.0, 0.0, 48.0);
        let mut track = Track::new();
        track.add_clip(clip);
        let mut video = Video::new(1280, 720);
        video.add_track(track);
        let mut media = Media::new();
        media.add_video(video);

        Sequence {
            duration: 48.0,
            name: "shot010".to_string(),
            rate: Rate {
                ntsc: false,
                timebase: "24".to_string(),
            },
            timecode: "01:00:00:00".to_string(),
            media: Some(media),
        }
    }

    #[test]
    fn renders_envelope_and_clip() {
        let xml = render_xml(&sample_sequence()).unwrap();
        assert!(xml.starts_with("<xmeml version=\"1.0\">"));
        assert!(xml.contains("<clipitem id=\"10\">"));
        assert!(xml.ends_with("</xmeml>\n"));
    }

    #[test]
    fn renders_expected_layout() {
        let expected = "\
<xmeml version=\"1.0\">
  <sequence>
    <duration>48.0</duration>
    <name>shot010</name>
    <rate>
      <ntsc>FALSE</ntsc>
      <timebase>24</timebase>
    </rate>
    <timecode>
      <string>01:00:00:00</string>
    </timecode>
    <media>
      <video>
        <format>
          <samplecharacteristics>
            <width>1280</width>
            <height>720</height>
          </samplecharacteristics>
        </format>
        <track>
          <locked>FALSE</locked>
          <enabled>TRUE</enabled>
          <clipitem id=\"10\">
            <end>48.0</end>
            <name>plateA</name>
            <enabled>TRUE</enabled>
            <start>0.0</start>
            <in>0.0</in>
            <duration>48.0</duration>
            <out>48.0</out>
            <file>
              <duration>48.0</duration>
              <name>plateA.mov</name>
              <pathurl>file:///plates/plateA.mov</pathurl>
            </file>
          </clipitem>
        </track>
      </video>
    </media>
  </sequence>
</xmeml>
";
        assert_eq!(render_xml(&sample_sequence()).unwrap(), expected);
    }

    #[test]
    fn ntsc_renders_uppercase_tokens() {
        let mut seq = sample_sequence();
        assert!(render_xml(&seq).unwrap().contains("<ntsc>FALSE</ntsc>"));
        seq.rate.ntsc = true;
        assert!(render_xml(&seq).unwrap().contains("<ntsc>TRUE</ntsc>"));
    }

    #[test]
    fn render_without_media_is_invalid_argument() {
        let seq = Sequence::new("incomplete");
        let err = render_xml(&seq).unwrap_err();
        assert!(matches!(err, XmemlError::InvalidArgument(_)));
        assert!(err.to_string().contains("media"));
    }

    #[test]
    fn roundtrip_reproduces_sequence() {
        let seq = sample_sequence();
        let xml = render_xml(&seq).unwrap();
        let back = parse_xml(&xml).unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn roundtrip_with_escaped_text() {
        let mut seq = sample_sequence();
        seq.name = "cut & <final>".to_string();
        let xml = render_xml(&seq).unwrap();
        assert!(xml.contains("<name>cut &amp; &lt;final&gt;</name>"));
        let back = parse_xml(&xml).unwrap();
        assert_eq!(back.name, "cut & <final>");
    }

    #[test]
    fn custom_indentation_shifts_children() {
        let xml = render_xml_with(&sample_sequence(), 4, 0).unwrap();
        assert!(xml.contains("\n    <sequence>"));
        assert!(xml.contains("\n        <duration>48.0</duration>"));
    }

    #[test]
    fn float_formatting_keeps_trailing_zero() {
        assert_eq!(fmt_float(48.0), "48.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(47.5), "47.5");
        assert_eq!(fmt_float(109.0), "109.0");
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot010.xml");
        write_xml_file(&sample_sequence(), &path).unwrap();
        let back = parse_xml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.name, "shot010");
    }
}
