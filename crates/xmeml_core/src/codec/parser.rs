//! xmeml parsing.
//!
//! Handles the editorial XML interchange dialect ("xmeml" version "1.0")
//! emitted by non-linear editing tools:
//! ```xml
//! <xmeml version="1.0">
//!   <sequence>
//!     <duration>48.0</duration>
//!     <name>shot010</name>
//!     <rate>
//!       <ntsc>FALSE</ntsc>
//!       <timebase>24</timebase>
//!     </rate>
//!     <timecode>
//!       <string>01:00:00:00</string>
//!     </timecode>
//!     <media>
//!       <video>...</video>
//!     </media>
//!   </sequence>
//! </xmeml>
//! ```
//!
//! Parsing is strict: a missing required tag or unparsable field text fails
//! at the offending node with `MalformedDocument`, and no partially built
//! `Sequence` is ever returned.

use std::path::Path;

use crate::timeline::{Clip, File, Media, Rate, Sequence, Track, Video, XmemlError, XmemlResult};

/// Parse an xmeml document from a file.
pub fn parse_xml_file(path: impl AsRef<Path>) -> XmemlResult<Sequence> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "parsing xmeml document");
    let content = std::fs::read_to_string(path)?;
    parse_xml(&content)
}

/// Parse an xmeml document from text.
///
/// Diagnostics (currently only the multi-track notice, see
/// [`parse_xml_with_sink`]) go to `tracing::warn!`.
pub fn parse_xml(xml: &str) -> XmemlResult<Sequence> {
    parse_xml_with_sink(xml, &|message| tracing::warn!("{message}"))
}

/// Parse an xmeml document, routing diagnostics to the given sink.
///
/// The sink receives human-readable notices about conditions that are not
/// errors but that a pipeline operator should see, such as a `<video>`
/// element carrying more tracks than the parser honors.
pub fn parse_xml_with_sink(xml: &str, sink: &dyn Fn(&str)) -> XmemlResult<Sequence> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| XmemlError::MalformedDocument(format!("XML parse error: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "xmeml" {
        return Err(XmemlError::MalformedDocument(format!(
            "root element should be <xmeml>, found <{}>",
            root.tag_name().name()
        )));
    }

    let seq_node = root
        .children()
        .find(|n| n.is_element())
        .ok_or_else(|| XmemlError::missing_tag("sequence", "xmeml"))?;
    if seq_node.tag_name().name() != "sequence" {
        return Err(XmemlError::MalformedDocument(format!(
            "expected <sequence> as the first child of <xmeml>, found <{}>",
            seq_node.tag_name().name()
        )));
    }

    parse_sequence(seq_node, sink)
}

fn parse_sequence(node: roxmltree::Node, sink: &dyn Fn(&str)) -> XmemlResult<Sequence> {
    let rate_node = required_child(node, "rate")?;
    let timecode_node = required_child(node, "timecode")?;
    let media_node = required_child(node, "media")?;

    Ok(Sequence {
        duration: float_field(node, "duration")?,
        name: text_field(node, "name")?,
        rate: Rate {
            ntsc: bool_field(rate_node, "ntsc")?,
            timebase: text_field(rate_node, "timebase")?,
        },
        timecode: text_field(timecode_node, "string")?,
        media: Some(parse_media(media_node, sink)?),
    })
}

fn parse_media(node: roxmltree::Node, sink: &dyn Fn(&str)) -> XmemlResult<Media> {
    let mut media = Media::new();
    for video_node in node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "video")
    {
        media.add_video(parse_video(video_node, sink)?);
    }
    // <audio> nodes are not consumed; the audio side of the model is a
    // placeholder for interchange-shape parity.
    Ok(media)
}

fn parse_video(node: roxmltree::Node, sink: &dyn Fn(&str)) -> XmemlResult<Video> {
    let format_node = required_child(node, "format")?;
    let chars_node = required_child(format_node, "samplecharacteristics")?;

    let mut video = Video::new(
        int_field(chars_node, "width")?,
        int_field(chars_node, "height")?,
    );

    // Only the first <track> is honored. The legacy pipeline never emitted
    // more than one per <video>, and whether extras should be kept is still
    // an open question upstream, so surplus tracks are reported and skipped.
    // TODO: multi-track parsing, once the consuming tools settle on it.
    let mut track_nodes = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "track");
    let first = track_nodes
        .next()
        .ok_or_else(|| XmemlError::missing_tag("track", "video"))?;
    let skipped = track_nodes.count();
    if skipped > 0 {
        sink(&format!(
            "<video> contains {} <track> elements; only the first is honored, {skipped} skipped",
            skipped + 1
        ));
    }
    video.add_track(parse_track(first)?);

    Ok(video)
}

fn parse_track(node: roxmltree::Node) -> XmemlResult<Track> {
    let mut track = Track::new();
    track.locked = bool_field(node, "locked")?;
    track.enabled = bool_field(node, "enabled")?;

    for clip_node in node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "clipitem")
    {
        track.add_clip(parse_clip(clip_node)?);
    }

    Ok(track)
}

fn parse_clip(node: roxmltree::Node) -> XmemlResult<Clip> {
    let id = node
        .attribute("id")
        .ok_or_else(|| XmemlError::MalformedDocument(
            "missing id attribute on <clipitem>".to_string(),
        ))?;

    let file_node = required_child(node, "file")?;
    let file = parse_file_entry(file_node)?;

    // A negative <duration> is rejected by the validated constructor.
    let clip = Clip::new(id, text_field(node, "name")?, float_field(node, "duration")?, file)?
        .with_timing(
            float_field(node, "start")?,
            float_field(node, "end")?,
            float_field(node, "in")?,
            float_field(node, "out")?,
        )
        .with_enabled(bool_field(node, "enabled")?);

    Ok(clip)
}

fn parse_file_entry(node: roxmltree::Node) -> XmemlResult<File> {
    File::new(
        text_field(node, "name")?,
        float_field(node, "duration")?,
        text_field(node, "pathurl")?,
    )
}

/// Find a required child element by tag name.
fn required_child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &str,
) -> XmemlResult<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .ok_or_else(|| XmemlError::missing_tag(tag, node.tag_name().name()))
}

/// Text content of a required child element. Empty elements yield `""`.
fn text_field(node: roxmltree::Node, tag: &str) -> XmemlResult<String> {
    Ok(required_child(node, tag)?.text().unwrap_or("").to_string())
}

fn float_field(node: roxmltree::Node, tag: &str) -> XmemlResult<f64> {
    let text = text_field(node, tag)?;
    text.trim()
        .parse::<f64>()
        .map_err(|_| XmemlError::bad_value(tag, &text))
}

fn int_field(node: roxmltree::Node, tag: &str) -> XmemlResult<u32> {
    let text = text_field(node, tag)?;
    text.trim()
        .parse::<u32>()
        .map_err(|_| XmemlError::bad_value(tag, &text))
}

/// Boolean field text: case-insensitive `TRUE`/`FALSE`.
fn bool_field(node: roxmltree::Node, tag: &str) -> XmemlResult<bool> {
    let text = text_field(node, tag)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(XmemlError::bad_value(tag, &text)),
    }
}
