//! Command-line front end for the xmeml codec.
//!
//! Usage:
//!   xmeml validate cut.xml
//!   xmeml rewrite cut.xml --out cut_clean.xml

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use xmeml_core::codec::{parse_xml_file, render_xml_with, DEFAULT_INDENTATION};
use xmeml_core::timeline::Sequence;

#[derive(Parser, Debug)]
#[command(name = "xmeml", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a document and print a timeline summary.
    Validate(ValidateArgs),
    /// Parse a document and write it back out, normalizing layout.
    Rewrite(RewriteArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input xmeml document.
    path: PathBuf,
}

#[derive(Parser, Debug)]
struct RewriteArgs {
    /// Input xmeml document.
    path: PathBuf,

    /// Output path; prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = DEFAULT_INDENTATION)]
    indent: usize,
}

fn main() -> anyhow::Result<()> {
    xmeml_core::logging::init_tracing("info");

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Rewrite(args) => cmd_rewrite(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let seq = parse_xml_file(&args.path)
        .with_context(|| format!("parse '{}'", args.path.display()))?;
    print_summary(&seq);
    Ok(())
}

fn cmd_rewrite(args: RewriteArgs) -> anyhow::Result<()> {
    let seq = parse_xml_file(&args.path)
        .with_context(|| format!("parse '{}'", args.path.display()))?;
    let xml = render_xml_with(&seq, args.indent, 0)?;

    match args.out {
        Some(out) => {
            std::fs::write(&out, xml).with_context(|| format!("write '{}'", out.display()))?;
            tracing::info!(path = %out.display(), "wrote normalized document");
        }
        None => print!("{xml}"),
    }
    Ok(())
}

fn print_summary(seq: &Sequence) {
    println!("sequence  {}", seq.name);
    println!("duration  {} frames", seq.duration);
    println!(
        "rate      timebase {} ({})",
        seq.rate.timebase,
        if seq.rate.ntsc { "NTSC" } else { "non-NTSC" }
    );
    println!("timecode  {}", seq.timecode);

    if let Some(media) = &seq.media {
        for (vi, video) in media.video.iter().enumerate() {
            println!("video[{vi}] {}x{}", video.width, video.height);
            for (ti, track) in video.tracks.iter().enumerate() {
                println!(
                    "  track[{ti}] locked={} enabled={} clips={}",
                    track.locked,
                    track.enabled,
                    track.len()
                );
                for clip in &track.clips {
                    println!(
                        "    clip id={} name={} {}..{} <- {}",
                        clip.id(),
                        clip.name(),
                        clip.start,
                        clip.end,
                        clip.file.pathurl()
                    );
                }
            }
        }
    }
}
