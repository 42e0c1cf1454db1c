use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use ytclip::analyze::{prepare_analysis, save_analysis, DEFAULT_CHAPTER_DURATION};
use ytclip::caption::merge::merge;
use ytclip::caption::parse::parse_track;
use ytclip::caption::srt::write_srt;
use ytclip::caption::timecode::parse_time_range;
use ytclip::config::Config;
use ytclip::media::{download_video, DownloadOptions};
use ytclip::pipeline::{clip_segment, print_summary, ClipRequest};
use ytclip::summary::{load_chapter_info, write_summary};
use ytclip::util::{create_output_dir, format_file_size};

#[derive(Parser)]
#[command(name = "ytclip")]
#[command(version, about = "Clip YouTube videos into shareable segments")]
#[command(
    long_about = "Download a video with its captions, cut a time range losslessly, and produce a caption file whose timestamps match the clip."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Download a YouTube video and its captions
    Download {
        /// Video URL (watch, youtu.be, or embed form)
        url: String,

        /// Output directory (defaults to ./youtube-clips/<timestamp>)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Cut a clip and its captions out of a downloaded video
    Clip {
        /// Input video file
        video: PathBuf,

        /// Caption file for the full video (VTT or SRT)
        captions: PathBuf,

        /// Time range, e.g. "00:00 - 03:15" or "01:30:00-01:33:15"
        #[arg(short, long)]
        range: String,

        /// Output directory (defaults to the video's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Basename for the clip files (sanitized)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Extract a caption window to SRT without touching the video
    Extract {
        /// Caption file (VTT or SRT)
        captions: PathBuf,

        /// Time range, e.g. "00:05:47 - 00:09:19"
        #[arg(short, long)]
        range: String,

        /// Output SRT file
        output: PathBuf,
    },

    /// Merge two aligned caption files into one bilingual SRT
    Merge {
        /// Track providing the timing and the top text
        primary: PathBuf,

        /// Parallel track in the second language
        secondary: PathBuf,

        /// Output SRT file
        output: PathBuf,

        /// Put the secondary language on top
        #[arg(long)]
        secondary_first: bool,
    },

    /// Prepare chapter-analysis data for a caption file
    Analyze {
        /// Caption file (VTT or SRT)
        captions: PathBuf,

        /// Target chapter duration in seconds
        #[arg(short, long, default_value = "180")]
        target_duration: u64,

        /// Output JSON file (prints a preview either way)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a social-media summary scaffold from chapter info
    Summary {
        /// Chapter info JSON file
        chapter: PathBuf,

        /// Output Markdown file
        #[arg(short, long, default_value = "summary.md")]
        output: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn load_track(path: &PathBuf) -> Result<ytclip::CaptionTrack> {
    let doc = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = parse_track(&doc);
    if !report.skipped.is_empty() {
        info!(
            "Skipped {} malformed block(s) in {}",
            report.skipped.len(),
            path.display()
        );
    }
    Ok(report.require_cues(&path.display().to_string())?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    match cli.command {
        Command::Download { url, output_dir } => {
            let base = output_dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("youtube-clips"));
            let dir = create_output_dir(&base)?;

            let options = DownloadOptions {
                caption_lang: config.caption_lang.clone(),
            };
            let video = download_video(&url, &dir, &options).await?;

            println!();
            println!("Downloaded: {}", video.title);
            println!("  Video:    {}", video.video_path.display());
            match &video.caption_path {
                Some(path) => println!("  Captions: {}", path.display()),
                None => println!("  Captions: none found"),
            }
            println!("  Size:     {}", format_file_size(video.size_bytes));
        }

        Command::Clip {
            video,
            captions,
            range,
            output_dir,
            name,
        } => {
            let (start, end) = parse_time_range(&range)?;
            let output_dir = output_dir
                .or_else(|| video.parent().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));

            let request = ClipRequest {
                video,
                captions,
                window_start: start,
                window_end: end,
                output_dir,
                name,
                translate_to: None,
                show_progress: true,
            };

            let outcome = clip_segment(&request, &config, None).await?;
            print_summary(&outcome);
        }

        Command::Extract {
            captions,
            range,
            output,
        } => {
            let (start, end) = parse_time_range(&range)?;
            let track = load_track(&captions)?;
            let clipped = ytclip::caption::extract::extract(&track, start, end)?;

            write_srt(&clipped, &output)?;
            println!(
                "Extracted {} cue(s) to {}",
                clipped.len(),
                output.display()
            );
        }

        Command::Merge {
            primary,
            secondary,
            output,
            secondary_first,
        } => {
            let primary_track = load_track(&primary)?;
            let secondary_track = load_track(&secondary)?;

            let merged = merge(&primary_track, &secondary_track, !secondary_first)?;
            if let Some(mismatch) = merged.mismatch {
                println!(
                    "Warning: track lengths differ ({} vs {}), merged over the shorter",
                    mismatch.primary, mismatch.secondary
                );
            }

            write_srt(&merged.track, &output)?;
            println!(
                "Merged {} cue(s) to {}",
                merged.track.len(),
                output.display()
            );
        }

        Command::Analyze {
            captions,
            target_duration,
            output,
        } => {
            let track = load_track(&captions)?;
            let target = if target_duration > 0 {
                Duration::from_secs(target_duration)
            } else {
                DEFAULT_CHAPTER_DURATION
            };

            let data = prepare_analysis(&track, target)?;

            println!(
                "{} cues, {} total, ~{} chapter(s) of {}s",
                data.subtitle_count,
                data.total_duration_display,
                data.estimated_chapters,
                data.target_chapter_duration
            );
            println!();
            for line in data.subtitle_text.lines().take(50) {
                println!("{line}");
            }
            let total_lines = data.subtitle_text.lines().count();
            if total_lines > 50 {
                println!("... ({} more lines)", total_lines - 50);
            }

            if let Some(path) = output {
                save_analysis(&data, &path)?;
                println!();
                println!("Analysis data saved to {}", path.display());
            }
        }

        Command::Summary { chapter, output } => {
            let info = load_chapter_info(&chapter)?;
            write_summary(&info, &output)?;
            println!("Summary scaffold written to {}", output.display());
        }
    }

    Ok(())
}
