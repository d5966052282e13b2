//! Ring Escape entry point
//!
//! Runs a whole session headless and writes what the video pipeline needs:
//! raw RGBA frames, the audio cue log and a JSON summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ring_escape::renderer::FrameBuffer;
use ring_escape::{Game, GameConfig, Settings, ThemeDatabase};

#[derive(Parser)]
#[command(name = "ring-escape")]
#[command(about = "Render a deterministic ball-escape battle")]
struct Args {
    /// Session seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frame width (px)
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Frame height (px)
    #[arg(long, default_value_t = 1920)]
    height: u32,

    /// Settings JSON (timing and round table)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Theme database JSON
    #[arg(long, default_value = "themes.json")]
    themes: PathBuf,

    /// Theme category to pit against each other
    #[arg(long)]
    theme: Option<String>,

    /// Write raw RGBA frames here
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Write the session summary JSON here
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write the audio cue log JSON here
    #[arg(long)]
    audio_log: Option<PathBuf>,

    /// Simulate only, skip drawing
    #[arg(long)]
    no_render: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let (theme, rivals) = match &args.theme {
        Some(category) => {
            let db = ThemeDatabase::load(&args.themes);
            match db.rivals(category) {
                Some(rivals) => (Some(category.to_uppercase()), rivals.to_vec()),
                None => {
                    log::warn!("Theme {category} not found, using default teams");
                    (None, Vec::new())
                }
            }
        }
        None => (None, Vec::new()),
    };

    let mut game = Game::new(GameConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
        theme,
        rivals,
        background: None,
        settings,
    })
    .context("invalid session configuration")?;

    let mut frames_out = match &args.frames {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };
    let render = !args.no_render;
    let mut fb = FrameBuffer::new(args.width, args.height);

    let start = Instant::now();
    while !game.is_done() {
        game.update();
        if render {
            game.draw(&mut fb);
            if let Some(out) = frames_out.as_mut() {
                out.write_all(fb.as_bytes()).context("writing frame")?;
            }
        }
    }
    if let Some(mut out) = frames_out {
        out.flush().context("flushing frames")?;
    }

    let summary = game.summary();
    log::info!(
        "Session finished: {} frames ({:.1}s of video) in {:.1}s",
        summary.frames,
        summary.duration_secs,
        start.elapsed().as_secs_f64()
    );

    if let Some(path) = &args.audio_log {
        let json = game.audio_log().to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    println!("Hook: {}", summary.hook_text);
    println!(
        "Rounds: {}",
        summary
            .round_winners
            .iter()
            .enumerate()
            .map(|(i, w)| format!("R{} {w}", i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Final: {}",
        game.scoreboard()
            .tally(game.scoreboard().entries.iter().map(|e| e.name.as_str()))
    );
    if let Some(champion) = &summary.champion {
        println!("Champion: {champion}");
    }
    Ok(())
}
