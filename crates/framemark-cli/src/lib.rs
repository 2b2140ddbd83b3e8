//! FrameMark command-line shell.
//!
//! `framemark info <drawings.json>` summarizes a drawings file.
//! `framemark render <drawings.json> <frame.png> <frame_number> <out.png>` composites
//! one frame's annotations onto an image.

use framemark_core::shapes::{ShapeId, ShapeKind};
use framemark_core::{DrawingManager, DrawingStorage, StorageError};
use framemark_render::{FrameRenderer, LabelFont, RenderError};
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
usage:
  framemark info <drawings.json>
  framemark render <drawings.json> <frame.png> <frame_number> <out.png> \
[--no-measurements] [--selected <id>] [--font <ttf>]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options of the `render` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub drawings: PathBuf,
    pub frame_image: PathBuf,
    pub frame_number: u32,
    pub output: PathBuf,
    pub show_measurements: bool,
    pub selected: Option<ShapeId>,
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Info { drawings: PathBuf },
    Render(RenderArgs),
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args
        .next()
        .ok_or_else(|| CliError::Usage("missing command".into()))?;

    match command.as_str() {
        "info" => {
            let drawings = args
                .next()
                .ok_or_else(|| CliError::Usage("missing drawings file".into()))?;
            if let Some(extra) = args.next() {
                return Err(CliError::Usage(format!("unexpected argument '{extra}'")));
            }
            Ok(Command::Info {
                drawings: drawings.into(),
            })
        }
        "render" => parse_render(args).map(Command::Render),
        other => Err(CliError::Usage(format!("unknown command '{other}'"))),
    }
}

fn parse_render(mut args: impl Iterator<Item = String>) -> Result<RenderArgs, CliError> {
    let mut positional = Vec::new();
    let mut show_measurements = true;
    let mut selected = None;
    let mut font = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-measurements" => show_measurements = false,
            "--selected" => {
                let id = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--selected needs a shape id".into()))?;
                let id = ShapeId::parse_str(&id)
                    .map_err(|e| CliError::Usage(format!("invalid shape id '{id}': {e}")))?;
                selected = Some(id);
            }
            "--font" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--font needs a file".into()))?;
                font = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option '{flag}'")));
            }
            _ => positional.push(arg),
        }
    }

    let [drawings, frame_image, frame_number, output]: [String; 4] = positional
        .try_into()
        .map_err(|_| CliError::Usage("render expects four arguments".into()))?;
    let frame_number = frame_number
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid frame number '{frame_number}'")))?;

    Ok(RenderArgs {
        drawings: drawings.into(),
        frame_image: frame_image.into(),
        frame_number,
        output: output.into(),
        show_measurements,
        selected,
        font,
    })
}

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Info { drawings } => {
            let loaded = DrawingStorage::new().load(&drawings)?;
            let mut manager = DrawingManager::new();
            manager.load_shapes(loaded.shapes);
            print!("{}", summarize(&manager, loaded.video_path.as_deref()));
            Ok(())
        }
        Command::Render(args) => render(&args),
    }
}

/// Human-readable shape counts per frame and kind.
pub fn summarize(manager: &DrawingManager, video_path: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(video) = video_path {
        out.push_str(&format!("video: {video}\n"));
    }
    out.push_str(&format!(
        "{} shapes on {} frames\n",
        manager.shape_count(),
        manager.frame_count()
    ));
    for frame in manager.frames() {
        let shapes = manager.shapes_for_frame(frame);
        let kinds: Vec<String> = ShapeKind::ALL
            .iter()
            .filter_map(|kind| {
                let n = shapes.iter().filter(|s| s.kind() == *kind).count();
                (n > 0).then(|| format!("{n} {kind}"))
            })
            .collect();
        out.push_str(&format!("frame {frame}: {}\n", kinds.join(", ")));
    }
    out
}

fn render(args: &RenderArgs) -> Result<(), CliError> {
    let loaded = DrawingStorage::new().load(&args.drawings)?;
    let mut manager = DrawingManager::new();
    manager.load_shapes(loaded.shapes);

    let renderer = match &args.font {
        Some(path) => FrameRenderer::with_font(LabelFont::from_bytes(std::fs::read(path)?)?),
        None => FrameRenderer::new(),
    };

    let frame = image::open(&args.frame_image)?.to_rgba8();
    let shapes = manager.shapes_for_frame(args.frame_number);
    let output = renderer.render(&frame, shapes, args.show_measurements, args.selected)?;
    output.save(&args.output)?;

    log::info!(
        "Rendered {} shapes of frame {} to {}",
        shapes.len(),
        args.frame_number,
        args.output.display()
    );
    Ok(())
}
