use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rfpaint::{hit_test, ClickableArea, LayoutTree, Point, RenderConfig, Renderer, Rgba};

#[derive(Parser, Debug)]
#[command(name = "rfpaint", version, about = "Paint RFox layout trees to PNG")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layout tree JSON document to PNG.
    Render(RenderArgs),
    /// Look up which clickable area (if any) is under a point.
    Hit(HitArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input layout tree JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write clickable areas as JSON to this path.
    #[arg(long)]
    areas: Option<PathBuf>,

    /// Renderer config JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file to register (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Background color (`#rgb`, `#rrggbb`, `#rrggbbaa` or a CSS name).
    #[arg(long)]
    background: Option<Rgba>,

    /// Print the SHA-256 of the encoded PNG.
    #[arg(long)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct HitArgs {
    /// Clickable areas JSON written by `render --areas`.
    #[arg(long)]
    areas: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    x: f32,

    #[arg(long, allow_negative_numbers = true)]
    y: f32,
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("read config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    config.font_paths.extend(args.fonts);
    if let Some(bg) = args.background {
        config.background = bg;
    }

    let tree = LayoutTree::from_path(&args.layout)
        .with_context(|| format!("load layout {}", args.layout.display()))?;
    let renderer = Renderer::new(config).context("create renderer")?;
    let out = renderer.render(&tree).context("render layout tree")?;

    let shot = out.canvas.into_screenshot()?;
    std::fs::write(&args.out, &shot.png_data)
        .with_context(|| format!("write {}", args.out.display()))?;
    log::info!("wrote {}x{} PNG to {}", shot.width, shot.height, args.out.display());

    if let Some(path) = &args.areas {
        let json = serde_json::to_string_pretty(&out.areas)?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        log::info!("wrote {} clickable areas to {}", out.areas.len(), path.display());
    }

    if args.digest {
        println!("{}", shot.digest());
    }
    Ok(())
}

fn hit(args: HitArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.areas)
        .with_context(|| format!("read {}", args.areas.display()))?;
    let areas: Vec<ClickableArea> = serde_json::from_str(&json).context("parse clickable areas")?;
    match hit_test(&areas, Point::new(args.x, args.y)) {
        Some(area) => println!("{}", serde_json::to_string(area)?),
        None => println!("null"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => render(args),
        Command::Hit(args) => hit(args),
    }
}
