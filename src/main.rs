use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use canopy::render::colors::{Palette, SequentialScale};
use canopy::render::scene::SvgScene;
use canopy::{RawNode, SessionConfig, ViewSession};

/// Render a weighted JSON hierarchy as a zoomable treemap SVG.
#[derive(Parser, Debug)]
#[command(name = "canopy", version, about)]
struct Args {
    /// JSON hierarchy: `{name, value}` leaves, `{name, children}` internal nodes
    data: PathBuf,
    /// JSON session config (viewport, layout padding, palette); flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    /// Dotted path to zoom into, starting at the root's name; repeat to zoom in steps
    #[arg(short, long)]
    zoom: Vec<String>,
    /// Color ramp: cool, warm, cubehelix, hue
    #[arg(long)]
    palette: Option<Palette>,
    /// Keep fractional coordinates
    #[arg(long)]
    no_round: bool,
    /// Print every zoomable path and exit
    #[arg(long)]
    paths: bool,
    /// Output SVG file (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(width) = args.width {
        config.viewport_width = width;
    }
    if let Some(height) = args.height {
        config.viewport_height = height;
    }
    if let Some(palette) = args.palette {
        config.palette = palette;
    }
    if args.no_round {
        config.layout.round = false;
    }
    Ok(config)
}

fn load_data(path: &Path) -> Result<RawNode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading data {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing data {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("canopy=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let raw = load_data(&args.data)?;
    let hierarchy = Arc::new(canopy::build(&raw)?);

    let scene = SvgScene::new(SequentialScale::new(config.palette));
    let mut session = ViewSession::new(hierarchy, config, scene);

    if args.paths {
        for path in session.zoomable_paths() {
            println!("{}", path);
        }
        return Ok(());
    }

    session.reset()?;
    for path in &args.zoom {
        session
            .zoom_to(path)
            .with_context(|| format!("zooming to {}", path))?;
    }

    let crumbs: Vec<String> = session
        .breadcrumbs()
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();
    tracing::info!("Current view: {}", crumbs.join(" / "));

    let svg = session.renderer().svg();
    match &args.out {
        Some(out) => {
            std::fs::write(out, svg).with_context(|| format!("writing {}", out.display()))?;
            tracing::info!("Wrote {} ({} bytes)", out.display(), svg.len());
        }
        None => print!("{}", svg),
    }

    Ok(())
}
