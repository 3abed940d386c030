//! Headless driver for the contour map: builds a grid, applies scripted and
//! point edits, and reports or exports the resulting surfaces.

mod obj;
mod preview;
mod script;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use contour_edit::EditSession;
use contour_geom::Vec2;
use contour_map::{Grid, MapConfig};

use crate::script::EditScript;

#[derive(Parser, Debug)]
#[command(name = "contour", about = "Chunked marching-squares map", version)]
struct Args {
    /// Map configuration TOML
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    map_size: Option<f32>,

    #[arg(long)]
    cell_resolution: Option<usize>,

    #[arg(long)]
    chunk_resolution: Option<usize>,

    /// Edit script TOML with `[[edit]]` entries
    #[arg(long)]
    script: Option<PathBuf>,

    /// Apply the session brush at `x,y` (repeatable)
    #[arg(long = "point", value_parser = parse_point)]
    points: Vec<Vec2>,

    /// Write all chunk surfaces as one OBJ file
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Print the occupancy field
    #[arg(long, default_value_t = false)]
    ascii: bool,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Vec2::new(x, y))
}

fn load_config(args: &Args) -> Result<MapConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => MapConfig::load_from_path(path)?,
        None => MapConfig::default(),
    };
    if let Some(v) = args.map_size {
        cfg.map_size = v;
    }
    if let Some(v) = args.cell_resolution {
        cfg.cell_resolution = v;
    }
    if let Some(v) = args.chunk_resolution {
        cfg.chunk_resolution = v;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = load_config(&args)?;
    let mut grid = Grid::new(&cfg)?;
    let mut session = EditSession::new();

    if let Some(path) = &args.script {
        let script = EditScript::load_from_path(path)?;
        let changed = script.apply(&mut grid, &mut session)?;
        log::info!("script {:?}: {} edits, {} cells changed", path, script.edits.len(), changed);
    }
    for p in &args.points {
        let out = grid.apply_session(*p, &session);
        if out.is_noop() {
            log::warn!("point ({}, {}) is outside the map", p.x, p.y);
        }
    }

    if args.ascii {
        print!("{}", preview::ascii_field(&grid));
    }
    print!("{}", preview::chunk_summary(&grid));

    if let Some(path) = &args.obj {
        obj::save_obj(&grid, path)?;
        log::info!("wrote {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_parsing() {
        assert_eq!(parse_point("0.5, -1").unwrap(), Vec2::new(0.5, -1.0));
        assert!(parse_point("1").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let args = Args::parse_from(["contour", "--cell-resolution", "4", "--point", "0,0"]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.cell_resolution, 4);
        assert_eq!(cfg.chunk_resolution, 2);
        assert_eq!(args.points, vec![Vec2::ZERO]);
        let args = Args::parse_from(["contour", "--chunk-resolution", "0"]);
        assert!(load_config(&args).is_err());
    }
}
