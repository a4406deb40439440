//! Example: discretise the zero contour of a circular hole in a block.
//!
//! Builds a structured grid, samples the signed distance to a circle, runs
//! the boundary discretisation and prints how the discrete perimeter and
//! enclosed area compare with the exact values. Optionally writes the
//! contours with their normals as JSON.
//!
//! Run from the workspace root:
//!   cargo run -p level-contour --example circle -- --help
//!   RUST_LOG=debug cargo run -p level-contour --example circle -- --nelx 200

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use level_contour::{Boundary, FieldKind, LevelSet, Point2, StructuredGrid};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Discretise the zero contour of a circle on a structured grid")]
struct Args {
    /// Elements along x
    #[arg(long, default_value_t = 80)]
    nelx: usize,

    /// Elements along y
    #[arg(long, default_value_t = 80)]
    nely: usize,

    /// Element side length
    #[arg(long, default_value_t = 1.0)]
    spacing: f64,

    /// Circle radius, as a fraction of the shorter domain side
    #[arg(long, default_value_t = 0.3)]
    radius: f64,

    /// Optional JSON output path for the contours
    #[arg(long)]
    out: Option<String>,
}

#[derive(Serialize)]
struct PointDto {
    x: f64,
    y: f64,
    nx: f64,
    ny: f64,
    length: f64,
    domain: bool,
}

#[derive(Serialize)]
struct ContourDto {
    closed: bool,
    length: f64,
    points: Vec<PointDto>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.radius > 0.0 && args.radius < 0.5) {
        bail!("radius fraction must lie in (0, 0.5), got {}", args.radius);
    }

    let grid = StructuredGrid::with_spacing(args.nelx, args.nely, args.spacing)
        .context("building grid")?;
    let centre = Point2::new(0.5 * grid.width(), 0.5 * grid.height());
    let radius = args.radius * grid.width().min(grid.height());

    // Material outside the hole, so flip the disc's sign.
    let field = LevelSet::from_fn(&grid, |p| radius - p.distance(centre));

    let mut boundary = Boundary::new();
    let t0 = Instant::now();
    boundary
        .discretise(&grid, &field, FieldKind::Primary)
        .context("discretising boundary")?;
    boundary
        .compute_normal_vectors(&grid, &field)
        .context("computing normals")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let fractions = boundary
        .compute_area_fractions(&grid, &field)
        .context("computing area fractions")?;
    let cell = grid.spacing() * grid.spacing();
    let hole_area = grid.width() * grid.height() - fractions.iter().sum::<f64>() * cell;

    let exact_length = 2.0 * PI * radius;
    let exact_area = PI * radius * radius;

    println!(
        "grid {}x{} (h = {}), {} points, {} segments ({elapsed_ms:.2} ms)",
        grid.nelx(),
        grid.nely(),
        grid.spacing(),
        boundary.n_points(),
        boundary.n_segments()
    );
    println!(
        "perimeter {:.6} vs {exact_length:.6} (rel. error {:.2e})",
        boundary.length,
        (boundary.length - exact_length).abs() / exact_length
    );
    println!(
        "hole area {hole_area:.6} vs {exact_area:.6} (rel. error {:.2e})",
        (hole_area - exact_area).abs() / exact_area
    );

    let contours = boundary.contours();
    log::info!("{} contour(s)", contours.len());

    if let Some(out_path) = args.out {
        let dtos: Vec<ContourDto> = contours
            .iter()
            .map(|c| ContourDto {
                closed: c.closed,
                length: c.length,
                points: c
                    .points
                    .iter()
                    .map(|&id| {
                        let p = &boundary.points[id];
                        PointDto {
                            x: p.coord.x,
                            y: p.coord.y,
                            nx: p.normal.x,
                            ny: p.normal.y,
                            length: p.length,
                            domain: p.is_domain,
                        }
                    })
                    .collect(),
            })
            .collect();

        let out_file =
            std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
        serde_json::to_writer_pretty(out_file, &dtos)
            .with_context(|| format!("writing JSON to {out_path}"))?;
        println!("contours written to {out_path}");
    }

    Ok(())
}
