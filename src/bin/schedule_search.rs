//! Annealing-schedule search over the built-in demo scenes.
//!
//! Runs both the points-only and the points-with-normals schedule search on
//! one demo scene, fitting candidates with a simple Gaussian-correspondence
//! translation solver, and prints the winning schedules side by side.
//!
//! Usage:
//!   cargo run --bin schedule_search -- 3
//!   cargo run --bin schedule_search -- 4 --parallel --output report.json

use std::fs::File;

use clap::Parser;
use log::info;
use nalgebra::DMatrix;
use serde::Serialize;

use milan_reg::{
    search_oriented_schedule, search_point_schedule, sq_dist_matrix, AffineWarp, FitParams,
    NormalSchedule, OrientedFit, OrientedProvider, OrientedSearchConfig, OrientedSet, PointFit,
    PointProvider, PointSchedule, PointSearchConfig, RegError, Scene, Warp,
};

/// Schedule search over one built-in demo scene
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Demo scene index (0-4)
    #[arg(default_value_t = 3)]
    index: usize,

    /// Write a JSON report to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Evaluate schedule candidates in parallel
    #[arg(long)]
    parallel: bool,
}

/// Correspondence weights below this are treated as zero support.
const CORR_CUTOFF: f64 = 1e-8;

/// Demo solver: Gaussian soft correspondence plus a translation-only warp,
/// alternated for `em_iter` rounds while the temperature anneals
/// geometrically from its initial to its final value.
struct GaussianDemoProvider;

fn annealed(init: f64, fin: f64, step: usize, steps: usize) -> f64 {
    if steps <= 1 {
        return fin;
    }
    let fraction = step as f64 / (steps - 1) as f64;
    init * (fin / init).powf(fraction)
}

fn soft_corr(source: &DMatrix<f64>, target: &DMatrix<f64>, rad: f64) -> DMatrix<f64> {
    let mut corr = sq_dist_matrix(source, target);
    for v in corr.iter_mut() {
        let w = (-*v / (2.0 * rad * rad)).exp();
        *v = if w < CORR_CUTOFF { 0.0 } else { w };
    }
    corr
}

/// One EM-style fit: returns the translation offset and the final
/// correspondence, or an error when the correspondence loses all support.
fn fit_translation(
    source: &DMatrix<f64>,
    target: &DMatrix<f64>,
    rad_init: f64,
    rad_final: f64,
    em_iter: usize,
) -> Result<(Vec<f64>, DMatrix<f64>), RegError> {
    let dim = source.ncols();
    let mut offset = vec![0.0; dim];
    let mut corr = DMatrix::zeros(source.nrows(), target.nrows());

    for step in 0..em_iter.max(1) {
        let rad = annealed(rad_init, rad_final, step, em_iter.max(1));
        let warp = AffineWarp::translation_only(&offset);
        let warped = warp.transform_points(source);
        corr = soft_corr(&warped, target, rad);

        let total: f64 = corr.iter().sum();
        if total <= 0.0 {
            return Err(RegError::Provider(format!(
                "correspondence lost all support at temperature {rad}"
            )));
        }

        let mut mean_shift = vec![0.0; dim];
        for i in 0..source.nrows() {
            for j in 0..target.nrows() {
                let w = corr[(i, j)];
                if w == 0.0 {
                    continue;
                }
                for (d, shift) in mean_shift.iter_mut().enumerate() {
                    *shift += w * (target[(j, d)] - source[(i, d)]);
                }
            }
        }
        for shift in &mut mean_shift {
            *shift /= total;
        }
        offset = mean_shift;
    }

    Ok((offset, corr))
}

impl PointProvider for GaussianDemoProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        target: &DMatrix<f64>,
        schedule: &PointSchedule,
        params: &FitParams,
    ) -> Result<PointFit, RegError> {
        let (offset, corr) = fit_translation(
            source,
            target,
            schedule.rad_init,
            schedule.rad_final,
            params.em_iter,
        )?;
        Ok(PointFit {
            warp: Box::new(AffineWarp::translation_only(&offset)),
            corr,
        })
    }
}

impl OrientedProvider for GaussianDemoProvider {
    fn fit(
        &self,
        source: &DMatrix<f64>,
        source_normals: &OrientedSet,
        target: &DMatrix<f64>,
        target_normals: &OrientedSet,
        schedule: &NormalSchedule,
        params: &FitParams,
    ) -> Result<OrientedFit, RegError> {
        let (offset, corr_points) = fit_translation(
            source,
            target,
            schedule.point.rad_init,
            schedule.point.rad_final,
            params.em_iter,
        )?;

        // The translation carries sites with it, so the normal
        // correspondence is read off the shifted site distances.
        let warp = AffineWarp::translation_only(&offset);
        let shifted_sites = warp.transform_points(&source_normals.sites);
        let corr_normals = soft_corr(&shifted_sites, &target_normals.sites, schedule.radn_final);
        if corr_normals.iter().sum::<f64>() <= 0.0 {
            return Err(RegError::Provider(
                "normal correspondence lost all support".into(),
            ));
        }

        Ok(OrientedFit {
            warp: Box::new(warp),
            corr_points,
            corr_normals,
        })
    }
}

#[derive(Serialize)]
struct ModelReport {
    cost: f64,
    terms: Vec<f64>,
    schedule: serde_json::Value,
}

#[derive(Serialize)]
struct SearchReport {
    scene: String,
    point: ModelReport,
    oriented: ModelReport,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let scene = Scene::demo(args.index);
    info!(
        "scene {}: {} source points, {} target points, {} source normals",
        scene.name,
        scene.source.nrows(),
        scene.target.nrows(),
        scene.source_normals.len()
    );

    let mut point_config = PointSearchConfig::default();
    point_config.use_parallel = args.parallel;
    if let Some(rad_final) = scene.rad_final {
        point_config.rad_final = rad_final;
    }
    if let Some(reg_final) = scene.reg_final {
        point_config.reg_final = reg_final;
    }

    let mut oriented_config = OrientedSearchConfig::default();
    oriented_config.use_parallel = args.parallel;
    if let Some(rad_final) = scene.rad_final {
        oriented_config.rad_final = rad_final;
    }
    if let Some(reg_final) = scene.reg_final {
        oriented_config.reg_final = reg_final;
    }

    let provider = GaussianDemoProvider;

    let point = search_point_schedule(&scene.source, &scene.target, &provider, &point_config)?;
    println!("== points-only ({} candidates) ==", point_config.search_space_size());
    println!("  cost     {:.6}", point.cost);
    println!("  terms    {:?}", point.objective.terms());
    println!("  schedule {:?}", point.schedule);

    let oriented = search_oriented_schedule(
        &scene.source,
        &scene.source_normals,
        &scene.target,
        &scene.target_normals,
        &provider,
        &oriented_config,
    )?;
    println!(
        "== points-with-normals ({} candidates) ==",
        oriented_config.search_space_size()
    );
    println!("  cost     {:.6}", oriented.cost);
    println!("  terms    {:?}", oriented.objective.terms());
    println!("  schedule {:?}", oriented.schedule);

    if let Some(path) = args.output {
        let report = SearchReport {
            scene: scene.name.to_string(),
            point: ModelReport {
                cost: point.cost,
                terms: point.objective.terms().to_vec(),
                schedule: serde_json::to_value(point.schedule)?,
            },
            oriented: ModelReport {
                cost: oriented.cost,
                terms: oriented.objective.terms().to_vec(),
                schedule: serde_json::to_value(oriented.schedule)?,
            },
        };
        serde_json::to_writer_pretty(File::create(&path)?, &report)?;
        println!("report written to {}", path);
    }

    Ok(())
}
