//! Built-in 2D demonstration scenes.
//!
//! Each scene pairs a source contour with a deformed target contour, both
//! carrying outward normals at offset sites, and optionally overrides the
//! final annealing values the schedule search scores against. Contours are
//! traced as closed waypoint loops densified to a roughly uniform step.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::DMatrix;

use crate::core::points::{normalize_rows, OrientedSet};

/// Number of built-in demo scenes.
pub const DEMO_COUNT: usize = 5;

/// A registration problem instance: two contours with normals.
pub struct Scene {
    /// Scene name, for logs and reports.
    pub name: &'static str,
    /// Source contour points (n×2).
    pub source: DMatrix<f64>,
    /// Source normals at offset sites.
    pub source_normals: OrientedSet,
    /// Target contour points (m×2).
    pub target: DMatrix<f64>,
    /// Target normals at offset sites.
    pub target_normals: OrientedSet,
    /// Row indices of the source waypoints, empty when the contour was not
    /// traced from waypoints.
    pub source_waypoints: Vec<usize>,
    /// Row indices of the target waypoints.
    pub target_waypoints: Vec<usize>,
    /// Scene-specific final correspondence temperature, if it differs from
    /// the search default.
    pub rad_final: Option<f64>,
    /// Scene-specific final regularization weight.
    pub reg_final: Option<f64>,
}

/// Evenly spaced samples from `start` to `end`, endpoints included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect()
}

fn points_from_rows(rows: &[[f64; 2]]) -> DMatrix<f64> {
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    DMatrix::from_row_slice(rows.len(), 2, &flat)
}

/// Evenly spaced 2D samples along the segment from `start` to `end`.
fn linspace2d(start: [f64; 2], end: [f64; 2], n: usize) -> Vec<[f64; 2]> {
    let xs = linspace(start[0], end[0], n);
    let ys = linspace(start[1], end[1], n);
    xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect()
}

/// Trace a closed contour through `way_points`, densified so consecutive
/// samples are at most `max_step` apart.
///
/// With `y_sym` the waypoint list is completed by its mirror image across
/// the y axis, traversed in reverse, before closing the loop. Returns the
/// sampled points and the row index of each waypoint within them.
fn generate_path(way_points: &[[f64; 2]], max_step: f64, y_sym: bool) -> (DMatrix<f64>, Vec<usize>) {
    let mut wps: Vec<[f64; 2]> = way_points.to_vec();
    if y_sym {
        for wp in way_points.iter().rev() {
            wps.push([-wp[0], wp[1]]);
        }
    }
    let n = wps.len();
    let mut rows: Vec<[f64; 2]> = Vec::new();
    let mut wp_inds = Vec::with_capacity(n);
    for i in 0..n {
        let p0 = wps[(i + n - 1) % n];
        let p1 = wps[i];
        let dist = ((p1[0] - p0[0]).powi(2) + (p1[1] - p0[1]).powi(2)).sqrt();
        let count = (1.0 + dist / max_step).ceil() as usize;
        // The first sample duplicates the previous segment's endpoint.
        for p in linspace2d(p0, p1, count).into_iter().skip(1) {
            rows.push(p);
        }
        wp_inds.push(rows.len().saturating_sub(1));
    }
    (points_from_rows(&rows), wp_inds)
}

/// Outward normals for a closed contour, attached at edge midpoints.
///
/// Row i covers the edge from point i-1 (cyclically) to point i: the site is
/// the edge midpoint and the direction is the edge vector rotated a quarter
/// turn clockwise, unit length.
fn generate_normal_path(path: &DMatrix<f64>) -> OrientedSet {
    let r = path.nrows();
    let mut sites = DMatrix::zeros(r, 2);
    let mut dirs = DMatrix::zeros(r, 2);
    for i in 0..r {
        let prev = (i + r - 1) % r;
        sites[(i, 0)] = (path[(prev, 0)] + path[(i, 0)]) / 2.0;
        sites[(i, 1)] = (path[(prev, 1)] + path[(i, 1)]) / 2.0;
        dirs[(i, 0)] = path[(i, 1)] - path[(prev, 1)];
        dirs[(i, 1)] = -(path[(i, 0)] - path[(prev, 0)]);
    }
    OrientedSet {
        directions: normalize_rows(&dirs),
        sites,
    }
}

impl Scene {
    /// The built-in scene with the given index.
    ///
    /// Indices 0 through 3 select the named scenes; any other index falls
    /// back to the circle-and-square scene.
    pub fn demo(index: usize) -> Scene {
        match index {
            0 => Scene::semicircles_and_triangles(),
            1 => Scene::milk_box(),
            2 => Scene::vase(),
            3 => Scene::deformed_vase(),
            _ => Scene::circle_and_square(),
        }
    }

    /// A triangle-wave contour registered onto two stacked semicircles.
    pub fn semicircles_and_triangles() -> Scene {
        let xs = linspace(-4.0, 4.0, 21);
        let mut ys = linspace(0.0, 2.0, 6);
        ys.extend(linspace(2.0, -2.0, 11).into_iter().skip(1));
        ys.extend(linspace(-2.0, 0.0, 6).into_iter().skip(1));
        let source_rows: Vec<[f64; 2]> = xs.iter().zip(&ys).map(|(&x, &y)| [x, y]).collect();

        let mut dir_rows: Vec<[f64; 2]> = Vec::with_capacity(17);
        dir_rows.extend(std::iter::repeat([-1.0, 1.0]).take(4));
        dir_rows.push([0.0, 1.0]);
        dir_rows.extend(std::iter::repeat([1.0, 1.0]).take(7));
        dir_rows.push([0.0, 1.0]);
        dir_rows.extend(std::iter::repeat([-1.0, 1.0]).take(4));

        let zs = linspace(-4.0, 4.0, 17);
        let mut zy = linspace(0.0, 2.0, 5);
        zy.extend(linspace(2.0, -2.0, 9).into_iter().skip(1));
        zy.extend(linspace(-2.0, 0.0, 5).into_iter().skip(1));
        let site_rows: Vec<[f64; 2]> = zs.iter().zip(&zy).map(|(&x, &y)| [x, y]).collect();

        let source_normals = OrientedSet {
            directions: normalize_rows(&points_from_rows(&dir_rows)),
            sites: points_from_rows(&site_rows),
        };

        // Two tangent semicircles of radius 2, the right one flipped down.
        let semi = |n: usize| -> Vec<[f64; 2]> {
            linspace(-FRAC_PI_2, FRAC_PI_2, n)
                .into_iter()
                .map(|a| [a.sin(), a.cos()])
                .collect()
        };
        let semi15 = semi(15);
        let mut target_rows: Vec<[f64; 2]> = semi15
            .iter()
            .map(|p| [-2.0 + 2.0 * p[0], 2.0 * p[1]])
            .collect();
        target_rows.extend(
            semi15
                .iter()
                .skip(1)
                .map(|p| [2.0 + 2.0 * p[0], -2.0 * p[1]]),
        );

        let semi11 = semi(11);
        let mut tdir_rows: Vec<[f64; 2]> = semi11.clone();
        tdir_rows.extend(semi11.iter().skip(1).map(|p| [-p[0], p[1]]));
        let mut tsite_rows: Vec<[f64; 2]> = semi11
            .iter()
            .map(|p| [-2.0 + 2.0 * p[0], 2.0 * p[1]])
            .collect();
        tsite_rows.extend(
            semi11
                .iter()
                .skip(1)
                .map(|p| [2.0 + 2.0 * p[0], -2.0 * p[1]]),
        );

        Scene {
            name: "semicircles-and-triangles",
            source: points_from_rows(&source_rows),
            source_normals,
            target: points_from_rows(&target_rows),
            target_normals: OrientedSet {
                directions: points_from_rows(&tdir_rows),
                sites: points_from_rows(&tsite_rows),
            },
            source_waypoints: Vec::new(),
            target_waypoints: Vec::new(),
            rad_final: None,
            reg_final: None,
        }
    }

    /// A tall box whose shoulder slides down.
    pub fn milk_box() -> Scene {
        let (source, source_waypoints) =
            generate_path(&[[5.0, 0.0], [5.0, 8.0], [1.0, 8.0], [1.0, 11.0]], 1.5, true);
        let source_normals = generate_normal_path(&source);
        let (target, target_waypoints) =
            generate_path(&[[5.0, 0.0], [5.0, 5.0], [1.0, 5.0], [1.0, 11.0]], 1.5, true);
        let target_normals = generate_normal_path(&target);
        Scene {
            name: "milk-box",
            source,
            source_normals,
            target,
            target_normals,
            source_waypoints,
            target_waypoints,
            rad_final: None,
            reg_final: None,
        }
    }

    /// A vase profile registered onto a wider vase.
    pub fn vase() -> Scene {
        let (source, source_waypoints) =
            generate_path(&[[2.0, 0.0], [4.0, 4.0], [1.0, 8.0], [3.0, 10.0]], 1.5, true);
        let source_normals = generate_normal_path(&source);
        let (target, target_waypoints) =
            generate_path(&[[4.0, 0.0], [4.0, 5.0], [1.0, 9.0], [2.0, 12.0]], 1.5, true);
        let target_normals = generate_normal_path(&target);
        Scene {
            name: "vase",
            source,
            source_normals,
            target,
            target_normals,
            source_waypoints,
            target_waypoints,
            rad_final: None,
            reg_final: None,
        }
    }

    /// A vase registered onto a strongly asymmetric, folded profile.
    pub fn deformed_vase() -> Scene {
        let (source, source_waypoints) =
            generate_path(&[[2.5, 0.0], [4.0, 4.0], [1.0, 8.0], [3.0, 10.0]], 1.0, true);
        let source_normals = generate_normal_path(&source);
        let (target, target_waypoints) = generate_path(
            &[
                [2.75, 0.0],
                [5.0, 4.0],
                [4.0, 7.0],
                [6.0, 8.0],
                [-1.0, 10.0],
                [1.0, 8.0],
                [-4.0, 5.0],
                [-2.25, 0.0],
            ],
            1.0,
            false,
        );
        let target_normals = generate_normal_path(&target);
        Scene {
            name: "deformed-vase",
            source,
            source_normals,
            target,
            target_normals,
            source_waypoints,
            target_waypoints,
            rad_final: Some(0.01),
            reg_final: Some(0.01),
        }
    }

    /// A circle next to a square; only the circle moves.
    pub fn circle_and_square() -> Scene {
        let angles = linspace(-PI, PI, 12);
        let circle: Vec<[f64; 2]> = angles.iter().map(|a| [a.sin(), a.cos()]).collect();
        // Offset samples sit halfway between consecutive circle points.
        let n = angles.len();
        let circle_off: Vec<[f64; 2]> = (0..n)
            .map(|i| {
                let a = (angles[(i + n - 1) % n] + angles[i]) / 2.0;
                [a.sin(), a.cos()]
            })
            .collect();

        let (square, corner_inds) = generate_path(&[[2.0, -2.0], [2.0, 2.0]], 1.5, true);
        let square_normals = generate_normal_path(&square);

        let place = |rows: &[[f64; 2]], cx: f64, cy: f64, scale: f64| -> Vec<[f64; 2]> {
            rows.iter()
                .map(|p| [cx + scale * p[0], cy + scale * p[1]])
                .collect()
        };
        let shift_matrix = |m: &DMatrix<f64>, cx: f64, cy: f64| -> Vec<[f64; 2]> {
            (0..m.nrows())
                .map(|i| [cx + m[(i, 0)], cy + m[(i, 1)]])
                .collect()
        };

        let build = |cx: f64, cy: f64| -> (DMatrix<f64>, OrientedSet) {
            let mut point_rows = place(&circle, cx, cy, 2.0);
            point_rows.extend(shift_matrix(&square, -4.0, 0.0));

            let mut dir_rows = circle_off.clone();
            dir_rows.extend(
                (0..square_normals.directions.nrows()).map(|i| {
                    [
                        square_normals.directions[(i, 0)],
                        square_normals.directions[(i, 1)],
                    ]
                }),
            );
            let mut site_rows = place(&circle_off, cx, cy, 2.0);
            site_rows.extend(shift_matrix(&square_normals.sites, -4.0, 0.0));

            (
                points_from_rows(&point_rows),
                OrientedSet {
                    directions: points_from_rows(&dir_rows),
                    sites: points_from_rows(&site_rows),
                },
            )
        };

        let (source, source_normals) = build(4.0, 0.0);
        let (target, target_normals) = build(-1.0, 6.0);
        let waypoints: Vec<usize> = corner_inds.iter().map(|&i| i + circle.len()).collect();

        Scene {
            name: "circle-and-square",
            source,
            source_normals,
            target,
            target_normals,
            source_waypoints: waypoints.clone(),
            target_waypoints: waypoints,
            rad_final: Some(0.01),
            reg_final: Some(0.06),
        }
    }
}
