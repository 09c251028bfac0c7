//! Internal-force and deflection recovery along members
//!
//! Sign convention: tension positive, shear positive when the start
//! end force acts upward on the member, sagging moment positive.

use super::{AnalysisOptions, ElementContribution};
use crate::loads::{LocalLoad, MemberLoad};
use crate::math::{condensed_end_rotations, DirectionCosines, Vec, Vec6};
use crate::results::{ElementResult, EndForces, SectionForces, Station};

/// Relative distance past a concentrated load before its step applies
const STEP_TOLERANCE: f64 = 1e-9;

/// Queries this close to either end are taken at the end itself
const END_SNAP: f64 = 1e-4;

fn clamp_to_member(x: f64, length: f64) -> f64 {
    let x = x.clamp(0.0, length);
    if x < END_SNAP {
        0.0
    } else if length - x < END_SNAP {
        length
    } else {
        x
    }
}

fn step_applies(x: f64, a: f64, length: f64) -> bool {
    let tol = STEP_TOLERANCE * length.max(1.0);
    x - a > tol || x >= length - tol
}

/// Internal forces and deflection at distance `x` from the start node
///
/// `local_displacements` are member end displacements with any released
/// rotations already replaced by member end rotations, and `end_forces`
/// already include fixed-end forces. Concentrated loads take effect just
/// past their position; at `x = L` every load has acted. `x` is clamped to
/// `[0, L]`.
pub fn evaluate_at(
    x: f64,
    length: f64,
    cosines: DirectionCosines,
    local_displacements: &[f64; 6],
    end_forces: &EndForces,
    loads: &[MemberLoad],
) -> SectionForces {
    let x = clamp_to_member(x, length);
    let (mut axial, mut shear, start_moment) = end_forces.at_start();
    let mut moment = start_moment + end_forces.fy1 * x;

    for load in loads {
        match load.to_local(length, cosines) {
            LocalLoad::Distributed {
                axial: wx,
                transverse: wy,
            } => {
                axial -= wx * x;
                shear += wy * x;
                moment += wy * x * x / 2.0;
            }
            LocalLoad::Point {
                a,
                axial: px,
                transverse: py,
            } => {
                if step_applies(x, a, length) {
                    axial -= px;
                    shear += py;
                    moment += py * (x - a);
                }
            }
            LocalLoad::Moment { a, moment: m0 } => {
                if step_applies(x, a, length) {
                    moment -= m0;
                }
            }
        }
    }

    SectionForces {
        axial,
        shear,
        moment,
        deflection: hermite_deflection(x, length, local_displacements),
    }
}

/// Cubic Hermite interpolation of the transverse end displacements
fn hermite_deflection(x: f64, length: f64, d: &[f64; 6]) -> f64 {
    let xi = (x / length).clamp(0.0, 1.0);
    let xi2 = xi * xi;
    let xi3 = xi2 * xi;

    let n1 = 1.0 - 3.0 * xi2 + 2.0 * xi3;
    let n2 = length * (xi - 2.0 * xi2 + xi3);
    let n3 = 3.0 * xi2 - 2.0 * xi3;
    let n4 = length * (xi3 - xi2);

    n1 * d[1] + n2 * d[2] + n3 * d[4] + n4 * d[5]
}

/// Sampling positions along a member
///
/// Both ends, `station_count` uniform intervals, and every interior
/// concentrated load position with a station either side of it.
pub fn station_positions(length: f64, loads: &[MemberLoad], options: &AnalysisOptions) -> std::vec::Vec<f64> {
    let count = options.station_count.max(1);
    let offset = options.discontinuity_offset;

    let mut xs: std::vec::Vec<f64> = (0..=count)
        .map(|i| length * i as f64 / count as f64)
        .collect();

    for a in loads.iter().filter_map(|l| l.location(length)) {
        if a > 0.0 && a < length {
            xs.push(a);
            xs.push((a - offset).max(0.0));
            xs.push((a + offset).min(length));
        }
    }

    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| (*a - *b).abs() <= STEP_TOLERANCE * length.max(1.0));
    xs
}

/// Recover end forces, stations and maxima for one element
pub fn recover_element(
    contribution: &ElementContribution,
    displacements: &Vec,
    options: &AnalysisOptions,
) -> ElementResult {
    let length = contribution.length;
    let cosines = contribution.cosines;

    let d_local: Vec6 = contribution.transform * contribution.gather(displacements);
    let forces = contribution.k_local * d_local + contribution.fem_local;
    let end_forces = EndForces::from_vector(&forces);

    let member = condensed_end_rotations(&d_local, length, contribution.releases);
    let local_displacements: [f64; 6] = member.into();

    let [x1, y1] = contribution.origin;
    let stations: std::vec::Vec<Station> = station_positions(length, &contribution.loads, options)
        .into_iter()
        .map(|x| {
            let section = evaluate_at(
                x,
                length,
                cosines,
                &local_displacements,
                &end_forces,
                &contribution.loads,
            );
            let delta = section.deflection;
            Station {
                x,
                axial: section.axial,
                shear: section.shear,
                moment: section.moment,
                deflection: delta,
                global_x: x1 + x * cosines.c - delta * cosines.s,
                global_y: y1 + x * cosines.s + delta * cosines.c,
            }
        })
        .collect();

    let peak = |f: fn(&Station) -> f64| stations.iter().fold(0.0_f64, |acc, s| acc.max(f(s).abs()));

    ElementResult {
        element: contribution.element,
        length,
        cosines,
        origin: contribution.origin,
        local_displacements,
        end_forces,
        max_axial: peak(|s| s.axial),
        max_shear: peak(|s| s.shear),
        max_moment: peak(|s| s.moment),
        max_deflection: peak(|s| s.deflection),
        stations,
    }
}
