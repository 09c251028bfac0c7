use approx::assert_relative_eq;
use frame_solver::prelude::*;
use frame_solver::presets::generate;

fn portal(width: f64, height: f64) -> FrameModel {
    let params = PresetParams {
        width,
        height,
        ..PresetParams::default()
    };
    generate(StructureType::PortalFrame, &params).unwrap()
}

/// Resultant (FX, FY, MZ about the origin) of every load on the model
fn applied_resultant(model: &FrameModel) -> [f64; 3] {
    let mut total = [0.0; 3];
    for load in &model.loads {
        if let Some((node, [fx, fy, mz])) = load.nodal_components() {
            let n = model.node(node).unwrap();
            total[0] += fx;
            total[1] += fy;
            total[2] += mz + n.x * fy - n.y * fx;
            continue;
        }
        let (id, member_load) = load.member_load().unwrap();
        let element = model.element(id).unwrap();
        let start = model.node(element.start).unwrap();
        let end = model.node(element.end).unwrap();
        let length = start.distance_to(end);
        let at = |t: f64| (start.x + t * (end.x - start.x), start.y + t * (end.y - start.y));

        let (fx, fy, mz, t) = match member_load {
            MemberLoad::Point { position, direction, magnitude } => {
                let (fx, fy) = direction.components(magnitude);
                (fx, fy, 0.0, position)
            }
            MemberLoad::Moment { position, magnitude } => (0.0, 0.0, magnitude, position),
            MemberLoad::Distributed { direction, magnitude } => {
                let (fx, fy) = direction.components(magnitude * length);
                (fx, fy, 0.0, 0.5)
            }
        };
        let (x, y) = at(t);
        total[0] += fx;
        total[1] += fy;
        total[2] += mz + x * fy - y * fx;
    }
    total
}

fn reaction_resultant(model: &FrameModel, result: &AnalysisResult) -> [f64; 3] {
    result.reactions.iter().fold([0.0; 3], |acc, r| {
        let n = model.node(r.node).unwrap();
        [acc[0] + r.fx, acc[1] + r.fy, acc[2] + r.mz + n.x * r.fy - n.y * r.fx]
    })
}

#[test]
fn portal_frame_global_equilibrium() {
    let mut model = portal(6.0, 4.0);
    model
        .add_load(Load::distributed("D", 2, LoadDirection::Y, -10_000.0))
        .unwrap();
    model
        .add_load(Load::nodal_force("W", 2, LoadDirection::X, 20_000.0))
        .unwrap();
    model
        .add_load(Load::point("H", 3, 0.4, LoadDirection::X, -5_000.0))
        .unwrap();
    model.add_load(Load::moment("M", 2, 0.25, 3_000.0)).unwrap();
    model.add_load(Load::nodal_moment("C", 3, -1_000.0)).unwrap();

    let result = model.analyze(&AnalysisOptions::default());
    assert!(!result.stability.is_degenerate());

    let applied = applied_resultant(&model);
    let reactions = reaction_resultant(&model, &result);
    for k in 0..3 {
        assert_relative_eq!(applied[k] + reactions[k], 0.0, epsilon = 1e-6);
    }
}

#[test]
fn displacements_superpose() {
    let base = portal(8.0, 5.0);
    let with = |loads: &[Load]| {
        let mut model = base.clone();
        for load in loads {
            model.add_load(load.clone()).unwrap();
        }
        model.analyze(&AnalysisOptions::default())
    };

    let gravity = Load::distributed("D", 2, LoadDirection::Y, -8_000.0);
    let wind = Load::point("W", 1, 0.6, LoadDirection::X, 12_000.0);

    let a = with(&[gravity.clone()]);
    let b = with(&[wind.clone()]);
    let ab = with(&[gravity, wind]);

    for ((da, db), dab) in a.displacements.iter().zip(&b.displacements).zip(&ab.displacements) {
        assert_relative_eq!(da.ux + db.ux, dab.ux, epsilon = 1e-12);
        assert_relative_eq!(da.uy + db.uy, dab.uy, epsilon = 1e-12);
        assert_relative_eq!(da.rz + db.rz, dab.rz, epsilon = 1e-12);
    }
}

#[test]
fn truss_carries_axial_force_only() {
    let mut model = generate(StructureType::Truss, &PresetParams::default()).unwrap();
    // Load the bottom chord mid joint
    model
        .add_load(Load::nodal_force("P", 2, LoadDirection::Y, -50_000.0))
        .unwrap();
    let result = model.analyze(&AnalysisOptions::default());

    assert!(!result.stability.is_degenerate());
    let rotations: Vec<usize> = (0..model.nodes.len()).map(|n| n * 3 + 2).collect();
    assert_eq!(result.stability.inactive_dofs, rotations);

    for element in &result.elements {
        assert_eq!(element.max_moment, 0.0, "element {}", element.element);
        assert_eq!(element.max_shear, 0.0, "element {}", element.element);
    }
    let [_, fy] = result.total_reaction();
    assert_relative_eq!(fy, 50_000.0, max_relative = 1e-9);
}

#[test]
fn inclined_member_under_gravity() {
    // 3-4-5 rafter, pinned at the foot, vertical roller at the top
    let mut model = FrameModel::new();
    model
        .add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned()))
        .unwrap();
    model
        .add_node(Node::new(2, 4.0, 3.0).with_support(Support::roller()))
        .unwrap();
    model
        .add_element(Element::new(1, 1, 2, 200e9, 0.01, 1e-4))
        .unwrap();
    model
        .add_load(Load::distributed("q", 1, LoadDirection::Y, -1_000.0))
        .unwrap();
    let result = model.analyze(&AnalysisOptions::default());

    // 5 m of load, split evenly between the vertical reactions
    assert_relative_eq!(result.reaction(NodeId(1)).unwrap().fy, 2_500.0, max_relative = 1e-9);
    assert_relative_eq!(result.reaction(NodeId(2)).unwrap().fy, 2_500.0, max_relative = 1e-9);
    assert_relative_eq!(result.reaction(NodeId(1)).unwrap().fx, 0.0, epsilon = 1e-6);

    // Transverse component 800 N/m over 5 m: wL²/8 at midspan
    let rafter = result.element(ElementId(1)).unwrap();
    assert_relative_eq!(rafter.cosines.c, 0.8, epsilon = 1e-12);
    assert_relative_eq!(rafter.max_moment, 800.0 * 25.0 / 8.0, max_relative = 1e-6);
}

#[test]
fn axially_rigid_beam_keeps_eaves_together() {
    let mut model = portal(6.0, 4.0);
    model
        .add_load(Load::nodal_force("W", 2, LoadDirection::X, 10_000.0))
        .unwrap();

    let elastic = model.analyze(&AnalysisOptions::default());
    let rigid = model.analyze(&AnalysisOptions::default().with_mode(StiffnessMode::AxiallyRigid));

    let spread = |r: &AnalysisResult| {
        r.displacement(NodeId(2)).unwrap().ux - r.displacement(NodeId(3)).unwrap().ux
    };
    assert!(!rigid.stability.is_degenerate());
    assert!(spread(&elastic).abs() > 0.0);
    assert!(spread(&rigid).abs() < spread(&elastic).abs() * 1e-3);
}

#[test]
fn fixed_portal_is_stable_in_every_stiffness_mode() {
    let mut model = generate(StructureType::PortalFrame, &PresetParams::default()).unwrap();
    model
        .add_load(Load::nodal_force("W", 2, LoadDirection::X, 10_000.0))
        .unwrap();

    for mode in [StiffnessMode::Elastic, StiffnessMode::AxiallyRigid, StiffnessMode::RigidBody] {
        let result = model.analyze(&AnalysisOptions::default().with_mode(mode));
        assert!(result.stability.singular_dofs.is_empty(), "{mode:?}: {:?}", result.stability.singular_dofs);
        assert!(!result.stability.is_degenerate(), "{mode:?}");
        let [fx, _] = result.total_reaction();
        assert_relative_eq!(fx, -10_000.0, max_relative = 1e-6);
    }
}

#[test]
fn gerber_beam_hinge_carries_no_moment() {
    // Cantilever 0-4 m with a suspended span 4-8 m hinged onto its tip
    let mut model = FrameModel::new();
    model
        .add_node(Node::new(1, 0.0, 0.0).with_support(Support::fixed()))
        .unwrap();
    model.add_node(Node::new(2, 4.0, 0.0)).unwrap();
    model
        .add_node(Node::new(3, 8.0, 0.0).with_support(Support::roller()))
        .unwrap();
    model
        .add_element(Element::new(1, 1, 2, 200e9, 0.01, 1e-4))
        .unwrap();
    model
        .add_element(Element::new(2, 2, 3, 200e9, 0.01, 1e-4).with_releases(Releases::pin_start()))
        .unwrap();
    model
        .add_load(Load::point("P", 1, 0.5, LoadDirection::Y, -3_000.0))
        .unwrap();
    model
        .add_load(Load::distributed("q", 2, LoadDirection::Y, -1_000.0))
        .unwrap();

    let result = model.analyze(&AnalysisOptions::default());
    assert!(!result.stability.is_degenerate());

    // Suspended span is statically determinate: qL/2 at each end
    assert_relative_eq!(result.reaction(NodeId(3)).unwrap().fy, 2_000.0, max_relative = 1e-9);
    assert_relative_eq!(result.reaction(NodeId(1)).unwrap().fy, 5_000.0, max_relative = 1e-9);
    assert_relative_eq!(result.reaction(NodeId(1)).unwrap().mz, 2_000.0 * 4.0 + 3_000.0 * 2.0, max_relative = 1e-9);

    let suspended = result.element(ElementId(2)).unwrap();
    assert_relative_eq!(suspended.end_forces.m1, 0.0, epsilon = 1e-6);
    assert_relative_eq!(suspended.max_moment, 1_000.0 * 16.0 / 8.0, max_relative = 1e-6);

    let tip = model.evaluate(&result, ElementId(1), 1.0).unwrap();
    assert_relative_eq!(tip.moment, 0.0, epsilon = 1e-6);
    let root = model.evaluate(&result, ElementId(1), 0.0).unwrap();
    assert_relative_eq!(root.moment, -14_000.0, max_relative = 1e-9);

    let applied = applied_resultant(&model);
    let reactions = reaction_resultant(&model, &result);
    for k in 0..3 {
        assert_relative_eq!(applied[k] + reactions[k], 0.0, epsilon = 1e-6);
    }
}

#[test]
fn stations_follow_the_displaced_member() {
    let mut model = portal(6.0, 4.0);
    model
        .add_load(Load::distributed("D", 2, LoadDirection::Y, -10_000.0))
        .unwrap();
    let result = model.analyze(&AnalysisOptions::default());

    // Left column runs up the Y axis: local y points towards -X
    let column = result.element(ElementId(1)).unwrap();
    for station in &column.stations {
        assert_relative_eq!(station.global_x, -station.deflection, epsilon = 1e-12);
        assert_relative_eq!(station.global_y, station.x, epsilon = 1e-12);
    }
}

#[test]
fn auto_connect_splits_and_solves() {
    let mut model = FrameModel::new();
    model
        .add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned()))
        .unwrap();
    model
        .add_node(Node::new(2, 8.0, 0.0).with_support(Support::roller()))
        .unwrap();
    model
        .add_node(Node::new(3, 4.0, 0.0).with_support(Support::roller()))
        .unwrap();
    model
        .add_element(Element::new(1, 1, 2, 200e9, 0.01, 1e-4))
        .unwrap();
    model
        .add_load(Load::distributed("q", 1, LoadDirection::Y, -1_000.0))
        .unwrap();

    // Unsplit, the middle support is never touched by the beam
    let loose = model.analyze(&AnalysisOptions::default());
    assert_eq!(loose.reaction(NodeId(3)).unwrap().fy, 0.0);

    assert_eq!(model.split_at_nodes(), 1);
    let result = model.analyze(&AnalysisOptions::default());
    assert_relative_eq!(result.reaction(NodeId(3)).unwrap().fy, 10.0 * 1_000.0 * 4.0 / 8.0, max_relative = 1e-9);
}

#[test]
fn model_from_json_solves() {
    let json = r#"{
        "nodes": [
            {"id": 1, "x": 0.0, "y": 0.0, "restraints": {"dx": true, "dy": true, "rz": true}},
            {"id": 2, "x": 2.0, "y": 0.0}
        ],
        "elements": [{"id": 1, "start": 1, "end": 2, "e": 1.0e7, "a": 1.0, "i": 1.0}],
        "loads": [
            {"id": "m", "type": "nodal_moment", "node": 2, "magnitude": 10.0}
        ]
    }"#;
    let model = FrameModel::from_json(json).unwrap();
    let result = model.analyze(&AnalysisOptions::default());

    // Tip moment: uniform curvature, θ = ML/EI
    assert_relative_eq!(result.displacement(NodeId(2)).unwrap().rz, 10.0 * 2.0 / 1.0e7, max_relative = 1e-9);
    assert_relative_eq!(result.reaction(NodeId(1)).unwrap().mz, -10.0, max_relative = 1e-9);
    let cleaned = result.cleaned();
    assert_eq!(cleaned.element(ElementId(1)).unwrap().max_moment, 10.0);
}

#[test]
fn empty_and_degenerate_inputs() {
    let empty = solve(&[], &[], &[], StiffnessMode::Elastic);
    assert!(empty.is_empty());
    assert!(!empty.stability.is_degenerate());

    // A free-floating beam is a mechanism
    let nodes = [Node::new(1, 0.0, 0.0), Node::new(2, 3.0, 0.0)];
    let elements = [Element::new(1, 1, 2, 200e9, 0.01, 1e-4)];
    let loads = [Load::nodal_force("P", 2, LoadDirection::Y, -1.0)];
    let floating = solve(&nodes, &elements, &loads, StiffnessMode::Elastic);
    assert!(floating.stability.is_degenerate());
    assert!(floating
        .displacements
        .iter()
        .all(|d| d.ux.is_finite() && d.uy.is_finite() && d.rz.is_finite()));
}
