//! End-to-end checks across the predicate and topology layers: a closed
//! unit box built through the public facade, queried with tabulation,
//! winding, point search, and plane intersection.

use ncad::geom::{clip_seg_rpp, isect_2planes, PlanePlaneIsect};
use ncad::topo::{Element, LoopuseChildren, VertexId};
use ncad::{Diagnostics, Model, Plane, Point2, Point3, Tolerance, Transform, Vec3};

fn unit_box() -> (Model, ncad::topo::ShellId, Vec<VertexId>) {
    let mut m = Model::new(Diagnostics::Off);
    let r = m.add_region();
    let s = m.add_shell(r);
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let v: Vec<VertexId> = pts.iter().map(|p| m.add_vertex(*p)).collect();
    let pl = |x, y, z, d| Plane::new(Vec3::new(x, y, z), d);
    // Each face wound counter-clockwise around its outward normal.
    m.add_face(s, &[v[0], v[3], v[2], v[1]], pl(0.0, 0.0, -1.0, 0.0));
    m.add_face(s, &[v[4], v[5], v[6], v[7]], pl(0.0, 0.0, 1.0, 1.0));
    m.add_face(s, &[v[0], v[1], v[5], v[4]], pl(0.0, -1.0, 0.0, 0.0));
    m.add_face(s, &[v[2], v[3], v[7], v[6]], pl(0.0, 1.0, 0.0, 1.0));
    m.add_face(s, &[v[1], v[2], v[6], v[5]], pl(1.0, 0.0, 0.0, 1.0));
    m.add_face(s, &[v[0], v[4], v[7], v[3]], pl(-1.0, 0.0, 0.0, 0.0));
    (m, s, v)
}

#[test]
fn box_euler_counts_and_radial_closure() {
    let (m, s, _v) = unit_box();
    let root = Element::Shell(s);
    let (edges, verts) = m.e_and_v_tabulate(root);
    assert_eq!(verts.len(), 8);
    assert_eq!(edges.len(), 12);
    assert_eq!(m.face_tabulate(root).len(), 6);

    // Every box edge is shared by exactly two faces.
    for e in edges {
        assert_eq!(m.radial_orbit(m.edge(e).eu).len(), 4);
    }
}

#[test]
fn face_loops_wind_ccw_around_outward_normals() {
    let (m, s, _v) = unit_box();
    let tol = Tolerance::DEFAULT;
    for &fu in &m.shell(s).faceuses {
        let n = m.fu_normal(fu);
        for &lu in &m.faceuse(fu).loopuses {
            assert_eq!(
                m.loop_is_ccw(lu, &n, &tol),
                ncad::topo::LoopOrientation::Ccw
            );
            assert_eq!(
                m.loop_is_ccw(m.loopuse(lu).mate, &n, &tol),
                ncad::topo::LoopOrientation::Cw
            );
        }
    }
}

#[test]
fn adjacent_face_planes_meet_on_the_shared_edge() {
    let (m, s, v) = unit_box();
    let tol = Tolerance::DEFAULT;
    let bottom = Plane::new(Vec3::new(0.0, 0.0, -1.0), 0.0);
    let front = Plane::new(Vec3::new(0.0, -1.0, 0.0), 0.0);
    let (min, _max) = m.model_bb().unwrap();

    let (pt, dir) = match isect_2planes(&bottom, &front, &min, &tol).unwrap() {
        PlanePlaneIsect::Line { point, dir } => (point, dir),
        other => panic!("expected a line, got {:?}", other),
    };
    // The line is the x axis; the v0-v1 edge rides it.
    let dir = dir.into_inner();
    assert!(pt.y.abs() < 1e-9 && pt.z.abs() < 1e-9);
    assert!((dir.x.abs() - 1.0).abs() < 1e-9);

    let eus = m.edgeuse_on_line_tabulate(Element::Shell(s), &pt, &dir, &tol);
    assert!(!eus.is_empty());
    for eu in eus {
        let a = m.eu_start_vertex(eu);
        let b = m.eu_end_vertex(eu);
        assert!(
            (a == v[0] && b == v[1]) || (a == v[1] && b == v[0]),
            "only the v0-v1 edge lies on the x axis"
        );
    }
}

#[test]
fn face_plane_recoverable_from_loop_points() {
    let (m, s, _v) = unit_box();
    let tol = Tolerance::DEFAULT;
    let fu = m.shell(s).faceuses[0];
    let lu = m.faceuse(fu).loopuses[0];
    let eus = match &m.loopuse(lu).children {
        LoopuseChildren::Edges(eus) => eus.clone(),
        LoopuseChildren::Vertex(_) => panic!("expected edge loop"),
    };
    let p = |i: usize| m.vertex(m.eu_start_vertex(eus[i])).point;
    let plane = Plane::from_3_points(&p(0), &p(1), &p(2), &tol).unwrap();
    assert!((plane.normal - m.fu_normal(fu)).norm() < 1e-12);

    // Newell's method agrees on plane and area.
    let (newell, area) = m.loop_plane_area(lu).unwrap();
    assert!((newell.normal - plane.normal).norm() < 1e-12);
    approx::assert_relative_eq!(area, 1.0, max_relative = 1e-12);
}

#[test]
fn segment_clips_to_model_box() {
    let (m, _s, _v) = unit_box();
    let (min, max) = m.model_bb().unwrap();
    let a = Point3::new(-3.0, 0.5, 0.5);
    let b = Point3::new(4.0, 0.5, 0.5);
    let (ca, cb) = clip_seg_rpp(&a, &b, &min, &max).unwrap();
    assert!((ca - Point3::new(0.0, 0.5, 0.5)).norm() < 1e-12);
    assert!((cb - Point3::new(1.0, 0.5, 0.5)).norm() < 1e-12);

    // A segment far outside misses.
    let far = Point3::new(5.0, 5.0, 5.0);
    assert!(clip_seg_rpp(&far, &Point3::new(6.0, 5.0, 5.0), &min, &max).is_none());
}

#[test]
fn point_and_projection_searches() {
    let (mut m, s, v) = unit_box();
    let tol = Tolerance::DEFAULT;

    assert_eq!(
        m.find_pt_in_shell(s, &Point3::new(1.0, 1.0, 1.0), &tol),
        Some(v[6])
    );
    assert_eq!(m.find_pt_in_model(&Point3::new(0.0, 1.0, 0.0), &tol), Some(v[3]));
    assert!(m.find_pt_in_shell(s, &Point3::new(0.5, 0.5, 0.5), &tol).is_none());

    // Vertices within tolerance are shared, not duplicated.
    let again = m.get_or_add_vertex(Point3::new(1.0 + 1e-5, 1.0, 1.0), &tol);
    assert_eq!(again, v[6]);

    // Nearest projected edge: looking down z, a point just outside the
    // bottom-front edge picks the v0-v1 edge.
    let e = m
        .find_e_nearest_pt2(
            Element::Shell(s),
            &Point2::new(0.5, -0.1),
            &Transform::identity(),
            &tol,
        )
        .unwrap();
    let eu = m.edge(e).eu;
    let (a, b) = (m.eu_start_vertex(eu), m.eu_end_vertex(eu));
    assert!((a == v[0] && b == v[1]) || (a == v[1] && b == v[0]));
}
