// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `vista_navigation` crate.
//!
//! These drive the engines the way a host does, through `Navigator`, and
//! check that the view never jumps when engines change hands.

use kurbo::{Point, Vec2};
use vista_navigation::{
    AutoMode, AutoNavigation, CursorFollowNavigation, FlyForces, FlyNavigation, GraphEdge,
    GraphNode, ManualControl, ManualNavigation, NavigationEngine, Navigator, PositionedGraph,
};
use vista_view2d::{ViewTransform, ViewportInfo};

const VIEWPORT: ViewportInfo = ViewportInfo::new(900.0, 600.0);
const DT: f64 = 1.0 / 60.0;

/// A host-side graph that only implements the required trait methods.
struct Chain {
    positions: Vec<Point>,
    cursor: Option<usize>,
}

impl PositionedGraph<usize> for Chain {
    fn nodes(&self) -> impl Iterator<Item = GraphNode<usize>> {
        self.positions
            .iter()
            .enumerate()
            .map(|(id, &position)| GraphNode {
                id,
                position,
                is_cursor: self.cursor == Some(id),
            })
    }

    fn edges(&self) -> impl Iterator<Item = GraphEdge<usize>> {
        (1..self.positions.len()).map(|i| GraphEdge {
            source: i - 1,
            target: i,
            is_virtual: false,
        })
    }
}

fn chain(cursor: Option<usize>) -> Chain {
    Chain {
        positions: vec![
            Point::new(0.0, 0.0),
            Point::new(150.0, 0.0),
            Point::new(150.0, 90.0),
            Point::new(400.0, 90.0),
        ],
        cursor,
    }
}

fn engines() -> Vec<NavigationEngine<usize>> {
    let mut fly = FlyNavigation::new();
    fly.set_force(FlyForces::RIGHT | FlyForces::ZOOM_IN, true);
    vec![
        ManualNavigation::new().into(),
        CursorFollowNavigation::new().into(),
        fly.into(),
        AutoNavigation::new().into(),
    ]
}

#[test]
fn provided_trait_methods_work_on_minimal_graphs() {
    let graph = chain(Some(2));
    assert_eq!(graph.cursor(), Some(2));
    assert_eq!(graph.position(&3), Some(Point::new(400.0, 90.0)));
    assert_eq!(graph.position(&9), None);
}

#[test]
fn every_swap_receives_the_last_state() {
    let graph = chain(Some(1));
    let count = engines().len();
    for i in 0..count {
        for j in 0..count {
            let mut from = engines();
            let mut to = engines();
            let mut nav: Navigator<usize> = Navigator::new(from.remove(i), ViewTransform::IDENTITY);
            for _ in 0..20 {
                nav.step(&graph, VIEWPORT, DT, false);
            }
            let handed_over = *nav.state();
            nav.set_engine(to.remove(j));
            assert_eq!(*nav.state(), handed_over);

            // A zero-length first frame must not move the camera.
            let first = nav.step(&graph, VIEWPORT, 0.0, false);
            assert!(
                first.transform.approx_eq(&handed_over.transform, 1e-6),
                "swap {i} -> {j} jumped: {:?} vs {:?}",
                first.transform,
                handed_over.transform,
            );
        }
    }
}

#[test]
fn views_beyond_the_scale_bounds_survive_a_swap() {
    let graph = chain(Some(1));
    for scale in [40.0, 0.01] {
        let inherited = ViewTransform::from_view(Point::new(150.0, 0.0), scale, 0.3, VIEWPORT);
        for engine in engines() {
            let mut nav: Navigator<usize> = Navigator::new(ManualNavigation::new(), inherited);
            nav.step(&graph, VIEWPORT, DT, false);
            let kind = engine.kind();
            nav.set_engine(engine);
            let first = nav.step(&graph, VIEWPORT, 0.0, false);
            assert!(
                first.transform.approx_eq(&inherited, 1e-6),
                "{kind:?} jumped from scale {scale} to {}",
                first.transform.scale(),
            );
        }
    }
}

#[test]
fn manual_zoom_about_a_point() {
    let graph = chain(None);
    let mut nav: Navigator<usize> =
        Navigator::new(ManualNavigation::new(), ViewTransform::IDENTITY);
    let anchor = Point::new(100.0, 100.0);
    assert_eq!(nav.transform().world_to_screen(anchor), anchor);

    nav.manual().unwrap().zoom(anchor, 2.0);
    let state = nav.step(&graph, VIEWPORT, DT, false);
    assert_eq!(state.transform.a, 2.0);
    assert_eq!(state.transform.d, 2.0);
    assert_eq!(state.transform.world_to_screen(anchor), anchor);
}

#[test]
fn manual_momentum_never_speeds_up() {
    let graph = chain(None);
    let mut engine = ManualNavigation::new();
    engine.set_velocity(Vec2::new(-1200.0, 300.0));
    let mut nav: Navigator<usize> = Navigator::new(engine, ViewTransform::IDENTITY);

    let mut last_tx = 0.0;
    let mut last_step = f64::INFINITY;
    for _ in 0..600 {
        let tx = nav.step(&graph, VIEWPORT, DT, false).transform.tx;
        let step = last_tx - tx;
        assert!(step >= 0.0, "momentum reversed");
        assert!(step <= last_step, "momentum accelerated");
        last_step = step;
        last_tx = tx;
    }
    // Long since stopped.
    assert_eq!(last_step, 0.0);
}

#[test]
fn follow_scale_for_neighbor_at_150() {
    let mut graph = chain(Some(0));
    graph.positions.truncate(2);
    let mut nav: Navigator<usize> =
        Navigator::new(CursorFollowNavigation::new(), ViewTransform::IDENTITY);
    for _ in 0..900 {
        nav.step(&graph, VIEWPORT, DT, false);
    }
    // world size 3 * 150 = 450 against a 600px short side.
    assert!((nav.transform().scale() - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn follow_holds_still_during_node_drag() {
    let graph = chain(Some(3));
    let mut nav: Navigator<usize> =
        Navigator::new(CursorFollowNavigation::new(), ViewTransform::IDENTITY);
    nav.step(&graph, VIEWPORT, DT, false);
    let held = nav.transform();
    for _ in 0..30 {
        nav.step(&graph, VIEWPORT, DT, true);
    }
    assert_eq!(nav.transform(), held);
    nav.step(&graph, VIEWPORT, DT, false);
    assert_ne!(nav.transform(), held);
}

#[test]
fn fly_right_approaches_600_px_per_second() {
    let graph = chain(None);
    let mut nav: Navigator<usize> = Navigator::new(FlyNavigation::new(), ViewTransform::IDENTITY);
    nav.fly().unwrap().set_force(FlyForces::RIGHT, true);

    let mut speeds = Vec::new();
    for _ in 0..5000 {
        nav.step(&graph, VIEWPORT, 0.001, false);
        speeds.push(nav.fly().unwrap().velocity().x);
    }
    assert!(
        speeds.windows(2).all(|w| w[1] >= w[0]),
        "speed should rise monotonically"
    );
    let terminal = speeds[speeds.len() - 1];
    assert!((terminal - 600.0).abs() / 600.0 < 0.01, "terminal speed {terminal}");
}

#[test]
fn fly_selects_nearest_node_as_it_passes() {
    let graph = chain(None);
    let start = ViewTransform::from_view(Point::new(0.0, 0.0), 1.0, 0.0, VIEWPORT);
    let mut nav: Navigator<usize> = Navigator::new(FlyNavigation::new(), start);
    nav.fly().unwrap().set_force(FlyForces::RIGHT, true);

    nav.step(&graph, VIEWPORT, DT, false);
    assert_eq!(nav.fly().unwrap().selected(), Some(&0));
    for _ in 0..120 {
        nav.step(&graph, VIEWPORT, DT, false);
    }
    assert_ne!(nav.fly().unwrap().selected(), Some(&0));
}

#[test]
fn auto_hands_off_without_jumps() {
    let mut graph = chain(None);
    let mut nav: Navigator<usize> = Navigator::new(AutoNavigation::new(), ViewTransform::IDENTITY);
    for _ in 0..10 {
        nav.step(&graph, VIEWPORT, DT, false);
    }

    // The user grabs the view.
    let before = nav.transform();
    nav.manual().unwrap().pan(Vec2::new(12.0, -4.0));
    let panned = nav.step(&graph, VIEWPORT, DT, false).transform;
    assert!((panned.tx - before.tx - 12.0).abs() < 1e-9);
    assert!((panned.ty - before.ty + 4.0).abs() < 1e-9);

    // A fresh cursor hands control back to following, from the panned view.
    graph.cursor = Some(2);
    let resumed = nav.step(&graph, VIEWPORT, 0.0, false).transform;
    assert!(resumed.approx_eq(&panned, 1e-6));
    let NavigationEngine::Auto(auto) = nav.engine() else {
        panic!("engine changed kind");
    };
    assert_eq!(auto.mode(), AutoMode::Follow);
}
