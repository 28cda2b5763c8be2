use trellis::{
    Direction, Error, LayoutOptions, LayoutResult, Point, WorkflowEdge, WorkflowNode,
    compute_layout,
};

fn nodes(ids: &[&str]) -> Vec<WorkflowNode<()>> {
    ids.iter().map(|id| WorkflowNode::new(*id, (), *id)).collect()
}

fn edges(pairs: &[(&str, &str)]) -> Vec<WorkflowEdge> {
    pairs
        .iter()
        .map(|(s, t)| WorkflowEdge::new(*s, *t))
        .collect()
}

fn diamond() -> (Vec<WorkflowNode<()>>, Vec<WorkflowEdge>) {
    (
        nodes(&["A", "B", "C", "D"]),
        edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]),
    )
}

fn layout_with(
    ns: &[WorkflowNode<()>],
    es: &[WorkflowEdge],
    direction: Direction,
) -> LayoutResult {
    compute_layout(ns, es, &LayoutOptions::default().with_direction(direction)).unwrap()
}

fn top_left(r: &LayoutResult, id: &str) -> (f64, f64) {
    let n = r.node(id).unwrap();
    (n.x, n.y)
}

/// An approval workflow with a retry loop, a shortcut edge, parallel transitions, a self-loop
/// and an unconnected step.
fn workflow() -> (Vec<WorkflowNode<&'static str>>, Vec<WorkflowEdge>) {
    let ns = vec![
        WorkflowNode::new("start", "trigger", "Start"),
        WorkflowNode::new("validate", "action", "Validate input"),
        WorkflowNode::new("approve", "decision", "Approve"),
        WorkflowNode::new("reject", "action", "Reject").with_size(120.0, 90.0),
        WorkflowNode::new("notify", "action", "Notify"),
        WorkflowNode::new("archive", "action", "Archive"),
        WorkflowNode::new("end", "terminal", "End"),
        WorkflowNode::new("audit", "action", "Audit log"),
    ];
    let es = vec![
        WorkflowEdge::new("start", "validate"),
        WorkflowEdge::new("validate", "approve").with_label("ok"),
        WorkflowEdge::new("validate", "reject").with_label("invalid"),
        WorkflowEdge::new("reject", "validate").with_label("retry"),
        WorkflowEdge::new("approve", "notify"),
        WorkflowEdge::new("approve", "notify").with_id("approve-notify-cc"),
        WorkflowEdge::new("reject", "notify"),
        WorkflowEdge::new("notify", "end"),
        WorkflowEdge::new("start", "end").with_label("skip"),
        WorkflowEdge::new("approve", "archive"),
        WorkflowEdge::new("archive", "end"),
        WorkflowEdge::new("notify", "notify"),
    ];
    (ns, es)
}

#[test]
fn layout_places_a_diamond_top_to_bottom() {
    let (ns, es) = diamond();
    let r = compute_layout(&ns, &es, &LayoutOptions::default()).unwrap();

    assert_eq!(r.direction, Direction::TB);
    assert_eq!(top_left(&r, "A"), (100.0, 0.0));
    assert_eq!(top_left(&r, "B"), (0.0, 120.0));
    assert_eq!(top_left(&r, "C"), (200.0, 120.0));
    assert_eq!(top_left(&r, "D"), (100.0, 240.0));
    assert_eq!((r.width, r.height), (360.0, 300.0));

    assert_eq!(r.node("B").unwrap().rank, 1);
    assert_eq!(r.node("B").unwrap().order, 0);
    assert_eq!(r.node("C").unwrap().order, 1);

    let bd = r.edge("B->D").unwrap();
    assert!(!bd.feedback);
    assert_eq!(
        bd.waypoints,
        vec![
            Point::new(80.0, 180.0),
            Point::new(80.0, 210.0),
            Point::new(180.0, 210.0),
            Point::new(180.0, 240.0),
        ]
    );
}

#[test]
fn layout_places_a_diamond_left_to_right() {
    let (ns, es) = diamond();
    let r = layout_with(&ns, &es, Direction::LR);

    assert_eq!(top_left(&r, "A"), (0.0, 50.0));
    assert_eq!(top_left(&r, "B"), (220.0, 0.0));
    assert_eq!(top_left(&r, "C"), (220.0, 100.0));
    assert_eq!(top_left(&r, "D"), (440.0, 50.0));
    assert_eq!((r.width, r.height), (600.0, 160.0));

    let a = r.node("A").unwrap();
    assert_eq!((a.width, a.height), (160.0, 60.0));
}

#[test]
fn layout_bottom_to_top_mirrors_top_to_bottom() {
    let (ns, es) = diamond();
    let tb = layout_with(&ns, &es, Direction::TB);
    let bt = layout_with(&ns, &es, Direction::BT);

    assert_eq!((tb.width, tb.height), (bt.width, bt.height));
    for n in &tb.nodes {
        let m = bt.node(&n.id).unwrap();
        assert_eq!(m.x, n.x);
        assert_eq!(m.y, tb.height - n.y - n.height);
    }
    assert_eq!(top_left(&bt, "D"), (100.0, 0.0));
}

#[test]
fn layout_right_to_left_mirrors_left_to_right() {
    let (ns, es) = diamond();
    let lr = layout_with(&ns, &es, Direction::LR);
    let rl = layout_with(&ns, &es, Direction::RL);

    for n in &lr.nodes {
        let m = rl.node(&n.id).unwrap();
        assert_eq!(m.y, n.y);
        assert_eq!(m.x, lr.width - n.x - n.width);
    }
    assert_eq!(top_left(&rl, "A"), (440.0, 50.0));
}

#[test]
fn layout_terminates_on_a_cycle_and_flags_the_back_edge() {
    let ns = nodes(&["A", "B", "C"]);
    let es = edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let r = compute_layout(&ns, &es, &LayoutOptions::default()).unwrap();

    let ranks: Vec<usize> = ["A", "B", "C"]
        .iter()
        .map(|id| r.node(id).unwrap().rank)
        .collect();
    assert_eq!(ranks, vec![0, 1, 2]);
    assert!(r.edge("C->A").unwrap().feedback);
    assert!(!r.edge("A->B").unwrap().feedback);

    assert_eq!((r.width, r.height), (180.0, 330.0));
    assert_eq!(top_left(&r, "A"), (0.0, 15.0));
    assert_eq!(
        r.edge("C->A").unwrap().waypoints,
        vec![
            Point::new(140.0, 315.0),
            Point::new(140.0, 330.0),
            Point::new(180.0, 330.0),
            Point::new(180.0, 0.0),
            Point::new(140.0, 0.0),
            Point::new(140.0, 15.0),
        ]
    );
}

#[test]
fn layout_routes_a_self_loop_around_its_node() {
    let ns = nodes(&["a"]);
    let es = edges(&[("a", "a")]);
    let r = compute_layout(&ns, &es, &LayoutOptions::default()).unwrap();

    let e = r.edge("a->a").unwrap();
    assert!(e.feedback);
    assert_eq!(
        e.waypoints,
        vec![
            Point::new(140.0, 75.0),
            Point::new(140.0, 90.0),
            Point::new(180.0, 90.0),
            Point::new(180.0, 0.0),
            Point::new(140.0, 0.0),
            Point::new(140.0, 15.0),
        ]
    );
    assert_eq!((r.width, r.height), (180.0, 90.0));
}

#[test]
fn layout_switches_to_left_to_right_for_many_isolated_nodes() {
    let ids: Vec<String> = (0..30).map(|i| format!("n{i:02}")).collect();
    let ns: Vec<WorkflowNode<()>> = ids.iter().map(|id| WorkflowNode::new(id, (), "")).collect();
    let opts = LayoutOptions::default().with_auto_direction(true);
    let r = compute_layout(&ns, &[], &opts).unwrap();

    assert_eq!(r.direction, Direction::LR);
    for (i, id) in ids.iter().enumerate() {
        let n = r.node(id).unwrap();
        assert_eq!(n.rank, 0);
        assert_eq!(n.order, i);
        assert_eq!((n.x, n.y), (0.0, i as f64 * 100.0));
    }
    assert_eq!((r.width, r.height), (160.0, 2960.0));
}

#[test]
fn layout_auto_direction_respects_threshold_and_explicit_direction() {
    let (ns, es) = diamond();

    let auto = LayoutOptions::default().with_auto_direction(true);
    assert_eq!(compute_layout(&ns, &es, &auto).unwrap().direction, Direction::TB);

    let low = LayoutOptions {
        auto_direction_threshold: 4,
        ..auto.clone()
    };
    assert_eq!(compute_layout(&ns, &es, &low).unwrap().direction, Direction::LR);

    let explicit = low.with_direction(Direction::BT);
    assert_eq!(
        compute_layout(&ns, &es, &explicit).unwrap().direction,
        Direction::BT
    );
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let ns: Vec<WorkflowNode<()>> = Vec::new();
    let r = compute_layout(&ns, &[], &LayoutOptions::default()).unwrap();
    assert_eq!(r, LayoutResult::empty(Direction::TB));

    let r = layout_with(&ns, &[], Direction::RL);
    assert_eq!(r.direction, Direction::RL);
    assert!(r.nodes.is_empty() && r.edges.is_empty());
    assert_eq!((r.width, r.height), (0.0, 0.0));
}

#[test]
fn layout_fails_on_a_dangling_edge() {
    let ns = nodes(&["a", "b"]);
    let es = edges(&[("a", "b"), ("b", "zzz")]);
    let err = compute_layout(&ns, &es, &LayoutOptions::default()).unwrap_err();

    assert!(matches!(err, Error::DanglingEdge { ref node, .. } if node == "zzz"));
}

#[test]
fn layout_fails_on_invalid_options() {
    let (ns, es) = diamond();
    let opts = LayoutOptions {
        node_spacing: -4.0,
        ..Default::default()
    };
    assert!(matches!(
        compute_layout(&ns, &es, &opts),
        Err(Error::InvalidOptions { .. })
    ));
}

#[test]
fn layout_is_deterministic() {
    let (ns, es) = workflow();
    let opts = LayoutOptions::default();
    let first = compute_layout(&ns, &es, &opts).unwrap();
    let second = compute_layout(&ns, &es, &opts).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn layout_ignores_input_order() {
    let (ns, es) = workflow();
    let mut ns_rev = ns.clone();
    ns_rev.reverse();
    // Keep the two parallel approve->notify edges in their relative order so that the
    // generated ids match.
    let mut es_rev: Vec<WorkflowEdge> = es.iter().filter(|e| e.source != "approve").cloned().collect();
    es_rev.reverse();
    es_rev.extend(es.iter().filter(|e| e.source == "approve").cloned());

    let opts = LayoutOptions::default();
    let a = compute_layout(&ns, &es, &opts).unwrap();
    let b = compute_layout(&ns_rev, &es_rev, &opts).unwrap();

    assert_eq!((a.width, a.height), (b.width, b.height));
    for n in &a.nodes {
        assert_eq!(Some(n), b.node(&n.id), "node {}", n.id);
    }
    for e in &a.edges {
        assert_eq!(Some(e), b.edge(&e.id), "edge {}", e.id);
    }
}

#[test]
fn layout_keeps_input_order_and_labels_in_the_result() {
    let (ns, es) = workflow();
    let r = compute_layout(&ns, &es, &LayoutOptions::default()).unwrap();

    let node_ids: Vec<&str> = r.nodes.iter().map(|n| n.id.as_str()).collect();
    let input_ids: Vec<&str> = ns.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, input_ids);

    assert_eq!(r.edges.len(), es.len());
    assert_eq!(r.edges[1].label.as_deref(), Some("ok"));
    assert_eq!(r.edges[0].label, None);
    assert_eq!(r.edges[5].id, "approve-notify-cc");
    assert_eq!(r.edges[4].id, "approve->notify");

    let reject = r.node("reject").unwrap();
    assert_eq!((reject.width, reject.height), (120.0, 90.0));
}

#[test]
fn layout_nodes_never_overlap() {
    let (ns, es) = workflow();
    for direction in [Direction::TB, Direction::LR, Direction::BT, Direction::RL] {
        let r = layout_with_kinds(&ns, &es, direction);
        for (i, a) in r.nodes.iter().enumerate() {
            for b in &r.nodes[i + 1..] {
                assert!(!a.overlaps(b), "{direction:?}: {} overlaps {}", a.id, b.id);
            }
        }
    }
}

#[test]
fn layout_forward_edges_point_along_the_direction() {
    let (ns, es) = workflow();
    for direction in [Direction::TB, Direction::LR, Direction::BT, Direction::RL] {
        let r = layout_with_kinds(&ns, &es, direction);
        for e in r.edges.iter().filter(|e| !e.feedback) {
            let s = r.node(&e.source).unwrap();
            let t = r.node(&e.target).unwrap();
            assert!(t.rank > s.rank, "{direction:?}: {}", e.id);
            let ok = match direction {
                Direction::TB => t.y >= s.y + s.height,
                Direction::BT => t.y + t.height <= s.y,
                Direction::LR => t.x >= s.x + s.width,
                Direction::RL => t.x + t.width <= s.x,
            };
            assert!(ok, "{direction:?}: {} runs against the direction", e.id);
        }
    }
}

#[test]
fn layout_fits_everything_in_the_bounding_box() {
    let (ns, es) = workflow();
    for direction in [Direction::TB, Direction::LR, Direction::BT, Direction::RL] {
        let r = layout_with_kinds(&ns, &es, direction);
        for n in &r.nodes {
            assert!(n.x >= 0.0 && n.y >= 0.0, "{direction:?}: {}", n.id);
            assert!(n.x + n.width <= r.width && n.y + n.height <= r.height);
        }
        for p in r.edges.iter().flat_map(|e| &e.waypoints) {
            assert!((0.0..=r.width).contains(&p.x) && (0.0..=r.height).contains(&p.y));
        }
    }
}

#[test]
fn layout_result_serializes_in_camel_case() {
    let (ns, es) = diamond();
    let json = compute_layout(&ns, &es, &LayoutOptions::default())
        .unwrap()
        .to_json()
        .unwrap();

    assert!(json.contains(r#""direction":"TB""#));
    assert!(json.contains(r#""waypoints":[{"x":"#));
    assert!(json.contains(r#""feedback":false"#));
    assert!(!json.contains("\"label\""));
}

fn layout_with_kinds(
    ns: &[WorkflowNode<&'static str>],
    es: &[WorkflowEdge],
    direction: Direction,
) -> LayoutResult {
    compute_layout(ns, es, &LayoutOptions::default().with_direction(direction)).unwrap()
}
