use super::*;
use crate::gen::{draw_figure, RandomFigureCfg, ReplayToken};
use crate::geom::Bounds;
use crate::registry::PointDatabase;
use proptest::prelude::*;

fn db_with(points: &[(&str, f64, f64)]) -> PointDatabase {
    let mut db = PointDatabase::new();
    for &(name, x, y) in points {
        db.put(name, x, y);
    }
    db
}

fn s(db: &PointDatabase, a: &str, b: &str) -> Segment {
    Segment::new(db.lookup(a).unwrap(), db.lookup(b).unwrap())
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn square_has_no_implicit_points_or_composites() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0), ("C", 3.0, 3.0), ("D", 3.0, 0.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")])
        .unwrap();
    assert!(pp.implicit_points().is_empty());
    assert!(pp.implicit_segments().is_empty());
    assert_eq!(pp.minimal_segments().len(), 4);
    assert!(pp.minimal_segments().contains(&s(&db, "A", "B")));
    assert!(pp.minimal_segments().contains(&s(&db, "D", "A")));
    assert!(!pp.minimal_segments().contains(&s(&db, "A", "C")));
    assert!(pp.non_minimal_segments().is_empty());
    assert_eq!(pp.database().len(), 4);
}

#[test]
fn disjoint_collinear_segments_never_fuse() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0), ("C", 0.0, 5.0), ("D", 0.0, 8.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("C", "D")]).unwrap();
    assert!(pp.implicit_points().is_empty());
    assert_eq!(pp.minimal_segments().len(), 2);
    assert!(pp.non_minimal_segments().is_empty());
    assert!(!pp.database().contains(&s(&db, "A", "D")));
    assert!(!pp.database().contains(&s(&db, "A", "C")));
}

#[test]
fn nearly_touching_collinear_segments_stay_apart() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0), ("C", 0.0, 3.001), ("D", 0.0, 8.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("C", "D")]).unwrap();
    assert_eq!(pp.minimal_segments().len(), 2);
    assert!(pp.non_minimal_segments().is_empty());
}

#[test]
fn collinear_chain_closes_to_all_composites() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0), ("C", 0.0, 6.0), ("D", 0.0, 9.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("B", "C"), ("C", "D")]).unwrap();
    assert_eq!(pp.minimal_segments().len(), 3);
    let expected: BTreeSet<Segment> =
        [s(&db, "A", "C"), s(&db, "B", "D"), s(&db, "A", "D")].into_iter().collect();
    assert_eq!(pp.non_minimal_segments(), &expected);
    assert_eq!(pp.database().len(), 6);
}

#[test]
fn chain_with_bend_only_fuses_collinear_part() {
    let mut db = db_with(&[
        ("A", 0.0, 0.0),
        ("B", 0.0, 3.0),
        ("C", 0.0, 6.0),
        ("D", 0.0, 9.0),
        ("E", 0.5, 9.0),
    ]);
    let minimal: BTreeSet<Segment> = [
        s(&db, "A", "B"),
        s(&db, "B", "C"),
        s(&db, "C", "D"),
        s(&db, "D", "E"),
    ]
    .into_iter()
    .collect();
    let non_minimal = construct_non_minimal_segments(&minimal);
    assert_eq!(non_minimal.len(), 3);
    assert!(non_minimal.contains(&s(&db, "A", "C")));
    assert!(non_minimal.contains(&s(&db, "A", "D")));
    assert!(non_minimal.contains(&s(&db, "B", "D")));
    assert!(!non_minimal.contains(&s(&db, "A", "B")));
    assert!(!non_minimal.contains(&s(&db, "D", "E")));
}

#[test]
fn crossing_x_splits_both_segments() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 4.0, 4.0), ("C", 0.0, 4.0), ("D", 4.0, 0.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("C", "D")]).unwrap();
    let ab = s(&db, "A", "B");
    let cd = s(&db, "C", "D");

    assert_eq!(pp.implicit_points().len(), 1);
    let x = *pp.implicit_points().iter().next().unwrap();
    assert_eq!(x, pt(2.0, 2.0));
    assert!(ab.lies_between(x, Bounds::Exclusive));
    assert!(cd.lies_between(x, Bounds::Exclusive));
    assert!(db.contains(&x));
    assert_eq!(db.name_of(&x), None);

    assert_eq!(pp.implicit_segments().len(), 4);
    assert_eq!(pp.minimal_segments().len(), 4);
    assert!(!pp.minimal_segments().contains(&ab));
    assert!(!pp.minimal_segments().contains(&cd));
    // the originals come back as composites of their two halves
    let expected: BTreeSet<Segment> = [ab, cd].into_iter().collect();
    assert_eq!(pp.non_minimal_segments(), &expected);
}

#[test]
fn small_scale_x_still_splits() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 5e-4, 5e-4), ("C", 0.0, 5e-4), ("D", 5e-4, 0.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("C", "D")]).unwrap();
    assert_eq!(pp.implicit_points().len(), 1);
    assert!(pp.implicit_points().contains(&pt(2.5e-4, 2.5e-4)));
    assert_eq!(pp.minimal_segments().len(), 4);
    let expected: BTreeSet<Segment> = [s(&db, "A", "B"), s(&db, "C", "D")].into_iter().collect();
    assert_eq!(pp.non_minimal_segments(), &expected);
}

#[test]
fn fully_connected_pentagon() {
    //                D(3,7)
    //   E(-2,4)
    //                         C(6,3)
    //          A(2,0)   B(4,0)
    // All 10 sides and diagonals; the 5 diagonals cross pairwise inside.
    let mut db = db_with(&[
        ("A", 2.0, 0.0),
        ("B", 4.0, 0.0),
        ("C", 6.0, 3.0),
        ("D", 3.0, 7.0),
        ("E", -2.0, 4.0),
    ]);
    let names = ["A", "B", "C", "D", "E"];
    let mut pairs = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            pairs.push((*a, *b));
        }
    }
    let pp = Preprocessor::from_names(&mut db, &pairs).unwrap();

    let ac_bd = pt(118.0 / 31.0, 42.0 / 31.0);
    let ac_be = pt(50.0 / 17.0, 12.0 / 17.0);
    let ad_be = pt(50.0 / 23.0, 28.0 / 23.0);
    let ad_ce = pt(142.0 / 57.0, 196.0 / 57.0);
    let bd_ce = pt(194.0 / 55.0, 182.0 / 55.0);
    let expected_points: BTreeSet<Point> =
        [ac_bd, ac_be, ad_be, ad_ce, bd_ce].into_iter().collect();
    assert_eq!(pp.implicit_points(), &expected_points);

    let [a, b, c, d, e] = names.map(|n| db.lookup(n).unwrap());
    let seg = Segment::new;
    let expected_pieces: BTreeSet<Segment> = [
        seg(a, ac_be),
        seg(ac_be, ac_bd),
        seg(ac_bd, c),
        seg(a, ad_be),
        seg(ad_be, ad_ce),
        seg(ad_ce, d),
        seg(b, ac_bd),
        seg(ac_bd, bd_ce),
        seg(bd_ce, d),
        seg(b, ac_be),
        seg(ac_be, ad_be),
        seg(ad_be, e),
        seg(c, bd_ce),
        seg(bd_ce, ad_ce),
        seg(ad_ce, e),
    ]
    .into_iter()
    .collect();
    assert_eq!(pp.implicit_segments(), &expected_pieces);

    let mut expected_minimal = expected_pieces.clone();
    expected_minimal.extend([seg(a, b), seg(b, c), seg(c, d), seg(d, e), seg(e, a)]);
    assert_eq!(pp.minimal_segments(), &expected_minimal);

    let expected_composites: BTreeSet<Segment> = [
        seg(a, ac_bd),
        seg(ac_be, c),
        seg(a, c),
        seg(a, ad_ce),
        seg(ad_be, d),
        seg(a, d),
        seg(b, bd_ce),
        seg(ac_bd, d),
        seg(b, d),
        seg(b, ad_be),
        seg(ac_be, e),
        seg(b, e),
        seg(c, ad_ce),
        seg(bd_ce, e),
        seg(c, e),
    ]
    .into_iter()
    .collect();
    assert_eq!(pp.non_minimal_segments(), &expected_composites);
    assert_eq!(pp.database().len(), 35);
}

#[test]
fn endpoints_offered_as_implicit_points_do_not_split() {
    let db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0)]);
    let given = vec![s(&db, "A", "B")];
    let vertices: BTreeSet<Point> = [pt(0.0, 0.0), pt(0.0, 3.0)].into_iter().collect();
    assert!(compute_implicit_base_segments(&given, &vertices).is_empty());
    let minimal = identify_all_minimal_segments(&vertices, &given, &BTreeSet::new());
    assert_eq!(minimal.len(), 1);
}

#[test]
fn explicit_composite_stays_minimal_and_is_not_reemitted() {
    // AC is drawn by the user as well as its halves; B is explicit, not implicit.
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 2.0, 0.0), ("C", 4.0, 0.0)]);
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("B", "C"), ("A", "C")]).unwrap();
    assert_eq!(pp.minimal_segments().len(), 3);
    assert!(pp.non_minimal_segments().is_empty());
    assert_eq!(pp.database().len(), 3);
}

#[test]
fn make_segments_joins_consecutive_points() {
    let chain = [pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)];
    let out = make_segments(&chain);
    assert_eq!(out.len(), 2);
    assert!(out.contains(&Segment::new(pt(0.0, 0.0), pt(1.0, 0.0))));
    assert!(out.contains(&Segment::new(pt(1.0, 0.0), pt(2.0, 0.0))));
    assert!(make_segments(&[pt(0.0, 0.0)]).is_empty());
}

#[test]
fn fuse_rules() {
    let ab = Segment::new(pt(0.0, 0.0), pt(0.0, 3.0));
    let bc = Segment::new(pt(0.0, 6.0), pt(0.0, 3.0));
    let ac = Segment::new(pt(0.0, 0.0), pt(0.0, 6.0));
    let bend = Segment::new(pt(0.0, 3.0), pt(2.0, 3.0));
    assert_eq!(fuse(&ab, &bc), Some(ac));
    assert_eq!(fuse(&bc, &ab), Some(ac));
    assert_eq!(fuse(&ab, &ab), None);
    // same direction from A: AB lies on AC
    assert_eq!(fuse(&ab, &ac), None);
    assert_eq!(fuse(&ac, &ab), None);
    assert_eq!(fuse(&ab, &bend), None);
    // fused endpoints are the outer extremes whatever the input orientation
    let fused = fuse(&bc, &ab).unwrap();
    assert_eq!(fused.ordered(), (pt(0.0, 0.0), pt(0.0, 6.0)));
}

#[test]
fn near_vertical_chain_splits_in_order() {
    // x drifts by 2e-7 over the run, so the endpoints fall in different
    // x cells of the EPS grid while the interior points straddle them
    let a = pt(0.6e-6, 0.0);
    let b = pt(0.4e-6, 10.0);
    let seg = Segment::new(a, b);
    let p2 = pt(0.56e-6, 2.0);
    let p8 = pt(0.44e-6, 8.0);
    let implicit: BTreeSet<Point> = [p2, p8].into_iter().collect();

    let pieces = compute_implicit_base_segments(&[seg], &implicit);
    let expected: BTreeSet<Segment> = [
        Segment::new(a, p2),
        Segment::new(p2, p8),
        Segment::new(p8, b),
    ]
    .into_iter()
    .collect();
    assert_eq!(pieces, expected);
    assert!(!pieces.contains(&seg));

    let composites = construct_non_minimal_segments(&pieces);
    let expected: BTreeSet<Segment> = [Segment::new(a, p8), Segment::new(p2, b), seg]
        .into_iter()
        .collect();
    assert_eq!(composites, expected);
}

#[test]
fn zero_length_and_duplicate_given_segments_are_dropped() {
    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 0.0, 3.0)]);
    let a = db.lookup("A").unwrap();
    let b = db.lookup("B").unwrap();
    let pp = Preprocessor::new(&mut db, [Segment::new(a, a), Segment::new(a, b), Segment::new(b, a)]);
    assert_eq!(pp.given_segments(), &[Segment::new(a, b)]);
    assert_eq!(pp.database().len(), 1);
}

#[test]
fn unregistered_endpoints_are_registered_first() {
    let mut db = PointDatabase::new();
    let pp = Preprocessor::new(&mut db, [Segment::new(pt(0.0, 0.0), pt(1.0, 1.0))]);
    assert_eq!(db.len(), 2);
    assert!(pp
        .database()
        .iter()
        .all(|seg| db.contains(&seg.p1()) && db.contains(&seg.p2())));
}

#[test]
fn builder_rejects_absent_inputs() {
    let err = Preprocessor::builder::<PointDatabase>()
        .segments(Vec::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let mut db = PointDatabase::new();
    let err = Preprocessor::builder().points(&mut db).build().unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    // nothing was registered
    assert!(db.is_empty());

    let mut db = db_with(&[("A", 0.0, 0.0), ("B", 1.0, 0.0)]);
    let ab = s(&db, "A", "B");
    let pp = Preprocessor::builder().points(&mut db).segments([ab]).build().unwrap();
    assert_eq!(pp.minimal_segments().len(), 1);
}

#[test]
fn unknown_point_name_fails_whole_run() {
    let mut db = db_with(&[("A", 0.0, 0.0)]);
    let err = Preprocessor::from_names(&mut db, &[("A", "Q")]).unwrap_err();
    assert_eq!(err, Error::NotFound("Q".into()));
}

#[test]
fn crossings_through_one_point_register_once() {
    // three segments through (2,2): one implicit point, six pieces
    let mut db = db_with(&[
        ("A", 0.0, 0.0),
        ("B", 4.0, 4.0),
        ("C", 0.0, 4.0),
        ("D", 4.0, 0.0),
        ("E", 2.0, 0.0),
        ("F", 2.0, 4.0),
    ]);
    let before = db.len();
    let pp = Preprocessor::from_names(&mut db, &[("A", "B"), ("C", "D"), ("E", "F")]).unwrap();
    assert_eq!(pp.implicit_points().len(), 1);
    assert_eq!(db.len(), before + 1);
    assert_eq!(pp.minimal_segments().len(), 6);
    assert_eq!(pp.non_minimal_segments().len(), 3);
}

fn chain_points(n: usize) -> Vec<Point> {
    (0..n).map(|i| pt(i as f64, 2.0 * i as f64)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn collinear_chain_closure_is_order_independent(
        n in 3usize..8,
        order in any::<u64>(),
    ) {
        let pts = chain_points(n);
        let mut pieces: Vec<Segment> =
            pts.windows(2).map(|w| Segment::new(w[0], w[1])).collect();
        // deterministic shuffle per case
        let len = pieces.len();
        let mut state = order;
        for i in (1..len).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            pieces.swap(i, (state >> 33) as usize % (i + 1));
        }
        let mut db = PointDatabase::new();
        let pp = Preprocessor::new(&mut db, pieces);
        prop_assert_eq!(pp.minimal_segments().len(), n - 1);
        prop_assert_eq!(pp.non_minimal_segments().len(), n * (n - 1) / 2 - (n - 1));
        for i in 0..n {
            for j in i + 2..n {
                prop_assert!(pp.non_minimal_segments().contains(&Segment::new(pts[i], pts[j])));
            }
        }
    }

    #[test]
    fn random_figures_keep_closure_invariants(seed in 0u64..1_000, index in 0u64..4) {
        let cfg = RandomFigureCfg { points: 7, segments: 9, extent: 4 };
        let (mut db, given) = draw_figure(cfg, ReplayToken::new(seed, index));
        let pp = Preprocessor::new(&mut db, given);

        // disjoint, and the database is exactly the union
        prop_assert!(pp.minimal_segments().is_disjoint(pp.non_minimal_segments()));
        prop_assert_eq!(
            pp.database().len(),
            pp.minimal_segments().len() + pp.non_minimal_segments().len()
        );
        for seg in pp.database().iter() {
            prop_assert!(!seg.is_degenerate());
            prop_assert!(db.contains(&seg.p1()) && db.contains(&seg.p2()));
        }
        for x in pp.implicit_points() {
            prop_assert_eq!(db.get(x), Some(*x));
        }
        // composites contain at least two minimal pieces
        for c in pp.non_minimal_segments() {
            let pieces = pp.minimal_segments().iter().filter(|m| c.has_subsegment(m)).count();
            prop_assert!(pieces >= 2);
        }
        // every split given segment is absent from the minimal set
        for g in pp.given_segments() {
            let split = pp.implicit_points().iter().any(|p| g.lies_between(*p, Bounds::Exclusive));
            prop_assert_eq!(split, !pp.minimal_segments().contains(g));
        }
    }
}
