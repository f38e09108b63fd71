#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    use crate::{ComponentGraph, CutFailure, Hailstone, ParseError, Polynomial, PolynomialSystem, RockThrow, SolverFailure, Storm, Terminals, Unknown, Vector3};
    use crate::vector::Axis;

    // advent of code 2023 day 24 sample
    const STORM: &str = "19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

    // advent of code 2023 day 25 sample
    const WIRING: &str = "jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr
";

    fn rational(value: i64) -> BigRational {
        BigRational::from(BigInt::from(value))
    }

    #[test]
    fn hailstone_round_trip() {
        let line = "19, 13, 30 @ -2, 1, -2";
        let hailstone: Hailstone = line.parse().unwrap();
        assert_eq!(hailstone.position, Vector3::new(19, 13, 30));
        assert_eq!(hailstone.velocity, Vector3::new(-2, 1, -2));
        assert_eq!(hailstone.to_string(), line);

        // padding is normalized away
        let padded: Hailstone = "20, 19, 15 @  1, -5, -3".parse().unwrap();
        assert_eq!(padded.to_string(), "20, 19, 15 @ 1, -5, -3");
    }

    #[test]
    fn malformed_hailstones() {
        assert_eq!("1, 2, 3".parse::<Hailstone>(), Err(ParseError::MissingVelocity { text: "1, 2, 3".to_owned() }));
        assert_eq!("1, 2 @ 4, 5, 6".parse::<Hailstone>(), Err(ParseError::FieldCount { text: "1, 2".to_owned(), found: 2 }));
        assert_eq!("1, 2, x @ 4, 5, 6".parse::<Hailstone>(), Err(ParseError::NotAnInteger { field: "x".to_owned() }));

        // one bad line aborts the whole storm
        match Storm::parse("1, 2, 3 @ 4, 5, 6\n1, 2, 3 @ 4, 5\n") {
            Err(ParseError::AtLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a line error, got {:?}", other),
        }
    }

    #[test]
    fn storm_skips_blank_lines() {
        let storm = Storm::parse(STORM).unwrap();
        assert_eq!(storm.len(), 5);
        assert_eq!(storm.hailstones()[4].position[Axis::Z], 15);
    }

    #[test]
    fn crossings_in_test_area() {
        let storm = Storm::parse(STORM).unwrap();
        assert_eq!(storm.crossings_in_xy(7, 27), 2);
    }

    #[test]
    fn crossing_in_the_past_is_ignored() {
        let a: Hailstone = "19, 13, 30 @ -2, 1, -2".parse().unwrap();
        let b: Hailstone = "20, 19, 15 @ 1, -5, -3".parse().unwrap();
        assert_eq!(a.path_crossing_in_xy(&b), None);

        // parallel
        let c: Hailstone = "18, 19, 22 @ -1, -1, -2".parse().unwrap();
        let d: Hailstone = "20, 25, 34 @ -2, -2, -4".parse().unwrap();
        assert_eq!(c.path_crossing_in_xy(&d), None);
    }

    #[test]
    fn system_depends_only_on_first_three() {
        let storm = Storm::parse(STORM).unwrap();
        let from_prefix = RockThrow::system(&storm.hailstones()[..3]).unwrap();
        let from_all = RockThrow::system(storm.hailstones()).unwrap();
        assert_eq!(from_prefix, from_all);

        assert_eq!(from_all.equations().len(), 9);
        assert_eq!(from_all.unknowns().len(), 6);
        assert_eq!(from_all.auxiliary(), &[Unknown::Time(0), Unknown::Time(1), Unknown::Time(2)]);
        assert_eq!(from_all.equations()[0].to_string(), "vx*t0 + x + 2*t0 - 19");
    }

    #[test]
    fn too_few_hailstones() {
        let storm = Storm::parse("19, 13, 30 @ -2, 1, -2\n18, 19, 22 @ -1, -1, -2").unwrap();
        assert_eq!(RockThrow::solve(&storm), Err(SolverFailure::NotEnoughHailstones { found: 2 }));
    }

    #[test]
    fn solve_sample_rock() {
        let storm = Storm::parse(STORM).unwrap();
        let rock = RockThrow::solve(&storm).unwrap();

        assert_eq!(rock.position, Vector3::new(24, 13, 10));
        assert_eq!(rock.velocity, Vector3::new(-3, 1, 2));
        assert_eq!(rock.collision_times, vec![rational(5), rational(3), rational(4)]);
        assert_eq!(rock.coordinate_sum(), 47);
    }

    #[test]
    fn solve_constructed_rock() {
        // place three hailstones where a known rock will be at times 2, 5 and 11
        let (position, velocity) = (Vector3::new(100, -50, 7), Vector3::new(3, -2, 5));
        let hailstones = [(Vector3::new(1, 2, 3), 2), (Vector3::new(-4, 0, 2), 5), (Vector3::new(7, -3, -1), 11)]
            .into_iter()
            .map(|(hail_velocity, t)| Hailstone {
                position: Vector3::new(
                    position.x + (velocity.x - hail_velocity.x) * t,
                    position.y + (velocity.y - hail_velocity.y) * t,
                    position.z + (velocity.z - hail_velocity.z) * t,
                ),
                velocity: hail_velocity,
            })
            .collect_vec();

        let system = RockThrow::system(&hailstones).unwrap();
        let solutions = system.solve().unwrap();
        // any solution will do, not just the first
        assert!(solutions.iter().any(|solution| {
            solution.satisfies(&system)
                && [Axis::X, Axis::Y, Axis::Z].iter()
                .map(|axis| solution.get(&Unknown::Position(*axis)).unwrap().clone())
                .sum::<BigRational>() == rational(57)
        }));

        let rock = RockThrow::solve(&Storm::from(hailstones)).unwrap();
        assert_eq!(rock.velocity, velocity);
        assert_eq!(rock.collision_times, vec![rational(2), rational(5), rational(11)]);
    }

    #[test]
    fn rational_solution() {
        // 2x = 1
        let mut system = PolynomialSystem::new();
        system.add_unknown("x")
            .add_equation(Polynomial::from(2) * Polynomial::var("x") - Polynomial::from(1));
        let solutions = system.solve().unwrap();
        assert_eq!(solutions[0].get(&"x"), Some(&BigRational::new(BigInt::from(1), BigInt::from(2))));
    }

    #[test]
    fn inconsistent_system() {
        let mut system = PolynomialSystem::new();
        system.add_unknown("x")
            .add_equation(Polynomial::var("x") - Polynomial::from(1))
            .add_equation(Polynomial::var("x") - Polynomial::from(2));
        assert_eq!(system.solve(), Err(SolverFailure::Inconsistent));
    }

    #[test]
    fn underdetermined_system() {
        let mut system = PolynomialSystem::new();
        system.add_unknown("x")
            .add_unknown("y")
            .add_equation(Polynomial::var("x") + Polynomial::var("y") - Polynomial::from(1));
        assert_eq!(system.solve(), Err(SolverFailure::Underdetermined("x".to_owned())));
    }

    #[test]
    fn undeclared_and_non_linear_symbols() {
        let mut system = PolynomialSystem::new();
        system.add_unknown("x")
            .add_equation(Polynomial::var("x") - Polynomial::var("y"));
        assert_eq!(system.solve(), Err(SolverFailure::UndeclaredSymbol("y".to_owned())));

        let mut system = PolynomialSystem::new();
        system.add_unknown("x")
            .add_auxiliary("t")
            .add_equation(Polynomial::var("x") - Polynomial::var("t") * Polynomial::var("t"));
        assert_eq!(system.solve(), Err(SolverFailure::NonLinear("t".to_owned())));
    }

    #[test]
    fn every_component_appears_once() {
        let graph = ComponentGraph::parse(WIRING).unwrap();
        assert_eq!(graph.node_count(), 15);
        assert_eq!(graph.edge_count(), 33);

        let nodes = graph.nodes().collect_vec();
        assert_eq!(nodes.iter().unique().count(), nodes.len());
        assert_eq!(&nodes[..4], &["jqt", "rhn", "xhk", "nvd"]);
        assert!(graph.contains_wire("hfx", "pzl"));
    }

    #[test]
    fn duplicate_wires_collapse() {
        let graph = ComponentGraph::parse("a: b c\nb: a\nc: b b").unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn malformed_wiring() {
        match ComponentGraph::parse("a: b\nc d\n") {
            Err(ParseError::AtLine { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(*source, ParseError::MissingColon { text: "c d".to_owned() });
            }
            other => panic!("expected a line error, got {:?}", other),
        }

        assert!(matches!(ComponentGraph::parse(": a b"), Err(ParseError::AtLine { .. })));
        assert!(matches!(ComponentGraph::parse("a: b a"), Err(ParseError::AtLine { .. })));
    }

    #[test]
    fn cycle_needs_two_cuts() {
        let graph = ComponentGraph::parse("a: b\nb: c\nc: d\nd: e\ne: f\nf: a").unwrap();

        for sink in 1..6 {
            let cut = graph.minimum_cut(Terminals { source: 0, sink }).unwrap();
            assert_eq!(cut.value, 2);
            assert_eq!(cut.cut_edges.len(), 2);
            assert_eq!(cut.source_side.len() + cut.sink_side.len(), 6);
        }
    }

    #[test]
    fn bridged_cliques() {
        // a triangle and a K4 joined by the single wire c - d
        let graph = ComponentGraph::parse("a: b c\nb: c\nd: e f g\ne: f g\nf: g\nc: d").unwrap();
        let cut = graph.minimum_cut(Terminals::default()).unwrap();

        assert_eq!(cut.value, 1);
        assert_eq!(cut.source_side, vec!["a", "b", "c"]);
        assert_eq!(cut.sink_side, vec!["d", "e", "f", "g"]);
        assert_eq!(cut.partition_product(), 12);
    }

    #[test]
    fn sample_partition() {
        let graph = ComponentGraph::parse(WIRING).unwrap();

        let cut = graph.minimum_cut(Terminals::default()).unwrap();
        assert_eq!(cut.value, 3);
        assert_eq!(cut.partition_product(), 54);

        let global = graph.global_minimum_cut().unwrap();
        assert_eq!(global.value, 3);
        assert_eq!(global.partition_product(), 54);
    }

    #[test]
    fn bad_terminals() {
        let graph = ComponentGraph::parse("a: b c").unwrap();
        assert_eq!(graph.minimum_cut(Terminals::default()), Err(CutFailure::TerminalOutOfRange { position: 3, node_count: 3 }));
        assert_eq!(graph.minimum_cut(Terminals { source: 1, sink: 1 }), Err(CutFailure::SameTerminal(1)));

        let empty = ComponentGraph::parse("").unwrap();
        assert_eq!(empty.minimum_cut(Terminals::default()), Err(CutFailure::TooFewNodes(0)));
        assert_eq!(empty.global_minimum_cut(), Err(CutFailure::TooFewNodes(0)));
    }

    #[test]
    fn dot_lists_components() {
        let graph = ComponentGraph::parse("a: b").unwrap();
        let dot = graph.to_dot();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("\"a\""));
        assert!(dot.contains("\"b\""));
    }
}
