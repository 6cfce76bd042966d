use cave_core::{CaveConfig, CellCoord, CellKind, GenerationError, MAX_INTENSITY};
use cave_system_generation::{
    resolve_seed, seed_from_signed, signed_seed, GeneratedCave, Generator, ENTROPY_SEED,
};
use cave_world::query;

fn generate(
    width: u32,
    height: u32,
    walls: u32,
    collapsing: u32,
    seed: u64,
) -> Result<GeneratedCave, GenerationError> {
    let config = CaveConfig::new(width, height, walls, collapsing).expect("valid configuration");
    Generator::default().generate(&config, seed)
}

fn assert_cave_invariants(cave: &GeneratedCave, collapsing: usize) {
    let world = cave.world();
    let dimensions = query::dimensions(world);
    let view = query::cave_view(world);

    let starts: Vec<CellCoord> = view.cells_of(CellKind::Start).collect();
    let finishes: Vec<CellCoord> = view.cells_of(CellKind::Finish).collect();
    assert_eq!(starts.len(), 1, "exactly one start expected");
    assert_eq!(finishes.len(), 1, "exactly one finish expected");
    assert_eq!(starts[0].column(), 0);
    assert_eq!(finishes[0].column(), dimensions.width() - 1);

    assert_eq!(view.count(CellKind::Collapse), collapsing);
    assert_eq!(cave.report().collapsing(), collapsing);

    let segment_cells: u32 = cave.report().segments().iter().map(|segment| segment.length()).sum();
    assert_eq!(view.count(CellKind::Wall), segment_cells as usize);
    assert_eq!(cave.report().wall_cells(), segment_cells as usize);

    for cell in dimensions.cells() {
        let kind = view.kind(cell).expect("cell in bounds");
        let intensity = view.intensity(cell);
        assert!(intensity <= MAX_INTENSITY);
        if matches!(kind, CellKind::Wall | CellKind::Collapse) {
            assert_eq!(intensity, 0, "{kind:?} at {cell:?} carries intensity");
            continue;
        }
        let adjacent = cell
            .moore_neighbours(dimensions)
            .filter(|neighbour| view.kind(*neighbour) == Some(CellKind::Collapse))
            .count();
        assert_eq!(
            usize::from(intensity),
            adjacent.min(usize::from(MAX_INTENSITY)),
            "intensity mismatch at {cell:?}"
        );
    }
}

#[test]
fn generated_caves_hold_every_invariant() {
    let cases = [
        (3, 3, 0, 0),
        (3, 3, 1, 3),
        (5, 3, 0, 1),
        (10, 10, 5, 20),
        (40, 20, 10, 25),
        (60, 30, 40, 400),
    ];

    for (width, height, walls, collapsing) in cases {
        for seed in 1..=16 {
            let cave = generate(width, height, walls, collapsing, seed)
                .unwrap_or_else(|error| panic!("{width}x{height} seed {seed}: {error}"));
            assert_eq!(cave.report().segments().len(), walls as usize);
            assert_cave_invariants(&cave, collapsing as usize);
        }
    }
}

#[test]
fn single_spot_on_small_grid_marks_neighbours_with_one() {
    let cave = generate(5, 3, 0, 1, 42).expect("fits");
    let world = cave.world();
    let view = query::cave_view(world);

    let spots: Vec<_> = view.cells_of(CellKind::Collapse).collect();
    assert_eq!(spots.len(), 1);
    let spot = spots[0];

    for neighbour in spot.moore_neighbours(query::dimensions(world)) {
        assert_eq!(view.intensity(neighbour), 1, "neighbour {neighbour:?}");
    }
    assert_cave_invariants(&cave, 1);
}

#[test]
fn fully_collapsed_grid_leaves_no_empty_cells() {
    let cave = generate(6, 6, 0, 34, 3).expect("34 empty cells remain");
    assert_cave_invariants(&cave, 34);
    assert_eq!(query::count_kind(cave.world(), CellKind::Empty), 0);
}

#[test]
fn too_many_collapsing_spots_fail_with_capacity_error() {
    let result = generate(3, 3, 0, 8, 4);

    assert_eq!(
        result.map(|cave| cave.report().collapsing()),
        Err(GenerationError::InsufficientSpace {
            available: 7,
            requested: 8,
        })
    );
}

#[test]
fn capacity_error_counts_cells_left_after_walls() {
    for seed in 1..=8 {
        match generate(4, 4, 3, 16, seed) {
            Err(GenerationError::InsufficientSpace {
                available,
                requested,
            }) => {
                assert_eq!(requested, 16);
                assert!(available <= 13, "walls and endpoints occupy at least five cells");
            }
            other => panic!(
                "expected capacity error, got {:?}",
                other.map(|cave| cave.into_parts().1)
            ),
        }
    }
}

#[test]
fn impossible_wall_count_fails_with_placement_exhaustion() {
    match generate(3, 3, 20, 0, 11) {
        Err(GenerationError::WallPlacementExhausted { segment, attempts }) => {
            assert!((1..=8).contains(&segment), "failed at wall #{segment}");
            assert_eq!(attempts, cave_core::WALL_PLACEMENT_ATTEMPTS);
        }
        other => panic!("expected exhaustion, got {:?}", other.map(|cave| cave.into_parts().1)),
    }
}

#[test]
fn report_carries_the_seed() {
    let cave = generate(8, 8, 2, 3, 1234).expect("fits");
    assert_eq!(cave.report().seed(), 1234);
}

#[test]
fn zero_or_absent_seed_is_replaced() {
    assert_eq!(resolve_seed(Some(99)), 99);
    assert_ne!(resolve_seed(Some(ENTROPY_SEED)), ENTROPY_SEED);
    assert_ne!(resolve_seed(None), ENTROPY_SEED);
}

#[test]
fn signed_seeds_map_onto_distinct_unsigned_seeds() {
    assert_eq!(seed_from_signed(5), 5);
    assert_eq!(seed_from_signed(-1), u64::MAX);
    assert_ne!(seed_from_signed(-5), seed_from_signed(5));
    for seed in [i64::MIN, -5, 0, 5, i64::MAX] {
        assert_eq!(signed_seed(seed_from_signed(seed)), seed);
    }

    let negative = generate(5, 3, 0, 1, seed_from_signed(-5)).expect("fits");
    let repeat = generate(5, 3, 0, 1, seed_from_signed(-5)).expect("fits");
    let spots = |cave: &GeneratedCave| {
        query::cave_view(cave.world())
            .cells_of(CellKind::Collapse)
            .collect::<Vec<_>>()
    };
    assert_eq!(spots(&negative), spots(&repeat));
}
