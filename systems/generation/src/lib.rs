#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic cave generation pipeline.
//!
//! A single seeded random source is threaded through the stages in a fixed order:
//! endpoints, walls, collapsing spots and finally hollowness propagation. Each stage
//! inspects the world through a read-only view, answers with commands, and the pipeline
//! applies those commands before moving on. Identical seeds and configurations therefore
//! always yield identical caves.

use cave_core::{CaveConfig, CellKind, Command, Event, GenerationError, WallSegment};
use cave_system_collapse::Collapse;
use cave_system_endpoints::Endpoints;
use cave_system_walls::{Config as WallsConfig, Walls};
use cave_world::{self as world, query, World};
use rand::{rngs::OsRng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed value that requests a fresh seed from the operating system.
pub const ENTROPY_SEED: u64 = 0;

/// Resolves the seed a run will use.
///
/// Absent or zero seeds are replaced by a non-zero seed drawn from the operating system,
/// so the returned value always reproduces the run it drives.
#[must_use]
pub fn resolve_seed(requested: Option<u64>) -> u64 {
    match requested {
        Some(seed) if seed != ENTROPY_SEED => seed,
        _ => OsRng.gen_range(1..=u64::MAX),
    }
}

/// Maps a signed seed onto the unsigned seed space, keeping its bit pattern.
#[must_use]
pub const fn seed_from_signed(seed: i64) -> u64 {
    u64::from_ne_bytes(seed.to_ne_bytes())
}

/// Inverse of [`seed_from_signed`].
#[must_use]
pub const fn signed_seed(seed: u64) -> i64 {
    i64::from_ne_bytes(seed.to_ne_bytes())
}

/// Builds the random source shared by every stage.
#[must_use]
pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Summary of what a successful generation placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    seed: u64,
    segments: Vec<WallSegment>,
    wall_cells: usize,
    collapsing: usize,
}

impl GenerationReport {
    /// Seed that reproduces the cave.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Wall segments in placement order.
    #[must_use]
    pub fn segments(&self) -> &[WallSegment] {
        &self.segments
    }

    /// Number of grid cells covered by walls.
    #[must_use]
    pub const fn wall_cells(&self) -> usize {
        self.wall_cells
    }

    /// Number of collapsing spots in the grid.
    #[must_use]
    pub const fn collapsing(&self) -> usize {
        self.collapsing
    }
}

/// A finished cave together with its generation report.
#[derive(Debug)]
pub struct GeneratedCave {
    world: World,
    report: GenerationReport,
}

impl GeneratedCave {
    /// The finished grid.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Summary of the placements.
    #[must_use]
    pub const fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Splits the cave into its grid and report.
    #[must_use]
    pub fn into_parts(self) -> (World, GenerationReport) {
        (self.world, self.report)
    }
}

/// Orchestrates the generation systems over a single world.
#[derive(Debug, Default)]
pub struct Generator {
    endpoints: Endpoints,
    walls: Walls,
    collapse: Collapse,
}

impl Generator {
    /// Creates a generator whose wall placer uses the provided configuration.
    #[must_use]
    pub const fn new(walls: WallsConfig) -> Self {
        Self {
            endpoints: Endpoints::new(),
            walls: Walls::new(walls),
            collapse: Collapse::new(),
        }
    }

    /// Generates a cave from `config`, seeding the random source with `seed`.
    pub fn generate(
        &self,
        config: &CaveConfig,
        seed: u64,
    ) -> Result<GeneratedCave, GenerationError> {
        log::info!(
            "generating {}x{} cave with seed {seed}",
            config.dimensions().width(),
            config.dimensions().height()
        );
        let mut rng = rng_from_seed(seed);
        let Progress { world, segments } = self.generate_with(config, &mut rng)?;

        let report = GenerationReport {
            seed,
            segments,
            wall_cells: query::count_kind(&world, CellKind::Wall),
            collapsing: query::count_kind(&world, CellKind::Collapse),
        };
        Ok(GeneratedCave { world, report })
    }

    fn generate_with<R>(
        &self,
        config: &CaveConfig,
        rng: &mut R,
    ) -> Result<Progress, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let mut progress = Progress {
            world: World::new(config.dimensions()),
            segments: Vec::new(),
        };

        let mut commands = Vec::new();
        self.endpoints.handle(config.dimensions(), rng, &mut commands);
        progress.apply(commands.drain(..));
        log::debug!("endpoints placed");

        for index in 0..config.walls() {
            let segment = self
                .walls
                .place_segment(index, query::cave_view(&progress.world), rng)?;
            progress.apply([Command::PlaceWall { segment }]);
        }
        log::debug!("{} wall segments placed", progress.segments.len());

        self.collapse.handle(
            config.collapsing(),
            query::cave_view(&progress.world),
            rng,
            &mut commands,
        )?;
        progress.apply(commands.drain(..));
        log::debug!("{} collapsing spots placed", config.collapsing());

        let map = self.collapse.propagate(query::cave_view(&progress.world));
        progress.apply([Command::ApplyIntensity { map }]);

        Ok(progress)
    }
}

struct Progress {
    world: World,
    segments: Vec<WallSegment>,
}

impl Progress {
    fn apply<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        for event in events {
            match event {
                Event::WallPlaced { segment } => self.segments.push(segment),
                Event::WallRejected { segment } => {
                    log::warn!("world rejected planned wall {segment:?}");
                }
                Event::CollapseRejected { cell } => {
                    log::warn!("world rejected collapsing spot at {cell:?}");
                }
                Event::IntensityApplied { peak } => log::debug!("intensity applied, peak {peak}"),
                Event::GridReset | Event::EndpointPlaced { .. } | Event::CollapseMarked { .. } => {}
            }
        }
    }
}
