use glam::DVec3;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::config::{StreetLayoutConfig, StreetStyle};
use crate::error::GraphResult;
use crate::graph::{Graph, PathId, PathSnapshot, PointId};
use crate::rng::GraphRng;

/// Streets produced by one generation run
#[derive(Debug, Clone)]
pub struct StreetNetwork {
    /// Main street; every other street descends from it
    pub trunk: PathId,
    /// Every generated street, trunk first, in creation order
    pub streets: Vec<PathId>,
}

impl StreetNetwork {
    pub fn total_length(&self, graph: &Graph) -> f64 {
        self.streets.iter().map(|&street| graph.length(street)).sum()
    }

    /// Export the whole tree, rooted at the trunk
    pub fn snapshot(&self, graph: &Graph) -> Option<PathSnapshot> {
        graph.snapshot(self.trunk)
    }
}

/// Street network generator driving the point/path graph
///
/// Can be created with default parameters via `new(seed)` or with a full
/// configuration via `from_config(seed, config)`. Every call to `generate`
/// reseeds, so the same generator always lays out the same streets.
pub struct StreetNetworkGenerator {
    pub seed: u64,
    config: StreetLayoutConfig,
}

impl StreetNetworkGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_config(seed, StreetLayoutConfig::default())
    }

    pub fn from_config(seed: u64, config: StreetLayoutConfig) -> Self {
        Self { seed, config }
    }

    pub fn config(&self) -> &StreetLayoutConfig {
        &self.config
    }

    /// Lay out a trunk street and its side streets in `graph`
    pub fn generate(&self, graph: &mut Graph) -> GraphResult<StreetNetwork> {
        self.config.validate()?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);

        let trunk_params = &self.config.trunk;
        let origin = DVec3::from_array(trunk_params.origin);
        let heading = trunk_params.heading_degrees.to_radians();
        let direction = DVec3::new(heading.cos(), 0.0, heading.sin());

        let start = graph.new_point(origin)?;
        let finish = graph.new_point(origin + direction * trunk_params.length)?;
        let trunk = graph.new_path(start, finish)?;
        self.shape_street(graph, trunk, &mut rng)?;

        let mut streets = vec![trunk];
        self.grow_side_streets(graph, trunk, 1, &mut streets, &mut rng)?;

        if self.config.subdivision.simplify {
            let angle = self.config.subdivision.simplify_angle_degrees.to_radians();
            for &street in &streets {
                graph.unsubdivide(street, angle)?;
            }
        }

        let network = StreetNetwork { trunk, streets };
        log::info!(
            "Generated '{}' (seed {}): {} streets, {:.1} total length",
            self.config.name,
            self.seed,
            network.streets.len(),
            network.total_length(graph)
        );
        Ok(network)
    }

    /// Apply a randomly chosen style, then subdivide
    fn shape_street<R: GraphRng>(
        &self,
        graph: &mut Graph,
        street: PathId,
        rng: &mut R,
    ) -> GraphResult<()> {
        match self.config.styles.choose(rng) {
            StreetStyle::Straight => {
                graph.make_straight(street, None)?;
            }
            StreetStyle::Wave => {
                let wave = &self.config.wave;
                graph.make_wave(street, wave.segment_count, wave.amplitude, wave.density)?;
            }
            StreetStyle::Slanted => {
                graph.make_slanted(street)?;
            }
        }
        graph.subdivide(street, self.config.subdivision.segment_length)?;
        Ok(())
    }

    fn grow_side_streets<R: GraphRng>(
        &self,
        graph: &mut Graph,
        street: PathId,
        depth: u32,
        streets: &mut Vec<PathId>,
        rng: &mut R,
    ) -> GraphResult<()> {
        let params = &self.config.branching;
        if depth > params.max_depth {
            return Ok(());
        }
        let falloff = params.length_falloff.powi(depth as i32 - 1);

        for _ in 0..params.attempts_per_street {
            if !rng.chance(params.probability) {
                continue;
            }
            let Some(root) = graph.random_intermediate_point(street, rng) else {
                log::debug!("Street {street:?} has no intermediates to branch from");
                break;
            };
            if graph.has_branches(root) {
                continue;
            }
            let Some(side) = side_direction(graph, root) else {
                continue;
            };
            let side = if rng.coin_flip() { side } else { -side };
            let length = rng.range_f64(params.min_length, params.max_length) * falloff;

            let Some(root_position) = graph.position(root) else {
                continue;
            };
            let tip = graph.new_point(root_position + side * length)?;
            let branch = graph.branch(root, tip)?;
            self.shape_street(graph, branch, rng)?;
            streets.push(branch);
            log::trace!("Side street {branch:?} at depth {depth}, length {length:.1}");

            self.grow_side_streets(graph, branch, depth + 1, streets, rng)?;
        }
        Ok(())
    }
}

/// Horizontal unit vector perpendicular to the street at `point`
fn side_direction(graph: &Graph, point: PointId) -> Option<DVec3> {
    let previous = graph.position(graph.previous(point)?)?;
    let next = graph.position(graph.next(point)?)?;
    let along = DVec3::new(next.x - previous.x, 0.0, next.z - previous.z).normalize_or_zero();
    if along == DVec3::ZERO {
        log::warn!("Street direction at {point:?} is vertical, skipping side street");
        return None;
    }
    Some(DVec3::new(-along.z, 0.0, along.x))
}
