use crate::{
    config::TreeConfig,
    error::{Result, TreeError},
    node::Node,
    types::Age,
};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

/// Levels larger than this are reported when they are grown.
const LARGE_LEVEL: usize = 1_000_000;

/// A fractal tree grown one generation at a time.
///
/// Nodes are stored per level: `levels[0]` holds the seed node and
/// `levels[k]` holds the nodes grown in step `k`. Children are appended in
/// parent-major order, so the parent of node `i` of level `k` is node
/// `i / complexity` of level `k - 1`. No parent links are stored.
///
/// Every call to [`Tree::grow`] multiplies the node count by `complexity`;
/// the engine does not cap growth.
#[derive(Clone, Debug)]
pub struct Tree {
    config: TreeConfig,
    origin: Node,
    levels: Vec<Vec<Node>>,
    rng: StdRng,
    length_noise: Option<Normal<f64>>,
    angle_noise: Option<Normal<f64>>,
}

impl Tree {
    /// Creates a tree of age 0, seeding jitter randomness from the OS.
    pub fn new(config: TreeConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a tree whose jitter is reproducible from `seed`.
    pub fn with_seed(config: TreeConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a tree drawing its jitter from `rng`.
    ///
    /// ### Errors
    /// Fails if the configuration does not pass [`TreeConfig::validate`].
    pub fn with_rng(config: TreeConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let length_noise = noise(config.sigma.length)?;
        let angle_noise = noise(config.sigma.angle)?;
        Ok(Self::seeded(config, rng, length_noise, angle_noise))
    }

    fn seeded(
        config: TreeConfig,
        rng: StdRng,
        length_noise: Option<Normal<f64>>,
        angle_noise: Option<Normal<f64>>,
    ) -> Self {
        Self {
            origin: Node::from_pos(config.origin.base()),
            levels: vec![vec![Node::from_pos(config.origin.seed())]],
            config,
            rng,
            length_noise,
            angle_noise,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of completed growth steps.
    pub fn age(&self) -> Age {
        self.levels.len() - 1
    }

    /// Base point of the trunk.
    pub fn origin(&self) -> &Node {
        &self.origin
    }

    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    pub fn level(&self, age: Age) -> Option<&[Node]> {
        self.levels.get(age).map(Vec::as_slice)
    }

    /// Parent of node `index` of level `age`; the origin for age 0.
    ///
    /// ### Panics
    /// Panics if `age` or `index` is out of range.
    pub fn parent_of(&self, age: Age, index: usize) -> &Node {
        if age == 0 {
            &self.origin
        } else {
            &self.levels[age - 1][index / self.config.complexity]
        }
    }

    /// Grows exactly one generation.
    ///
    /// For every node of the last level, the direction of the branch that
    /// ends in it is continued, fanned out into `complexity` children that
    /// are `branch_angle` apart and rotated by `-shift_angle`.
    pub fn grow(&mut self) {
        let age = self.age();
        let comp = self.config.complexity;
        let length = self.branch_length(Some(age + 1));
        let spread = (comp as f64 - 1.0) / 2.0;

        let current = &self.levels[age];
        let mut next = Vec::with_capacity(current.len() * comp);

        for (i, node) in current.iter().enumerate() {
            let parent = if age == 0 {
                &self.origin
            } else {
                &self.levels[age - 1][i / comp]
            };
            let direction = node.angle_to(parent);

            for c in 0..comp {
                let pos = spread - c as f64;
                let mut angle =
                    direction + self.config.branch_angle * pos - self.config.shift_angle;
                if let Some(n) = &self.angle_noise {
                    angle += n.sample(&mut self.rng);
                }

                let mut len = length;
                if let Some(n) = &self.length_noise {
                    len *= 1.0 + n.sample(&mut self.rng);
                }

                next.push(node.make_new_node(len, angle));
            }
        }

        if next.len() > LARGE_LEVEL {
            warn!(age = age + 1, nodes = next.len(), "growing a very large level");
        }
        debug!(age = age + 1, nodes = next.len(), "grew level");

        self.levels.push(next);
    }

    /// Calls [`Tree::grow`] `times` times.
    pub fn grow_times(&mut self, times: usize) {
        for _ in 0..times {
            self.grow();
        }
    }

    /// Translates the origin and every node by `(dx, dy)`.
    ///
    /// Topology and age are unchanged.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.origin.move_by(dx, dy);
        for node in self.levels.iter_mut().flatten() {
            node.move_by(dx, dy);
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::seeded(TreeConfig::default(), StdRng::from_os_rng(), None, None)
    }
}

/// Gaussian noise source for a standard deviation; `None` when disabled.
fn noise(sigma: f64) -> Result<Option<Normal<f64>>> {
    if sigma == 0.0 {
        return Ok(None);
    }
    Normal::new(0.0, sigma)
        .map(Some)
        .map_err(|e| TreeError::Domain(format!("invalid jitter sigma {sigma}: {e}")))
}
