//! Derived measurements over a grown [`Tree`].
//!
//! Everything here is read-only except [`Tree::move_into_rectangle`], which
//! places the tree for rendering.

use crate::{
    error::{Result, TreeError},
    tree::Tree,
    types::{Age, Rect, Segment},
};
use tracing::debug;

fn pow_saturating(base: usize, exp: Age) -> u64 {
    let exp = u32::try_from(exp).unwrap_or(u32::MAX);
    (base as u64).saturating_pow(exp)
}

/// `(base^(exp) - 1) / (base - 1)` for `base >= 2`, saturating at `u64::MAX`.
///
/// Evaluated in `u128` so the power may exceed `u64` while the sum fits.
/// If the power overflows `u128`, the sum is at least `base^(exp-1)`, which
/// already exceeds `u64::MAX`.
fn geometric_sum_saturating(base: usize, exp: Age) -> u64 {
    let base = base as u128;
    u32::try_from(exp)
        .ok()
        .and_then(|exp| base.checked_pow(exp))
        .map(|power| (power - 1) / (base - 1))
        .and_then(|sum| u64::try_from(sum).ok())
        .unwrap_or(u64::MAX)
}

impl Tree {
    /// Length of a branch grown at `age` (defaults to the current age).
    ///
    /// Works for ages the tree has not reached yet.
    pub fn branch_length(&self, age: Option<Age>) -> f64 {
        let age = age.unwrap_or_else(|| self.age());
        let exp = i32::try_from(age).unwrap_or(i32::MAX);
        self.config().length() * self.config().scale.powi(exp)
    }

    /// Number of steps after which branches would be `target` long.
    ///
    /// Computes `log_scale(target / length)`; the result is fractional in
    /// general. Callers growing by this amount must bound it themselves.
    ///
    /// ### Errors
    /// Returns [`TreeError::Domain`] when `scale` is `1` or not positive, or
    /// when `target / length` is not positive.
    pub fn steps_to_reach_length(&self, target: f64) -> Result<f64> {
        let scale = self.config().scale;
        if scale <= 0.0 {
            return Err(TreeError::Domain(format!(
                "logarithm base must be positive, scale is {scale}"
            )));
        }
        if scale == 1.0 {
            return Err(TreeError::Domain(
                "branch length never changes with scale 1".to_string(),
            ));
        }

        let ratio = target / self.config().length();
        if ratio.is_nan() || ratio <= 0.0 {
            return Err(TreeError::Domain(format!(
                "target length {target} gives non-positive ratio {ratio}"
            )));
        }

        Ok(ratio.ln() / scale.ln())
    }

    /// Closed-form node count through `age` (defaults to the current age).
    ///
    /// For `complexity == 1` this is `age`; otherwise it is
    /// `(complexity^(age+1) - 1) / (complexity - 1)`. Saturates at
    /// `u64::MAX` only when the exact count does not fit.
    pub fn node_count(&self, age: Option<Age>) -> u64 {
        let age = age.unwrap_or_else(|| self.age());
        let comp = self.config().complexity;
        if comp == 1 {
            return age as u64;
        }
        geometric_sum_saturating(comp, age.saturating_add(1))
    }

    /// Number of nodes in the level of `age`: `complexity^age`.
    pub fn nodes_at_age(&self, age: Age) -> u64 {
        pow_saturating(self.config().complexity, age)
    }

    /// Smallest rectangle containing the origin and every node.
    pub fn bounding_rectangle(&self) -> Rect {
        let mut rect = Rect::from_point(self.origin().pos);
        for node in self.levels().iter().flatten() {
            rect.include(node.pos);
        }
        rect
    }

    /// `(width, height)` of the bounding rectangle, truncated.
    pub fn size(&self) -> (u32, u32) {
        let rect = self.bounding_rectangle();
        (rect.width() as u32, rect.height() as u32)
    }

    /// Every branch grouped by age, in storage order.
    ///
    /// A branch runs from the node's parent (the origin for age 0) to the
    /// node itself.
    pub fn branches(&self) -> Vec<Vec<Segment>> {
        self.levels()
            .iter()
            .enumerate()
            .map(|(age, level)| {
                level
                    .iter()
                    .enumerate()
                    .map(|(i, node)| Segment::new(self.parent_of(age, i).pos, node.pos))
                    .collect()
            })
            .collect()
    }

    /// Node coordinates grouped by age.
    pub fn nodes(&self) -> Vec<Vec<(f64, f64)>> {
        self.levels()
            .iter()
            .map(|level| level.iter().map(|n| n.as_pair()).collect())
            .collect()
    }

    /// Moves the tree so its bounding rectangle starts at `(0, 0)`.
    pub fn move_into_rectangle(&mut self) {
        let rect = self.bounding_rectangle();
        debug!(min_x = rect.min.x, min_y = rect.min.y, "moving tree into rectangle");
        self.move_by(-rect.min.x, -rect.min.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Origin, TreeConfig};
    use crate::error::TreeError;
    use crate::tree::Tree;

    fn tree_with(length: f64, scale: f64, complexity: usize) -> Tree {
        let cfg = TreeConfig::symmetric(length, scale, complexity, 0.5);
        Tree::new(cfg).unwrap()
    }

    #[test]
    fn branch_length_defaults_to_current_age() {
        let mut tree = tree_with(400.0, 0.5, 2);
        assert_eq!(tree.branch_length(None), 400.0);
        assert_eq!(tree.branch_length(Some(3)), 50.0);

        tree.grow_times(2);
        assert_eq!(tree.branch_length(None), 100.0);
    }

    #[test]
    fn steps_to_reach_length_is_log_in_scale_base() {
        let tree = tree_with(400.0, 0.5, 2);
        let steps = tree.steps_to_reach_length(1.0).unwrap();
        assert!((steps - (400f64).log2()).abs() < 1e-9);
        assert!((steps - 8.64).abs() < 0.01);
    }

    #[test]
    fn steps_to_reach_length_rejects_undefined_inputs() {
        let flat = tree_with(400.0, 1.0, 2);
        assert!(matches!(
            flat.steps_to_reach_length(1.0),
            Err(TreeError::Domain(_))
        ));

        let negative = tree_with(400.0, -0.5, 2);
        assert!(matches!(
            negative.steps_to_reach_length(1.0),
            Err(TreeError::Domain(_))
        ));

        let tree = tree_with(400.0, 0.5, 2);
        assert!(tree.steps_to_reach_length(0.0).is_err());
        assert!(tree.steps_to_reach_length(-4.0).is_err());
    }

    #[test]
    fn node_count_degenerates_to_age_for_chains() {
        let mut chain = tree_with(100.0, 0.9, 1);
        chain.grow_times(4);
        assert_eq!(chain.node_count(None), 4);
        assert_eq!(chain.node_count(Some(10)), 10);
        assert_eq!(chain.nodes_at_age(7), 1);
    }

    #[test]
    fn node_count_is_exact_when_the_power_overflows_u64() {
        // 3^41 > u64::MAX, but the sum through age 40 still fits.
        let ternary = tree_with(100.0, 0.5, 3);
        assert_eq!(ternary.node_count(Some(40)), 18_236_498_188_585_393_201);
        let summed: u128 = (0..=40).map(|i| 3u128.pow(i)).sum();
        assert_eq!(u128::from(ternary.node_count(Some(40))), summed);

        // 2^65 - 1 nodes through age 64 does not fit.
        let binary = tree_with(100.0, 0.5, 2);
        assert_eq!(binary.node_count(Some(63)), u64::MAX);
        assert_eq!(binary.node_count(Some(64)), u64::MAX);
        assert_eq!(binary.node_count(Some(1_000)), u64::MAX);
    }

    #[test]
    fn nodes_at_age_matches_grown_levels() {
        let mut tree = tree_with(100.0, 0.5, 3);
        tree.grow_times(4);
        for (age, level) in tree.levels().iter().enumerate() {
            assert_eq!(level.len() as u64, tree.nodes_at_age(age));
        }
    }

    #[test]
    fn bounding_rectangle_of_seed_tree_covers_the_trunk() {
        let tree = Tree::new(TreeConfig::default()).unwrap();
        assert_eq!(tree.bounding_rectangle().as_tuple(), (0.0, -100.0, 0.0, 0.0));
        assert_eq!(tree.size(), (0, 100));
    }

    #[test]
    fn move_into_rectangle_puts_min_corner_at_zero() {
        let cfg = TreeConfig::ternary(300.0, 0.6, 0.4, 0.1).with_origin(Origin::Point {
            x: 50.0,
            y: 80.0,
            length: 300.0,
        });
        let mut tree = Tree::new(cfg).unwrap();
        tree.grow_times(5);
        let before = tree.bounding_rectangle();

        tree.move_into_rectangle();
        let rect = tree.bounding_rectangle();
        assert!(rect.min.x.abs() < 1e-9 && rect.min.y.abs() < 1e-9);
        assert!((rect.width() - before.width()).abs() < 1e-9);
        assert!((rect.height() - before.height()).abs() < 1e-9);
    }

    #[test]
    fn branches_start_at_origin_for_the_trunk() {
        let mut tree = Tree::new(TreeConfig::default()).unwrap();
        tree.grow();
        let branches = tree.branches();

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0][0].as_tuple(), (0.0, 0.0, 0.0, -100.0));
        for seg in &branches[1] {
            assert_eq!(seg.start, tree.levels()[0][0].pos);
        }
    }

    #[test]
    fn nodes_mirror_levels() {
        let mut tree = tree_with(100.0, 0.5, 2);
        tree.grow_times(2);
        let nodes = tree.nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2].len(), 4);
        assert_eq!(nodes[0][0], (0.0, -100.0));
    }
}
