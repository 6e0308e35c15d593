//! Tree parameters and the named tree presets.
//!
//! The historical tree "kinds" (binary, ternary, dragon, symmetric and the
//! randomized realistic tree) are all plain [`TreeConfig`] values consumed
//! by the same growth engine.

use crate::error::{Result, TreeError};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Where the tree starts.
///
/// The base point is where the trunk is rooted, the seed point is the top
/// of the trunk and becomes the single node of age 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Trunk of `length` rising straight up (towards smaller `y`) from `(x, y)`.
    Point { x: f64, y: f64, length: f64 },
    /// Trunk from `(x1, y1)` to `(x2, y2)`; its length is the base length.
    Segment { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Origin {
    pub fn base(&self) -> DVec2 {
        match *self {
            Origin::Point { x, y, .. } => DVec2::new(x, y),
            Origin::Segment { x1, y1, .. } => DVec2::new(x1, y1),
        }
    }

    pub fn seed(&self) -> DVec2 {
        match *self {
            Origin::Point { x, y, length } => DVec2::new(x, y - length),
            Origin::Segment { x2, y2, .. } => DVec2::new(x2, y2),
        }
    }

    /// Base branch length at age 0.
    pub fn length(&self) -> f64 {
        match *self {
            Origin::Point { length, .. } => length,
            Origin::Segment { .. } => self.base().distance(self.seed()),
        }
    }

    /// Same base point and trunk direction, trunk rescaled to `length`.
    ///
    /// A degenerate segment has no direction and gets a trunk pointing up.
    pub fn with_length(&self, length: f64) -> Origin {
        match *self {
            Origin::Point { x, y, .. } => Origin::Point { x, y, length },
            Origin::Segment { x1, y1, .. } => {
                let base = self.base();
                let dir = (self.seed() - base).try_normalize().unwrap_or(DVec2::NEG_Y);
                let end = base + dir * length;
                Origin::Segment {
                    x1,
                    y1,
                    x2: end.x,
                    y2: end.y,
                }
            }
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Segment {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: -100.0,
        }
    }
}

/// Standard deviations of the Gaussian jitter applied while growing.
///
/// `length` perturbs each branch multiplicatively by `1 + N(0, length)`,
/// `angle` adds `N(0, angle)` radians to each branch direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sigma {
    pub length: f64,
    pub angle: f64,
}

impl Sigma {
    pub fn new(length: f64, angle: f64) -> Self {
        Self { length, angle }
    }

    pub fn is_zero(&self) -> bool {
        self.length == 0.0 && self.angle == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub origin: Origin,
    /// Per-generation length decay: `length(age) = length * scale^age`.
    pub scale: f64,
    /// Number of children grown from every node per step.
    pub complexity: usize,
    /// Angle between neighbouring siblings (radians).
    pub branch_angle: f64,
    /// Constant rotation subtracted from every child (radians).
    pub shift_angle: f64,
    pub sigma: Sigma,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            origin: Origin::default(),
            scale: 0.5,
            complexity: 2,
            branch_angle: PI,
            shift_angle: 0.0,
            sigma: Sigma::default(),
        }
    }
}

impl TreeConfig {
    pub fn new(
        origin: Origin,
        scale: f64,
        complexity: usize,
        branch_angle: f64,
        shift_angle: f64,
    ) -> Self {
        Self {
            origin,
            scale,
            complexity,
            branch_angle,
            shift_angle,
            sigma: Sigma::default(),
        }
    }

    /// A tree rooted at `(0, 0)` with a trunk of `length`.
    fn rooted(
        length: f64,
        scale: f64,
        complexity: usize,
        branch_angle: f64,
        shift_angle: f64,
    ) -> Self {
        Self::new(
            Origin::Point {
                x: 0.0,
                y: 0.0,
                length,
            },
            scale,
            complexity,
            branch_angle,
            shift_angle,
        )
    }

    pub fn binary(length: f64, scale: f64, branch_angle: f64, shift_angle: f64) -> Self {
        Self::rooted(length, scale, 2, branch_angle, shift_angle)
    }

    pub fn ternary(length: f64, scale: f64, branch_angle: f64, shift_angle: f64) -> Self {
        Self::rooted(length, scale, 3, branch_angle, shift_angle)
    }

    /// Binary tree with a right angle between siblings.
    pub fn dragon(length: f64, scale: f64, shift_angle: f64) -> Self {
        Self::rooted(length, scale, 2, FRAC_PI_2, shift_angle)
    }

    /// Children spread evenly around the parent direction, no shift.
    pub fn symmetric(length: f64, scale: f64, complexity: usize, branch_angle: f64) -> Self {
        Self::rooted(length, scale, complexity, branch_angle, 0.0)
    }

    /// Turns any configuration into the randomized ("realistic") variant.
    pub fn with_sigma(mut self, sigma: Sigma) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Base branch length at age 0.
    pub fn length(&self) -> f64 {
        self.origin.length()
    }

    /// Checks the invariants the growth engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.complexity < 1 {
            return Err(TreeError::InvalidComplexity(self.complexity));
        }

        let length = self.length();
        if !length.is_finite() || length <= 0.0 {
            return Err(TreeError::NonPositiveLength(length));
        }

        if !self.scale.is_finite() {
            return Err(TreeError::InvalidScale(self.scale));
        }

        let Sigma { length, angle } = self.sigma;
        if !(length.is_finite() && angle.is_finite() && length >= 0.0 && angle >= 0.0) {
            return Err(TreeError::InvalidSigma { length, angle });
        }

        Ok(())
    }

    /// Parses a config from TOML and validates it.
    ///
    /// Missing fields fall back to [`TreeConfig::default`].
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    #[test]
    fn default_matches_the_classic_tree() {
        let cfg = TreeConfig::default();
        assert_eq!(cfg.origin.base(), DVec2::ZERO);
        assert_eq!(cfg.origin.seed(), DVec2::new(0.0, -100.0));
        assert_eq!(cfg.length(), 100.0);
        assert_eq!(cfg.complexity, 2);
        assert!(cfg.sigma.is_zero());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn point_origin_seeds_straight_up() {
        let origin = Origin::Point {
            x: 5.0,
            y: 10.0,
            length: 30.0,
        };
        assert_eq!(origin.seed(), DVec2::new(5.0, -20.0));
        assert_eq!(origin.length(), 30.0);
    }

    #[test]
    fn with_length_keeps_base_and_direction() {
        let point = Origin::Point {
            x: 5.0,
            y: 10.0,
            length: 30.0,
        };
        assert_eq!(
            point.with_length(60.0),
            Origin::Point {
                x: 5.0,
                y: 10.0,
                length: 60.0
            }
        );

        let slanted = Origin::Segment {
            x1: 10.0,
            y1: 20.0,
            x2: 13.0,
            y2: 16.0,
        };
        let longer = slanted.with_length(10.0);
        assert_eq!(longer.base(), slanted.base());
        assert!((longer.length() - 10.0).abs() < 1e-9);
        assert!((longer.seed() - DVec2::new(16.0, 12.0)).length() < 1e-9);

        let degenerate = Origin::Segment {
            x1: 1.0,
            y1: 1.0,
            x2: 1.0,
            y2: 1.0,
        };
        assert_eq!(degenerate.with_length(4.0).seed(), DVec2::new(1.0, -3.0));
    }

    #[test]
    fn presets_fix_the_branching_parameters() {
        assert_eq!(TreeConfig::binary(100.0, 0.5, 0.3, 0.1).complexity, 2);
        assert_eq!(TreeConfig::ternary(100.0, 0.5, 0.3, 0.1).complexity, 3);

        let dragon = TreeConfig::dragon(100.0, 0.7, 0.2);
        assert_eq!(dragon.complexity, 2);
        assert_eq!(dragon.branch_angle, FRAC_PI_2);
        assert_eq!(dragon.shift_angle, 0.2);

        let sym = TreeConfig::symmetric(100.0, 0.5, 5, 0.4);
        assert_eq!(sym.complexity, 5);
        assert_eq!(sym.shift_angle, 0.0);

        let real = sym.with_sigma(Sigma::new(0.1, 0.2));
        assert_eq!(real.sigma, Sigma::new(0.1, 0.2));
        assert_eq!(real.complexity, 5);
    }

    #[test]
    fn validate_rejects_zero_complexity() {
        let cfg = TreeConfig {
            complexity: 0,
            ..TreeConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TreeError::InvalidComplexity(0))));
    }

    #[test]
    fn validate_rejects_non_positive_length() {
        let cfg = TreeConfig::binary(0.0, 0.5, 0.3, 0.0);
        assert!(matches!(
            cfg.validate(),
            Err(TreeError::NonPositiveLength(_))
        ));

        let cfg = TreeConfig::binary(-3.0, 0.5, 0.3, 0.0);
        assert!(matches!(
            cfg.validate(),
            Err(TreeError::NonPositiveLength(_))
        ));

        let degenerate = TreeConfig::default().with_origin(Origin::Segment {
            x1: 1.0,
            y1: 1.0,
            x2: 1.0,
            y2: 1.0,
        });
        assert!(degenerate.validate().is_err());
    }

    #[rstest::rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn validate_rejects_non_finite_scale(#[case] scale: f64) {
        let cfg = TreeConfig {
            scale,
            ..TreeConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TreeError::InvalidScale(_))));
        assert!(matches!(Tree::new(cfg), Err(TreeError::InvalidScale(_))));
    }

    #[test]
    fn validate_rejects_negative_sigma() {
        let cfg = TreeConfig::default().with_sigma(Sigma::new(-0.1, 0.0));
        assert!(matches!(cfg.validate(), Err(TreeError::InvalidSigma { .. })));
    }

    #[test]
    fn from_toml_str_fills_missing_fields_with_defaults() {
        let cfg = TreeConfig::from_toml_str(
            r#"
            complexity = 3
            scale = 0.7

            [origin]
            kind = "point"
            x = 0.0
            y = 0.0
            length = 300.0

            [sigma]
            length = 0.2
            angle = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(cfg.complexity, 3);
        assert_eq!(cfg.scale, 0.7);
        assert_eq!(cfg.length(), 300.0);
        assert_eq!(cfg.sigma, Sigma::new(0.2, 0.1));
        assert_eq!(cfg.branch_angle, PI);
    }

    #[test]
    fn from_toml_str_reports_parse_and_validation_errors() {
        assert!(matches!(
            TreeConfig::from_toml_str("complexity = \"many\""),
            Err(TreeError::Config(_))
        ));
        assert!(matches!(
            TreeConfig::from_toml_str("complexity = 0"),
            Err(TreeError::InvalidComplexity(0))
        ));
    }
}
