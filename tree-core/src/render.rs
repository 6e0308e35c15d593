//! Rendering adapter interface.
//!
//! The core never draws anything itself. A backend implements [`Canvas`],
//! and [`draw_tree`] walks [`Tree::branches`] level by level, styling each
//! level with a [`BranchStyle`].

use crate::{
    tree::Tree,
    types::{Age, Segment},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Branch color: one color for the whole tree, or a gradient from the
/// trunk color to the color of the youngest level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpec {
    Solid(Rgb),
    Gradient(Rgb, Rgb),
}

/// Age-dependent styling shared by every backend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchStyle {
    pub color: ColorSpec,
    /// Stroke width of the trunk.
    pub thickness: f64,
}

impl Default for BranchStyle {
    fn default() -> Self {
        Self {
            color: ColorSpec::Solid(Rgb::WHITE),
            thickness: 1.0,
        }
    }
}

impl BranchStyle {
    pub fn new(color: ColorSpec, thickness: f64) -> Self {
        Self { color, thickness }
    }

    /// `round(thickness * 5 / (age + 5))`: thinner with every generation.
    pub fn thickness_at(&self, age: Age) -> f64 {
        (self.thickness * 5.0 / (age as f64 + 5.0)).round()
    }

    /// Color of the branches of `age` in a tree of age `tree_age`.
    ///
    /// Gradients are interpolated linearly over `[0, tree_age]` and each
    /// channel is truncated. A tree of age 0 uses the start color.
    pub fn color_at(&self, age: Age, tree_age: Age) -> Rgb {
        match self.color {
            ColorSpec::Solid(c) => c,
            ColorSpec::Gradient(start, _) if tree_age == 0 => start,
            ColorSpec::Gradient(start, end) => {
                let t = age as f64 / tree_age as f64;
                let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;
                Rgb::new(
                    lerp(start.r, end.r),
                    lerp(start.g, end.g),
                    lerp(start.b, end.b),
                )
            }
        }
    }
}

/// An output medium branches can be drawn on.
///
/// Only [`Canvas::draw_segment`] is required. The level hooks bracket all
/// segments of one age and let structured backends group them.
pub trait Canvas {
    fn begin_level(&mut self, _age: Age) {}

    fn draw_segment(&mut self, segment: Segment, color: Rgb, thickness: f64);

    fn end_level(&mut self, _age: Age) {}
}

/// Draws every branch of `tree` onto `canvas`, trunk first.
pub fn draw_tree<C: Canvas + ?Sized>(tree: &Tree, canvas: &mut C, style: &BranchStyle) {
    let tree_age = tree.age();
    for (age, level) in tree.branches().into_iter().enumerate() {
        let thickness = style.thickness_at(age);
        let color = style.color_at(age, tree_age);

        canvas.begin_level(age);
        for segment in level {
            canvas.draw_segment(segment, color, thickness);
        }
        canvas.end_level(age);
    }
    debug!(age = tree_age, "drew tree");
}
