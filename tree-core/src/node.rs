use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

/// A point of the grown tree.
///
/// Coordinates follow the screen convention: `x` grows to the right and
/// `y` grows downward. Angles are measured from the horizontal, and a
/// positive angle points "up" on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub pos: DVec2,
}

impl Node {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
        }
    }

    pub fn from_pos(pos: DVec2) -> Self {
        Self { pos }
    }

    /// Returns a new node `distance` away from this one in direction `angle`.
    ///
    /// `x' = x + cos(-angle) * distance`, `y' = y + sin(-angle) * distance`.
    pub fn make_new_node(&self, distance: f64, angle: f64) -> Self {
        Self::new(
            self.pos.x + (-angle).cos() * distance,
            self.pos.y + (-angle).sin() * distance,
        )
    }

    /// Direction of the branch running from `other` to `self`.
    ///
    /// Feeding the result back into [`Node::make_new_node`] continues the
    /// branch in the same direction.
    pub fn angle_to(&self, other: &Node) -> f64 {
        (self.pos.x - other.pos.x).atan2(self.pos.y - other.pos.y) - FRAC_PI_2
    }

    /// Translates the node in place.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.pos += DVec2::new(dx, dy);
    }

    pub fn as_pair(&self) -> (f64, f64) {
        (self.pos.x, self.pos.y)
    }
}
