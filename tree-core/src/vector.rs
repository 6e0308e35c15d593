//! Vector backend writing branches into an SVG document.

use crate::{
    error::Result,
    render::{Canvas, Rgb},
    types::{Age, Segment},
};
use std::path::Path;
use svg::{
    Document, Node,
    node::element::{Group, Line},
};
use tracing::info;

/// A [`Canvas`] that collects branches into an SVG document, one `<g>` per
/// age.
///
/// Segments drawn outside of a level are added to the document directly.
#[derive(Debug)]
pub struct SvgCanvas {
    document: Document,
    group: Option<Group>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let document = Document::new()
            .set("width", w)
            .set("height", h)
            .set("viewBox", (0.0, 0.0, w, h));
        Self {
            document,
            group: None,
        }
    }

    /// Closes any open level and returns the document.
    pub fn finish(mut self) -> Document {
        self.flush();
        self.document
    }

    /// Writes the document to `path`.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = self.finish();
        svg::save(path, &document)?;
        info!(path = %path.display(), "saved svg");
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(group) = self.group.take() {
            self.document.append(group);
        }
    }
}

fn stroke(color: Rgb) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

impl Canvas for SvgCanvas {
    fn begin_level(&mut self, age: Age) {
        self.flush();
        self.group = Some(Group::new().set("class", format!("age-{age}")));
    }

    fn draw_segment(&mut self, segment: Segment, color: Rgb, thickness: f64) {
        let (x1, y1, x2, y2) = segment.as_tuple();
        let line = Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", stroke(color))
            .set("stroke-width", thickness);

        match &mut self.group {
            Some(group) => group.append(line),
            None => self.document.append(line),
        }
    }

    fn end_level(&mut self, _age: Age) {
        self.flush();
    }
}

impl std::fmt::Display for SvgCanvas {
    /// Renders the document as it would be saved, including an open level.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut document = self.document.clone();
        if let Some(group) = &self.group {
            document = document.add(group.clone());
        }
        write!(f, "{document}")
    }
}
