//! Interactive fractal tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the growing [`Tree`], its
//! configuration and the branch styling, and implements [`eframe::App`] to
//! grow, render and export the tree through an egui UI.

use crate::painter::{PainterCanvas, ScreenTransform};
use eframe::App;
use std::path::PathBuf;
use tracing::warn;
use tree_core::{BranchStyle, ColorSpec, Rgb, Sigma, SvgCanvas, Tree, TreeConfig, draw_tree};

const DEFAULT_LENGTH: f64 = 300.0;

/// Largest level the viewer will grow; keeps wide trees drawable.
const LEVEL_BUDGET: u64 = 500_000;

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true` and enough time has passed, call
///    [`Viewer::step_once`].
/// 3. Render the tree through a [`PainterCanvas`].
///
/// ### Fields
/// - `tree` - The tree being grown.
/// - `cfg` - Configuration the tree is rebuilt from when edited.
/// - `seed` - Jitter seed, so edits regrow the same random tree.
/// - `max_age` - Generation limit for stepping and auto-growth.
///
/// - `gradient`, `color_start`, `color_end`, `thickness` - Branch styling.
///
/// - `running` - Whether the tree is currently auto-growing.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
/// - `fit_requested` - Fit the tree into the view on the next frame.
///
/// - `step_interval` - Target time between automatic growth steps (seconds).
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `export_path` - Destination of the SVG export.
/// - `status` - Last message shown in the status bar.
pub struct Viewer {
    tree: Tree,
    cfg: TreeConfig,
    seed: u64,
    max_age: usize,

    gradient: bool,
    color_start: [u8; 3],
    color_end: [u8; 3],
    thickness: f64,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,
    fit_requested: bool,

    step_interval: f64,
    last_step_time: f64,
    export_path: String,
    status: Option<String>,
}

impl Viewer {
    /// Creates a viewer showing the seed of a binary tree.
    ///
    /// The camera starts unpanned and fits the tree on the first frame.
    pub fn new() -> Self {
        let cfg = TreeConfig::binary(DEFAULT_LENGTH, 0.65, 30f64.to_radians(), 0.0);
        let seed = rand::random();
        let tree = Tree::with_seed(cfg, seed).unwrap_or_default();

        Self {
            tree,
            cfg,
            seed,
            max_age: 12,
            gradient: true,
            color_start: [127, 73, 15],
            color_end: [68, 196, 39],
            thickness: 12.0,
            running: false,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            fit_requested: true,
            step_interval: 0.3,
            last_step_time: 0.0,
            export_path: "fractal_tree.svg".to_string(),
            status: None,
        }
    }

    /// Styling derived from the current UI settings.
    fn style(&self) -> BranchStyle {
        let color = if self.gradient {
            ColorSpec::Gradient(Rgb::from(self.color_start), Rgb::from(self.color_end))
        } else {
            ColorSpec::Solid(Rgb::from(self.color_start))
        };
        BranchStyle::new(color, self.thickness)
    }

    /// Whether growing `tree` once more stays within [`LEVEL_BUDGET`].
    fn can_grow(tree: &Tree) -> bool {
        tree.nodes_at_age(tree.age() + 1) <= LEVEL_BUDGET
    }

    /// Rebuilds the tree from `cfg` and regrows it to the current age, or
    /// as far as [`LEVEL_BUDGET`] allows.
    ///
    /// An invalid configuration leaves the current tree untouched and is
    /// reported in the status bar.
    fn rebuild(&mut self) {
        let age = self.tree.age();
        match Tree::with_seed(self.cfg, self.seed) {
            Ok(mut tree) => {
                while tree.age() < age && Self::can_grow(&tree) {
                    tree.grow();
                }
                self.tree = tree;
                self.status = None;
            }
            Err(e) => {
                warn!(error = %e, "rejected tree config");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Starts over from the seed node with a fresh jitter seed.
    ///
    /// Keeps the configuration and styling, stops auto-growth. An invalid
    /// configuration keeps the current tree and is reported like in
    /// [`Viewer::rebuild`].
    fn reset(&mut self) {
        self.running = false;
        let seed = rand::random();
        match Tree::with_seed(self.cfg, seed) {
            Ok(tree) => {
                self.seed = seed;
                self.tree = tree;
                self.fit_requested = true;
                self.status = None;
            }
            Err(e) => {
                warn!(error = %e, "rejected tree config on reset");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Replaces the configuration with a preset and starts over.
    fn apply_preset(&mut self, cfg: TreeConfig) {
        self.cfg = cfg;
        self.reset();
    }

    /// Grows one generation unless `max_age` or the level budget is reached.
    fn step_once(&mut self) {
        if self.tree.age() >= self.max_age {
            self.running = false;
            self.status = Some(format!("max age {} reached", self.max_age));
            return;
        }
        if !Self::can_grow(&self.tree) {
            self.running = false;
            self.status = Some(format!("next level exceeds {LEVEL_BUDGET} branches"));
            return;
        }
        self.tree.grow();
        self.fit_requested = true;
    }

    /// Writes the current tree, moved into its bounding rectangle, as SVG.
    fn export_svg(&self) -> tree_core::Result<PathBuf> {
        let mut tree = self.tree.clone();
        tree.move_into_rectangle();
        let (w, h) = tree.size();

        let mut canvas = SvgCanvas::new(w, h);
        draw_tree(&tree, &mut canvas, &self.style());

        let path = PathBuf::from(&self.export_path);
        canvas.save(&path)?;
        Ok(path)
    }

    /// Zoom that fits the tree's bounding rectangle into `rect` with a margin.
    fn fit_zoom(&self, rect: egui::Rect) -> f32 {
        let bounds = self.tree.bounding_rectangle();
        let w = bounds.width().max(1.0) as f32;
        let h = bounds.height().max(1.0) as f32;
        ((rect.width() / w).min(rect.height() / h) * 0.9).clamp(0.01, 20.0)
    }

    fn transform(&self, rect: egui::Rect) -> ScreenTransform {
        ScreenTransform {
            rect,
            focus: self.tree.bounding_rectangle().center(),
            zoom: self.zoom,
            pan: self.pan,
        }
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    ///
    /// Returns `true` if the value was edited.
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Like [`Viewer::labeled_drag_f64`], editing radians in degrees.
    fn labeled_drag_degrees(
        ui: &mut egui::Ui,
        label: &str,
        radians: &mut f64,
        range: std::ops::RangeInclusive<f64>,
    ) -> bool {
        let mut degrees = radians.to_degrees();
        let changed = Self::labeled_drag_f64(ui, label, &mut degrees, range, 0.5);
        if changed {
            *radians = degrees.to_radians();
        }
        changed
    }

    /// Builds the top panel UI (run controls, stepping, zoom, export).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Grow" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.05..=2.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.01..=20.0).text("Zoom"));
                if ui.button("Fit").clicked() {
                    self.pan = egui::vec2(0.0, 0.0);
                    self.fit_requested = true;
                }

                ui.separator();
                ui.text_edit_singleline(&mut self.export_path);
                if ui.button("Export SVG").clicked() {
                    self.status = Some(match self.export_svg() {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(e) => {
                            warn!(error = %e, "svg export failed");
                            format!("export failed: {e}")
                        }
                    });
                }
            });
        });
    }

    /// Builds the bottom status bar (age, node counts, last message).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (w, h) = self.tree.size();
                ui.label(format!("size = {w} x {h}"));
                ui.separator();
                ui.label(format!("nodes = {}", self.tree.node_count(None)));
                ui.label(format!("age = {}", self.tree.age()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
        });
    }

    /// Builds the right-hand panel for tree parameters, presets and styling.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Tree");

                let mut changed = false;

                ui.separator();
                ui.label("Shape");
                let mut length = self.cfg.length();
                if Self::labeled_drag_f64(ui, "length:", &mut length, 1.0..=2000.0, 1.0) {
                    self.cfg.origin = self.cfg.origin.with_length(length);
                    changed = true;
                }
                changed |= Self::labeled_drag_f64(ui, "scale:", &mut self.cfg.scale, 0.05..=1.5, 0.005);
                changed |= ui
                    .horizontal(|ui| {
                        ui.label("complexity:");
                        ui.add(
                            egui::DragValue::new(&mut self.cfg.complexity)
                                .range(1..=8)
                                .speed(0.05),
                        )
                        .changed()
                    })
                    .inner;

                ui.separator();
                ui.label("Angles (degrees)");
                changed |= Self::labeled_drag_degrees(
                    ui,
                    "branch:",
                    &mut self.cfg.branch_angle,
                    -360.0..=360.0,
                );
                changed |= Self::labeled_drag_degrees(
                    ui,
                    "shift:",
                    &mut self.cfg.shift_angle,
                    -360.0..=360.0,
                );

                ui.separator();
                ui.label("Jitter");
                changed |= Self::labeled_drag_f64(
                    ui,
                    "sigma length:",
                    &mut self.cfg.sigma.length,
                    0.0..=1.0,
                    0.005,
                );
                changed |= Self::labeled_drag_degrees(
                    ui,
                    "sigma angle:",
                    &mut self.cfg.sigma.angle,
                    0.0..=360.0,
                );

                if changed {
                    self.rebuild();
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("max age:");
                    ui.add(egui::DragValue::new(&mut self.max_age).range(0..=20));
                });
                if let Ok(steps) = self.tree.steps_to_reach_length(1.0) {
                    ui.label(format!("steps to 1px branches = {steps:.2}"));
                }

                ui.separator();
                ui.label("Presets");
                ui.horizontal_wrapped(|ui| {
                    let length = self.cfg.length();
                    if ui.button("Binary").clicked() {
                        self.apply_preset(TreeConfig::binary(length, 0.65, 30f64.to_radians(), 0.0));
                    }
                    if ui.button("Ternary").clicked() {
                        self.apply_preset(TreeConfig::ternary(length, 0.6, 25f64.to_radians(), 0.0));
                    }
                    if ui.button("Sierpinski").clicked() {
                        self.apply_preset(TreeConfig::symmetric(length, 0.5, 3, 120f64.to_radians()));
                    }
                    if ui.button("Dragon").clicked() {
                        self.apply_preset(TreeConfig::dragon(length, 0.7, 0.0));
                    }
                    if ui.button("Realistic").clicked() {
                        self.apply_preset(
                            TreeConfig::ternary(length, 0.65, 40f64.to_radians(), 0.0)
                                .with_sigma(Sigma::new(0.2, 10f64.to_radians())),
                        );
                    }
                });

                ui.separator();
                ui.label("Style");
                Self::labeled_drag_f64(ui, "thickness:", &mut self.thickness, 0.0..=50.0, 0.2);
                ui.checkbox(&mut self.gradient, "gradient");
                ui.horizontal(|ui| {
                    ui.color_edit_button_srgb(&mut self.color_start);
                    if self.gradient {
                        ui.color_edit_button_srgb(&mut self.color_end);
                    }
                });
            });
    }

    /// Builds the central panel where the tree is drawn and navigated.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if self.fit_requested {
                self.zoom = self.fit_zoom(rect);
                self.fit_requested = false;
            }

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.transform(rect).screen_to_world(pointer_screen);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.01, 20.0);

                let screen_after = self.transform(rect).world_to_screen(world_before);
                self.pan += pointer_screen - screen_after;
            }

            let mut canvas = PainterCanvas::new(&painter, self.transform(rect));
            draw_tree(&self.tree, &mut canvas, &self.style());

            // Auto-grow if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                if now - self.last_step_time >= self.step_interval {
                    self.step_once();
                    self.last_step_time = now;
                }
                ctx.request_repaint();
            }
        });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
