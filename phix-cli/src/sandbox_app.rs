//! Interactive sandbox window
//!
//! Draws the particles with egui, turns pointer input into spawn, delete and
//! influence requests, and reloads the settings file when it changes on disk.

use crate::scenarios::Scenario;
use eframe::egui;
use glam::Vec2;
use notify::{Event, RecommendedWatcher, Watcher};
use phix_core::config::load_settings;
use phix_core::diagnostics::{format_config_error, Diagnostic, DiagnosticSeverity, Diagnostics};
use phix_core::spawn::{radius_bounds, MAX_CLUSTER};
use phix_core::{
    get_particle_states, spawn_cluster, step_simulation, DeleteRequest, FrameInput, Influence,
    Material, ParticleState, SettingsField, Shape, SimulationContext,
};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::mpsc;

/// Spawning while dragging only happens on every n-th frame
const SPAWN_INTERVAL: u64 = 3;

const WATER_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 110, 230);
const GAS_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(150, 150, 160, 140);
const STATIC_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);

pub struct SandboxApp {
    sim: SimulationContext,
    scenario: Option<Scenario>,
    settings_path: Option<PathBuf>,
    /// Outcome of the last settings reload
    diagnostics: Diagnostics,
    playing: bool,
    steps_per_frame: usize,
    shape: Shape,
    spawn_radius: f32,
    cluster_count: usize,
    frame_counter: u64,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl SandboxApp {
    pub fn new(
        sim: SimulationContext,
        settings_path: Option<PathBuf>,
        scenario: Option<Scenario>,
    ) -> Self {
        let settings_path = settings_path.map(|p| p.canonicalize().unwrap_or(p));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone during shutdown
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), settings_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        Self {
            sim,
            scenario,
            settings_path,
            diagnostics: Diagnostics::new(),
            playing: true,
            steps_per_frame: 1,
            shape: Shape::Circle,
            spawn_radius: 12.0,
            cluster_count: 1,
            frame_counter: 0,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn reload_settings(&mut self) {
        let Some(path) = self.settings_path.as_ref() else {
            return;
        };
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                self.diagnostics = Diagnostics::new();
                self.diagnostics
                    .push(Diagnostic::error(format!("{}: {}", path.display(), e), None));
                return;
            }
        };

        // A broken file keeps the running settings
        match load_settings(&source) {
            Ok((file, diagnostics)) => {
                log::info!("reloaded settings from {}", path.display());
                self.sim.set_settings(file.settings);
                self.sim.arena = file.arena;
                self.diagnostics = diagnostics;
            }
            Err(e) => {
                log::warn!("{}", format_config_error(&e, &source));
                self.diagnostics = Diagnostics::new();
                self.diagnostics.push(Diagnostic::from_config_error(&e));
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event { kind, paths, .. }) if kind.is_modify() || kind.is_create() => {
                    if self.settings_path.as_ref().is_some_and(|p| paths.contains(p)) {
                        needs_reload = true;
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_settings();
        }
    }

    fn reset(&mut self) {
        self.sim.world.clear();
        if let Some(scenario) = self.scenario {
            self.sim.world.particles = scenario.build(&self.sim.arena);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }
            if ui.button("⏭ Step").clicked() {
                step_simulation(&mut self.sim, &FrameInput::default());
            }
            if ui.button("⏮ Reset").clicked() {
                self.reset();
            }
            if ui.button("Clear").clicked() {
                self.sim.world.clear();
            }

            ui.separator();
            ui.label("Steps/frame:");
            ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=4));

            ui.separator();
            let stats = self.sim.last_step();
            let counts = stats.counts;
            ui.label(format!(
                "Frame {} | solid {} water {} gas {} static {} | collisions: {} iter{}",
                stats.frame,
                counts.solid,
                counts.water,
                counts.gas,
                counts.fixed,
                stats.collision.iterations,
                if stats.collision.converged { "" } else { " (capped)" }
            ));
        });
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Spawn");
        ui.horizontal_wrapped(|ui| {
            for (n, shape) in Shape::ALL.into_iter().enumerate() {
                ui.selectable_value(&mut self.shape, shape, format!("{} {}", n + 1, shape.label()));
            }
        });
        let (lo, hi) = radius_bounds(self.shape.default_material());
        self.spawn_radius = self.spawn_radius.clamp(lo, hi);
        ui.add(egui::Slider::new(&mut self.spawn_radius, lo..=hi).text("Size"));
        ui.add(egui::Slider::new(&mut self.cluster_count, 1..=MAX_CLUSTER).text("Cluster"));

        ui.separator();
        ui.heading("Settings");
        for field in SettingsField::ALL {
            if field == SettingsField::TopBarrier {
                let mut on = self.sim.settings().has_top_barrier;
                if ui.checkbox(&mut on, field.label()).changed() {
                    self.sim.update_settings(|s| s.has_top_barrier = on);
                }
                continue;
            }
            let mut value = self.sim.settings().get(field);
            if ui
                .add(egui::Slider::new(&mut value, slider_range(field)).text(field.label()))
                .changed()
            {
                self.sim.update_settings(|s| s.set(field, value));
            }
        }

        let mut warnings = self.diagnostics.warnings().peekable();
        if warnings.peek().is_some() {
            ui.separator();
            for warning in warnings {
                ui.label(egui::RichText::new(warning.to_string()).color(egui::Color32::YELLOW));
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let keys = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
        ];
        ctx.input(|i| {
            for (key, shape) in keys.into_iter().zip(Shape::ALL) {
                if i.key_pressed(key) {
                    self.shape = shape;
                }
            }
        });
    }

    /// Turn the pointer state over the canvas into this frame's requests
    fn pointer_input(&self, ctx: &egui::Context, view: &View) -> FrameInput {
        let mut input = FrameInput::new();
        let (pos, primary, secondary, shift) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_down(),
                i.pointer.secondary_down(),
                i.modifiers.shift,
            )
        });
        let Some(pos) = pos.filter(|p| view.rect.contains(*p)) else {
            return input;
        };
        let world = view.to_world(pos);

        if primary {
            if shift {
                input.deletes.push(DeleteRequest::at(world));
            } else if self.frame_counter % SPAWN_INTERVAL == 0 {
                input.spawns =
                    spawn_cluster(world, self.spawn_radius, self.shape, self.cluster_count);
            }
        }
        if secondary {
            let settings = self.sim.settings();
            input.influences.push(if shift {
                Influence::attract(world, settings)
            } else {
                Influence::repel(world, settings)
            });
        }
        input
    }

    fn draw(&self, painter: &egui::Painter, view: &View) {
        painter.rect_filled(view.rect, 0.0, egui::Color32::from_gray(18));

        let arena = &self.sim.arena;
        let floor = view.to_screen(Vec2::new(0.0, arena.floor()));
        painter.hline(
            view.rect.x_range(),
            floor.y,
            egui::Stroke::new(2.0, egui::Color32::GRAY),
        );
        if self.sim.settings().has_top_barrier {
            let ceiling = view.to_screen(Vec2::new(0.0, arena.ceiling()));
            painter.hline(
                view.rect.x_range(),
                ceiling.y,
                egui::Stroke::new(2.0, egui::Color32::GRAY),
            );
        }

        let max_speed = self.sim.settings().max_speed;
        for particle in get_particle_states(&self.sim) {
            draw_particle(painter, view, &particle, max_speed);
        }
    }
}

/// Maps arena coordinates onto the canvas. Both have +y pointing down.
struct View {
    rect: egui::Rect,
    scale: f32,
}

impl View {
    fn fit(rect: egui::Rect, width: f32, height: f32) -> Self {
        let scale = (rect.width() / width).min(rect.height() / height).max(0.01);
        Self { rect, scale }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x * self.scale, p.y * self.scale)
    }

    fn to_world(&self, p: egui::Pos2) -> Vec2 {
        let d = p - self.rect.min;
        Vec2::new(d.x / self.scale, d.y / self.scale)
    }
}

/// Green at rest, red at the speed cap
fn speed_color(speed: f32, max_speed: f32) -> egui::Color32 {
    let t = if max_speed > 0.0 {
        (speed / max_speed).clamp(0.0, 1.0)
    } else {
        0.0
    };
    egui::Color32::from_rgb((255.0 * t) as u8, (255.0 * (1.0 - t)) as u8, 60)
}

fn draw_particle(painter: &egui::Painter, view: &View, particle: &ParticleState, max_speed: f32) {
    let center = view.to_screen(particle.pos);
    let r = particle.radius * view.scale;
    let color = match particle.material {
        Material::Solid => speed_color(particle.vel.length(), max_speed),
        Material::Water => WATER_COLOR,
        Material::Gas => GAS_COLOR,
        Material::Static => STATIC_COLOR,
    };

    match particle.shape {
        Shape::Square | Shape::Static => {
            let rect = egui::Rect::from_center_size(center, egui::vec2(2.0 * r, 2.0 * r));
            painter.rect_filled(rect, 0.0, color);
        }
        Shape::Triangle => {
            let points = vec![
                center + egui::vec2(0.0, -r),
                center + egui::vec2(r * 0.866, r * 0.5),
                center + egui::vec2(-r * 0.866, r * 0.5),
            ];
            painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
        }
        Shape::Circle | Shape::Water | Shape::Gas => {
            painter.circle_filled(center, r, color);
        }
    }
}

/// Slider span for each field; the lower end matches the field's clamp
fn slider_range(field: SettingsField) -> RangeInclusive<f32> {
    match field {
        SettingsField::Gravity => 0.0..=2.0,
        SettingsField::MaxSpeed => 0.1..=40.0,
        SettingsField::MoveAwayDistance | SettingsField::MoveAttractDistance => 10.0..=600.0,
        SettingsField::MoveAwayStrength | SettingsField::MoveAttractStrength => 0.1..=40.0,
        SettingsField::GroundRestitution
        | SettingsField::CollisionRestitution
        | SettingsField::AirDrag
        | SettingsField::GroundFriction
        | SettingsField::TopBarrier => 0.0..=1.0,
    }
}

impl eframe::App for SandboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::SidePanel::right("settings")
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.settings_panel(ui));
            });

        if self.diagnostics.has_errors() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                for error in self
                    .diagnostics
                    .iter()
                    .filter(|d| d.severity == DiagnosticSeverity::Error)
                {
                    ui.label(egui::RichText::new(error.to_string()).color(egui::Color32::RED));
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let view = View::fit(response.rect, self.sim.arena.width, self.sim.arena.height);

            if self.playing {
                let input = self.pointer_input(ctx, &view);
                step_simulation(&mut self.sim, &input);
                let idle = FrameInput::default();
                for _ in 1..self.steps_per_frame {
                    step_simulation(&mut self.sim, &idle);
                }
                self.frame_counter += 1;
            }

            self.draw(&painter, &view);
        });

        if self.playing {
            ctx.request_repaint();
        }
    }
}
