// ui.rs - Controls plus the batched grid view

use std::time::{Duration, Instant};

use conway::patterns;
use eframe::egui;
use egui::{Rect, Vec2};
use tracing::{error, info};

use crate::LifeApp;
use crate::sink::{PainterSink, cell_at};

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let interval = Duration::from_secs_f32(1.0 / self.speed.max(0.5));

        // Step once per interval if running
        let due = self.is_running && self.last_update.elapsed() >= interval;
        if due {
            self.last_update = Instant::now();
            match self.sim.step() {
                Ok(true) => {
                    info!(generation = self.sim.grid().generation(), "Grid settled into a cycle, pausing");
                    self.is_running = false;
                }
                Ok(false) => {}
                Err(err) => {
                    error!(%err, "Generation step failed, pausing");
                    self.is_running = false;
                }
            }
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    self.last_update = Instant::now();
                }

                if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                    if let Err(err) = self.sim.step() {
                        error!(%err, "Generation step failed");
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.sim.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    let seed = crate::clock_seed();
                    if let Err(err) = self.sim.reseed(self.config.threshold, seed) {
                        error!(%err, "Reseed failed");
                    }
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.sim.apply_pattern(&patterns::PATTERNS[self.selected_pattern]);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed, 0.5..=120.0).suffix(" gen/sec"));

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);

                ui.separator();

                ui.label(format!("Generation: {}", self.sim.grid().generation()));
                ui.label(format!("Live cells: {}", self.live_cells));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let side = ui.available_size().min_elem();
            let (response, painter) = ui.allocate_painter(Vec2::splat(side), egui::Sense::click());
            let rect = Rect::from_min_size(response.rect.min, Vec2::splat(side));

            painter.rect_filled(rect, 0.0, self.dead_color);

            // One mesh, one draw call, whatever the population
            let mut sink = PainterSink::new(&painter, rect, self.live_color);
            let stats = self.sim.render(&mut sink);
            self.live_cells = stats.live_cells;

            // Click to toggle while paused
            if !self.is_running && response.clicked() {
                let grid = self.sim.grid();
                let hit = response
                    .interact_pointer_pos()
                    .and_then(|pos| cell_at(rect, pos, grid.rows(), grid.columns()));
                if let Some((x, y)) = hit {
                    self.sim.toggle(x, y);
                }
            }
        });

        if let Some(fps) = self.fps.tick(Instant::now()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "Conway's Game of Life | FPS: {fps} | Live: {}",
                self.live_cells
            )));
        }

        if self.is_running {
            ctx.request_repaint_after(interval.saturating_sub(self.last_update.elapsed()));
        }
    }
}
