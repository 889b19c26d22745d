use std::sync::Arc;

use eframe::egui::{self, Align, Color32, Context, Layout, RichText};

use ppi_explorer::ppi::{MemoryStore, NetworkConfig, NetworkSession};
use ppi_explorer::util::short_name;

use super::super::animation::Interpolation;
use super::super::transform::ViewTransform;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(store: MemoryStore, config: NetworkConfig) -> Self {
        let catalog = store.protein_ids();
        Self {
            session: NetworkSession::new(Arc::new(store), config),
            catalog,
            search: String::new(),
            search_matches: None,
            pending: None,
            last_error: None,
            status: None,
            transform: ViewTransform::default(),
            interpolation: Interpolation::default(),
            hovered: None,
            show_matrix: false,
        }
    }

    fn center_text(&self) -> String {
        let network = self.session.network();
        if !network.is_active() {
            return "no network".to_owned();
        }
        let center = network.center();
        format!("center: {} ({})", center.name, short_name(&center.id))
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        let is_building = self.pending.is_some();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("ppi-explorer");
                    ui.separator();
                    ui.label(self.center_text());
                    ui.label(format!("edges: {}", self.session.network().edges().len()));
                    ui.label(format!("threshold: {}", self.session.config().threshold));
                    ui.separator();

                    if ui.button("-").on_hover_text("Decrease scale").clicked() {
                        self.transform.decrease_scale();
                    }
                    ui.label(format!("{:.1}x", self.transform.scale));
                    if ui.button("+").on_hover_text("Increase scale").clicked() {
                        self.transform.increase_scale();
                    }
                    if ui.button("Reset scale").clicked() {
                        self.transform.reset_scale();
                    }
                    if ui.button("Reset view").clicked() {
                        self.transform.reset();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.checkbox(&mut self.show_matrix, "Score matrix");
                        if is_building {
                            ui.spinner();
                            if let Some(pending) = &self.pending {
                                ui.label(format!("building {}", short_name(&pending.protein_id)));
                            }
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(error) = &self.last_error {
                        ui.label(RichText::new(error.as_str()).color(Color32::from_rgb(248, 113, 113)));
                        if ui.button("Dismiss").clicked() {
                            self.last_error = None;
                        }
                    } else if let Some(status) = &self.status {
                        ui.label(status.as_str());
                    } else {
                        ui.label("Right-drag to pan, scroll to zoom.");
                    }
                });
            });

        egui::SidePanel::left("search")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_search(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.draw_details(ui);
                ui.separator();
                self.draw_path_controls(ui);
            });

        let mut show_matrix = self.show_matrix;
        egui::Window::new("Score matrix")
            .open(&mut show_matrix)
            .resizable(true)
            .default_width(620.0)
            .show(ctx, |ui| self.draw_matrix(ui));
        self.show_matrix = show_matrix;

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}
