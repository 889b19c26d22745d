use eframe::egui::{self, RichText, Ui};

use ppi_explorer::ppi::{InteractionMode, PathStep};

use super::super::ViewModel;

impl ViewModel {
    fn endpoint_label(&self, index: Option<usize>) -> String {
        index
            .and_then(|index| self.session.network().vertex(index))
            .map_or_else(|| "not chosen".to_owned(), |vertex| vertex.name.clone())
    }

    /// The route is only computed once the vertices have come to rest.
    pub(in crate::app) fn can_show_path(&self) -> bool {
        self.session.path_step() == PathStep::Showing
            && self.session.current_path().is_empty()
            && !self.interpolation.is_moving()
    }

    pub(in crate::app) fn draw_path_controls(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Shortest path").strong());
        let active = self.session.network().is_active();

        let mut mode = self.session.mode();
        ui.add_enabled_ui(active, |ui| {
            ui.horizontal(|ui| {
                ui.radio_value(&mut mode, InteractionMode::Inspect, "Inspect");
                ui.radio_value(&mut mode, InteractionMode::Path, "Pick path");
            });
        });
        if mode != self.session.mode() {
            self.session.set_mode(mode);
            self.status = (mode == InteractionMode::Path)
                .then(|| "Choose the midpoint of the path.".to_owned());
        }

        ui.label(format!("Midpoint: {}", self.endpoint_label(self.session.mid_point())));
        ui.label(format!(
            "Final point: {}",
            self.endpoint_label(self.session.final_point())
        ));

        ui.horizontal(|ui| {
            let ready = self.can_show_path();
            if ui
                .add_enabled(ready, egui::Button::new("Show path"))
                .clicked()
            {
                self.show_path();
            }
            if ui
                .add_enabled(active, egui::Button::new("Reset path"))
                .clicked()
            {
                self.session.reset_path();
                self.status = None;
            }
        });

        let network = self.session.network();
        for &edge_index in self.session.current_path() {
            let edge = network.edges()[edge_index];
            let name = |index: usize| {
                network
                    .vertex(index)
                    .map(|vertex| vertex.name.clone())
                    .unwrap_or_default()
            };
            ui.label(format!("{} -> {}  {:.3}", name(edge.a), name(edge.b), edge.score));
        }
    }
}
