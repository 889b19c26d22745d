use eframe::egui::{self, RichText, Ui};

use ppi_explorer::ppi::CENTER;
use ppi_explorer::util::format_size;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Protein").strong());

        let network = self.session.network();
        if !network.is_active() {
            ui.label("No network on display.");
            return;
        }

        let Some(index) = self.session.inspected().or(self.hovered) else {
            ui.label("Click a protein to inspect it.");
            return;
        };
        let Some(vertex) = network.vertex(index) else {
            return;
        };

        egui::Grid::new("protein_details")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.label(RichText::new(vertex.name.as_str()).strong());
                ui.end_row();
                ui.label("Id");
                ui.label(vertex.id.as_str());
                ui.end_row();
                ui.label("Size");
                ui.label(format_size(&vertex.size));
                ui.end_row();
            });

        if !vertex.annotation.is_empty() {
            ui.add_space(4.0);
            ui.label(vertex.annotation.as_str());
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Linked to").strong());
        let matrix = network.matrix();
        for &neighbor in &vertex.neighbors {
            let score = matrix.get(index, neighbor).max(matrix.get(neighbor, index));
            let name = network
                .vertex(neighbor)
                .map(|other| other.name.as_str())
                .unwrap_or_default();
            ui.label(format!("{name}  {score:.3}"));
        }

        let inspected = self.session.inspected() == Some(index);
        let protein_id = vertex.id.clone();
        ui.add_space(8.0);
        let recenter = ui.add_enabled(
            inspected && index != CENTER && self.pending.is_none(),
            egui::Button::new("Recenter on this protein"),
        );
        if recenter.clicked() {
            self.request_network(&protein_id, true);
        }
    }
}
