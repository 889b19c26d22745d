use eframe::egui::{self, Color32, RichText, Ui};

use ppi_explorer::util::short_name;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_matrix(&self, ui: &mut Ui) {
        let network = self.session.network();
        if !network.is_active() {
            ui.label("No network on display.");
            return;
        }

        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("score_matrix")
                .striped(true)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    ui.label("");
                    for vertex in network.vertices() {
                        ui.label(RichText::new(short_name(&vertex.name)).strong());
                    }
                    ui.end_row();

                    for (row_index, row) in network.matrix().rows().iter().enumerate() {
                        ui.label(RichText::new(short_name(&network.vertices()[row_index].name)).strong());
                        for value in row {
                            let text = RichText::new(format!("{value:5.3}")).monospace();
                            if *value == 0.0 {
                                ui.label(text.color(Color32::from_gray(90)));
                            } else {
                                ui.label(text);
                            }
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
