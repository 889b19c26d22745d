use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};

use ppi_explorer::ppi::CENTER;
use ppi_explorer::util::{format_size, short_name};

use super::super::ViewModel;
use super::super::render_utils::{
    EDGE_COLOR, PATH_COLOR, SELECTION_COLOR, blend_color, draw_background, edge_width,
    vertex_color, vertex_radius,
};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.handle_graph_zoom(ui, &response);
        self.handle_graph_pan(&response);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, &self.transform);

        if !self.session.network().is_active() {
            let hint = if self.pending.is_some() {
                "Building ego-network..."
            } else {
                "Search for a protein to display its ego-network"
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                hint,
                FontId::proportional(16.0),
                Color32::from_gray(150),
            );
            return;
        }

        let placements = self.interpolation.positions();
        let screen_positions = placements
            .iter()
            .map(|placement| self.transform.to_screen(rect, placement.position))
            .collect::<Vec<Pos2>>();
        let screen_radii = placements
            .iter()
            .map(|placement| vertex_radius(placement.depth, self.transform.scale))
            .collect::<Vec<f32>>();
        if screen_positions.len() != self.session.network().vertices().len() {
            return;
        }

        let hovered = self.hovered_index(ui, &screen_positions, &screen_radii);
        let network = self.session.network();

        for edge in network.edges() {
            let color = if edge.highlighted { PATH_COLOR } else { EDGE_COLOR };
            painter.line_segment(
                [screen_positions[edge.a], screen_positions[edge.b]],
                Stroke::new(edge_width(edge.score), color),
            );
        }

        let marked = [
            self.session.inspected(),
            self.session.mid_point(),
            self.session.final_point(),
        ];
        for (index, vertex) in network.vertices().iter().enumerate() {
            let position = screen_positions[index];
            let radius = screen_radii[index];

            let mut fill = vertex_color(&vertex.id, index == CENTER);
            if hovered == Some(index) {
                fill = blend_color(fill, Color32::WHITE, 0.35);
            }
            painter.circle_filled(position, radius, fill);

            let outline = if marked.contains(&Some(index)) {
                Stroke::new(2.5, SELECTION_COLOR)
            } else {
                Stroke::new(1.0, Color32::from_gray(20))
            };
            painter.circle_stroke(position, radius, outline);

            painter.text(
                position + vec2(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                short_name(&vertex.name),
                FontId::proportional(12.0),
                Color32::from_gray(220),
            );
        }

        let tooltip = hovered.and_then(|index| network.vertex(index)).map(|vertex| {
            format!(
                "{}\n{}\n{}",
                vertex.name,
                vertex.id,
                format_size(&vertex.size)
            )
        });
        self.hovered = hovered;

        let clicked = response.clicked_by(egui::PointerButton::Primary);
        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
        if let Some(index) = hovered.filter(|_| clicked) {
            self.select_vertex(index);
        }
    }
}
