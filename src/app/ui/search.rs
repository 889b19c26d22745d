use eframe::egui::{self, Key, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use ppi_explorer::util::short_name;

use super::super::{SearchMatches, ViewModel};

const MAX_RESULTS: usize = 200;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Best fuzzy matches first, ties broken by id. An empty query lists the
/// catalog in order.
pub(in crate::app) fn search_catalog(catalog: &[String], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return catalog.iter().take(limit).cloned().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = catalog
        .iter()
        .filter_map(|id| {
            let score = fuzzy_match_score(&matcher, id, query)?;
            Some((score, id))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, id)| id.clone())
        .collect()
}

impl ViewModel {
    fn search_results(&mut self) -> &[String] {
        let query = self.search.trim();
        let stale = self
            .search_matches
            .as_ref()
            .is_none_or(|cached| cached.query != query);
        if stale {
            self.search_matches = Some(SearchMatches {
                query: query.to_owned(),
                ids: search_catalog(&self.catalog, query, MAX_RESULTS),
            });
        }

        self.search_matches
            .as_ref()
            .map(|cached| cached.ids.as_slice())
            .unwrap_or_default()
    }

    pub(in crate::app) fn draw_search(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Proteins").strong());
        ui.label(format!("{} in the interaction table", self.catalog.len()));
        ui.add_space(4.0);

        let search_response = ui.text_edit_singleline(&mut self.search);
        let submitted =
            search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
        let can_build = self.pending.is_none();

        if submitted && can_build {
            let query = self.search.trim().to_owned();
            let exact = self.catalog.iter().any(|id| *id == query);
            let target = if exact {
                Some(query)
            } else {
                self.search_results().first().cloned()
            };
            if let Some(protein_id) = target {
                self.request_network(&protein_id, false);
            }
        }

        ui.separator();
        let center_id = self
            .session
            .network()
            .is_active()
            .then(|| self.session.network().center().id.clone());
        let results = self.search_results().to_vec();
        let mut requested = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for id in &results {
                    let is_center = center_id.as_deref() == Some(id.as_str());
                    let label = if is_center {
                        RichText::new(short_name(id)).strong()
                    } else {
                        RichText::new(short_name(id))
                    };
                    let response = ui
                        .add_enabled(can_build, egui::Button::new(label).frame(false))
                        .on_hover_text(id.as_str());
                    if response.clicked() {
                        requested = Some(id.clone());
                    }
                }
                if results.is_empty() {
                    ui.label("No protein matches the query.");
                }
            });

        if let Some(protein_id) = requested {
            self.request_network(&protein_id, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        ["9606.ENSP00000269305", "9606.ENSP00000344818", "BRCA1", "BRCA2", "TP53"]
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn empty_query_lists_the_catalog_in_order() {
        assert_eq!(search_catalog(&catalog(), "  ", 2), ["9606.ENSP00000269305", "9606.ENSP00000344818"]);
    }

    #[test]
    fn fuzzy_query_is_case_insensitive() {
        let matches = search_catalog(&catalog(), "brca", 10);
        assert_eq!(matches, ["BRCA1", "BRCA2"]);

        let matches = search_catalog(&catalog(), "tp53", 10);
        assert_eq!(matches.first().map(String::as_str), Some("TP53"));
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(search_catalog(&catalog(), "zzzz", 10).is_empty());
    }
}
