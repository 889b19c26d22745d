use std::collections::HashSet;

use tracing::{debug, info, trace};

use super::error::{NetworkError, NetworkResult};
use super::graph::{CENTER, NEIGHBOR_COUNT, NETWORK_SIZE, NetworkData, SCORE_SCALE, ScoreMatrix};
use super::store::{ProteinInfo, ProteinLink, ProteinStore};

fn normalize(score: u32) -> f32 {
    score as f32 / SCORE_SCALE
}

fn top_partners(center_id: &str, mut rows: Vec<ProteinLink>) -> Vec<ProteinLink> {
    rows.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| row.partner != center_id && seen.insert(row.partner.clone()))
        .take(NEIGHBOR_COUNT)
        .collect()
}

/// Queries the store for the center's strongest partners and the scores
/// among them. Nothing outside the returned value is touched, so a failed
/// build never disturbs the network currently on display.
pub fn collect_network(
    store: &dyn ProteinStore,
    center_id: &str,
    threshold: u32,
) -> NetworkResult<NetworkData> {
    let rows = store.partners(center_id)?;
    if rows.is_empty() {
        return Err(NetworkError::UnknownProtein(center_id.to_owned()));
    }

    let partners = top_partners(center_id, rows);
    if partners.len() < NEIGHBOR_COUNT {
        return Err(NetworkError::InsufficientData {
            center: center_id.to_owned(),
            found: partners.len(),
        });
    }
    info!(center = center_id, threshold, "building ego-network");

    let mut ids = Vec::with_capacity(NETWORK_SIZE);
    ids.push(center_id.to_owned());
    ids.extend(partners.iter().map(|row| row.partner.clone()));

    let mut matrix = ScoreMatrix::default();
    for (offset, row) in partners.iter().enumerate() {
        let index = offset + 1;
        let score = normalize(row.score);
        matrix.set(CENTER, index, score);
        matrix.set(index, CENTER, score);
    }

    for i in 1..NETWORK_SIZE {
        let rows = store.partners_between(&ids[i])?;
        trace!(protein = %ids[i], rows = rows.len(), "neighbor row");

        for j in 1..NETWORK_SIZE {
            if i == j {
                continue;
            }

            let matched = rows
                .iter()
                .find(|row| row.partner == ids[j] && row.score > threshold);
            if let Some(row) = matched {
                matrix.set(i, j, normalize(row.score));
            }
        }
    }

    let mut metadata = Vec::with_capacity(NETWORK_SIZE);
    for id in &ids {
        let info = store.metadata(id)?.unwrap_or_else(|| ProteinInfo {
            id: id.clone(),
            name: id.clone(),
            ..Default::default()
        });
        metadata.push(info);
    }

    debug!(center = center_id, "score matrix\n{matrix}");

    Ok(NetworkData {
        ids,
        matrix,
        metadata,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;

    use super::*;
    use crate::ppi::store::MemoryStore;

    pub(crate) const SCENARIO_SCORES: [u32; 9] = [950, 900, 850, 800, 750, 700, 650, 600, 550];

    /// P1 with partners N1..N9 scored [950..550]; N1 and N2 share 500 and
    /// N3 and N4 sit exactly on the threshold.
    pub(crate) fn scenario_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        for (offset, score) in SCENARIO_SCORES.iter().enumerate() {
            let partner = format!("N{}", offset + 1);
            store.insert_link("P1", &partner, *score);
            store.insert_link(&partner, "P1", *score);
        }
        store.insert_link("N1", "N2", 500);
        store.insert_link("N2", "N1", 500);
        store.insert_link("N3", "N4", 400);
        store.insert_link("N4", "N3", 400);
        store.insert_link("N5", "N6", 401);
        store.insert_info(ProteinInfo {
            id: "P1".to_owned(),
            name: "TP53".to_owned(),
            size: "393".to_owned(),
            annotation: "Cellular tumor antigen p53".to_owned(),
        });
        store
    }

    struct FailingStore {
        inner: MemoryStore,
        fail_on: &'static str,
        calls: Mutex<Vec<String>>,
    }

    impl ProteinStore for FailingStore {
        fn partners(&self, protein_id: &str) -> anyhow::Result<Vec<ProteinLink>> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(protein_id.to_owned());
            }
            if protein_id == self.fail_on {
                return Err(anyhow!("connection reset while reading {protein_id}"));
            }
            self.inner.partners(protein_id)
        }

        fn metadata(&self, protein_id: &str) -> anyhow::Result<Option<ProteinInfo>> {
            self.inner.metadata(protein_id)
        }
    }

    #[test]
    fn scenario_center_scores_are_normalized() {
        let data = collect_network(&scenario_store(), "P1", 400).unwrap();

        assert_eq!(data.center_id(), "P1");
        assert_eq!(data.ids[1], "N1");
        assert_eq!(data.ids[9], "N9");
        for (offset, raw) in SCENARIO_SCORES.iter().enumerate() {
            let expected = *raw as f32 / 1000.0;
            assert_eq!(data.matrix.get(0, offset + 1), expected);
            assert_eq!(data.matrix.get(offset + 1, 0), expected);
        }
        assert_eq!(data.matrix.get(1, 2), 0.5);
        assert_eq!(data.matrix.get(2, 1), 0.5);
    }

    #[test]
    fn neighbor_scores_must_exceed_the_threshold() {
        let data = collect_network(&scenario_store(), "P1", 400).unwrap();

        assert_eq!(data.matrix.get(3, 4), 0.0);
        assert_eq!(data.matrix.get(4, 3), 0.0);
        assert_eq!(data.matrix.get(5, 6), 0.401);
        assert_eq!(data.matrix.get(6, 5), 0.0);
    }

    #[test]
    fn center_scores_ignore_the_threshold() {
        let data = collect_network(&scenario_store(), "P1", 990).unwrap();

        for index in 1..NETWORK_SIZE {
            assert!(data.matrix.get(0, index) > 0.0);
        }
        assert_eq!(data.matrix.get(1, 2), 0.0);
    }

    #[test]
    fn missing_metadata_defaults_to_the_id() {
        let data = collect_network(&scenario_store(), "P1", 400).unwrap();

        assert_eq!(data.metadata[0].name, "TP53");
        assert_eq!(data.metadata[0].size, "393");
        assert_eq!(data.metadata[3].name, "N3");
        assert!(data.metadata[3].size.is_empty());
        assert!(data.metadata[3].annotation.is_empty());
    }

    #[test]
    fn self_links_and_repeated_partners_are_skipped() {
        let mut store = scenario_store();
        store.insert_link("P1", "P1", 999);
        store.insert_link("P1", "N1", 960);
        store.insert_link("P1", "N10", 100);

        let data = collect_network(&store, "P1", 400).unwrap();
        assert_eq!(data.ids[1], "N1");
        assert_eq!(data.matrix.get(0, 1), 0.96);
        assert_eq!(data.ids[9], "N9");
        assert!(!data.ids.contains(&"N10".to_owned()));
    }

    #[test]
    fn too_few_partners_is_insufficient_data() {
        let mut store = MemoryStore::new();
        for index in 0..4 {
            store.insert_link("LONELY", &format!("Q{index}"), 700);
        }

        let error = collect_network(&store, "LONELY", 400).unwrap_err();
        assert!(matches!(
            error,
            NetworkError::InsufficientData { ref center, found: 4 } if center == "LONELY"
        ));
    }

    #[test]
    fn unknown_center_is_reported() {
        let error = collect_network(&scenario_store(), "NOPE", 400).unwrap_err();
        assert!(matches!(error, NetworkError::UnknownProtein(id) if id == "NOPE"));
    }

    #[test]
    fn store_failures_abort_the_build() {
        let store = FailingStore {
            inner: scenario_store(),
            fail_on: "N4",
            calls: Mutex::new(Vec::new()),
        };

        let error = collect_network(&store, "P1", 400).unwrap_err();
        assert!(matches!(error, NetworkError::Store(_)));
        assert!(error.to_string().contains("N4"));

        let calls = store.calls.lock().unwrap();
        assert_eq!(*calls, ["P1", "N1", "N2", "N3", "N4"]);
    }
}
