use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::parse::{RawLink, parse_dataset_json, parse_info_table, parse_links_table};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProteinLink {
    pub partner: String,
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub annotation: String,
}

/// Read access to pairwise interaction scores and protein metadata.
///
/// `partners` must return rows ordered by descending raw score. A missing
/// metadata record is not an error.
pub trait ProteinStore: Send + Sync {
    fn partners(&self, protein_id: &str) -> Result<Vec<ProteinLink>>;

    fn partners_between(&self, protein_id: &str) -> Result<Vec<ProteinLink>> {
        self.partners(protein_id)
    }

    fn metadata(&self, protein_id: &str) -> Result<Option<ProteinInfo>>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    links: HashMap<String, Vec<ProteinLink>>,
    info: HashMap<String, ProteinInfo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(links_path: &Path, info_path: Option<&Path>) -> Result<Self> {
        let raw_links = fs::read_to_string(links_path)
            .with_context(|| format!("failed to read {}", links_path.display()))?;

        let is_json = links_path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            return Self::from_dataset_json(&raw_links)
                .with_context(|| format!("failed to load dataset {}", links_path.display()));
        }

        let mut store = Self::new();
        let links = parse_links_table(&raw_links)
            .with_context(|| format!("failed to parse links file {}", links_path.display()))?;
        store.extend_links(links);

        if let Some(info_path) = info_path {
            let raw_info = fs::read_to_string(info_path)
                .with_context(|| format!("failed to read {}", info_path.display()))?;
            let records = parse_info_table(&raw_info)
                .with_context(|| format!("failed to parse info file {}", info_path.display()))?;
            for record in records {
                store.insert_info(record);
            }
        }

        Ok(store)
    }

    pub fn from_dataset_json(raw: &str) -> Result<Self> {
        let dataset = parse_dataset_json(raw)?;
        let mut store = Self::new();
        store.extend_links(dataset.links);
        for record in dataset.proteins {
            store.insert_info(record);
        }
        Ok(store)
    }

    pub fn insert_link(&mut self, protein1: &str, protein2: &str, score: u32) {
        self.links
            .entry(protein1.to_owned())
            .or_default()
            .push(ProteinLink {
                partner: protein2.to_owned(),
                score,
            });
    }

    pub fn insert_info(&mut self, record: ProteinInfo) {
        self.info.insert(record.id.clone(), record);
    }

    fn extend_links(&mut self, links: Vec<RawLink>) {
        for link in links {
            self.insert_link(&link.protein1, &link.protein2, link.score);
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn protein_ids(&self) -> Vec<String> {
        self.links
            .keys()
            .chain(self.info.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl ProteinStore for MemoryStore {
    fn partners(&self, protein_id: &str) -> Result<Vec<ProteinLink>> {
        let mut rows = self.links.get(protein_id).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(rows)
    }

    fn metadata(&self, protein_id: &str) -> Result<Option<ProteinInfo>> {
        Ok(self.info.get(protein_id).cloned())
    }
}
