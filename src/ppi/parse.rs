use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::store::ProteinInfo;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(super) struct RawLink {
    pub(super) protein1: String,
    pub(super) protein2: String,
    #[serde(default)]
    pub(super) score: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawDataset {
    #[serde(default)]
    pub(super) links: Vec<RawLink>,
    #[serde(default)]
    pub(super) proteins: Vec<ProteinInfo>,
}

pub(super) fn parse_dataset_json(raw: &str) -> Result<RawDataset> {
    serde_json::from_str(raw).context("invalid JSON dataset")
}

// `protein1 protein2 combined_score`, whitespace separated.
pub(super) fn parse_links_table(raw: &str) -> Result<Vec<RawLink>> {
    let mut links = Vec::new();
    let mut seen_content = false;

    for (line_index, line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_first = !seen_content;
        seen_content = true;

        let columns = line.split_whitespace().collect::<Vec<_>>();
        let [protein1, protein2, score] = columns.as_slice() else {
            return Err(anyhow!(
                "line {line_number}: expected 3 columns, found {}",
                columns.len()
            ));
        };

        let score = match score.parse::<u32>() {
            Ok(score) => score,
            Err(_) if is_first => continue,
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("line {line_number}: invalid score {score:?}"));
            }
        };

        links.push(RawLink {
            protein1: (*protein1).to_owned(),
            protein2: (*protein2).to_owned(),
            score,
        });
    }

    Ok(links)
}

// `id<TAB>name<TAB>size<TAB>annotation`, `#` starts a comment line.
pub(super) fn parse_info_table(raw: &str) -> Result<Vec<ProteinInfo>> {
    let mut records = Vec::new();

    for (line_index, line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let mut columns = line.splitn(4, '\t').map(str::trim);
        let id = columns.next().unwrap_or_default();
        if id.is_empty() {
            return Err(anyhow!("line {line_number}: missing protein id"));
        }
        let name = columns
            .next()
            .ok_or_else(|| anyhow!("line {line_number}: missing name for {id}"))?;

        records.push(ProteinInfo {
            id: id.to_owned(),
            name: name.to_owned(),
            size: columns.next().unwrap_or_default().to_owned(),
            annotation: columns.next().unwrap_or_default().to_owned(),
        });
    }

    Ok(records)
}
