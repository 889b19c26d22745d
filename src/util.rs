use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn format_size(size: &str) -> String {
    match size.trim().parse::<u32>() {
        Ok(residues) => format!("{residues} aa"),
        Err(_) if size.trim().is_empty() => "unknown".to_owned(),
        Err(_) => size.to_owned(),
    }
}

/// STRING ids carry the NCBI taxon as a prefix (`9606.ENSP00000269305`).
pub fn short_name(id: &str) -> &str {
    match id.split_once('.') {
        Some((taxon, rest)) if !rest.is_empty() && taxon.bytes().all(|b| b.is_ascii_digit()) => {
            rest
        }
        _ => id,
    }
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    (x, y)
}
