//! Local medicine suggestions for the autocomplete box.
//!
//! The catalog page is fetched once and filtered on-device: substring hits
//! first, ranked by Jaro-Winkler similarity; near-miss typos only when
//! nothing contains the query.

use strsim::jaro_winkler;

use crate::models::{fold_accents, Medicine, MedicineCategory};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 20;

/// Minimum similarity for a typo match.
const MIN_FUZZY_SIMILARITY: f64 = 0.85;

/// A ranked suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<'a> {
    pub medicine: &'a Medicine,
    pub score: f64,
}

/// Best similarity of the query against the whole name or any single word.
fn similarity(query: &str, name: &str) -> f64 {
    name.split_whitespace()
        .map(|word| jaro_winkler(query, word))
        .fold(jaro_winkler(query, name), f64::max)
}

fn rank(suggestions: &mut [Suggestion<'_>]) {
    suggestions.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Suggestions for the text typed so far. Blank input suggests nothing.
pub fn suggest_medicines<'a>(
    medicines: &'a [Medicine],
    query: &str,
    limit: usize,
) -> Vec<Suggestion<'a>> {
    let query = fold_accents(query.trim());
    if query.is_empty() {
        return Vec::new();
    }

    let scored: Vec<(Suggestion<'a>, bool)> = medicines
        .iter()
        .map(|medicine| {
            let name = fold_accents(&medicine.commercial_name);
            let contains = name.contains(&query);
            (
                Suggestion {
                    medicine,
                    score: similarity(&query, &name),
                },
                contains,
            )
        })
        .collect();

    let mut hits: Vec<Suggestion<'a>> = scored
        .iter()
        .filter(|(_, contains)| *contains)
        .map(|(s, _)| s.clone())
        .collect();

    if hits.is_empty() {
        hits = scored
            .into_iter()
            .filter(|(s, _)| s.score >= MIN_FUZZY_SIMILARITY)
            .map(|(s, _)| s)
            .collect();
    }

    rank(&mut hits);
    hits.truncate(limit);
    hits
}

/// Medicines filed under `category`, in catalog order.
pub fn medicines_in_category(medicines: &[Medicine], category: MedicineCategory) -> Vec<&Medicine> {
    medicines
        .iter()
        .filter(|medicine| medicine.in_category(category))
        .collect()
}
