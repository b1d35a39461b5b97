//! Medicine categories and their display styling.

use serde::{Deserialize, Serialize};

/// Therapeutic category a medicine is filed under.
///
/// Names arrive from the service as free Portuguese text ("antibiótico",
/// "Pediátricos", ...). Anything unrecognized lands in [`MedicineCategory::Other`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MedicineCategory {
    Antibiotic,
    Analgesic,
    Homeopathic,
    Antacid,
    Pediatric,
    Other,
}

/// Color family used for chips and badges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Gray,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Blue => "blue",
            Tone::Green => "green",
            Tone::Red => "red",
            Tone::Yellow => "yellow",
            Tone::Purple => "purple",
            Tone::Gray => "gray",
        }
    }
}

/// Resolved styling for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub tone: Tone,
    pub icon: &'static str,
}

impl MedicineCategory {
    /// All named categories, in home-screen order.
    pub const ALL: [MedicineCategory; 5] = [
        MedicineCategory::Antibiotic,
        MedicineCategory::Analgesic,
        MedicineCategory::Homeopathic,
        MedicineCategory::Antacid,
        MedicineCategory::Pediatric,
    ];

    /// Parse a category name (case and accent insensitive, singular or plural).
    pub fn from_name(name: &str) -> Self {
        let folded = fold_accents(name.trim());
        let key = folded.strip_suffix('s').unwrap_or(&folded);
        match key {
            "antibiotico" => MedicineCategory::Antibiotic,
            "analgesico" => MedicineCategory::Analgesic,
            "homeopatico" => MedicineCategory::Homeopathic,
            "antiacido" => MedicineCategory::Antacid,
            "pediatrico" => MedicineCategory::Pediatric,
            _ => MedicineCategory::Other,
        }
    }

    pub fn style(&self) -> CategoryStyle {
        match self {
            MedicineCategory::Antibiotic => CategoryStyle {
                label: "antibiótico",
                tone: Tone::Blue,
                icon: "pill",
            },
            MedicineCategory::Analgesic => CategoryStyle {
                label: "analgésico",
                tone: Tone::Green,
                icon: "medical-bag",
            },
            MedicineCategory::Homeopathic => CategoryStyle {
                label: "homeopáticos",
                tone: Tone::Red,
                icon: "leaf",
            },
            MedicineCategory::Antacid => CategoryStyle {
                label: "antiácido",
                tone: Tone::Yellow,
                icon: "stomach",
            },
            MedicineCategory::Pediatric => CategoryStyle {
                label: "pediátricos",
                tone: Tone::Purple,
                icon: "baby-face-outline",
            },
            MedicineCategory::Other => CategoryStyle {
                label: "categoria",
                tone: Tone::Gray,
                icon: "pill",
            },
        }
    }
}

/// Lowercase and strip the Portuguese diacritics.
pub(crate) fn fold_accents(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
