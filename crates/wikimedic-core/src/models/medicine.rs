//! Medicine records: list entries, full details with leaflet, favorites.

use serde::{Deserialize, Serialize};

use super::{id_from_string_or_number, MedicineCategory};

/// A medicine as listed by the paged catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub commercial_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Medicine {
    /// Parsed categories, in the order the service lists them.
    pub fn category_kinds(&self) -> Vec<MedicineCategory> {
        self.categories
            .iter()
            .map(|c| MedicineCategory::from_name(c))
            .collect()
    }

    /// Whether the medicine is filed under the given category.
    pub fn in_category(&self, category: MedicineCategory) -> bool {
        self.category_kinds().contains(&category)
    }
}

/// Package leaflet, as structured by the service.
///
/// Field names on the wire are Portuguese.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeafletData {
    #[serde(rename = "indicacoes", default)]
    pub indications: Vec<String>,
    #[serde(rename = "contraindicacoes", default)]
    pub contraindications: Vec<String>,
    #[serde(rename = "reacoes_adversas", default)]
    pub adverse_reactions: Vec<String>,
    #[serde(rename = "cuidados", default)]
    pub storage_care: Vec<String>,
    #[serde(rename = "posologia", default)]
    pub dosage: Vec<String>,
    #[serde(rename = "riscos", default)]
    pub risks: Vec<String>,
    #[serde(rename = "superdose", default)]
    pub overdose: Vec<String>,
}

/// One renderable leaflet section.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletSection {
    pub title: &'static str,
    /// Paragraphs joined by a blank line (markdown)
    pub body: String,
}

/// Full medicine record from `medicines/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineDetail {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub commercial_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub registry_code: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub leaflet_data: Option<LeafletData>,
}

impl MedicineDetail {
    /// Non-empty leaflet sections in display order.
    pub fn leaflet_sections(&self) -> Vec<LeafletSection> {
        let Some(leaflet) = &self.leaflet_data else {
            return Vec::new();
        };

        [
            ("📍 Indicações", &leaflet.indications),
            ("💊 Posologia (Como usar)", &leaflet.dosage),
            ("🚫 Contraindicações", &leaflet.contraindications),
            ("⚠️ Riscos e Advertências", &leaflet.risks),
            ("🤒 Reações Adversas", &leaflet.adverse_reactions),
            ("🛡️ Cuidados de Conservação", &leaflet.storage_care),
            ("🚑 Superdose", &leaflet.overdose),
        ]
        .into_iter()
        .filter(|(_, paragraphs)| !paragraphs.is_empty())
        .map(|(title, paragraphs)| LeafletSection {
            title,
            body: paragraphs.join("\n\n"),
        })
        .collect()
    }
}

/// Minimal projection of a medicine kept in local favorites.
///
/// The leaflet is not stored; details are refetched on open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteMedicine {
    pub id: String,
    pub commercial_name: String,
    pub description: String,
    pub image: Option<String>,
    pub categories: Vec<String>,
}

impl From<&MedicineDetail> for FavoriteMedicine {
    fn from(detail: &MedicineDetail) -> Self {
        Self {
            id: detail.id.clone(),
            commercial_name: detail.commercial_name.clone(),
            description: detail.description.clone(),
            image: detail.image.clone(),
            categories: detail.categories.clone(),
        }
    }
}

impl From<&Medicine> for FavoriteMedicine {
    fn from(medicine: &Medicine) -> Self {
        Self {
            id: medicine.id.clone(),
            commercial_name: medicine.commercial_name.clone(),
            description: medicine.description.clone(),
            image: medicine.image.clone(),
            categories: medicine.categories.clone(),
        }
    }
}
