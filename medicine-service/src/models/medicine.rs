use serde::{Deserialize, Serialize};

/// One row of the medicine catalog, values kept exactly as read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MedicineRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Medicine Name")]
    pub name: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Uses")]
    pub uses: String,
    #[serde(rename = "Side_effects")]
    pub side_effects: String,
    #[serde(rename = "Dosage")]
    pub dosage: String,
    #[serde(rename = "Warnings")]
    pub warnings: String,
    #[serde(rename = "Composition", default)]
    pub composition: Option<String>,
    #[serde(rename = "Image URL", default)]
    pub image_url: Option<String>,
}

/// Coarse product form derived from keywords in the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MedicineKind {
    Tablet,
    Liquid,
    Cream,
    Medicine,
}

impl MedicineKind {
    /// Keywords checked in order; the first one found wins.
    const KEYWORDS: [(&'static str, MedicineKind); 3] = [
        ("tablet", MedicineKind::Tablet),
        ("liquid", MedicineKind::Liquid),
        ("cream", MedicineKind::Cream),
    ];

    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| name.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(MedicineKind::Medicine)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MedicineKind,
}

impl MedicineSummary {
    pub fn new(record: &MedicineRecord, kind: MedicineKind) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.uses.clone(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDetail {
    pub name: String,
    pub manufacturer: String,
    pub uses: String,
    pub side_effects: String,
    pub dosage: String,
    pub warnings: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&MedicineRecord> for MedicineDetail {
    fn from(record: &MedicineRecord) -> Self {
        Self {
            name: record.name.clone(),
            manufacturer: record.manufacturer.clone(),
            uses: record.uses.clone(),
            side_effects: record.side_effects.clone(),
            dosage: record.dosage.clone(),
            warnings: record.warnings.clone(),
            composition: record.composition.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub medicines: Vec<MedicineSummary>,
}
