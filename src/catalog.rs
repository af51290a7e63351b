//! The clinic catalog embedded in every prompt.
//!
//! Built once at startup and shared read-only through `AppState`.

/// Clinic identifiers offered to the model when no override is configured.
pub const DEFAULT_CLINICS: &[&str] = &[
    "الباطنة-والجهاز-الهضمي-والكبد",
    "مسالك",
    "باطنة-عامة",
    "غدد-صماء-وسكر",
    "القلب-والإيكو",
    "السونار-والدوبلكس",
    "جراحة-التجميل",
    "عظام",
    "جلدية-وليزر",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    ids: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            ids: DEFAULT_CLINICS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl CategoryCatalog {
    /// Parse a comma-separated list of identifiers.
    ///
    /// Blank entries are dropped; returns `None` if nothing usable remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let ids: Vec<String> = raw
            .split(',')
            .map(|id| id.trim().trim_matches('"').trim())
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(Self { ids })
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Quoted, comma-separated form used inside prompts.
    pub fn render(&self) -> String {
        self.ids
            .iter()
            .map(|id| format!("\"{}\"", id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
