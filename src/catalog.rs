use crate::calc::CalcError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDef {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub compulsory: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Ordered list of subjects taught by an institution.
///
/// Order matters: it is the display order and breaks ties when picking the
/// best-N subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SubjectDef>", into = "Vec<SubjectDef>")]
pub struct SubjectCatalog {
    subjects: Vec<SubjectDef>,
}

impl SubjectCatalog {
    pub fn new(subjects: Vec<SubjectDef>) -> Result<Self, CalcError> {
        let mut seen: HashSet<String> = HashSet::new();
        for s in &subjects {
            let key = s.key.trim();
            if key.is_empty() {
                return Err(CalcError::new("invalid_catalog", "subject key must not be empty"));
            }
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(CalcError::new("invalid_catalog", "duplicate subject key")
                    .with_details(json!({ "key": key })));
            }
        }

        let compulsory: Vec<&SubjectDef> = subjects.iter().filter(|s| s.compulsory).collect();
        if compulsory.len() > 1 {
            let keys: Vec<&str> = compulsory.iter().map(|s| s.key.as_str()).collect();
            return Err(CalcError::new(
                "invalid_catalog",
                "at most one subject may be compulsory",
            )
            .with_details(json!({ "keys": keys })));
        }
        if let Some(c) = compulsory.first() {
            if !c.enabled {
                return Err(CalcError::new(
                    "invalid_catalog",
                    "the compulsory subject cannot be disabled",
                )
                .with_details(json!({ "key": c.key })));
            }
        }
        if !subjects.iter().any(|s| s.enabled) {
            return Err(CalcError::new(
                "invalid_catalog",
                "catalog needs at least one enabled subject",
            ));
        }

        let subjects = subjects
            .into_iter()
            .map(|s| SubjectDef {
                key: s.key.trim().to_string(),
                ..s
            })
            .collect();
        Ok(Self { subjects })
    }

    pub fn all(&self) -> &[SubjectDef] {
        &self.subjects
    }

    /// Enabled subjects in catalog order. The pipeline only ever sees these.
    pub fn active(&self) -> impl Iterator<Item = &SubjectDef> {
        self.subjects.iter().filter(|s| s.enabled)
    }

    pub fn compulsory(&self) -> Option<&SubjectDef> {
        self.active().find(|s| s.compulsory)
    }

    /// Case-insensitive lookup among enabled subjects.
    pub fn find(&self, key: &str) -> Option<&SubjectDef> {
        let key = key.trim();
        self.active().find(|s| s.key.eq_ignore_ascii_case(key))
    }
}

impl Default for SubjectCatalog {
    fn default() -> Self {
        let defs = [
            ("eng", "English", true),
            ("mat", "Mathematics", false),
            ("phy", "Physics", false),
            ("che", "Chemistry", false),
            ("bio", "Biology", false),
            ("geo", "Geography", false),
            ("his", "History", false),
            ("civ", "Civics", false),
            ("kis", "Kiswahili", false),
            ("com", "Commerce", false),
            ("bk", "Book-keeping", false),
        ];
        Self {
            subjects: defs
                .iter()
                .map(|(key, name, compulsory)| SubjectDef {
                    key: key.to_string(),
                    name: name.to_string(),
                    compulsory: *compulsory,
                    enabled: true,
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<SubjectDef>> for SubjectCatalog {
    type Error = CalcError;

    fn try_from(subjects: Vec<SubjectDef>) -> Result<Self, Self::Error> {
        Self::new(subjects)
    }
}

impl From<SubjectCatalog> for Vec<SubjectDef> {
    fn from(catalog: SubjectCatalog) -> Self {
        catalog.subjects
    }
}
