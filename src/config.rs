use crate::calc::AggregateRules;
use crate::catalog::SubjectCatalog;
use crate::grading::Level;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "GRADEBOOKD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub catalog: SubjectCatalog,
    pub junior_classes: Vec<String>,
    pub senior_classes: Vec<String>,
    pub pass_mark: i64,
    pub best_of: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let rules = AggregateRules::default();
        Self {
            catalog: SubjectCatalog::default(),
            junior_classes: vec!["Form One".to_string(), "Form Two".to_string()],
            senior_classes: vec!["Form Three".to_string(), "Form Four".to_string()],
            pass_mark: rules.pass_mark,
            best_of: rules.best_of,
        }
    }
}

impl EngineConfig {
    pub fn rules(&self) -> AggregateRules {
        AggregateRules {
            best_of: self.best_of,
            pass_mark: self.pass_mark,
        }
    }

    /// Grading level for a class name, matched trimmed and case-insensitively.
    pub fn level_for_class(&self, class_name: &str) -> Option<Level> {
        let wanted = class_name.trim();
        let matches = |names: &[String]| names.iter().any(|n| n.trim().eq_ignore_ascii_case(wanted));
        if matches(&self.junior_classes) {
            Some(Level::Junior)
        } else if matches(&self.senior_classes) {
            Some(Level::Senior)
        } else {
            None
        }
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path)?;
    let cfg: EngineConfig = serde_json::from_str(&text)?;
    if cfg.best_of == 0 {
        anyhow::bail!("bestOf must be at least 1");
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(prefix: &str, contents: &str) -> std::path::PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}.json",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::write(&p, contents).expect("write temp config");
        p
    }

    #[test]
    fn default_levels_resolve_form_names() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.level_for_class("Form One"), Some(Level::Junior));
        assert_eq!(cfg.level_for_class("  form two "), Some(Level::Junior));
        assert_eq!(cfg.level_for_class("FORM THREE"), Some(Level::Senior));
        assert_eq!(cfg.level_for_class("Form Four"), Some(Level::Senior));
        assert_eq!(cfg.level_for_class("Form Five"), None);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let p = temp_file(
            "gradebookd-config-partial",
            r#"{ "passMark": 50, "seniorClasses": ["S5", "S6"] }"#,
        );
        let cfg = load_config(&p).expect("load config");
        assert_eq!(cfg.pass_mark, 50);
        assert_eq!(cfg.best_of, 6);
        assert_eq!(cfg.level_for_class("s6"), Some(Level::Senior));
        assert_eq!(cfg.level_for_class("Form Three"), None);
        assert_eq!(cfg.catalog, SubjectCatalog::default());
    }

    #[test]
    fn invalid_catalog_or_best_of_fails_to_load() {
        let p = temp_file(
            "gradebookd-config-bad-catalog",
            r#"{ "catalog": [{ "key": "eng", "name": "English", "compulsory": true, "enabled": false }] }"#,
        );
        assert!(load_config(&p).is_err());

        let p = temp_file("gradebookd-config-bad-best", r#"{ "bestOf": 0 }"#);
        assert!(load_config(&p).is_err());

        assert!(load_config(Path::new("/definitely/not/here.json")).is_err());
    }
}
