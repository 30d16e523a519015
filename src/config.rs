use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchSetting", into = "RawMatchSetting")]
pub enum MatchSetting {
    #[default]
    All,
    Only(Vec<String>),
}

impl MatchSetting {
    pub fn admits(&self, name: &str) -> bool {
        match self {
            MatchSetting::All => true,
            MatchSetting::Only(names) => names.iter().any(|n| n == name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMatchSetting {
    Star(String),
    Names(Vec<String>),
}

impl TryFrom<RawMatchSetting> for MatchSetting {
    type Error = String;

    fn try_from(raw: RawMatchSetting) -> Result<Self, Self::Error> {
        match raw {
            RawMatchSetting::Star(s) if s == "*" => Ok(MatchSetting::All),
            RawMatchSetting::Star(s) => Err(format!(
                "match setting must be \"*\" or a list of names, got \"{s}\""
            )),
            RawMatchSetting::Names(names) => Ok(MatchSetting::Only(names)),
        }
    }
}

impl From<MatchSetting> for RawMatchSetting {
    fn from(setting: MatchSetting) -> Self {
        match setting {
            MatchSetting::All => RawMatchSetting::Star("*".to_string()),
            MatchSetting::Only(names) => RawMatchSetting::Names(names),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Admissible {
    pub types: MatchSetting,
    pub predicates: MatchSetting,
    pub functions: MatchSetting,
    pub constructors: MatchSetting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypePolicy {
    #[default]
    Exact,
    Subtype,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    pub type_policy: TypePolicy,
    pub prefilter: bool,
    pub check_declarations: bool,
    pub admit: Admissible,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            type_policy: TypePolicy::Exact,
            prefilter: true,
            check_declarations: false,
            admit: Admissible::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, Vec<Diagnostic>> {
        toml::from_str(src).map_err(|err| {
            vec![Diagnostic::new(
                "E-CONFIG",
                format!("invalid matcher configuration: {err}"),
                None,
            )]
        })
    }
}

pub fn load_config(path: &Path) -> Result<MatchConfig, Vec<Diagnostic>> {
    let body = fs::read_to_string(path).map_err(|err| {
        vec![Diagnostic::new(
            "E-IO",
            format!("failed to read {}: {err}", path.display()),
            None,
        )]
    })?;
    MatchConfig::from_toml_str(&body).map_err(|diags| {
        diags
            .into_iter()
            .map(|d| d.with_source(path.display().to_string()))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = MatchConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, MatchConfig::default());
        assert!(config.prefilter);
    }

    #[test]
    fn match_settings_accept_star_and_lists() {
        let config = MatchConfig::from_toml_str(
            r#"
            type_policy = "subtype"
            check_declarations = true

            [admit]
            types = "*"
            predicates = ["In", "Unit"]
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.type_policy, TypePolicy::Subtype);
        assert!(config.check_declarations);
        assert!(config.admit.types.admits("Vector"));
        assert!(config.admit.predicates.admits("Unit"));
        assert!(!config.admit.predicates.admits("Orthogonal"));
        assert!(config.admit.functions.admits("anything"));
    }

    #[test]
    fn match_setting_rejects_other_strings() {
        let errs = MatchConfig::from_toml_str("[admit]\npredicates = \"some\"\n")
            .expect_err("config should fail");
        assert!(errs.iter().all(|d| d.code == "E-CONFIG"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let errs = MatchConfig::from_toml_str("prefiltr = false\n").expect_err("typo");
        assert_eq!(errs[0].code, "E-CONFIG");
    }
}
