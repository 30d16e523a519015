use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ast::{FactProgram, StyleProgram};
use crate::diagnostics::Diagnostic;
use crate::types::Vocabulary;

pub fn parse_json<T: DeserializeOwned>(src: &str, what: &str) -> Result<T, Vec<Diagnostic>> {
    serde_json::from_str(src).map_err(|err| {
        vec![Diagnostic::new(
            "E-INPUT",
            format!("malformed {what}: {err}"),
            None,
        )]
    })
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, Vec<Diagnostic>> {
    let src = fs::read_to_string(path).map_err(|err| {
        vec![Diagnostic::new(
            "E-IO",
            format!("failed to read {}: {err}", path.display()),
            None,
        )]
    })?;
    parse_json(&src, what).map_err(|diags| {
        diags
            .into_iter()
            .map(|d| d.with_source(path.display().to_string()))
            .collect()
    })
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, Vec<Diagnostic>> {
    load_json(path, "vocabulary")
}

pub fn load_fact_program(path: &Path) -> Result<FactProgram, Vec<Diagnostic>> {
    load_json(path, "fact program")
}

pub fn load_style_program(path: &Path) -> Result<StyleProgram, Vec<Diagnostic>> {
    load_json(path, "style program")
}
