#![allow(dead_code)]

pub mod program_generators;

use std::fs;
use std::path::PathBuf;

use stymatch::ast::{
    BindingForm, DeclPattern, FactProgram, Header, RelationPattern, Selector, Statement,
    StyleProgram,
};
use stymatch::{Substitution, Vocabulary};

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: &str) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture should be readable")
}

pub fn decl(ty: &str, name: &str) -> DeclPattern {
    DeclPattern::new(ty, BindingForm::pattern(name))
}

pub fn fact_decl(ty: &str, name: &str) -> DeclPattern {
    DeclPattern::new(ty, BindingForm::fact(name))
}

pub fn selector(head: Vec<DeclPattern>, where_rels: Vec<RelationPattern>) -> Header {
    Header::Selector(Selector {
        head,
        with_decls: Vec::new(),
        where_rels,
    })
}

pub fn namespace(name: &str) -> Header {
    Header::Namespace {
        name: name.to_string(),
    }
}

pub fn subst(pairs: &[(&str, &str)]) -> Substitution {
    pairs.iter().copied().collect()
}

pub fn la_vocab() -> Vocabulary {
    Vocabulary::new()
        .with_type("Scalar")
        .with_type("Vector")
        .with_type("VectorSpace")
}

/// Two vectors in one space; `x1` is a unit vector orthogonal to `x2`.
pub fn la_facts() -> FactProgram {
    FactProgram::new(vec![
        Statement::decl("VectorSpace", "X"),
        Statement::decl("Vector", "x1"),
        Statement::decl("Vector", "x2"),
        Statement::pred("In", &["x1", "X"]),
        Statement::pred("In", &["x2", "X"]),
        Statement::pred("Unit", &["x1"]),
        Statement::pred("Orthogonal", &["x1", "x2"]),
    ])
}

pub fn orthogonal_selector() -> Header {
    selector(
        vec![
            decl("Vector", "v"),
            decl("VectorSpace", "U"),
            decl("Vector", "w"),
        ],
        vec![
            RelationPattern::pred("In", &["v", "U"]),
            RelationPattern::pred("Unit", &["v"]),
            RelationPattern::pred("Orthogonal", &["v", "w"]),
        ],
    )
}

/// The selector at index 6 is the `In`/`Unit`/`Orthogonal` selector.
pub fn la_style() -> StyleProgram {
    StyleProgram {
        headers: vec![
            namespace("Colors"),
            selector(vec![decl("Vector", "v")], vec![]),
            selector(vec![decl("VectorSpace", "U")], vec![]),
            selector(
                vec![decl("Vector", "v"), decl("VectorSpace", "U")],
                vec![RelationPattern::pred("In", &["v", "U"])],
            ),
            selector(vec![decl("Vector", "u"), decl("Vector", "v")], vec![]),
            selector(
                vec![decl("Vector", "v")],
                vec![RelationPattern::pred("Unit", &["v"])],
            ),
            orthogonal_selector(),
        ],
    }
}
