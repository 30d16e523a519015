mod support;

use stymatch::ast::{FactProgram, Statement};
use stymatch::config::MatchSetting;
use stymatch::decl_match::{match_binding_form, match_decl_line, match_decls};
use stymatch::types::{DeclaredSubtypes, ExactTypes, FactType};
use stymatch::{MatchError, Substitution, Vocabulary};
use support::{decl, fact_decl, la_facts, subst};

#[test]
fn pattern_variable_binds_to_matching_declaration() {
    let got = match_decl_line(
        &ExactTypes,
        &MatchSetting::All,
        &Statement::decl("Vector", "x1"),
        &decl("Vector", "v"),
    )
    .expect("no structural error");
    assert_eq!(got, Some(subst(&[("v", "x1")])));
}

#[test]
fn type_mismatch_yields_no_candidate() {
    let got = match_decl_line(
        &ExactTypes,
        &MatchSetting::All,
        &Statement::decl("VectorSpace", "X"),
        &decl("Vector", "v"),
    )
    .expect("no structural error");
    assert_eq!(got, None);
}

#[test]
fn only_declarations_are_candidates() {
    let got = match_decl_line(
        &ExactTypes,
        &MatchSetting::All,
        &Statement::pred("Unit", &["x1"]),
        &decl("Unit", "v"),
    )
    .expect("no structural error");
    assert_eq!(got, None);
}

#[test]
fn fact_reference_matches_only_its_own_name() {
    assert_eq!(
        match_binding_form("x1", &fact_decl("Vector", "x1").id),
        Some(Substitution::new())
    );
    assert_eq!(match_binding_form("x2", &fact_decl("Vector", "x1").id), None);
}

#[test]
fn type_variable_declaration_is_a_structural_error() {
    let stmt = Statement::Decl {
        ty: FactType::Var {
            name: "T".to_string(),
        },
        name: "x".to_string(),
    };
    let err = match_decl_line(&ExactTypes, &MatchSetting::All, &stmt, &decl("Vector", "v"))
        .expect_err("type variables are not nullary");
    assert_eq!(
        err,
        MatchError::NonNullaryType {
            fact: "x".to_string(),
            ty: "T".to_string(),
        }
    );
    assert_eq!(err.code(), "E-TYPE");
}

#[test]
fn parametric_declarations_match_on_constructor_name() {
    let stmt = Statement::Decl {
        ty: FactType::Constructor {
            name: "List".to_string(),
            args: vec![FactType::nullary("Vector")],
        },
        name: "xs".to_string(),
    };
    let got = match_decl_line(&ExactTypes, &MatchSetting::All, &stmt, &decl("List", "l"))
        .expect("no structural error");
    assert_eq!(got, Some(subst(&[("l", "xs")])));
}

#[test]
fn decls_fold_from_the_empty_substitution() {
    let got = match_decls(
        &ExactTypes,
        &MatchSetting::All,
        &la_facts(),
        &[decl("Vector", "v"), decl("VectorSpace", "U")],
    )
    .expect("no structural error");
    assert_eq!(
        got,
        vec![
            subst(&[("v", "x1"), ("U", "X")]),
            subst(&[("v", "x2"), ("U", "X")]),
        ]
    );
}

#[test]
fn no_declared_patterns_yield_the_empty_substitution() {
    let got = match_decls(&ExactTypes, &MatchSetting::All, &la_facts(), &[])
        .expect("no structural error");
    assert_eq!(got, vec![Substitution::new()]);
}

#[test]
fn unmatched_pattern_empties_the_whole_set() {
    let got = match_decls(
        &ExactTypes,
        &MatchSetting::All,
        &la_facts(),
        &[decl("Vector", "v"), decl("Scalar", "c")],
    )
    .expect("no structural error");
    assert!(got.is_empty());
}

#[test]
fn merge_keeps_duplicate_bindings_for_the_validator() {
    let got = match_decls(
        &ExactTypes,
        &MatchSetting::All,
        &la_facts(),
        &[decl("Vector", "u"), decl("Vector", "v")],
    )
    .expect("no structural error");
    assert_eq!(got.len(), 4);
    assert!(got.contains(&subst(&[("u", "x1"), ("v", "x1")])));
}

#[test]
fn fact_reference_contributes_no_binding() {
    let got = match_decls(
        &ExactTypes,
        &MatchSetting::All,
        &la_facts(),
        &[decl("Vector", "v"), fact_decl("VectorSpace", "X")],
    )
    .expect("no structural error");
    assert_eq!(got, vec![subst(&[("v", "x1")]), subst(&[("v", "x2")])]);
}

#[test]
fn type_admission_skips_unlisted_types() {
    let got = match_decls(
        &ExactTypes,
        &MatchSetting::Only(vec!["VectorSpace".to_string()]),
        &la_facts(),
        &[decl("Vector", "v")],
    )
    .expect("no structural error");
    assert!(got.is_empty());
}

#[test]
fn exact_policy_does_not_use_subtypes() {
    let facts = FactProgram::new(vec![Statement::decl("UnitVector", "e")]);
    let got = match_decls(&ExactTypes, &MatchSetting::All, &facts, &[decl("Vector", "v")])
        .expect("no structural error");
    assert!(got.is_empty());
}

#[test]
fn subtype_matcher_admits_declared_subtypes() {
    let vocab = Vocabulary::new()
        .with_type("Vector")
        .with_type("UnitVector")
        .with_subtype("UnitVector", "Vector");
    let subtypes = DeclaredSubtypes::from_vocabulary(&vocab);
    let facts = FactProgram::new(vec![
        Statement::decl("UnitVector", "e"),
        Statement::decl("Vector", "x"),
    ]);

    let as_vector = match_decls(&subtypes, &MatchSetting::All, &facts, &[decl("Vector", "v")])
        .expect("no structural error");
    assert_eq!(as_vector, vec![subst(&[("v", "e")]), subst(&[("v", "x")])]);

    let as_unit = match_decls(
        &subtypes,
        &MatchSetting::All,
        &facts,
        &[decl("UnitVector", "v")],
    )
    .expect("no structural error");
    assert_eq!(as_unit, vec![subst(&[("v", "e")])]);
}
