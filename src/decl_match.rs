use crate::ast::{BindingForm, DeclPattern, FactProgram, Statement};
use crate::config::MatchSetting;
use crate::diagnostics::MatchError;
use crate::substitution::{Substitution, merge};
use crate::types::{FactType, TypeMatcher};

pub fn match_binding_form(fact: &str, bf: &BindingForm) -> Option<Substitution> {
    match bf {
        BindingForm::Pattern { name } => Some(Substitution::singleton(name.clone(), fact)),
        BindingForm::Fact { name } if name == fact => Some(Substitution::new()),
        BindingForm::Fact { .. } => None,
    }
}

pub fn match_decl_line(
    types: &dyn TypeMatcher,
    admit: &MatchSetting,
    stmt: &Statement,
    decl: &DeclPattern,
) -> Result<Option<Substitution>, MatchError> {
    let Statement::Decl { ty, name } = stmt else {
        return Ok(None);
    };
    let type_name = match ty {
        FactType::Constructor { name, .. } => name,
        FactType::Var { name: var } => {
            return Err(MatchError::NonNullaryType {
                fact: name.clone(),
                ty: var.clone(),
            });
        }
    };
    if !admit.admits(type_name) || !types.matches(type_name, &decl.ty) {
        return Ok(None);
    }
    Ok(match_binding_form(name, &decl.id))
}

pub fn match_decl(
    types: &dyn TypeMatcher,
    admit: &MatchSetting,
    facts: &FactProgram,
    running: &[Substitution],
    decl: &DeclPattern,
) -> Result<Vec<Substitution>, MatchError> {
    let mut candidates = Vec::new();
    for stmt in &facts.statements {
        if let Some(subst) = match_decl_line(types, admit, stmt, decl)? {
            candidates.push(subst);
        }
    }
    Ok(merge(running, &candidates))
}

/// The result is the cartesian product of the per-pattern candidates:
/// exponential in the number of declared patterns. Conflicting bindings are
/// kept here and rejected later by the validator.
pub fn match_decls<'a>(
    types: &dyn TypeMatcher,
    admit: &MatchSetting,
    facts: &FactProgram,
    decls: impl IntoIterator<Item = &'a DeclPattern>,
) -> Result<Vec<Substitution>, MatchError> {
    let mut substs = vec![Substitution::new()];
    for decl in decls {
        substs = match_decl(types, admit, facts, &substs, decl)?;
        if substs.is_empty() {
            break;
        }
    }
    Ok(substs)
}
