use std::collections::{BTreeMap, BTreeSet};

use crate::ast::{BindingForm, DeclPattern, Header, RelPred, RelPredArg, RelationPattern, SelExpr};
use crate::config::MatchConfig;
use crate::diagnostics::MatchError;
use crate::types::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    Pattern,
    Fact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub ty: String,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorEnv {
    entries: BTreeMap<String, EnvEntry>,
}

impl SelectorEnv {
    pub fn get(&self, name: &str) -> Option<&EnvEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &EnvEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn pattern_vars(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.origin == Origin::Pattern)
            .map(|(k, _)| k.as_str())
    }

    fn with_decl(mut self, decl: &DeclPattern) -> Self {
        let origin = match &decl.id {
            BindingForm::Pattern { .. } => Origin::Pattern,
            BindingForm::Fact { .. } => Origin::Fact,
        };
        self.entries.insert(
            decl.id.name().to_string(),
            EnvEntry {
                ty: decl.ty.clone(),
                origin,
            },
        );
        self
    }
}

pub fn build_selector_env(_vocab: &Vocabulary, header: &Header) -> SelectorEnv {
    match header {
        Header::Selector(sel) => sel
            .decls()
            .fold(SelectorEnv::default(), |env, decl| env.with_decl(decl)),
        Header::Namespace { .. } => SelectorEnv::default(),
    }
}

pub fn build_selector_envs(vocab: &Vocabulary, headers: &[Header]) -> Vec<SelectorEnv> {
    headers
        .iter()
        .map(|h| build_selector_env(vocab, h))
        .collect()
}

pub fn check_selector(vocab: &Vocabulary, header: &Header, config: &MatchConfig) -> Vec<MatchError> {
    let Header::Selector(sel) = header else {
        return Vec::new();
    };
    let mut errors = Vec::new();

    if config.check_declarations {
        let mut seen = BTreeSet::new();
        for decl in sel.decls() {
            if decl.id.is_pattern() && !seen.insert(decl.id.name()) {
                errors.push(MatchError::DuplicateDeclaration {
                    name: decl.id.name().to_string(),
                });
            }
            if !vocab.has_type(&decl.ty) {
                errors.push(MatchError::UnknownType {
                    name: decl.id.name().to_string(),
                    ty: decl.ty.clone(),
                });
            }
        }
    }

    let env = build_selector_env(vocab, header);
    errors.extend(check_relations(&env, &sel.where_rels));
    errors
}

pub fn check_relations(env: &SelectorEnv, rels: &[RelationPattern]) -> Vec<MatchError> {
    let mut errors = Vec::new();
    for rel in rels {
        let relation = rel.to_string();
        let mut used = Vec::new();
        let mut ambiguous = Vec::new();
        collect_relation(rel, &mut used, &mut ambiguous);

        let mut reported = BTreeSet::new();
        for name in used {
            let declared = env
                .get(name)
                .is_some_and(|entry| entry.origin == Origin::Pattern);
            if !declared && reported.insert(name) {
                errors.push(MatchError::UndeclaredVariable {
                    name: name.to_string(),
                    relation: relation.clone(),
                });
            }
        }
        for name in ambiguous {
            errors.push(MatchError::AmbiguousApplication {
                name: name.to_string(),
                relation: relation.clone(),
            });
        }
    }
    errors
}

fn collect_relation<'a>(
    rel: &'a RelationPattern,
    used: &mut Vec<&'a str>,
    ambiguous: &mut Vec<&'a str>,
) {
    match rel {
        RelationPattern::Bind { id, expr } => {
            collect_binding_form(id, used);
            collect_expr(expr, used, ambiguous);
        }
        RelationPattern::Pred(pred) => collect_pred(pred, used),
    }
}

fn collect_pred<'a>(pred: &'a RelPred, used: &mut Vec<&'a str>) {
    for arg in &pred.args {
        match arg {
            RelPredArg::Bind(b) => collect_binding_form(b, used),
            RelPredArg::Pred(p) => collect_pred(p, used),
        }
    }
}

fn collect_expr<'a>(expr: &'a SelExpr, used: &mut Vec<&'a str>, ambiguous: &mut Vec<&'a str>) {
    match expr {
        SelExpr::Bind { var } => collect_binding_form(var, used),
        SelExpr::Func(app) | SelExpr::ValCons(app) => {
            for arg in &app.args {
                collect_expr(arg, used, ambiguous);
            }
        }
        SelExpr::FuncOrValCons(app) => {
            ambiguous.push(&app.name);
            for arg in &app.args {
                collect_expr(arg, used, ambiguous);
            }
        }
    }
}

fn collect_binding_form<'a>(b: &'a BindingForm, used: &mut Vec<&'a str>) {
    if let BindingForm::Pattern { name } = b {
        used.push(name);
    }
}
