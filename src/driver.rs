use serde::Serialize;

use crate::ast::{FactProgram, Header, StyleProgram};
use crate::config::{MatchConfig, TypePolicy};
use crate::decl_match::match_decls;
use crate::diagnostics::{Diagnostic, MatchError};
use crate::relation_filter::filter_relations;
use crate::selector_env::{SelectorEnv, build_selector_env, check_relations, check_selector};
use crate::substitution::{Substitution, has_unique_values, is_complete};
use crate::types::{DeclaredSubtypes, ExactTypes, TypeMatcher, Vocabulary};

pub const MATCH_REPORT_SCHEMA_VERSION: &str = "1.0.0";

pub struct MatchContext<'a> {
    pub vocab: &'a Vocabulary,
    pub facts: &'a FactProgram,
    pub config: &'a MatchConfig,
    types: Box<dyn TypeMatcher + 'a>,
}

impl<'a> MatchContext<'a> {
    pub fn new(vocab: &'a Vocabulary, facts: &'a FactProgram, config: &'a MatchConfig) -> Self {
        let types: Box<dyn TypeMatcher + 'a> = match config.type_policy {
            TypePolicy::Exact => Box::new(ExactTypes),
            TypePolicy::Subtype => Box::new(DeclaredSubtypes::from_vocabulary(vocab)),
        };
        Self {
            vocab,
            facts,
            config,
            types,
        }
    }

    pub fn with_type_matcher(mut self, types: impl TypeMatcher + 'a) -> Self {
        self.types = Box::new(types);
        self
    }

    pub fn types(&self) -> &dyn TypeMatcher {
        self.types.as_ref()
    }
}

pub fn find_substitutions_sel(
    ctx: &MatchContext<'_>,
    header: &Header,
    env: &SelectorEnv,
) -> Result<Vec<Substitution>, MatchError> {
    let Header::Selector(sel) = header else {
        return Ok(Vec::new());
    };
    if let Some(err) = check_relations(env, &sel.where_rels).into_iter().next() {
        return Err(err);
    }
    let admit = &ctx.config.admit;

    let raw = match_decls(ctx.types(), &admit.types, ctx.facts, sel.decls())?;
    let raw_count = raw.len();
    let candidates: Vec<Substitution> = raw
        .into_iter()
        .filter(|subst| is_complete(env, subst))
        .collect();
    let complete_count = candidates.len();
    let filtered = filter_relations(
        admit,
        ctx.config.prefilter,
        ctx.facts,
        &sel.where_rels,
        candidates,
    )?;
    let filtered_count = filtered.len();
    let accepted: Vec<Substitution> = filtered.into_iter().filter(has_unique_values).collect();

    tracing::debug!(
        selector = %sel,
        raw = raw_count,
        complete = complete_count,
        related = filtered_count,
        accepted = accepted.len(),
        "matched selector"
    );
    Ok(accepted)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResults {
    pub outcomes: Vec<Result<Vec<Substitution>, Vec<Diagnostic>>>,
}

impl MatchResults {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .flatten()
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(Result::is_err)
    }

    pub fn into_result(self) -> Result<Vec<Vec<Substitution>>, Vec<Diagnostic>> {
        let mut substs = Vec::with_capacity(self.outcomes.len());
        let mut errors = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                Ok(s) => substs.push(s),
                Err(mut e) => errors.append(&mut e),
            }
        }
        if errors.is_empty() {
            Ok(substs)
        } else {
            Err(errors)
        }
    }

    pub fn to_report(&self, style: &StyleProgram) -> MatchReport {
        let selectors = self
            .outcomes
            .iter()
            .zip(&style.headers)
            .enumerate()
            .map(|(index, (outcome, header))| {
                let (substitutions, errors) = match outcome {
                    Ok(s) => (s.clone(), Vec::new()),
                    Err(e) => (Vec::new(), e.clone()),
                };
                SelectorReport {
                    index,
                    header: header.to_string(),
                    substitutions,
                    errors,
                }
            })
            .collect();
        MatchReport {
            schema_version: MATCH_REPORT_SCHEMA_VERSION.to_string(),
            selectors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub schema_version: String,
    pub selectors: Vec<SelectorReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorReport {
    pub index: usize,
    pub header: String,
    pub substitutions: Vec<Substitution>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
}

pub fn find_substitutions_prog(
    ctx: &MatchContext<'_>,
    headers: &[Header],
    envs: &[SelectorEnv],
) -> Result<MatchResults, Vec<Diagnostic>> {
    if headers.len() != envs.len() {
        return Err(vec![
            MatchError::EnvironmentCountMismatch {
                expected: headers.len(),
                actual: envs.len(),
            }
            .into_diagnostic(None),
        ]);
    }

    let outcomes = headers
        .iter()
        .zip(envs)
        .enumerate()
        .map(|(index, (header, env))| {
            find_substitutions_sel(ctx, header, env).map_err(|err| {
                tracing::warn!(selector = index, error = %err, "selector aborted");
                vec![err.into_diagnostic(Some(index))]
            })
        })
        .collect();
    Ok(MatchResults { outcomes })
}

pub fn compile_selectors(
    vocab: &Vocabulary,
    facts: &FactProgram,
    style: &StyleProgram,
    config: &MatchConfig,
) -> MatchResults {
    tracing::debug!(selectors = style.headers.len(), "checking selectors");
    let ctx = MatchContext::new(vocab, facts, config);
    let outcomes = style
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let errors = check_selector(vocab, header, config);
            if !errors.is_empty() {
                for err in &errors {
                    tracing::warn!(selector = index, error = %err, "selector rejected");
                }
                return Err(errors
                    .into_iter()
                    .map(|e| e.into_diagnostic(Some(index)))
                    .collect());
            }
            let env = build_selector_env(vocab, header);
            find_substitutions_sel(&ctx, header, &env).map_err(|err| {
                tracing::warn!(selector = index, error = %err, "selector aborted");
                vec![err.into_diagnostic(Some(index))]
            })
        })
        .collect();
    MatchResults { outcomes }
}

pub fn find_substitutions(
    vocab: &Vocabulary,
    facts: &FactProgram,
    style: &StyleProgram,
    config: &MatchConfig,
) -> Result<Vec<Vec<Substitution>>, Vec<Diagnostic>> {
    compile_selectors(vocab, facts, style, config).into_result()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub selectors_checked: usize,
    pub namespaces: usize,
}

pub fn check_style_program(
    vocab: &Vocabulary,
    style: &StyleProgram,
    config: &MatchConfig,
) -> Result<CheckReport, Vec<Diagnostic>> {
    let mut errors = Vec::new();
    let mut namespaces = 0;
    for (index, header) in style.headers.iter().enumerate() {
        if matches!(header, Header::Namespace { .. }) {
            namespaces += 1;
        }
        errors.extend(
            check_selector(vocab, header, config)
                .into_iter()
                .map(|e| e.into_diagnostic(Some(index))),
        );
    }
    if errors.is_empty() {
        Ok(CheckReport {
            selectors_checked: style.headers.len() - namespaces,
            namespaces,
        })
    } else {
        Err(errors)
    }
}
