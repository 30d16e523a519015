use crate::ast::{
    Application, BindingForm, FactExpr, FactProgram, Predicate, PredicateArg, RelPred,
    RelPredArg, RelationPattern, SelApplication, SelExpr, Statement,
};
use crate::config::Admissible;
use crate::diagnostics::MatchError;
use crate::substitution::Substitution;

// Applying a substitution

pub fn substitute_binding_form(subst: &Substitution, bf: &BindingForm) -> BindingForm {
    match bf {
        BindingForm::Pattern { name } => match subst.get(name) {
            Some(fact) => BindingForm::fact(fact),
            None => bf.clone(),
        },
        BindingForm::Fact { .. } => bf.clone(),
    }
}

pub fn substitute_expr(subst: &Substitution, expr: &SelExpr) -> SelExpr {
    let app = |a: &SelApplication| SelApplication {
        name: a.name.clone(),
        args: a.args.iter().map(|e| substitute_expr(subst, e)).collect(),
    };
    match expr {
        SelExpr::Bind { var } => SelExpr::Bind {
            var: substitute_binding_form(subst, var),
        },
        SelExpr::Func(a) => SelExpr::Func(app(a)),
        SelExpr::ValCons(a) => SelExpr::ValCons(app(a)),
        SelExpr::FuncOrValCons(a) => SelExpr::FuncOrValCons(app(a)),
    }
}

fn substitute_pred(subst: &Substitution, pred: &RelPred) -> RelPred {
    RelPred {
        name: pred.name.clone(),
        args: pred
            .args
            .iter()
            .map(|arg| match arg {
                RelPredArg::Bind(b) => RelPredArg::Bind(substitute_binding_form(subst, b)),
                RelPredArg::Pred(p) => RelPredArg::Pred(substitute_pred(subst, p)),
            })
            .collect(),
    }
}

pub fn substitute_relation(subst: &Substitution, rel: &RelationPattern) -> RelationPattern {
    match rel {
        RelationPattern::Bind { id, expr } => RelationPattern::Bind {
            id: substitute_binding_form(subst, id),
            expr: substitute_expr(subst, expr),
        },
        RelationPattern::Pred(pred) => RelationPattern::Pred(substitute_pred(subst, pred)),
    }
}

pub fn substitute_relations(subst: &Substitution, rels: &[RelationPattern]) -> Vec<RelationPattern> {
    rels.iter().map(|r| substitute_relation(subst, r)).collect()
}

// Converting a substituted constraint into fact-program form

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactRelation {
    Bind { name: String, expr: FactExpr },
    Pred(Predicate),
}

pub fn to_fact_relation(rel: &RelationPattern) -> Result<FactRelation, MatchError> {
    match rel {
        RelationPattern::Bind { id, expr } => Ok(FactRelation::Bind {
            name: to_fact_var(id, rel)?,
            expr: to_fact_expr(expr, rel)?,
        }),
        RelationPattern::Pred(pred) => Ok(FactRelation::Pred(to_fact_predicate(pred, rel)?)),
    }
}

fn to_fact_var(bf: &BindingForm, rel: &RelationPattern) -> Result<String, MatchError> {
    match bf {
        BindingForm::Fact { name } => Ok(name.clone()),
        BindingForm::Pattern { name } => Err(MatchError::UnsubstitutedVariable {
            name: name.clone(),
            relation: rel.to_string(),
        }),
    }
}

fn to_fact_expr(expr: &SelExpr, rel: &RelationPattern) -> Result<FactExpr, MatchError> {
    let app = |a: &SelApplication| -> Result<Application, MatchError> {
        Ok(Application {
            name: a.name.clone(),
            args: a
                .args
                .iter()
                .map(|e| to_fact_expr(e, rel))
                .collect::<Result<Vec<_>, _>>()?,
        })
    };
    match expr {
        SelExpr::Bind { var } => Ok(FactExpr::Var {
            name: to_fact_var(var, rel)?,
        }),
        SelExpr::Func(a) => Ok(FactExpr::ApplyFunc(app(a)?)),
        SelExpr::ValCons(a) => Ok(FactExpr::ApplyCons(app(a)?)),
        SelExpr::FuncOrValCons(a) => Err(MatchError::AmbiguousApplication {
            name: a.name.clone(),
            relation: rel.to_string(),
        }),
    }
}

fn to_fact_predicate(pred: &RelPred, rel: &RelationPattern) -> Result<Predicate, MatchError> {
    let mut args = Vec::with_capacity(pred.args.len());
    for arg in &pred.args {
        args.push(match arg {
            RelPredArg::Bind(b) => PredicateArg::Expr(FactExpr::Var {
                name: to_fact_var(b, rel)?,
            }),
            RelPredArg::Pred(p) => PredicateArg::Pred(to_fact_predicate(p, rel)?),
        });
    }
    Ok(Predicate {
        name: pred.name.clone(),
        args,
    })
}

// Matching against the fact program

/// Constructor applications compare name and arguments; function applications
/// must be the identical call.
pub fn exprs_match(fact: &FactExpr, sel: &FactExpr) -> bool {
    match (fact, sel) {
        (FactExpr::Var { name: a }, FactExpr::Var { name: b }) => a == b,
        (FactExpr::ApplyFunc(a), FactExpr::ApplyFunc(b)) => a == b,
        (FactExpr::ApplyCons(a), FactExpr::ApplyCons(b)) => {
            a.name == b.name
                && a.args.len() == b.args.len()
                && a.args.iter().zip(&b.args).all(|(x, y)| exprs_match(x, y))
        }
        _ => false,
    }
}

fn bind_admitted(admit: &Admissible, expr: &FactExpr) -> bool {
    match expr {
        FactExpr::Var { .. } => true,
        FactExpr::ApplyFunc(app) => admit.functions.admits(&app.name),
        FactExpr::ApplyCons(app) => admit.constructors.admits(&app.name),
    }
}

pub fn relation_matches_statement(admit: &Admissible, stmt: &Statement, rel: &FactRelation) -> bool {
    match (stmt, rel) {
        (
            Statement::Bind { name, expr },
            FactRelation::Bind {
                name: rel_name,
                expr: rel_expr,
            },
        ) => bind_admitted(admit, expr) && name == rel_name && exprs_match(expr, rel_expr),
        (Statement::ApplyPredicate(pred), FactRelation::Pred(rel_pred)) => {
            admit.predicates.admits(&pred.name) && pred == rel_pred
        }
        _ => false,
    }
}

pub fn relation_holds(admit: &Admissible, statements: &[&Statement], rel: &FactRelation) -> bool {
    statements
        .iter()
        .any(|stmt| relation_matches_statement(admit, stmt, rel))
}

pub fn all_relations_hold(
    admit: &Admissible,
    statements: &[&Statement],
    subst: &Substitution,
    rels: &[RelationPattern],
) -> Result<bool, MatchError> {
    for rel in rels {
        let fact_rel = to_fact_relation(&substitute_relation(subst, rel))?;
        if !relation_holds(admit, statements, &fact_rel) {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn could_match_relations(rels: &[RelationPattern], stmt: &Statement) -> bool {
    match stmt {
        Statement::Decl { .. } => false,
        Statement::Bind { .. } => rels
            .iter()
            .any(|r| matches!(r, RelationPattern::Bind { .. })),
        Statement::ApplyPredicate(pred) => rels
            .iter()
            .any(|r| matches!(r, RelationPattern::Pred(p) if p.name == pred.name)),
    }
}

pub fn filter_relations(
    admit: &Admissible,
    prefilter: bool,
    facts: &FactProgram,
    rels: &[RelationPattern],
    substs: Vec<Substitution>,
) -> Result<Vec<Substitution>, MatchError> {
    if rels.is_empty() {
        return Ok(substs);
    }
    let statements: Vec<&Statement> = facts
        .statements
        .iter()
        .filter(|stmt| !prefilter || could_match_relations(rels, stmt))
        .collect();

    let mut kept = Vec::new();
    for subst in substs {
        if all_relations_hold(admit, &statements, &subst, rels)? {
            kept.push(subst);
        }
    }
    Ok(kept)
}
