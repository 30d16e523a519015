use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::FactType;

// Fact program

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactProgram {
    pub statements: Vec<Statement>,
}

impl FactProgram {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Decl { ty: FactType, name: String },
    Bind { name: String, expr: FactExpr },
    ApplyPredicate(Predicate),
}

impl Statement {
    pub fn decl(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Statement::Decl {
            ty: FactType::nullary(ty),
            name: name.into(),
        }
    }

    pub fn bind(name: impl Into<String>, expr: FactExpr) -> Self {
        Statement::Bind {
            name: name.into(),
            expr,
        }
    }

    pub fn pred(name: impl Into<String>, args: &[&str]) -> Self {
        Statement::ApplyPredicate(Predicate {
            name: name.into(),
            args: args
                .iter()
                .map(|a| PredicateArg::Expr(FactExpr::var(*a)))
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactExpr {
    Var { name: String },
    ApplyFunc(Application),
    ApplyCons(Application),
}

impl FactExpr {
    pub fn var(name: impl Into<String>) -> Self {
        FactExpr::Var { name: name.into() }
    }

    pub fn func(name: impl Into<String>, args: Vec<FactExpr>) -> Self {
        FactExpr::ApplyFunc(Application {
            name: name.into(),
            args,
        })
    }

    pub fn cons(name: impl Into<String>, args: Vec<FactExpr>) -> Self {
        FactExpr::ApplyCons(Application {
            name: name.into(),
            args,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(default)]
    pub args: Vec<FactExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    #[serde(default)]
    pub args: Vec<PredicateArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredicateArg {
    Expr(FactExpr),
    Pred(Predicate),
}

// Style headers

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProgram {
    pub headers: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Header {
    Selector(Selector),
    Namespace { name: String },
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Namespace { name } => write!(f, "{name}"),
            Header::Selector(sel) => write!(f, "{sel}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub head: Vec<DeclPattern>,
    #[serde(default, rename = "with")]
    pub with_decls: Vec<DeclPattern>,
    #[serde(default, rename = "where")]
    pub where_rels: Vec<RelationPattern>,
}

impl Selector {
    pub fn decls(&self) -> impl Iterator<Item = &DeclPattern> {
        self.head.iter().chain(self.with_decls.iter())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.head, "; ")?;
        if !self.with_decls.is_empty() {
            write!(f, " with ")?;
            write_joined(f, &self.with_decls, "; ")?;
        }
        if !self.where_rels.is_empty() {
            write!(f, " where ")?;
            write_joined(f, &self.where_rels, "; ")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclPattern {
    pub ty: String,
    pub id: BindingForm,
}

impl DeclPattern {
    pub fn new(ty: impl Into<String>, id: BindingForm) -> Self {
        Self { ty: ty.into(), id }
    }
}

impl fmt::Display for DeclPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum BindingForm {
    Pattern { name: String },
    Fact { name: String },
}

impl BindingForm {
    pub fn pattern(name: impl Into<String>) -> Self {
        BindingForm::Pattern { name: name.into() }
    }

    pub fn fact(name: impl Into<String>) -> Self {
        BindingForm::Fact { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            BindingForm::Pattern { name } | BindingForm::Fact { name } => name,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, BindingForm::Pattern { .. })
    }
}

impl fmt::Display for BindingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingForm::Pattern { name } => write!(f, "{name}"),
            BindingForm::Fact { name } => write!(f, "`{name}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelExpr {
    Bind { var: BindingForm },
    Func(SelApplication),
    ValCons(SelApplication),
    FuncOrValCons(SelApplication),
}

impl SelExpr {
    pub fn pattern(name: impl Into<String>) -> Self {
        SelExpr::Bind {
            var: BindingForm::pattern(name),
        }
    }

    pub fn fact(name: impl Into<String>) -> Self {
        SelExpr::Bind {
            var: BindingForm::fact(name),
        }
    }

    pub fn func(name: impl Into<String>, args: Vec<SelExpr>) -> Self {
        SelExpr::Func(SelApplication {
            name: name.into(),
            args,
        })
    }

    pub fn cons(name: impl Into<String>, args: Vec<SelExpr>) -> Self {
        SelExpr::ValCons(SelApplication {
            name: name.into(),
            args,
        })
    }
}

impl fmt::Display for SelExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelExpr::Bind { var } => write!(f, "{var}"),
            SelExpr::Func(app) | SelExpr::ValCons(app) | SelExpr::FuncOrValCons(app) => {
                write!(f, "{}(", app.name)?;
                write_joined(f, &app.args, ", ")?;
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelApplication {
    pub name: String,
    #[serde(default)]
    pub args: Vec<SelExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationPattern {
    Bind { id: BindingForm, expr: SelExpr },
    Pred(RelPred),
}

impl RelationPattern {
    pub fn pred(name: impl Into<String>, args: &[&str]) -> Self {
        RelationPattern::Pred(RelPred {
            name: name.into(),
            args: args
                .iter()
                .map(|a| RelPredArg::Bind(BindingForm::pattern(*a)))
                .collect(),
        })
    }
}

impl fmt::Display for RelationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationPattern::Bind { id, expr } => write!(f, "{id} := {expr}"),
            RelationPattern::Pred(pred) => write!(f, "{pred}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelPred {
    pub name: String,
    #[serde(default)]
    pub args: Vec<RelPredArg>,
}

impl fmt::Display for RelPred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_joined(f, &self.args, ", ")?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelPredArg {
    Bind(BindingForm),
    Pred(RelPred),
}

impl fmt::Display for RelPredArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelPredArg::Bind(b) => write!(f, "{b}"),
            RelPredArg::Pred(p) => write!(f, "{p}"),
        }
    }
}

// Fact-side pretty printing

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Decl { ty, name } => write!(f, "{ty} {name}"),
            Statement::Bind { name, expr } => write!(f, "{name} := {expr}"),
            Statement::ApplyPredicate(pred) => write!(f, "{pred}"),
        }
    }
}

impl fmt::Display for FactExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactExpr::Var { name } => write!(f, "{name}"),
            FactExpr::ApplyFunc(app) | FactExpr::ApplyCons(app) => {
                write!(f, "{}(", app.name)?;
                write_joined(f, &app.args, ", ")?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_joined(f, &self.args, ", ")?;
        write!(f, ")")
    }
}

impl fmt::Display for PredicateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateArg::Expr(e) => write!(f, "{e}"),
            PredicateArg::Pred(p) => write!(f, "{p}"),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
