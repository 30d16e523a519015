use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactType {
    Constructor {
        name: String,
        #[serde(default)]
        args: Vec<FactType>,
    },
    Var {
        name: String,
    },
}

impl FactType {
    pub fn nullary(name: impl Into<String>) -> Self {
        FactType::Constructor {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactType::Var { name } => write!(f, "'{name}"),
            FactType::Constructor { name, args } if args.is_empty() => write!(f, "{name}"),
            FactType::Constructor { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtypeDecl {
    pub sub: String,
    pub sup: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub subtypes: Vec<SubtypeDecl>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.types.push(TypeDecl { name: name.into() });
        self
    }

    pub fn with_subtype(mut self, sub: impl Into<String>, sup: impl Into<String>) -> Self {
        self.subtypes.push(SubtypeDecl {
            sub: sub.into(),
            sup: sup.into(),
        });
        self
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }
}

pub trait TypeMatcher {
    fn matches(&self, fact_type: &str, pattern_type: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTypes;

impl TypeMatcher for ExactTypes {
    fn matches(&self, fact_type: &str, pattern_type: &str) -> bool {
        fact_type == pattern_type
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeclaredSubtypes {
    supertypes: BTreeMap<String, BTreeSet<String>>,
}

impl DeclaredSubtypes {
    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        let mut direct: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for decl in &vocab.subtypes {
            direct
                .entry(decl.sub.as_str())
                .or_default()
                .push(decl.sup.as_str());
        }

        let mut supertypes = BTreeMap::new();
        for start in direct.keys() {
            let mut seen = BTreeSet::new();
            let mut queue: VecDeque<&str> = VecDeque::from([*start]);
            while let Some(ty) = queue.pop_front() {
                for &sup in direct.get(ty).into_iter().flatten() {
                    if seen.insert(sup.to_string()) {
                        queue.push_back(sup);
                    }
                }
            }
            supertypes.insert(start.to_string(), seen);
        }
        Self { supertypes }
    }

    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        sub == sup
            || self
                .supertypes
                .get(sub)
                .is_some_and(|sups| sups.contains(sup))
    }
}

impl TypeMatcher for DeclaredSubtypes {
    fn matches(&self, fact_type: &str, pattern_type: &str) -> bool {
        self.is_subtype(fact_type, pattern_type)
    }
}
