use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector_env::SelectorEnv;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution(BTreeMap<String, String>);

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(var: impl Into<String>, fact: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(var.into(), fact.into());
        Self(map)
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn facts(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn combine(&self, other: &Substitution) -> Substitution {
        let mut map = self.0.clone();
        for (k, v) in &other.0 {
            map.insert(k.clone(), v.clone());
        }
        Substitution(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Substitution(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k} -> {v}")?;
        }
        write!(f, "}}")
    }
}

pub fn merge(running: &[Substitution], next: &[Substitution]) -> Vec<Substitution> {
    let mut out = Vec::with_capacity(running.len() * next.len());
    for a in running {
        for b in next {
            out.push(a.combine(b));
        }
    }
    out
}

pub fn is_complete(env: &SelectorEnv, subst: &Substitution) -> bool {
    let expected: BTreeSet<&str> = env.pattern_vars().collect();
    let actual: BTreeSet<&str> = subst.vars().collect();
    expected == actual
}

pub fn has_unique_values(subst: &Substitution) -> bool {
    let mut seen = BTreeSet::new();
    subst.facts().all(|fact| seen.insert(fact))
}
