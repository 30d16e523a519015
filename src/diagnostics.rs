use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>, selector: Option<usize>) -> Self {
        Self {
            code,
            message: message.into(),
            selector,
            source: None,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        hint_for_code(self.code)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hint = self.hint();
        if let Some(source) = self.source() {
            write!(f, "{}: ", source)?;
        }
        if let Some(selector) = self.selector {
            write!(f, "{}: {} in selector #{}", self.code, self.message, selector)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }
        if let Some(hint) = hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

pub fn hint_for_code(code: &str) -> Option<&'static str> {
    match code {
        "E-IO" => Some("check the input path and read permissions"),
        "E-INPUT" => Some("inputs must be JSON documents of already-parsed programs"),
        "E-CONFIG" => Some("check the TOML keys and the `*` / name-list match settings"),
        "E-SELECTOR" => {
            Some("declare every pattern variable once, in the head or a `with` clause")
        }
        "E-TYPE" => Some("fact declarations must use nullary type constructors"),
        "E-MATCH" => Some("an earlier compiler phase produced a malformed selector"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("pattern variable `{name}` used in `{relation}` is never declared")]
    UndeclaredVariable { name: String, relation: String },
    #[error("pattern variable `{name}` left unsubstituted in `{relation}`")]
    UnsubstitutedVariable { name: String, relation: String },
    #[error("application `{name}` in `{relation}` was not resolved to a function or constructor")]
    AmbiguousApplication { name: String, relation: String },
    #[error("declaration of `{fact}` has type variable `{ty}`, expected a nullary type constructor")]
    NonNullaryType { fact: String, ty: String },
    #[error("pattern variable `{name}` is declared more than once")]
    DuplicateDeclaration { name: String },
    #[error("type `{ty}` of `{name}` is not declared in the vocabulary")]
    UnknownType { name: String, ty: String },
    #[error("expected {expected} selector environments, got {actual}")]
    EnvironmentCountMismatch { expected: usize, actual: usize },
}

impl MatchError {
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::UndeclaredVariable { .. }
            | MatchError::DuplicateDeclaration { .. }
            | MatchError::UnknownType { .. } => "E-SELECTOR",
            MatchError::NonNullaryType { .. } => "E-TYPE",
            MatchError::UnsubstitutedVariable { .. }
            | MatchError::AmbiguousApplication { .. }
            | MatchError::EnvironmentCountMismatch { .. } => "E-MATCH",
        }
    }

    pub fn into_diagnostic(self, selector: Option<usize>) -> Diagnostic {
        Diagnostic::new(self.code(), self.to_string(), selector)
    }
}
