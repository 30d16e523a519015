pub mod ast;
pub mod config;
pub mod decl_match;
pub mod diagnostics;
pub mod driver;
pub mod input;
pub mod relation_filter;
pub mod selector_env;
pub mod substitution;
pub mod types;

pub use ast::{FactProgram, Header, StyleProgram};
pub use config::{MatchConfig, TypePolicy, load_config};
pub use diagnostics::{Diagnostic, MatchError};
pub use driver::{
    MATCH_REPORT_SCHEMA_VERSION, MatchContext, MatchReport, MatchResults, check_style_program,
    compile_selectors, find_substitutions, find_substitutions_prog, find_substitutions_sel,
};
pub use input::{load_fact_program, load_style_program, load_vocabulary};
pub use selector_env::{SelectorEnv, build_selector_env, build_selector_envs};
pub use substitution::{Substitution, has_unique_values, is_complete};
pub use types::{TypeMatcher, Vocabulary};
