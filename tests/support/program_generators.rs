#![allow(dead_code)]

use proptest::prelude::*;

use stymatch::ast::{FactProgram, RelationPattern, Statement, StyleProgram};

use super::{decl, namespace, selector};

const VECTORS: [&str; 4] = ["a", "b", "c", "d"];

/// Random fact programs over one space `S` and up to four vectors, with random
/// `In`, `Unit` and `Orthogonal` facts.
pub fn fact_programs() -> impl Strategy<Value = FactProgram> {
    (
        prop::array::uniform4(any::<bool>()),
        prop::array::uniform4(any::<bool>()),
        prop::array::uniform4(any::<bool>()),
        prop::collection::vec((0usize..4, 0usize..4), 0..8),
    )
        .prop_map(|(declared, inside, unit, orthogonal)| {
            let mut statements = vec![Statement::decl("VectorSpace", "S")];
            for (i, &v) in VECTORS.iter().enumerate() {
                if declared[i] {
                    statements.push(Statement::decl("Vector", v));
                }
                if inside[i] {
                    statements.push(Statement::pred("In", &[v, "S"]));
                }
                if unit[i] {
                    statements.push(Statement::pred("Unit", &[v]));
                }
            }
            for (a, b) in orthogonal {
                statements.push(Statement::pred("Orthogonal", &[VECTORS[a], VECTORS[b]]));
            }
            FactProgram::new(statements)
        })
}

pub fn style_program() -> StyleProgram {
    StyleProgram {
        headers: vec![
            namespace("Global"),
            selector(vec![decl("Vector", "v")], vec![]),
            selector(vec![decl("Vector", "u"), decl("Vector", "v")], vec![]),
            selector(
                vec![decl("Vector", "v"), decl("VectorSpace", "U")],
                vec![RelationPattern::pred("In", &["v", "U"])],
            ),
            selector(
                vec![decl("Vector", "u"), decl("Vector", "v")],
                vec![
                    RelationPattern::pred("Orthogonal", &["u", "v"]),
                    RelationPattern::pred("Unit", &["u"]),
                ],
            ),
            super::orthogonal_selector(),
        ],
    }
}
