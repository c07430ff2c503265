//! Collects exports from several rules and orders them by source position.

use super::{ExportedClass, ExportedFunction, ExportedType, Exports};

/// Accumulates matches tagged with their byte offset.
///
/// Each construct kind is matched by more than one rule, so matches arrive
/// grouped by rule; [`ExportsBuilder::build`] restores the order of
/// appearance with a stable sort.
#[derive(Debug, Default)]
pub struct ExportsBuilder {
    functions: Vec<(usize, ExportedFunction)>,
    types: Vec<(usize, ExportedType)>,
    classes: Vec<(usize, ExportedClass)>,
}

impl ExportsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(
        &mut self,
        pos: usize,
        name: impl Into<String>,
        signature: impl Into<String>,
        description: String,
    ) {
        self.functions.push((
            pos,
            ExportedFunction {
                name: name.into(),
                signature: signature.into(),
                description,
            },
        ));
    }

    pub fn ty(
        &mut self,
        pos: usize,
        name: impl Into<String>,
        kind: impl Into<String>,
        definition: impl Into<String>,
        description: String,
    ) {
        self.types.push((
            pos,
            ExportedType {
                name: name.into(),
                kind: kind.into(),
                definition: definition.into(),
                description,
            },
        ));
    }

    pub fn class(
        &mut self,
        pos: usize,
        name: impl Into<String>,
        signature: impl Into<String>,
        description: String,
    ) {
        self.classes.push((
            pos,
            ExportedClass {
                name: name.into(),
                signature: signature.into(),
                description,
            },
        ));
    }

    pub fn build(self) -> Exports {
        Exports {
            functions: in_order(self.functions),
            types: in_order(self.types),
            classes: in_order(self.classes),
        }
    }
}

fn in_order<T>(mut items: Vec<(usize, T)>) -> Vec<T> {
    items.sort_by_key(|(pos, _)| *pos);
    items.into_iter().map(|(_, item)| item).collect()
}
