//! Mutator behaviour contract
//!
//! A definition only names its mutator. The behaviour behind that name lives
//! with the host: how a block's extra state is saved and restored, and how
//! the optional mini-editor reshapes the block.
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

/// Behaviour mixed into blocks whose definition sets `mutator`
pub trait MutatorMixin {
    /// Live block instance the mutator operates on
    type Block;
    /// Serialized extra state, in whatever format the host persists
    type Mutation;
    /// Top block of the mini-editor used to reshape a block
    type Container;

    /// Name referenced by the `mutator` key of a definition
    fn name(&self) -> &str;

    /// Capture the block's extra state, `None` when there is nothing to save
    fn mutation_to_dom(&self, block: &Self::Block) -> Option<Self::Mutation>;

    /// Restore extra state previously captured by [`Self::mutation_to_dom`]
    fn dom_to_mutation(&self, block: &mut Self::Block, mutation: &Self::Mutation);

    /// Populate the mini-editor from the block. Mutators without one return `None`.
    fn decompose(&self, _block: &Self::Block) -> Option<Self::Container> {
        None
    }

    /// Reshape the block from the mini-editor
    fn compose(&self, _block: &mut Self::Block, _container: &Self::Container) {}

    /// Remember which child blocks are attached where before recomposing
    fn save_connections(&self, _block: &Self::Block, _container: &mut Self::Container) {}
}

/// Names of a set of mutators, for restricting the `mutator` key
pub fn mutator_names<'a, M>(mutators: impl IntoIterator<Item = &'a M>) -> Vec<String>
where
    M: MutatorMixin + 'a,
{
    mutators.into_iter().map(|m| m.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_report, ValidationConfig, ViolationKind};
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct IfBlock {
        else_if_count: usize,
        has_else: bool,
    }

    struct IfMutator;

    impl MutatorMixin for IfMutator {
        type Block = IfBlock;
        type Mutation = (usize, bool);
        type Container = Vec<&'static str>;

        fn name(&self) -> &str {
            "controls_if_mutator"
        }

        fn mutation_to_dom(&self, block: &IfBlock) -> Option<(usize, bool)> {
            if block.else_if_count == 0 && !block.has_else {
                None
            } else {
                Some((block.else_if_count, block.has_else))
            }
        }

        fn dom_to_mutation(&self, block: &mut IfBlock, mutation: &(usize, bool)) {
            block.else_if_count = mutation.0;
            block.has_else = mutation.1;
        }

        fn decompose(&self, block: &IfBlock) -> Option<Vec<&'static str>> {
            let mut items = vec!["if"];
            items.extend(std::iter::repeat("elseif").take(block.else_if_count));
            if block.has_else {
                items.push("else");
            }
            Some(items)
        }

        fn compose(&self, block: &mut IfBlock, container: &Vec<&'static str>) {
            block.else_if_count = container.iter().filter(|item| **item == "elseif").count();
            block.has_else = container.contains(&"else");
        }
    }

    #[test]
    fn test_mutation_round_trip() {
        let mutator = IfMutator;
        let block = IfBlock {
            else_if_count: 2,
            has_else: true,
        };
        let mutation = mutator.mutation_to_dom(&block).unwrap();

        let mut restored = IfBlock::default();
        mutator.dom_to_mutation(&mut restored, &mutation);
        assert_eq!(restored, block);
        assert!(mutator.mutation_to_dom(&IfBlock::default()).is_none());
    }

    #[test]
    fn test_compose_from_container() {
        let mutator = IfMutator;
        let mut block = IfBlock::default();
        let mut container = mutator.decompose(&block).unwrap();
        container.push("elseif");
        container.push("else");
        mutator.save_connections(&block, &mut container);
        mutator.compose(&mut block, &container);
        assert_eq!(block.else_if_count, 1);
        assert!(block.has_else);
    }

    #[test]
    fn test_names_restrict_definitions() {
        let mutators = [IfMutator];
        let config = ValidationConfig::strict().with_known_mutators(mutator_names(&mutators));

        let known = json!({"type": "controls_if", "mutator": "controls_if_mutator"});
        assert!(validate_report(&known, &config.context()).is_valid());

        let unknown = json!({"type": "controls_if", "mutator": "text_join_mutator"});
        let report = validate_report(&unknown, &config.context());
        assert_eq!(report.violations.violations[0].kind, ViolationKind::InvalidEnumValue);
    }
}
