//! Operation depth limit
//!
//! Root fields sit at depth 0 and every nested selection adds one. Fields
//! whose name starts with `__` are not descended into, so introspection
//! queries are never rejected for their nesting. Fragment spreads are
//! followed at the depth they are spread at.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextParseQuery};
use async_graphql::parser::types::{ExecutableDocument, FragmentDefinition, Selection, SelectionSet};
use async_graphql::{Name, Pos, Positioned, ServerError, ServerResult, Variables};

/// Rejects documents nested deeper than `max_depth` before validation
pub struct DepthLimit {
    max_depth: usize,
}

impl DepthLimit {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl ExtensionFactory for DepthLimit {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(DepthLimitExtension {
            max_depth: self.max_depth,
        })
    }
}

struct DepthLimitExtension {
    max_depth: usize,
}

#[async_trait::async_trait]
impl Extension for DepthLimitExtension {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let document = next.run(ctx, query, variables).await?;
        check_depth(&document, self.max_depth)?;
        Ok(document)
    }
}

/// Check every operation of `document` against `max_depth`
pub fn check_depth(document: &ExecutableDocument, max_depth: usize) -> ServerResult<()> {
    for (name, operation) in document.operations.iter() {
        let mut walker = Walker {
            fragments: &document.fragments,
            max_depth,
            expanding: Vec::new(),
        };
        if let Err(pos) = walker.walk(&operation.node.selection_set.node, 0) {
            let name = name.map(Name::as_str).unwrap_or("anonymous");
            tracing::debug!(operation = name, max_depth, "operation too deep");
            return Err(ServerError::new(
                format!("'{name}' exceeds maximum operation depth of {max_depth}"),
                Some(pos),
            ));
        }
    }
    Ok(())
}

struct Walker<'a> {
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    max_depth: usize,
    // fragments currently being expanded; a cycle is left to validation
    expanding: Vec<&'a Name>,
}

impl<'a> Walker<'a> {
    /// Returns the position of the first field found below `max_depth`
    fn walk(&mut self, set: &'a SelectionSet, depth: usize) -> Result<(), Pos> {
        for selection in &set.items {
            match &selection.node {
                Selection::Field(field) => {
                    if depth > self.max_depth {
                        return Err(field.pos);
                    }
                    if field.node.name.node.as_str().starts_with("__") {
                        continue;
                    }
                    self.walk(&field.node.selection_set.node, depth + 1)?;
                }
                Selection::InlineFragment(fragment) => {
                    self.walk(&fragment.node.selection_set.node, depth)?;
                }
                Selection::FragmentSpread(spread) => {
                    let name = &spread.node.fragment_name.node;
                    if self.expanding.contains(&name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(name) {
                        self.expanding.push(name);
                        self.walk(&fragment.node.selection_set.node, depth)?;
                        self.expanding.pop();
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_query;

    fn check(query: &str, max_depth: usize) -> ServerResult<()> {
        let document = parse_query(query).expect("valid document");
        check_depth(&document, max_depth)
    }

    #[test]
    fn test_root_fields_are_depth_zero() {
        assert!(check("{ users { id } }", 1).is_ok());
        assert!(check("{ users { posts { id } } }", 1).is_err());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let five = "{ a { b { c { d { e { id } } } } } }";
        let six = "{ a { b { c { d { e { f { id } } } } } } }";
        assert!(check(five, 5).is_ok());
        let err = check(six, 5).expect_err("too deep");
        assert_eq!(err.message, "'anonymous' exceeds maximum operation depth of 5");
    }

    #[test]
    fn test_introspection_fields_are_skipped() {
        let query = r#"{ __schema { types { name fields { name type {
            kind ofType { kind ofType { kind ofType { kind ofType { name } } } } } } } } }"#;
        assert!(check(query, 5).is_ok());
    }

    #[test]
    fn test_fragments_count_where_spread() {
        let query = r#"
            query Deep { a { ...Nested } }
            fragment Nested on T { b { c { ... on T { d { id } } } } }
        "#;
        assert!(check(query, 4).is_ok());
        let err = check(query, 3).expect_err("too deep");
        assert_eq!(err.message, "'Deep' exceeds maximum operation depth of 3");
    }

    #[test]
    fn test_fragment_cycle_terminates() {
        let query = r#"
            { a { ...Loop } }
            fragment Loop on T { b { ...Loop } }
        "#;
        assert!(check(query, 5).is_ok());
    }
}
