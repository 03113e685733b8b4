//! Filter-application command.

/// Immutable pairing of a query with the table builder it belongs to.
///
/// Carries no behavior of its own; it exists to be handed to the host's
/// filter-application logic. Generic because the query engine is an
/// external collaborator.
#[derive(Debug, Clone)]
pub struct ApplyTableFilters<Q, B> {
    query: Q,
    builder: B,
}

impl<Q, B> ApplyTableFilters<Q, B> {
    pub fn new(query: Q, builder: B) -> Self {
        Self { query, builder }
    }

    /// The query object.
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// The table builder.
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Consume the command, yielding both halves.
    pub fn into_parts(self) -> (Q, B) {
        (self.query, self.builder)
    }
}
