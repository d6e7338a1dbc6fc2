use crate::connect::engine::EdgeConnections;
use crate::error::Result;
use crate::host::GraphHost;
use crate::types::{EdgeDescriptor, EdgeId, EdgeSpec, Element, Endpoint, EndpointRef};
use serde::{Deserialize, Serialize};

/// Result of one insertion attempt.
#[derive(Debug, Clone, PartialEq)]
enum Insertion {
    Added(EdgeId),
    Unresolved(Endpoint),
}

/// Outcome of [`EdgeConnections::add_edges`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchOutcome {
    /// Inserted edge ids, in insertion order.
    pub added: Vec<EdgeId>,

    /// Descriptors that were still unresolvable when the batch stopped,
    /// as originally supplied. None of them were inserted.
    pub unresolved: Vec<EdgeDescriptor>,

    /// Sweeps made over the batch.
    pub passes: usize,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl<G: GraphHost> EdgeConnections<G> {
    /// Insert one edge whose endpoints may name nodes or edges.
    ///
    /// Returns the new edge id, or `None` if an endpoint does not exist;
    /// the edge is then dropped with a warning and nothing is inserted.
    /// Errors are reserved for host failures and aux-node inconsistencies.
    pub fn add_edge(&mut self, descriptor: EdgeDescriptor) -> Result<Option<EdgeId>> {
        let mut working = descriptor.clone();
        match self.try_add_edge(&mut working)? {
            Insertion::Added(id) => Ok(Some(id)),
            Insertion::Unresolved(end) => {
                log::warn!(
                    "Edge {} can't be added to graph as its {} {} does not exist",
                    descriptor.label(),
                    end,
                    descriptor.endpoint(end)
                );
                Ok(None)
            }
        }
    }

    /// Insert a batch of edges that may reference each other in any order.
    ///
    /// Sweeps the not-yet-inserted descriptors until all are in, a sweep
    /// inserts nothing, or `max_passes` sweeps have run. What is left is
    /// reported in the outcome and never inserted; edges inserted earlier
    /// in the batch stay.
    pub fn add_edges(&mut self, descriptors: Vec<EdgeDescriptor>) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();
        let mut remaining = descriptors;

        while !remaining.is_empty() && outcome.passes < self.config.max_passes {
            outcome.passes += 1;
            let before = outcome.added.len();
            let mut deferred = Vec::with_capacity(remaining.len());

            for descriptor in remaining {
                let mut working = descriptor.clone();
                match self.try_add_edge(&mut working)? {
                    Insertion::Added(id) => outcome.added.push(id),
                    Insertion::Unresolved(_) => deferred.push(descriptor),
                }
            }
            remaining = deferred;

            if outcome.added.len() == before {
                // nothing changed in the graph, later sweeps can't progress
                break;
            }
        }

        outcome.unresolved = remaining;
        if outcome.is_complete() {
            log::info!("This graph needed {} add-edges passes", outcome.passes);
        } else {
            log::warn!(
                "{} edge(s) not added after {} add-edges passes (limit is {}): {}",
                outcome.unresolved.len(),
                outcome.passes,
                self.config.max_passes,
                outcome
                    .unresolved
                    .iter()
                    .map(EdgeDescriptor::label)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(outcome)
    }

    /// Resolve both endpoints and insert. The descriptor is rewritten in
    /// place as endpoints resolve. An edge whose aux node cannot be created
    /// is removed again before the error is returned.
    fn try_add_edge(&mut self, descriptor: &mut EdgeDescriptor) -> Result<Insertion> {
        for end in [Endpoint::Source, Endpoint::Target] {
            if !self.resolve(descriptor, end)? {
                return Ok(Insertion::Unresolved(end));
            }
        }

        let id = self.graph.add_edge(EdgeSpec {
            id: descriptor.id.clone(),
            source: descriptor.source.canonical(),
            target: descriptor.target.canonical(),
            classes: descriptor.classes.clone(),
            data: descriptor.data.clone(),
        })?;
        if let Err(e) = self.create_aux_node(&id) {
            self.roll_back_edge(&id);
            return Err(e);
        }
        self.dispatch()?;
        Ok(Insertion::Added(id))
    }

    /// Take out an edge whose aux node could not be set up. Its removal
    /// event also drops an aux node that did get registered.
    fn roll_back_edge(&mut self, id: &str) {
        if let Err(e) = self.graph.remove(id).and_then(|_| self.dispatch()) {
            log::warn!("Rolling back edge {} left the graph unsettled: {}", id, e);
        }
    }

    /// Resolve one endpoint. A node id is kept (in canonical form); an edge
    /// id is replaced by the id of that edge's aux node. Returns false when
    /// nothing in the graph has that id.
    pub(crate) fn resolve(&self, descriptor: &mut EdgeDescriptor, end: Endpoint) -> Result<bool> {
        let key = descriptor.endpoint(end).canonical();
        let resolved = match self.graph.element(&key) {
            None => return Ok(false),
            Some(Element::Node(_)) => key,
            Some(Element::Edge(edge)) => self.require_aux_node_id(&edge.id)?,
        };
        *descriptor.endpoint_mut(end) = EndpointRef::Id(resolved);
        Ok(true)
    }
}
