//! Parsing of the `"ORIGIN -> DEST1,DEST2,..."` edge list format.
//!
//! The string grammar is a convenience adapter at the API boundary; the
//! graph types themselves operate on structured label pairs.

use crate::error::Error;

/// A parsed edge list: one origin and its destination labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    pub origin: String,
    pub destinations: Vec<String>,
}

/// Parses a single edge list specification.
///
/// All whitespace is stripped before parsing. The token on the left of the
/// `->` is the origin, the right side is a comma-separated list of
/// destinations. Empty destination tokens are skipped, so `"a ->"` parses
/// to an origin with no destinations. A specification with zero or more
/// than one `->` fails with [`Error::MalformedEdgeList`].
pub fn parse_edge_list(spec: &str) -> Result<EdgeList, Error> {
    let stripped: String = spec.chars().filter(|c| !c.is_whitespace()).collect();

    let mut parts = stripped.split("->");
    let (origin, destinations) = match (parts.next(), parts.next(), parts.next()) {
        (Some(origin), Some(destinations), None) => (origin, destinations),
        _ => return Err(Error::MalformedEdgeList(spec.to_owned())),
    };

    let destinations = destinations
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();

    Ok(EdgeList {
        origin: origin.to_owned(),
        destinations,
    })
}
