use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Type alias for node identifiers
pub type NodeId = String;

/// Type alias for edge identifiers
pub type EdgeId = String;

/// Type alias for CSS-style color strings ("#ff0000", "red", "rgb(...)")
pub type Color = String;

/// Class tag carried by every aux node.
pub const AUX_NODE_CLASS: &str = "aux-node";

/// Color a host gives nodes and edges that were never styled.
pub const DEFAULT_ELEMENT_COLOR: &str = "#999999";

/// Color of an aux node whose edge is no longer reachable.
pub const AUX_NODE_FALLBACK_COLOR: &str = "white";

/// A point in model space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite. Hosts may report NaN midpoints for
    /// edges they cannot draw; such points must never be assigned.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of two points.
    pub fn mean(a: Position, b: Position) -> Self {
        Self {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Raw endpoint reference as supplied by a caller. May name a node or an
/// edge; numbers and strings are both accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EndpointRef {
    Id(String),
    Number(serde_json::Number),
}

impl EndpointRef {
    /// Canonical string key used for element lookup. `7` and `"7"` map to
    /// the same key.
    pub fn canonical(&self) -> String {
        match self {
            EndpointRef::Id(id) => id.clone(),
            EndpointRef::Number(n) => canonical_number(n),
        }
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Shortest decimal form: whole floats print without a fraction, so `7.0`
/// and `1e2` give `"7"` and `"100"`.
fn canonical_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

/// Deserialize an optional element id given as a string or a number.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EndpointRef>::deserialize(deserializer)?.map(|id| id.canonical()))
}

/// Deserialize an element id given as a string or a number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(EndpointRef::deserialize(deserializer)?.canonical())
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for EndpointRef {
    fn from(id: &str) -> Self {
        EndpointRef::Id(id.to_string())
    }
}

impl From<String> for EndpointRef {
    fn from(id: String) -> Self {
        EndpointRef::Id(id)
    }
}

impl From<u64> for EndpointRef {
    fn from(n: u64) -> Self {
        EndpointRef::Number(n.into())
    }
}

impl From<i64> for EndpointRef {
    fn from(n: i64) -> Self {
        EndpointRef::Number(n.into())
    }
}

/// Which end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// A candidate edge. Either endpoint may name a node or another edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDescriptor {
    /// Edge identifier. Generated on insertion when absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<EdgeId>,

    pub source: EndpointRef,

    pub target: EndpointRef,

    /// Arbitrary attribute payload, copied onto the inserted edge.
    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default)]
    pub classes: Vec<String>,
}

impl EdgeDescriptor {
    pub fn new(source: impl Into<EndpointRef>, target: impl Into<EndpointRef>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            data: Map::new(),
            classes: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn endpoint(&self, end: Endpoint) -> &EndpointRef {
        match end {
            Endpoint::Source => &self.source,
            Endpoint::Target => &self.target,
        }
    }

    pub fn endpoint_mut(&mut self, end: Endpoint) -> &mut EndpointRef {
        match end {
            Endpoint::Source => &mut self.source,
            Endpoint::Target => &mut self.target,
        }
    }

    /// Human-readable label for log lines.
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{} ({} -> {})", id, self.source, self.target),
            None => format!("<unnamed> ({} -> {})", self.source, self.target),
        }
    }
}

/// Request to add a node to a host graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeSpec {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<NodeId>,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(default)]
    pub data: Map<String, Value>,
}

impl NodeSpec {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Request to add an edge whose endpoints are already node ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EdgeId>,

    pub source: NodeId,

    pub target: NodeId,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(default)]
    pub data: Map<String, Value>,
}

impl EdgeSpec {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            classes: Vec::new(),
            data: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A node stored in a host graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,

    pub position: Position,

    /// Locked nodes reject user repositioning.
    pub locked: bool,

    pub classes: Vec<String>,

    pub data: Map<String, Value>,

    /// Background color as stored by the host. Aux nodes do not use it;
    /// their color is derived from the edge they represent.
    pub background_color: Color,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// An edge stored in a host graph. Endpoints are always node ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: EdgeId,

    pub source: NodeId,

    pub target: NodeId,

    pub classes: Vec<String>,

    pub data: Map<String, Value>,

    pub line_color: Color,
}

impl Edge {
    /// Endpoint pair with a stable order, shared by all parallel edges.
    pub fn endpoint_pair(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }
}

/// Element kind discriminant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Edge => write!(f, "edge"),
        }
    }
}

/// Borrowed view of a graph element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Element::Node(n) => &n.id,
            Element::Edge(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Node(_) => ElementKind::Node,
            Element::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Element::Node(n) => Some(n),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&'a Edge> {
        match self {
            Element::Edge(e) => Some(e),
            Element::Node(_) => None,
        }
    }
}

/// Owned element, handed out when an element leaves the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum OwnedElement {
    Node(Node),
    Edge(Edge),
}

impl OwnedElement {
    pub fn id(&self) -> &str {
        match self {
            OwnedElement::Node(n) => &n.id,
            OwnedElement::Edge(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            OwnedElement::Node(_) => ElementKind::Node,
            OwnedElement::Edge(_) => ElementKind::Edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_canonical_forms() {
        let from_str: EndpointRef = serde_json::from_str("\"7\"").unwrap();
        let from_num: EndpointRef = serde_json::from_str("7").unwrap();
        assert_eq!(from_str.canonical(), "7");
        assert_eq!(from_num.canonical(), "7");
        assert_eq!(EndpointRef::from(7u64).canonical(), "7");
        assert_eq!(EndpointRef::from(-3i64).canonical(), "-3");
    }

    #[test]
    fn test_whole_floats_canonicalize_as_integers() {
        let seven: EndpointRef = serde_json::from_str("7.0").unwrap();
        let hundred: EndpointRef = serde_json::from_str("1e2").unwrap();
        let half: EndpointRef = serde_json::from_str("2.5").unwrap();
        let negative: EndpointRef = serde_json::from_str("-4.0").unwrap();
        assert_eq!(seven.canonical(), "7");
        assert_eq!(hundred.canonical(), "100");
        assert_eq!(half.canonical(), "2.5");
        assert_eq!(negative.canonical(), "-4");
    }

    #[test]
    fn test_numeric_ids_in_specs() {
        let node: NodeSpec = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(node.id.as_deref(), Some("7"));

        let node: NodeSpec = serde_json::from_str(r#"{"id": "n"}"#).unwrap();
        assert_eq!(node.id.as_deref(), Some("n"));

        let node: NodeSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(node.id, None);

        let desc: EdgeDescriptor =
            serde_json::from_str(r#"{"id": 3.0, "source": 1, "target": 2}"#).unwrap();
        assert_eq!(desc.id.as_deref(), Some("3"));
    }

    #[test]
    fn test_descriptor_deserialize_minimal() {
        let desc: EdgeDescriptor =
            serde_json::from_str(r#"{"source": "a", "target": 12}"#).unwrap();
        assert_eq!(desc.id, None);
        assert_eq!(desc.source.canonical(), "a");
        assert_eq!(desc.target.canonical(), "12");
        assert!(desc.data.is_empty());
        assert!(desc.classes.is_empty());
    }

    #[test]
    fn test_position_validity() {
        assert!(Position::new(1.0, -2.0).is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
        assert!(!Position::new(0.0, f64::INFINITY).is_valid());
        assert_eq!(
            Position::mean(Position::new(0.0, 0.0), Position::new(10.0, 4.0)),
            Position::new(5.0, 2.0)
        );
    }

    #[test]
    fn test_endpoint_pair_is_order_independent() {
        let edge = |s: &str, t: &str| Edge {
            id: format!("{s}{t}"),
            source: s.into(),
            target: t.into(),
            classes: vec![],
            data: Map::new(),
            line_color: DEFAULT_ELEMENT_COLOR.into(),
        };
        assert_eq!(edge("a", "b").endpoint_pair(), edge("b", "a").endpoint_pair());
        assert!(edge("a", "a").is_loop());
    }
}
