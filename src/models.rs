use crate::error::{PipelineError, Result};
use crate::graph;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a node, as sent by the pipeline editor.
///
/// Integers and strings are distinct: `1` and `"1"` name different nodes.
/// `UInt` only holds integers above `i64::MAX`, so every integer has exactly
/// one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    UInt(u64),
    Str(String),
}

struct NodeIdVisitor;

impl Visitor<'_> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<NodeId, E> {
        Ok(i64::try_from(n).map_or(NodeId::UInt(n), NodeId::Int))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Str(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Str(s))
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{n}"),
            NodeId::UInt(n) => write!(f, "{n}"),
            NodeId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

/// A node in a submitted pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Editor attributes (type, position, data...), carried but never inspected
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }
}

/// A directed edge `source -> target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes: Map::new(),
        }
    }
}

/// One submitted graph snapshot, built per request and dropped afterwards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl PipelineGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a graph description, rejecting records without their identifier fields
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| PipelineError::InputValidation(e.to_string()))
    }
}

/// Verdict returned by `POST /pipelines/parse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl PipelineReport {
    pub fn from_graph(graph: &PipelineGraph) -> Self {
        Self {
            num_nodes: graph.nodes.len(),
            num_edges: graph.edges.len(),
            is_dag: graph::is_dag(&graph.nodes, &graph.edges),
        }
    }
}

/// Liveness probe body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
