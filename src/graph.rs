use crate::models::{Edge, Node, NodeId};
use std::collections::{HashMap, VecDeque};

/// Outcome of a Kahn walk over a submitted graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KahnWalk {
    /// Identifiers in the order they left the queue
    pub order: Vec<NodeId>,
    pub visited: usize,
}

/// Run Kahn's algorithm seeded from the declared node set.
///
/// Edges are never filtered against `nodes`: an undeclared target still gets
/// an indegree and is enqueued once that indegree drops to zero. Parallel
/// edges each count, so a target needs one decrement per copy. Indegrees are
/// signed and never clamped, which matters only when `nodes` repeats an
/// identifier.
pub fn visit(nodes: &[Node], edges: &[Edge]) -> KahnWalk {
    let mut adjacency: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    let mut in_degree: HashMap<&NodeId, i64> = HashMap::new();

    for edge in edges {
        adjacency.entry(&edge.source).or_default().push(&edge.target);
        *in_degree.entry(&edge.target).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&NodeId> = nodes
        .iter()
        .map(|node| &node.id)
        .filter(|id| in_degree.get(id).copied().unwrap_or(0) == 0)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(current) = queue.pop_front() {
        order.push(current.clone());

        if let Some(targets) = adjacency.get(current) {
            for &target in targets {
                let degree = in_degree.entry(target).or_insert(0);
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(target);
                }
            }
        }
    }

    KahnWalk {
        visited: order.len(),
        order,
    }
}

/// True when the visited count equals the declared node count.
///
/// Visited dangling targets count too, so they can stand in for declared
/// nodes the walk never reached.
pub fn is_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    let walk = visit(nodes, edges);
    let acyclic = walk.visited == nodes.len();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        visited = walk.visited,
        is_dag = acyclic,
        "checked pipeline graph"
    );

    acyclic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id)).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    fn ids(order: &[NodeId]) -> Vec<String> {
        order.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_graph_is_dag() {
        let walk = visit(&[], &[]);
        assert_eq!(walk.visited, 0);
        assert!(is_dag(&[], &[]));
    }

    #[test]
    fn test_linear_chain() {
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "b"), ("b", "c")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "b", "c"]);
        assert_eq!(walk.visited, n.len());
        assert!(is_dag(&n, &e));
    }

    #[test]
    fn test_diamond() {
        // a -> b, a -> c, b -> d, c -> d
        let n = nodes(&["a", "b", "c", "d"]);
        let e = edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "b", "c", "d"]);
        assert!(is_dag(&n, &e));
    }

    #[test]
    fn test_seed_follows_node_order() {
        let n = nodes(&["z", "y", "x"]);
        let walk = visit(&n, &[]);
        assert_eq!(ids(&walk.order), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_three_cycle() {
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "b"), ("b", "c"), ("c", "a")]);

        assert_eq!(visit(&n, &e).visited, 0);
        assert!(!is_dag(&n, &e));
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // root -> a -> b -> a
        let n = nodes(&["root", "a", "b"]);
        let e = edges(&[("root", "a"), ("a", "b"), ("b", "a")]);

        assert_eq!(visit(&n, &e).visited, 1);
        assert!(!is_dag(&n, &e));
    }

    #[test]
    fn test_self_loop() {
        let n = nodes(&["a"]);
        let e = edges(&[("a", "a")]);

        assert_eq!(visit(&n, &e).visited, 0);
        assert!(!is_dag(&n, &e));
    }

    #[test]
    fn test_duplicate_edges() {
        let n = nodes(&["a", "b"]);
        let e = edges(&[("a", "b"), ("a", "b")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "b"]);
        assert!(is_dag(&n, &e));
    }

    #[test]
    fn test_dangling_target_is_counted() {
        // z is never declared but still reaches indegree zero and gets visited
        let n = nodes(&["a"]);
        let e = edges(&[("a", "z")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "z"]);
        assert_eq!(walk.visited, 2);
        assert!(!is_dag(&n, &e));
    }

    #[test]
    fn test_dangling_source_blocks_target() {
        // ghost never enters the queue, so b keeps indegree 1
        let n = nodes(&["a", "b"]);
        let e = edges(&[("ghost", "b")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a"]);
        assert!(!is_dag(&n, &e));
    }

    #[test]
    fn test_dangling_target_offsets_unvisited_node() {
        // b waits on undeclared c forever, but visiting z keeps the count equal
        let n = nodes(&["a", "b"]);
        let e = edges(&[("a", "z"), ("c", "b")]);

        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "z"]);
        assert!(!walk.order.contains(&NodeId::from("b")));
        assert!(is_dag(&n, &e));
    }

    #[test]
    fn test_isolated_nodes() {
        let n = nodes(&["a", "b", "c"]);
        assert_eq!(visit(&n, &[]).visited, 3);
        assert!(is_dag(&n, &[]));
    }

    #[test]
    fn test_duplicate_node_ids_seed_twice() {
        let n = nodes(&["a", "a", "b"]);
        let e = edges(&[("a", "b")]);

        // both copies of a are seeded; b drops to 0 then -1 and is enqueued once
        let walk = visit(&n, &e);
        assert_eq!(ids(&walk.order), vec!["a", "a", "b"]);
        assert!(is_dag(&n, &e));
    }

    #[test]
    fn test_integer_identifiers() {
        let n = vec![Node::new(1), Node::new(2)];
        let e = vec![Edge::new(1, 2)];
        assert!(is_dag(&n, &e));

        // "1" is not 1, so 2 waits on an undeclared string node
        let e = vec![Edge::new("1", 2)];
        assert!(!is_dag(&n, &e));
    }
}
