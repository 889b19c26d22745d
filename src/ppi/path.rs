use std::collections::VecDeque;

use tracing::debug;

use super::error::{NetworkError, NetworkResult};
use super::graph::{CENTER, EgoNetwork};

fn breadth_first(
    network: &EgoNetwork,
    source: usize,
    dest: usize,
    pred: &mut [Option<usize>],
    dist: &mut [usize],
) -> bool {
    let mut visited = vec![false; pred.len()];
    let mut queue = VecDeque::from([source]);
    visited[source] = true;
    dist[source] = 0;

    if source == dest {
        return true;
    }

    while let Some(current) = queue.pop_front() {
        for &next in network.neighbors(current) {
            if visited[next] {
                continue;
            }

            visited[next] = true;
            dist[next] = dist[current] + 1;
            pred[next] = Some(current);
            queue.push_back(next);

            if next == dest {
                return true;
            }
        }
    }

    false
}

/// Unweighted shortest route from `source` to `dest`, returned as edge
/// indices. The route always starts at the center: index 0 is appended as
/// the far end of the reconstructed vertex chain, and pairs that have no
/// edge (such as `0 -> 0` when the search starts at the center) are skipped.
pub fn shortest_path(network: &EgoNetwork, source: usize, dest: usize) -> NetworkResult<Vec<usize>> {
    let size = network.vertices().len();
    for index in [source, dest] {
        if index >= size {
            return Err(NetworkError::InvalidSelection {
                index,
                reason: "index outside the network",
            });
        }
    }

    let mut pred = vec![None; size];
    let mut dist = vec![usize::MAX; size];
    if !breadth_first(network, source, dest, &mut pred, &mut dist) {
        return Err(NetworkError::NotConnected {
            from: source,
            to: dest,
        });
    }
    debug!(source, dest, hops = dist[dest], "shortest path found");

    let mut route = vec![dest];
    let mut cursor = dest;
    while let Some(prev) = pred[cursor] {
        route.push(prev);
        cursor = prev;
    }
    route.push(CENTER);
    route.reverse();

    let edges = route
        .windows(2)
        .filter_map(|pair| network.edge_between(pair[0], pair[1]))
        .collect();
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppi::graph::tests::{chain_matrix, data_from_matrix, test_network};

    fn network_with(links: &[(usize, usize)]) -> EgoNetwork {
        let mut network = test_network();
        network.populate(data_from_matrix(chain_matrix(links)));
        network
    }

    fn endpoints(network: &EgoNetwork, edges: &[usize]) -> Vec<(usize, usize)> {
        edges
            .iter()
            .map(|&index| {
                let edge = network.edges()[index];
                (edge.a, edge.b)
            })
            .collect()
    }

    #[test]
    fn chain_from_center_follows_every_hop() {
        let network = network_with(&[(0, 1), (1, 2), (2, 3)]);
        let edges = shortest_path(&network, 0, 3).unwrap();
        assert_eq!(endpoints(&network, &edges), [(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn disconnected_components_are_not_connected() {
        let network = network_with(&[(0, 1), (1, 2), (4, 5)]);
        let error = shortest_path(&network, 2, 5).unwrap_err();
        assert!(matches!(error, NetworkError::NotConnected { from: 2, to: 5 }));
    }

    #[test]
    fn route_is_prefixed_with_the_center_edge() {
        let network = network_with(&[(0, 1), (0, 2), (0, 3), (2, 3), (3, 4)]);
        let edges = shortest_path(&network, 2, 4).unwrap();
        assert_eq!(endpoints(&network, &edges), [(0, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn center_prefix_is_dropped_when_source_is_not_adjacent_to_center() {
        let network = network_with(&[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let edges = shortest_path(&network, 3, 4).unwrap();
        assert_eq!(endpoints(&network, &edges), [(3, 4)]);
    }

    #[test]
    fn shortest_route_wins_over_longer_detour() {
        let network = network_with(&[(0, 1), (0, 5), (1, 2), (2, 3), (3, 4), (1, 4)]);
        let edges = shortest_path(&network, 1, 3).unwrap();
        assert_eq!(endpoints(&network, &edges), [(0, 1), (1, 2), (2, 3)]);

        let edges = shortest_path(&network, 1, 4).unwrap();
        assert_eq!(endpoints(&network, &edges), [(0, 1), (1, 4)]);
    }

    #[test]
    fn first_discovered_predecessor_breaks_ties() {
        let network = network_with(&[(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)]);
        let edges = shortest_path(&network, 1, 4).unwrap();
        assert_eq!(endpoints(&network, &edges), [(0, 1), (1, 2), (2, 4)]);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let network = network_with(&[(0, 1)]);
        let error = shortest_path(&network, 1, 42).unwrap_err();
        assert!(matches!(error, NetworkError::InvalidSelection { index: 42, .. }));
    }
}
