use eframe::egui::{Vec2, vec2};
use tracing::trace;

use crate::ppi::{Edge, Vertex};

pub const DEFAULT_ITERATIONS: usize = 50;

const WIDTH: f32 = 1.0;
const LENGTH: f32 = 1.0;

pub const DISK_CENTER: Vec2 = Vec2::new(WIDTH / 2.0, LENGTH / 2.0);
pub const DISK_RADIUS: f32 = WIDTH / 2.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    pub temperatures: Vec<f32>,
    pub max_displacements: Vec<f32>,
}

fn attractive_force(x: f32, k: f32) -> f32 {
    x * x / k
}

fn repulsive_force(x: f32, k: f32) -> f32 {
    k * k / x
}

/// Keeps a point inside the unit square and then inside the disk inscribed
/// in it. Both steps are projections onto convex sets, so a point already
/// inside the disk never moves further than its proposed step.
pub fn confine(position: Vec2) -> Vec2 {
    let clamped = vec2(position.x.clamp(0.0, WIDTH), position.y.clamp(0.0, LENGTH));
    let offset = clamped - DISK_CENTER;
    let distance = offset.length();
    if distance > DISK_RADIUS {
        DISK_CENTER + offset * (DISK_RADIUS / distance)
    } else {
        clamped
    }
}

/// Fruchterman-Reingold spring embedding in the unit square with a linear
/// cooling schedule. Deterministic for identical positions and edges.
pub fn spring_layout(vertices: &mut [Vertex], edges: &[Edge], iterations: usize) -> LayoutReport {
    let n = vertices.len();
    let mut report = LayoutReport::default();

    for vertex in vertices.iter_mut() {
        vertex.position = confine(vertex.position);
    }

    if n == 0 {
        return report;
    }

    let area = WIDTH * LENGTH;
    let k = (area / n as f32).sqrt();
    let mut temperature = WIDTH / n as f32;
    let cooling = temperature / (iterations as f32 + 1.0);

    for _ in 0..iterations {
        for i in 0..n {
            let mut velocity = Vec2::ZERO;
            for j in 0..n {
                if i == j {
                    continue;
                }

                let delta = vertices[i].position - vertices[j].position;
                let distance = delta.length();
                if distance != 0.0 {
                    velocity += delta * (repulsive_force(distance, k) / distance);
                }
            }
            vertices[i].velocity = velocity;
        }

        for edge in edges {
            let (from, to) = (edge.a, edge.b);
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = vertices[from].position - vertices[to].position;
            let distance = delta.length();
            if distance != 0.0 {
                let pull = delta * (attractive_force(distance, k) / distance);
                vertices[from].velocity -= pull;
                vertices[to].velocity += pull;
            }
        }

        let mut max_displacement = 0.0_f32;
        for vertex in vertices.iter_mut() {
            let displacement = vertex.velocity.length();
            if displacement == 0.0 {
                continue;
            }

            let step = vertex.velocity * (displacement.min(temperature) / displacement);
            let next = confine(vertex.position + step);
            max_displacement = max_displacement.max((next - vertex.position).length());
            vertex.position = next;
        }

        report.temperatures.push(temperature);
        report.max_displacements.push(max_displacement);
        trace!(temperature, max_displacement, "layout iteration");

        temperature -= cooling;
    }

    report
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::ppi::graph::tests::{chain_matrix, data_from_matrix, test_network};
    use crate::ppi::{EgoNetwork, NETWORK_SIZE};

    fn populated(seed: u64) -> EgoNetwork {
        let mut network = EgoNetwork::new(&mut StdRng::seed_from_u64(seed));
        let matrix = chain_matrix(&[
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (0, 6),
            (0, 7),
            (0, 8),
            (0, 9),
            (1, 2),
            (4, 7),
        ]);
        network.populate(data_from_matrix(matrix));
        network
    }

    fn assert_inside_disk(network: &EgoNetwork) {
        for vertex in network.vertices() {
            let distance = (vertex.position - DISK_CENTER).length();
            assert!(distance <= DISK_RADIUS + 1e-5, "{:?} escaped", vertex.position);
            assert!((-1e-5..=1.0 + 1e-5).contains(&vertex.position.x));
            assert!((-1e-5..=1.0 + 1e-5).contains(&vertex.position.y));
        }
    }

    #[test]
    fn positions_stay_inside_the_disk_for_any_iteration_count() {
        for iterations in [0, 1, 2, DEFAULT_ITERATIONS, 200] {
            let mut network = populated(11);
            network.layout(iterations);
            assert_inside_disk(&network);
        }
    }

    #[test]
    fn zero_iterations_still_confines_outside_positions() {
        let mut network = test_network();
        network.set_positions(&[vec2(1.0, 1.0), vec2(-3.0, 0.5), vec2(0.5, 0.5)]);
        let report = network.layout(0);

        assert!(report.temperatures.is_empty());
        assert_inside_disk(&network);
        assert_eq!(network.vertices()[2].position, vec2(0.5, 0.5));
        assert!((network.vertices()[1].position - vec2(0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn cooling_is_strictly_decreasing_and_caps_every_step() {
        let mut network = populated(3);
        let report = network.layout(DEFAULT_ITERATIONS);

        assert_eq!(report.temperatures.len(), DEFAULT_ITERATIONS);
        let initial = 1.0 / NETWORK_SIZE as f32;
        assert!((report.temperatures[0] - initial).abs() < 1e-6);
        for pair in report.temperatures.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert!(*report.temperatures.last().unwrap() > 0.0);

        for (temperature, displacement) in report
            .temperatures
            .iter()
            .zip(&report.max_displacements)
        {
            assert!(*displacement <= temperature + 1e-5);
        }
    }

    #[test]
    fn layout_is_deterministic_for_identical_input() {
        let mut first = populated(42);
        let mut second = populated(42);
        let first_report = first.layout(DEFAULT_ITERATIONS);
        let second_report = second.layout(DEFAULT_ITERATIONS);

        assert_eq!(first_report, second_report);
        for (a, b) in first.vertices().iter().zip(second.vertices()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn coincident_vertices_do_not_produce_nan() {
        let mut network = populated(5);
        network.set_positions(&[vec2(0.5, 0.5); NETWORK_SIZE]);
        network.layout(DEFAULT_ITERATIONS);

        for vertex in network.vertices() {
            assert!(vertex.position.x.is_finite() && vertex.position.y.is_finite());
            assert_eq!(vertex.position, vec2(0.5, 0.5));
        }
    }

    #[test]
    fn linked_neighbors_end_closer_than_unlinked_ones() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut closer = 0;
        let trials = 20;
        for _ in 0..trials {
            let mut network = populated(rng.random());
            network.layout(DEFAULT_ITERATIONS);
            let vertices = network.vertices();
            let linked = (vertices[1].position - vertices[2].position).length();
            let unlinked = [3, 5, 6, 8, 9]
                .iter()
                .map(|&index| (vertices[1].position - vertices[index].position).length())
                .sum::<f32>()
                / 5.0;
            if linked < unlinked {
                closer += 1;
            }
        }
        assert!(closer > trials / 2, "linked pair closer in only {closer}/{trials} runs");
    }
}
