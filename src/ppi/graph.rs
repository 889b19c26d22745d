use std::fmt;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::layout::{DISK_CENTER, DISK_RADIUS, LayoutReport, spring_layout};

use super::store::ProteinInfo;

pub const NETWORK_SIZE: usize = 10;
pub const NEIGHBOR_COUNT: usize = NETWORK_SIZE - 1;
pub const CENTER: usize = 0;

/// Raw interaction scores are integers on a 0..=1000 scale.
pub const SCORE_SCALE: f32 = 1000.0;

#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: String,
    pub name: String,
    pub size: String,
    pub annotation: String,
    pub position: Vec2,
    pub depth: f32,
    pub velocity: Vec2,
    pub neighbors: Vec<usize>,
    pub active: bool,
}

impl Vertex {
    fn new(position: Vec2, depth: f32) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            size: String::new(),
            annotation: String::new(),
            position,
            depth,
            velocity: Vec2::ZERO,
            neighbors: Vec::new(),
            active: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub score: f32,
    pub highlighted: bool,
}

impl Edge {
    pub fn joins(&self, u: usize, v: usize) -> bool {
        (self.a == u && self.b == v) || (self.a == v && self.b == u)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreMatrix([[f32; NETWORK_SIZE]; NETWORK_SIZE]);

impl ScoreMatrix {
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.0[row][column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: f32) {
        self.0[row][column] = value;
    }

    pub fn clear(&mut self) {
        self.0 = [[0.0; NETWORK_SIZE]; NETWORK_SIZE];
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().flatten().all(|value| *value == 0.0)
    }

    pub fn rows(&self) -> &[[f32; NETWORK_SIZE]; NETWORK_SIZE] {
        &self.0
    }
}

impl fmt::Display for ScoreMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for (column, value) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{value:5.3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Everything a build fetched from the store, ready to be installed into
/// the vertex pool.
#[derive(Clone, Debug)]
pub struct NetworkData {
    pub ids: Vec<String>,
    pub matrix: ScoreMatrix,
    pub metadata: Vec<ProteinInfo>,
}

impl NetworkData {
    pub fn center_id(&self) -> &str {
        self.ids.first().map(String::as_str).unwrap_or_default()
    }
}

/// The fixed pool of ten vertices plus the edges derived from the current
/// score matrix. Vertex 0 is always the center.
#[derive(Clone, Debug)]
pub struct EgoNetwork {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    matrix: ScoreMatrix,
}

impl EgoNetwork {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vertices = (0..NETWORK_SIZE)
            .map(|index| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let radius = DISK_RADIUS * rng.random::<f32>().sqrt();
                let position = DISK_CENTER + vec2(angle.cos(), angle.sin()) * radius;
                let depth = if index == CENTER {
                    0.0
                } else {
                    rng.random_range(-0.5..=0.5)
                };
                Vertex::new(position, depth)
            })
            .collect();

        Self {
            vertices,
            edges: Vec::new(),
            matrix: ScoreMatrix::default(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    pub fn center(&self) -> &Vertex {
        &self.vertices[CENTER]
    }

    pub fn is_active(&self) -> bool {
        self.vertices[CENTER].active
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.vertices
            .get(index)
            .map(|vertex| vertex.neighbors.as_slice())
            .unwrap_or_default()
    }

    pub fn edge_between(&self, u: usize, v: usize) -> Option<usize> {
        self.edges.iter().position(|edge| edge.joins(u, v))
    }

    pub fn set_positions(&mut self, positions: &[Vec2]) {
        for (vertex, position) in self.vertices.iter_mut().zip(positions) {
            vertex.position = *position;
        }
    }

    /// Replaces the ids, metadata and matrix, then derives edges and
    /// adjacency from the matrix. Positions are left where the previous
    /// layout put them.
    pub fn populate(&mut self, data: NetworkData) {
        self.clear_links();

        let NetworkData {
            ids,
            matrix,
            metadata,
        } = data;

        for ((vertex, id), info) in self.vertices.iter_mut().zip(ids).zip(metadata) {
            vertex.id = id;
            vertex.name = info.name;
            vertex.size = info.size;
            vertex.annotation = info.annotation;
            vertex.active = true;
        }

        self.matrix = matrix;
        self.derive_edges();
    }

    fn derive_edges(&mut self) {
        for i in 0..NETWORK_SIZE {
            for j in 0..i {
                let forward = self.matrix.get(i, j);
                let backward = self.matrix.get(j, i);
                if forward == 0.0 && backward == 0.0 {
                    continue;
                }

                let score = if forward != 0.0 { forward } else { backward };
                self.edges.push(Edge {
                    a: j,
                    b: i,
                    score,
                    highlighted: false,
                });
                self.vertices[i].neighbors.push(j);
                self.vertices[j].neighbors.push(i);
            }
        }
    }

    fn clear_links(&mut self) {
        self.edges.clear();
        for vertex in &mut self.vertices {
            vertex.neighbors.clear();
        }
    }

    pub fn clear(&mut self) {
        self.clear_links();
        self.matrix.clear();
        for vertex in &mut self.vertices {
            vertex.active = false;
            vertex.velocity = Vec2::ZERO;
        }
    }

    pub fn layout(&mut self, iterations: usize) -> LayoutReport {
        spring_layout(&mut self.vertices, &self.edges, iterations)
    }

    pub fn highlight(&mut self, edge_indices: &[usize]) {
        for &index in edge_indices {
            if let Some(edge) = self.edges.get_mut(index) {
                edge.highlighted = true;
            }
        }
    }

    pub fn clear_highlights(&mut self) {
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }
}
