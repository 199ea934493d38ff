// Circle mesh generation

use glam::Vec3;
use std::f32::consts::TAU;

use super::Vertex;

/// Floats per vertex in the flat layout (x, y, z)
pub const FLOATS_PER_VERTEX: usize = 3;

/// Triangle-fan vertices for a filled circle, as flat `[x, y, z]` triples
///
/// The first vertex is the centre. It is followed by `segments + 1` points
/// on the perimeter; the last one repeats the first (angle 2π) to close the
/// fan.
pub fn generate_circle_vertices(radius: f32, segments: u32) -> Vec<f32> {
    let mut vertices = Vec::with_capacity((segments as usize + 2) * FLOATS_PER_VERTEX);
    vertices.extend_from_slice(&[0.0, 0.0, 0.0]);

    for i in 0..=segments {
        // Wrap the closing vertex back to angle 0 so it matches the first exactly
        let step = if i == segments { 0 } else { i };
        let angle = TAU * step as f32 / segments as f32;
        vertices.extend_from_slice(&[radius * angle.cos(), radius * angle.sin(), 0.0]);
    }

    vertices
}

/// Indices expanding a fan of `segments` triangles into a triangle list
pub fn fan_indices(segments: u32) -> Vec<u32> {
    (1..=segments).flat_map(|i| [0, i, i + 1]).collect()
}

/// GPU-ready circle geometry
#[derive(Debug, Clone)]
pub struct CircleMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl CircleMesh {
    pub fn new(radius: f32, segments: u32) -> Self {
        let vertices = generate_circle_vertices(radius, segments)
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|p| Vertex::new(Vec3::new(p[0], p[1], p[2])))
            .collect();

        Self {
            vertices,
            indices: fan_indices(segments),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
