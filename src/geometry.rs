//! Rectangle geometry: six-vertex triangle lists and buffer uploads.

use glow::HasContext;

use crate::types::Vertex;

/// Texture coordinates spanning the unit square, one per rectangle vertex.
///
/// Written once into the texcoord buffer and never rewritten, whatever the
/// rectangle's size.
pub const TEX_COORDS: [Vertex; 6] = [
    Vertex {
        position: [0.0, 0.0],
    },
    Vertex {
        position: [1.0, 0.0],
    },
    Vertex {
        position: [0.0, 1.0],
    },
    Vertex {
        position: [0.0, 1.0],
    },
    Vertex {
        position: [1.0, 0.0],
    },
    Vertex {
        position: [1.0, 1.0],
    },
];

/// The six pixel-space vertices of the rectangle `[x, x+width] x [y, y+height]`.
///
/// Two triangles: top-left, top-right, bottom-left, then bottom-left,
/// top-right, bottom-right (origin top-left). Together they tile the
/// rectangle exactly, with no gap or overlap.
#[must_use]
pub fn rectangle_vertices(x: f32, y: f32, width: f32, height: f32) -> [Vertex; 6] {
    let x1 = x;
    let x2 = x + width;
    let y1 = y;
    let y2 = y + height;
    [
        Vertex::new(x1, y1),
        Vertex::new(x2, y1),
        Vertex::new(x1, y2),
        Vertex::new(x1, y2),
        Vertex::new(x2, y1),
        Vertex::new(x2, y2),
    ]
}

/// Overwrite `buffer` with the six vertices of the given rectangle.
///
/// # Safety
///
/// Requires a valid, current OpenGL context; `buffer` must belong to it.
pub unsafe fn set_rectangle(
    gl: &glow::Context,
    buffer: glow::Buffer,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    let vertices = rectangle_vertices(x, y, width, height);
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&vertices),
            glow::STATIC_DRAW,
        );
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)] // exact values: small integers round-trip through f32
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> ([f32; 2], [f32; 2]) {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for v in vertices {
            for axis in 0..2 {
                min[axis] = min[axis].min(v.position[axis]);
                max[axis] = max[axis].max(v.position[axis]);
            }
        }
        (min, max)
    }

    /// Signed double area of a triangle; zero means degenerate.
    fn double_area(a: Vertex, b: Vertex, c: Vertex) -> f32 {
        (b.position[0] - a.position[0]) * (c.position[1] - a.position[1])
            - (c.position[0] - a.position[0]) * (b.position[1] - a.position[1])
    }

    #[test]
    fn extents_match_the_requested_rectangle() {
        let v = rectangle_vertices(10.0, 20.0, 4.0, 3.0);
        assert_eq!(v.len(), 6);
        let (min, max) = bounds(&v);
        assert_eq!(min, [10.0, 20.0]);
        assert_eq!(max, [14.0, 23.0]);
    }

    #[test]
    fn triangles_tile_the_rectangle_exactly() {
        let v = rectangle_vertices(0.0, 0.0, 4.0, 3.0);
        let a1 = double_area(v[0], v[1], v[2]).abs();
        let a2 = double_area(v[3], v[4], v[5]).abs();
        // Each triangle covers half the rectangle's area.
        assert_eq!(a1, 12.0);
        assert_eq!(a2, 12.0);
        // The shared diagonal edge (top-right, bottom-left) appears in both.
        assert_eq!(v[1], v[4]);
        assert_eq!(v[2], v[3]);
    }

    #[test]
    fn zero_sized_rectangle_is_degenerate() {
        let v = rectangle_vertices(5.0, 5.0, 0.0, 0.0);
        assert_eq!(double_area(v[0], v[1], v[2]), 0.0);
        assert_eq!(double_area(v[3], v[4], v[5]), 0.0);
    }

    #[test]
    fn tex_coords_span_the_unit_square() {
        let (min, max) = bounds(&TEX_COORDS);
        assert_eq!(min, [0.0, 0.0]);
        assert_eq!(max, [1.0, 1.0]);
        // Same winding as the position rectangle so corners correspond.
        let expected = rectangle_vertices(0.0, 0.0, 1.0, 1.0);
        assert_eq!(TEX_COORDS, expected);
    }
}
