use bytemuck::{Pod, Zeroable};

use crate::Vec2;

/// The primitive types understood by the fill shader.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrimType {
    /// Filled circle.
    Circle = 0,

    /// Stroked arc.
    Arc,

    /// Rounded corner rectangle.
    Rect,

    /// Stroked rounded rectangle.
    RectStroke,

    /// Single-segment quadratic bezier curve.
    Bezier,

    /// Line segment.
    Segment,

    /// Multi-segment bezier curve.
    Curve,

    /// Connection wire. See https://www.shadertoy.com/view/NdsXRl
    Wire,

    /// Path fill: one scan band of a quadratic path.
    PathFill,
}

/// Primitive rendered by the GPU.
///
/// Plain old data; a backend can upload a `&[Prim]` directly with
/// `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Prim {
    /// Type of primitive, as a [`PrimType`] value.
    pub kind: u32,

    /// Stroke width.
    pub width: f32,

    /// Radius of circles. Corner radius for rounded rectangles.
    pub radius: f32,

    /// Control vertices.
    pub cvs: [Vec2; 3],

    /// Start of the control vertices, if they're in a separate buffer.
    pub start: u32,

    /// Number of segments referenced in the separate buffer (Curve and
    /// PathFill).
    pub count: u32,

    /// Index of paint applied to drawing region.
    pub paint: u32,

    /// Index of transform applied to drawing region. Set by
    /// [`Context::render`].
    ///
    /// [`Context::render`]: crate::Context::render
    pub xform: u32,

    /// Min and max coordinates of the quad we're rendering.
    pub quad_bounds: [Vec2; 2],

    /// Min and max coordinates in texture space.
    pub tex_bounds: [Vec2; 2],
}

impl Prim {
    pub fn new(kind: PrimType) -> Prim {
        Prim {
            kind: kind as u32,
            ..Prim::zeroed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prim_is_tightly_packed() {
        // 7 scalar fields + 3 cvs + 2 bounds pairs, all 4-byte, no padding.
        assert_eq!(std::mem::size_of::<Prim>(), 7 * 4 + 3 * 8 + 2 * 16);
    }

    #[test]
    fn prims_cast_to_bytes() {
        let prims = [Prim::new(PrimType::Circle), Prim::new(PrimType::PathFill)];
        let bytes: &[u8] = bytemuck::cast_slice(&prims);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<Prim>());
        assert_eq!(bytes[0], PrimType::Circle as u8);
    }
}
