use bytemuck::{Pod, Zeroable};

use crate::{Mat2x2, Transform, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }
}

/// One entry of the per-frame paint table.
///
/// `xform` maps render space into paint space: for gradients, paint-space x
/// runs 0 at the gradient start to 1 at the end; for image patterns it is
/// normalized texture space. Plain old data, uploadable as bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Paint {
    /// Transform from render space into paint space.
    pub xform: Transform,

    pub inner_color: Color,
    pub outer_color: Color,

    pub glow: f32,

    /// Texture index, or -1 when the paint has no image.
    pub image: i32,
}

impl Paint {
    /// Constant color.
    pub fn color(color: Color) -> Paint {
        Paint {
            xform: Transform::id(),
            inner_color: color,
            outer_color: color,
            glow: 0.0,
            image: -1,
        }
    }

    /// Linear gradient from `inner_color` at `start` to `outer_color` at
    /// `end`.
    pub fn linear_gradient(start: Vec2, end: Vec2, inner_color: Color, outer_color: Color) -> Paint {
        let mut d = end - start;
        if d.length() < 1e-4 {
            d = Vec2::new(0.0, 1.0);
        }

        // Forward transform sends paint-space (1, 0) to the gradient axis;
        // the paint stores its inverse.
        let forward = Transform {
            matrix: Mat2x2::new(d.x, -d.y, d.y, d.x),
            translation: start,
        };

        Paint {
            xform: forward.inverse(),
            inner_color,
            outer_color,
            glow: 0.0,
            image: -1,
        }
    }

    /// Tiled image: a `size`-sized rectangle of texture `image` placed at
    /// `origin`, rotated by `angle`, with uniform `alpha`.
    pub fn image_pattern(origin: Vec2, size: Vec2, angle: f32, image: i32, alpha: f32) -> Paint {
        let forward = Transform::translate(origin) * Transform::rotate(angle) * Transform::scale(size);
        let color = Color::rgba(1.0, 1.0, 1.0, alpha);

        Paint {
            xform: forward.inverse(),
            inner_color: color,
            outer_color: color,
            glow: 0.0,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_axis_maps_to_unit_x() {
        let paint = Paint::linear_gradient(
            Vec2::new(1.0, 1.0),
            Vec2::new(3.0, 1.0),
            Color::rgba(1.0, 0.0, 0.0, 1.0),
            Color::rgba(0.0, 0.0, 1.0, 1.0),
        );

        let at_start = paint.xform.apply(Vec2::new(1.0, 1.0));
        let at_end = paint.xform.apply(Vec2::new(3.0, 1.0));
        assert!((at_start.x - 0.0).abs() < 1e-5);
        assert!((at_end.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_gradient_defaults_to_vertical() {
        let p = Vec2::new(2.0, 2.0);
        let paint = Paint::linear_gradient(
            p,
            p,
            Color::rgba(0.0, 0.0, 0.0, 1.0),
            Color::rgba(1.0, 1.0, 1.0, 1.0),
        );
        let below = paint.xform.apply(p);
        let above = paint.xform.apply(p + Vec2::new(0.0, 1.0));
        assert!((below.x - 0.0).abs() < 1e-5);
        assert!((above.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn image_pattern_normalizes_its_rect() {
        let paint = Paint::image_pattern(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0), 0.0, 3, 0.5);
        let corner = paint.xform.apply(Vec2::new(14.0, 22.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert_eq!(paint.image, 3);
        assert_eq!(paint.inner_color.a, 0.5);
    }
}
