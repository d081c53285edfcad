use crate::{Paint, Prim, Transform, Vec2};

/// The GPU boundary.
///
/// [`Context::encode`] hands a frame's buffers to an implementation of this
/// trait, which uploads them and issues the draw. `Prim` and `Paint` are
/// plain old data, so `bytemuck::cast_slice` turns each buffer into bytes.
///
/// [`Context::encode`]: crate::Context::encode
pub trait Backend {
    /// Called once per frame before any buffers are handed over.
    fn begin_frame(&mut self, width: f32, height: f32, device_px_ratio: f32);

    /// Uploads the frame's buffers and draws the primitives in submission
    /// order.
    fn draw(&mut self, prims: &[Prim], cvs: &[Vec2], paints: &[Paint], xforms: &[Transform]);
}
