use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::{
    Backend, Color, Paint, Path, PathError, PathScanner, Prim, PrimType, Transform, Vec2,
    validate_path,
};

// Quad bounds are padded by a pixel so the shader has room for its
// anti-aliasing fringe.
const BOUNDS_PADDING: f32 = 1.0;

/// Collects one frame of primitives, paints and transforms, then encodes
/// them for a [`Backend`].
///
/// Call [`begin`] at the start of each frame, submit primitives through the
/// convenience methods (or [`render`] directly), and finish with
/// [`encode`]. Paints and transforms live for one frame.
///
/// [`begin`]: Context::begin
/// [`render`]: Context::render
/// [`encode`]: Context::encode
pub struct Context {
    prims: Vec<Prim>,
    cvs: Vec<Vec2>,
    paints: Vec<Paint>,
    xforms: Vec<Transform>,
    xform_stack: SmallVec<[Transform; 8]>,
    path: Path,
    scanner: PathScanner,
    width: f32,
    height: f32,
    device_px_ratio: f32,
}

impl Context {
    pub fn new() -> Context {
        let mut xform_stack = SmallVec::new();
        xform_stack.push(Transform::id());
        Context {
            prims: Vec::new(),
            cvs: Vec::new(),
            paints: Vec::new(),
            xforms: Vec::new(),
            xform_stack,
            path: Path::new(),
            scanner: PathScanner::new(),
            width: 0.0,
            height: 0.0,
            device_px_ratio: 1.0,
        }
    }

    /// Begins a frame, clearing all per-frame buffers and resetting the
    /// transform stack to identity.
    pub fn begin(&mut self, width: f32, height: f32, device_px_ratio: f32) {
        trace!("begin frame {}x{} @{}", width, height, device_px_ratio);
        self.prims.clear();
        self.cvs.clear();
        self.paints.clear();
        self.xforms.clear();
        self.xform_stack.clear();
        self.xform_stack.push(Transform::id());
        self.path.clear();
        self.width = width;
        self.height = height;
        self.device_px_ratio = device_px_ratio;
    }

    // ---- paints ----

    /// Registers a paint for this frame and returns its index.
    pub fn add_paint(&mut self, paint: Paint) -> u32 {
        self.paints.push(paint);
        (self.paints.len() - 1) as u32
    }

    pub fn color_paint(&mut self, color: Color) -> u32 {
        self.add_paint(Paint::color(color))
    }

    pub fn linear_gradient(
        &mut self,
        start: Vec2,
        end: Vec2,
        inner_color: Color,
        outer_color: Color,
    ) -> u32 {
        self.add_paint(Paint::linear_gradient(start, end, inner_color, outer_color))
    }

    pub fn image_pattern(
        &mut self,
        origin: Vec2,
        size: Vec2,
        angle: f32,
        image: i32,
        alpha: f32,
    ) -> u32 {
        self.add_paint(Paint::image_pattern(origin, size, angle, image, alpha))
    }

    // ---- transform stack ----

    pub fn current_transform(&self) -> Transform {
        *self.xform_stack.last().unwrap()
    }

    /// Transforms a point by the current transformation.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        self.current_transform().apply(p)
    }

    pub fn translate(&mut self, t: Vec2) {
        let top = self.xform_stack.last_mut().unwrap();
        *top = *top * Transform::translate(t);
    }

    pub fn scale(&mut self, s: Vec2) {
        let top = self.xform_stack.last_mut().unwrap();
        *top = *top * Transform::scale(s);
    }

    pub fn rotate(&mut self, angle: f32) {
        let top = self.xform_stack.last_mut().unwrap();
        *top = *top * Transform::rotate(angle);
    }

    /// Saves the current transform. Pair with [`restore`].
    ///
    /// [`restore`]: Context::restore
    pub fn save(&mut self) {
        let top = self.current_transform();
        self.xform_stack.push(top);
    }

    pub fn restore(&mut self) {
        if self.xform_stack.len() > 1 {
            self.xform_stack.pop();
        } else {
            warn!("restore without matching save");
        }
    }

    fn add_xform(&mut self) -> u32 {
        let current = self.current_transform();
        if self.xforms.last() != Some(&current) {
            self.xforms.push(current);
        }
        (self.xforms.len() - 1) as u32
    }

    // ---- primitives ----

    /// Submits a primitive under the current transform.
    pub fn render(&mut self, mut prim: Prim) {
        prim.xform = self.add_xform();
        self.prims.push(prim);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::Circle);
        prim.cvs[0] = center;
        prim.radius = radius;
        prim.paint = paint;
        let r = Vec2::new(radius, radius);
        self.set_bounds(&mut prim, center - r, center + r);
        self.render(prim);
    }

    pub fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        rotation: f32,
        aperture: f32,
        paint: u32,
    ) {
        let mut prim = Prim::new(PrimType::Arc);
        prim.cvs[0] = center;
        // Direction vectors, not angles: the shader works with them
        // directly.
        prim.cvs[1] = Vec2::new(rotation.sin(), rotation.cos());
        prim.cvs[2] = Vec2::new(aperture.sin(), aperture.cos());
        prim.radius = radius;
        prim.width = width;
        prim.paint = paint;
        let r = Vec2::new(radius + width, radius + width);
        self.set_bounds(&mut prim, center - r, center + r);
        self.render(prim);
    }

    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, radius: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::Rect);
        prim.cvs[0] = min;
        prim.cvs[1] = max;
        prim.radius = radius;
        prim.paint = paint;
        self.set_bounds(&mut prim, min, max);
        self.render(prim);
    }

    pub fn stroke_rect(&mut self, min: Vec2, max: Vec2, radius: f32, width: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::RectStroke);
        prim.cvs[0] = min;
        prim.cvs[1] = max;
        prim.radius = radius;
        prim.width = width;
        prim.paint = paint;
        let w = Vec2::new(width, width);
        self.set_bounds(&mut prim, min - w, max + w);
        self.render(prim);
    }

    pub fn stroke_bezier(&mut self, a: Vec2, b: Vec2, c: Vec2, width: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::Bezier);
        prim.cvs = [a, b, c];
        prim.width = width;
        prim.paint = paint;
        let w = Vec2::new(width, width);
        self.set_bounds(&mut prim, a.min(b).min(c) - w, a.max(b).max(c) + w);
        self.render(prim);
    }

    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::Segment);
        prim.cvs[0] = a;
        prim.cvs[1] = b;
        prim.width = width;
        prim.paint = paint;
        let w = Vec2::new(width, width);
        self.set_bounds(&mut prim, a.min(b) - w, a.max(b) + w);
        self.render(prim);
    }

    pub fn stroke_wire(&mut self, a: Vec2, b: Vec2, width: f32, paint: u32) {
        let mut prim = Prim::new(PrimType::Wire);
        prim.cvs[0] = a;
        prim.cvs[1] = b;
        prim.width = width;
        prim.paint = paint;
        let w = Vec2::new(width, width);
        // The wire sags below its endpoints by up to half their distance.
        let sag = Vec2::new(0.0, 0.5 * (b - a).length());
        self.set_bounds(&mut prim, a.min(b) - w, a.max(b) + w + sag);
        self.render(prim);
    }

    fn set_bounds(&self, prim: &mut Prim, min: Vec2, max: Vec2) {
        let pad = Vec2::new(BOUNDS_PADDING, BOUNDS_PADDING);
        prim.quad_bounds = [min - pad, max + pad];
        prim.tex_bounds = prim.quad_bounds;
    }

    // ---- paths ----

    /// Fills a path bounded by quadratic bezier segments.
    ///
    /// With `scan` set, the path is swept from low y to high y and one
    /// `PathFill` primitive is emitted per scan band, referencing only the
    /// segments whose vertical extent overlaps that band; the GPU fill test
    /// for a pixel then touches only segments that can matter for its row.
    /// Without `scan`, a single primitive references the whole run.
    pub fn fill_path(&mut self, cvs: &[Vec2], paint: u32, scan: bool) -> Result<(), PathError> {
        if !scan {
            validate_path(cvs)?;
            let start = self.cvs.len() as u32;
            self.cvs.extend_from_slice(cvs);

            let mut min = cvs[0];
            let mut max = cvs[0];
            for &cv in cvs {
                min = min.min(cv);
                max = max.max(cv);
            }

            let mut prim = Prim::new(PrimType::PathFill);
            prim.start = start;
            prim.count = ((cvs.len() - 1) / 2) as u32;
            prim.paint = paint;
            self.set_bounds(&mut prim, min, max);
            self.render(prim);
            return Ok(());
        }

        self.scanner.begin(cvs)?;
        let mut bands = 0;
        while self.scanner.next() {
            let band = self.scanner.interval();
            let start = self.cvs.len() as u32;
            let mut count = 0;
            let mut min_x = f32::INFINITY;
            let mut max_x = f32::NEG_INFINITY;
            for segment in self.scanner.active_segments() {
                for &cv in segment.cvs.iter() {
                    min_x = min_x.min(cv.x);
                    max_x = max_x.max(cv.x);
                    self.cvs.push(cv);
                }
                count += 1;
            }

            let mut prim = Prim::new(PrimType::PathFill);
            prim.start = start;
            prim.count = count;
            prim.paint = paint;
            self.set_bounds(
                &mut prim,
                Vec2::new(min_x, band.min),
                Vec2::new(max_x, band.max),
            );
            self.render(prim);
            bands += 1;
        }
        trace!("fill_path: {} segments in {} bands", (cvs.len() - 1) / 2, bands);
        Ok(())
    }

    // ---- pen API ----

    /// Moves the pen, starting a fresh contour.
    pub fn move_to(&mut self, point: Vec2) {
        self.path.move_to(point);
    }

    pub fn line_to(&mut self, point: Vec2) {
        self.path.line_to(point);
    }

    pub fn quad_to(&mut self, control: Vec2, point: Vec2) {
        self.path.quad_to(control, point);
    }

    /// Crude approximation of a cubic bezier with two quadratics.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, point: Vec2) {
        self.path.cubic_to(control1, control2, point);
    }

    /// Fills the current pen path and clears it.
    pub fn fill(&mut self, paint: u32) -> Result<(), PathError> {
        let path = std::mem::replace(&mut self.path, Path::new());
        self.fill_path(path.cvs(), paint, true)
    }

    // ---- encoding ----

    /// Hands the frame's buffers to the backend.
    pub fn encode(&mut self, backend: &mut dyn Backend) {
        debug!(
            "encode: {} prims, {} cvs, {} paints, {} xforms",
            self.prims.len(),
            self.cvs.len(),
            self.paints.len(),
            self.xforms.len()
        );
        backend.begin_frame(self.width, self.height, self.device_px_ratio);
        backend.draw(&self.prims, &self.cvs, &self.paints, &self.xforms);
    }

    pub fn prims(&self) -> &[Prim] {
        &self.prims
    }

    pub fn cvs(&self) -> &[Vec2] {
        &self.cvs
    }

    pub fn paints(&self) -> &[Paint] {
        &self.paints
    }

    pub fn xforms(&self) -> &[Transform] {
        &self.xforms
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interval;

    fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color::rgba(r, g, b, a)
    }

    #[test]
    fn save_restore_round_trips() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);

        ctx.translate(Vec2::new(10.0, 0.0));
        ctx.save();
        ctx.scale(Vec2::new(2.0, 2.0));
        assert_eq!(
            ctx.transform_point(Vec2::new(1.0, 1.0)),
            Vec2::new(12.0, 2.0)
        );
        ctx.restore();
        assert_eq!(
            ctx.transform_point(Vec2::new(1.0, 1.0)),
            Vec2::new(11.0, 1.0)
        );

        // Unbalanced restore leaves the base transform in place.
        ctx.restore();
        ctx.restore();
        assert_eq!(ctx.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(11.0, 1.0));
    }

    #[test]
    fn equal_transforms_share_one_xform_slot() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(1.0, 0.0, 0.0, 1.0));

        ctx.fill_circle(Vec2::new(0.0, 0.0), 5.0, paint);
        ctx.fill_circle(Vec2::new(10.0, 0.0), 5.0, paint);
        ctx.translate(Vec2::new(1.0, 0.0));
        ctx.fill_circle(Vec2::new(20.0, 0.0), 5.0, paint);

        assert_eq!(ctx.xforms().len(), 2);
        assert_eq!(ctx.prims()[0].xform, 0);
        assert_eq!(ctx.prims()[1].xform, 0);
        assert_eq!(ctx.prims()[2].xform, 1);
    }

    #[test]
    fn scanned_fill_emits_one_prim_per_band() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(0.0, 1.0, 0.0, 1.0));

        // Two segments with extents [0, 5] and [3, 8]: three bands.
        let cvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 5.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(3.0, 8.0),
            Vec2::new(4.0, 6.0),
        ];
        ctx.fill_path(&cvs, paint, true).unwrap();

        assert_eq!(ctx.prims().len(), 3);
        for prim in ctx.prims() {
            assert_eq!(prim.kind, PrimType::PathFill as u32);
            assert_eq!(prim.paint, paint);
        }
        // The shared band references both segments; its quad spans the
        // band's extent plus the AA padding.
        assert_eq!(ctx.prims()[1].count, 2);
        let band = Interval::new(
            ctx.prims()[1].quad_bounds[0].y + BOUNDS_PADDING,
            ctx.prims()[1].quad_bounds[1].y - BOUNDS_PADDING,
        );
        assert_eq!(band, Interval::new(3.0, 5.0));
        // Each referenced segment contributes three control points.
        assert_eq!(ctx.cvs().len() as u32, ctx.prims().iter().map(|p| p.count * 3).sum::<u32>());
    }

    #[test]
    fn unscanned_fill_is_a_single_prim() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(0.0, 0.0, 1.0, 1.0));

        let cvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 5.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(3.0, 8.0),
            Vec2::new(4.0, 6.0),
        ];
        ctx.fill_path(&cvs, paint, false).unwrap();

        assert_eq!(ctx.prims().len(), 1);
        assert_eq!(ctx.prims()[0].count, 2);
        assert_eq!(ctx.cvs().len(), 5);
    }

    #[test]
    fn malformed_fill_leaves_the_context_usable() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(1.0, 1.0, 1.0, 1.0));

        let bad = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        assert_eq!(
            ctx.fill_path(&bad, paint, true),
            Err(PathError::TooFewPoints(2))
        );
        assert!(ctx.prims().is_empty());

        let good = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 5.0),
            Vec2::new(2.0, 10.0),
        ];
        ctx.fill_path(&good, paint, true).unwrap();
        assert_eq!(ctx.prims().len(), 1);
    }

    #[test]
    fn pen_fill_consumes_the_path() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(0.5, 0.5, 0.5, 1.0));

        ctx.move_to(Vec2::new(0.0, 0.0));
        ctx.quad_to(Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        ctx.fill(paint).unwrap();
        assert!(!ctx.prims().is_empty());

        // The pen path was cleared; an immediate second fill is malformed.
        assert!(ctx.fill(paint).is_err());
    }

    #[test]
    fn begin_resets_the_frame() {
        let mut ctx = Context::new();
        ctx.begin(800.0, 600.0, 1.0);
        let paint = ctx.color_paint(rgba(1.0, 0.0, 0.0, 1.0));
        ctx.translate(Vec2::new(5.0, 5.0));
        ctx.fill_circle(Vec2::new(0.0, 0.0), 2.0, paint);

        ctx.begin(400.0, 300.0, 2.0);
        assert!(ctx.prims().is_empty());
        assert!(ctx.paints().is_empty());
        assert!(ctx.xforms().is_empty());
        assert_eq!(ctx.current_transform(), Transform::id());
    }
}
