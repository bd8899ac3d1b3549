//! Raster ink rendering using tiny-skia
//!
//! The capture surface keeps its raster as a premultiplied `Pixmap`; snapshots
//! travel as straight-alpha `RgbaImage`. The conversions live here.

use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::config::{InkColor, PadConfig};
use crate::domain::{Point, RasterSize};
use crate::render::geometry::ink;

/// Fixed ink style of a surface: one width, one color, rounded joins and caps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkStyle {
    pub color: InkColor,
    pub width: f32,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            color: InkColor::default(),
            width: ink::WIDTH,
        }
    }
}

impl From<&PadConfig> for InkStyle {
    fn from(config: &PadConfig) -> Self {
        Self {
            color: config.ink_color,
            width: config.ink_width.max(1.0),
        }
    }
}

impl InkStyle {
    fn paint(&self) -> Paint<'static> {
        let [r, g, b, a] = self.color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        }
    }
}

/// Allocate an empty raster
pub fn blank_pixmap(size: RasterSize) -> Option<Pixmap> {
    Pixmap::new(size.width(), size.height())
}

/// Draw one stroke segment with rounded caps
pub fn draw_segment(pixmap: &mut Pixmap, style: &InkStyle, from: Point, to: Point) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(path) = pb.finish() else {
        return;
    };
    pixmap.stroke_path(
        &path,
        &style.paint(),
        &style.stroke(),
        Transform::identity(),
        None,
    );
}

/// Clear the whole raster to transparent
pub fn clear(pixmap: &mut Pixmap) {
    pixmap.fill(Color::TRANSPARENT);
}

/// Whether the raster holds no visible ink
pub fn is_blank(pixmap: &Pixmap) -> bool {
    pixmap.pixels().iter().all(|p| p.alpha() == 0)
}

/// Copy the raster out as a straight-alpha image
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

/// Convert a straight-alpha image into a premultiplied raster
pub fn from_rgba_image(img: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut data = Vec::with_capacity(img.as_raw().len());
    for px in img.pixels() {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size)
}

/// Draw `img` over the raster (source-over), stretching it to the raster size
pub fn composite(pixmap: &mut Pixmap, img: &RgbaImage) {
    let stretched;
    let img = if img.dimensions() == (pixmap.width(), pixmap.height()) {
        img
    } else {
        stretched = image::imageops::resize(
            img,
            pixmap.width(),
            pixmap.height(),
            image::imageops::FilterType::Triangle,
        );
        &stretched
    };

    let Some(source) = from_rgba_image(img) else {
        log::warn!(
            "Cannot composite {}x{} image onto raster",
            img.width(),
            img.height()
        );
        return;
    };
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(w: u32, h: u32) -> Pixmap {
        blank_pixmap(RasterSize::new(w, h).unwrap()).unwrap()
    }

    #[test]
    fn test_segment_leaves_ink_along_its_path() {
        let mut pixmap = raster(100, 100);
        assert!(is_blank(&pixmap));

        draw_segment(
            &mut pixmap,
            &InkStyle::default(),
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
        );

        assert!(!is_blank(&pixmap));
        assert_eq!(pixmap.pixel(50, 50).unwrap().alpha(), 255);
        assert_eq!(pixmap.pixel(50, 10).unwrap().alpha(), 0);
    }

    #[test]
    fn test_ink_color_matches_style() {
        let mut pixmap = raster(40, 40);
        draw_segment(
            &mut pixmap,
            &InkStyle::default(),
            Point::new(5.0, 20.0),
            Point::new(35.0, 20.0),
        );
        let img = to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(20, 20).0, [250, 204, 21, 255]);
    }

    #[test]
    fn test_clear_removes_ink() {
        let mut pixmap = raster(40, 40);
        draw_segment(
            &mut pixmap,
            &InkStyle::default(),
            Point::new(5.0, 5.0),
            Point::new(35.0, 35.0),
        );
        clear(&mut pixmap);
        assert!(is_blank(&pixmap));
    }

    #[test]
    fn test_composite_stretches_to_raster() {
        let mut opaque = RgbaImage::new(10, 10);
        for px in opaque.pixels_mut() {
            *px = image::Rgba([0, 0, 255, 255]);
        }

        let mut pixmap = raster(40, 40);
        composite(&mut pixmap, &opaque);
        assert_eq!(pixmap.pixel(39, 39).unwrap().alpha(), 255);
        assert_eq!(to_rgba_image(&pixmap).get_pixel(20, 20).0, [0, 0, 255, 255]);
    }
}
