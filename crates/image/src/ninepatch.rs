//! Nine-patch rendering.
//!
//! The SVG is rasterised by an external exporter, then the canvas grows by a
//! transparent one-pixel frame that receives the black guide lines Android
//! reads stretch and padding information from.

use crate::error::{NinePatchError, Result};
use crate::svg::{Guide, ScaledSvg, Svg};
use droidtools_core::process::{require_command, run_command};
use image::{Rgba, RgbaImage};
use std::path::Path;

const GUIDE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Rasterises an SVG into a PNG of the requested size
pub trait SvgExporter {
    /// Write `input` rendered at `width` x `height` to `output`
    fn export(&self, input: &Path, output: &Path, width: u32, height: u32) -> Result<()>;
}

/// Exports through the Inkscape 1.x command line
#[derive(Debug, Clone)]
pub struct InkscapeExporter {
    program: String,
}

impl InkscapeExporter {
    /// Exporter running the given Inkscape executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn export_args(input: &Path, output: &Path, width: u32, height: u32) -> Vec<String> {
        vec![
            "--export-type=png".to_string(),
            "--export-area-page".to_string(),
            format!("--export-width={}", width),
            format!("--export-height={}", height),
            format!("--export-filename={}", output.display()),
            input.display().to_string(),
        ]
    }
}

impl Default for InkscapeExporter {
    fn default() -> Self {
        Self::new("inkscape")
    }
}

impl SvgExporter for InkscapeExporter {
    fn export(&self, input: &Path, output: &Path, width: u32, height: u32) -> Result<()> {
        require_command(&self.program)?;

        let args = Self::export_args(input, output, width, height);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_command(&self.program, &args)?.check(&self.program)?;
        Ok(())
    }
}

/// Surround the picture with a transparent one-pixel frame
pub fn extend_border(picture: &RgbaImage) -> RgbaImage {
    let mut framed = RgbaImage::from_pixel(
        picture.width() + 2,
        picture.height() + 2,
        Rgba([0, 0, 0, 0]),
    );
    image::imageops::overlay(&mut framed, picture, 1, 1);
    framed
}

/// Draw the four guide lines on a framed picture
///
/// Guides are in export coordinates and shifted by the frame. Lines never
/// touch the frame corners.
pub fn draw_guides(framed: &mut RgbaImage, scaled: &ScaledSvg) {
    let bottom = framed.height().saturating_sub(1);
    let right = framed.width().saturating_sub(1);

    let stretch_x = scaled.stretch_x();
    let stretch_y = scaled.stretch_y();
    let padding_x = scaled.padding_x();
    let padding_y = scaled.padding_y();

    draw_horizontal(framed, 0, stretch_x);
    draw_vertical(framed, 0, stretch_y);
    draw_horizontal(framed, bottom, padding_x);
    draw_vertical(framed, right, padding_y);
}

fn span(start: f64, length: f64, limit: u32) -> std::ops::Range<u32> {
    // float to int casts saturate
    let to_pixel = |v: f64| (v.round().max(0.0) + 1.0) as u32;

    let first = to_pixel(start).max(1);
    let last = to_pixel(start + length).min(limit.saturating_sub(1));
    first..last.max(first)
}

fn draw_horizontal(framed: &mut RgbaImage, row: u32, guide: Guide) {
    for x in span(guide.x, guide.width, framed.width()) {
        framed.put_pixel(x, row, GUIDE_COLOR);
    }
}

fn draw_vertical(framed: &mut RgbaImage, column: u32, guide: Guide) {
    for y in span(guide.y, guide.height, framed.height()) {
        framed.put_pixel(column, y, GUIDE_COLOR);
    }
}

/// Build a nine-patch PNG at `output` from the SVG at `input`
pub fn generate(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    exporter: &dyn SvgExporter,
) -> Result<ScaledSvg> {
    let scaled = ScaledSvg::new(Svg::open(input)?, width, height)?;

    exporter.export(input, output, scaled.width(), scaled.height())?;

    let exported = image::open(output)?.to_rgba8();
    if exported.width() == 0 || exported.height() == 0 {
        return Err(NinePatchError::InvalidSize(format!(
            "exporter produced an empty image at {}",
            output.display()
        )));
    }

    let mut framed = extend_border(&exported);
    draw_guides(&mut framed, &scaled);
    framed.save(output)?;

    tracing::info!(
        output = %output.display(),
        width = framed.width(),
        height = framed.height(),
        "nine-patch written"
    );

    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::tests::REFERENCE;
    use std::cell::RefCell;

    /// Writes a solid image instead of calling Inkscape
    struct SolidExporter {
        calls: RefCell<Vec<(u32, u32)>>,
    }

    impl SvgExporter for SolidExporter {
        fn export(&self, _input: &Path, output: &Path, width: u32, height: u32) -> Result<()> {
            self.calls.borrow_mut().push((width, height));
            RgbaImage::from_pixel(width, height, Rgba([0, 128, 0, 255])).save(output)?;
            Ok(())
        }
    }

    fn is_black(p: &Rgba<u8>) -> bool {
        *p == GUIDE_COLOR
    }

    #[test]
    fn test_extend_border() {
        let picture = RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]));
        let framed = extend_border(&picture);

        assert_eq!(framed.dimensions(), (6, 5));
        assert_eq!(framed.get_pixel(0, 0)[3], 0);
        assert_eq!(framed.get_pixel(5, 4)[3], 0);
        assert_eq!(*framed.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*framed.get_pixel(4, 3), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_span_shifts_and_clamps() {
        assert_eq!(span(2.0, 3.0, 10), 3..6);
        assert_eq!(span(0.0, 50.0, 10), 1..9);
        assert!(span(20.0, 5.0, 10).is_empty());
        assert_eq!(span(4.0, 0.0, 10), 5..5);
    }

    #[test]
    fn test_inkscape_arguments() {
        let args = InkscapeExporter::export_args(Path::new("in.svg"), Path::new("out.png"), 48, 32);
        assert!(args.contains(&"--export-width=48".to_string()));
        assert!(args.contains(&"--export-height=32".to_string()));
        assert!(args.contains(&"--export-filename=out.png".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("in.svg"));
    }

    #[test]
    fn test_missing_inkscape() {
        let exporter = InkscapeExporter::new("droidtools-no-such-inkscape");
        let err = exporter
            .export(Path::new("in.svg"), Path::new("out.png"), 1, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            NinePatchError::Export(ref e) if e.code == droidtools_core::ErrorCode::CommandNotFound
        ));
    }

    #[test]
    fn test_generate_draws_guides() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("button.svg");
        let output = dir.path().join("button.9.png");
        std::fs::write(&input, REFERENCE).unwrap();

        let exporter = SolidExporter {
            calls: RefCell::new(Vec::new()),
        };
        let scaled = generate(&input, &output, 432, 432, &exporter).unwrap();
        assert_eq!(*exporter.calls.borrow(), vec![(432, 432)]);

        let picture = image::open(&output).unwrap().to_rgba8();
        assert_eq!(picture.dimensions(), (434, 434));

        // stretch-x at 150..250 on the top row
        let stretch_x = scaled.stretch_x();
        assert_eq!((stretch_x.x, stretch_x.width), (150.0, 100.0));
        assert!(!is_black(picture.get_pixel(150, 0)));
        assert!(is_black(picture.get_pixel(151, 0)));
        assert!(is_black(picture.get_pixel(250, 0)));
        assert!(!is_black(picture.get_pixel(251, 0)));

        // stretch-y at 125..275 on the left column
        assert!(is_black(picture.get_pixel(0, 126)));
        assert!(!is_black(picture.get_pixel(0, 276)));

        // padding-x at 94..314 on the bottom row
        assert!(is_black(picture.get_pixel(95, 433)));
        assert!(is_black(picture.get_pixel(314, 433)));
        assert!(!is_black(picture.get_pixel(315, 433)));

        // padding-y at 65..354.5 on the right column
        assert!(is_black(picture.get_pixel(433, 66)));
        assert!(!is_black(picture.get_pixel(433, 65)));

        // corners stay transparent
        assert_eq!(picture.get_pixel(0, 0)[3], 0);
        assert_eq!(picture.get_pixel(433, 433)[3], 0);

        // content is untouched
        assert_eq!(*picture.get_pixel(200, 200), Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn test_generate_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SolidExporter {
            calls: RefCell::new(Vec::new()),
        };
        let err = generate(
            &dir.path().join("missing.svg"),
            &dir.path().join("out.png"),
            10,
            10,
            &exporter,
        )
        .unwrap_err();

        assert!(matches!(err, NinePatchError::IoError(_)));
        assert!(exporter.calls.borrow().is_empty());
    }
}
