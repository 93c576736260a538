//! Nine-patch guide extraction from SVG sources.
//!
//! A source SVG declares its canvas size on the root element and carries four
//! marker paths, usually drawn outside the visible canvas:
//!
//! - `padding-x` / `padding-y`: content padding, drawn on the bottom and
//!   right edges of the nine-patch
//! - `stretch-x` / `stretch-y`: stretchable area, drawn on the top and left
//!   edges
//!
//! Each marker is a straight `m x,y w,h` path. Only the integer part of each
//! coordinate is used.

use crate::error::{NinePatchError, Result};
use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::path::Path;

static GUIDE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[mM] -?(\d+(?:\.\d+)?),-?(\d+(?:\.\d+)?) -?(\d+(?:\.\d+)?),-?(\d+(?:\.\d+)?)")
        .unwrap()
});

static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").unwrap());

/// One of the four marker paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    /// `padding-x`
    PaddingX,
    /// `padding-y`
    PaddingY,
    /// `stretch-x`
    StretchX,
    /// `stretch-y`
    StretchY,
}

impl GuideKind {
    /// All guides, in the order they are stored
    pub const ALL: [GuideKind; 4] = [
        GuideKind::PaddingX,
        GuideKind::PaddingY,
        GuideKind::StretchX,
        GuideKind::StretchY,
    ];

    /// The `id` of the marker path in the SVG
    pub fn id(self) -> &'static str {
        match self {
            GuideKind::PaddingX => "padding-x",
            GuideKind::PaddingY => "padding-y",
            GuideKind::StretchX => "stretch-x",
            GuideKind::StretchY => "stretch-y",
        }
    }

    fn from_id(id: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id().as_bytes() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Origin and extent of a marker path
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Guide {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Guide {
    fn scaled(self, ratio_x: f64, ratio_y: f64) -> Self {
        Self {
            x: self.x * ratio_x,
            y: self.y * ratio_y,
            width: self.width * ratio_x,
            height: self.height * ratio_y,
        }
    }
}

/// Read a guide from a path `d` attribute
///
/// A value that does not start with a relative or absolute move followed by
/// two coordinate pairs yields an all-zero guide.
pub fn parse_guide(d: &str) -> Guide {
    let Some(caps) = GUIDE_PATH.captures(d) else {
        return Guide::default();
    };

    let int_part = |i: usize| -> f64 {
        caps.get(i)
            .and_then(|m| m.as_str().split('.').next())
            .and_then(|s| s.parse::<u32>().ok())
            .map_or(0.0, f64::from)
    };

    Guide {
        x: int_part(1),
        y: int_part(2),
        width: int_part(3),
        height: int_part(4),
    }
}

/// A parsed nine-patch source
#[derive(Debug, Clone)]
pub struct Svg {
    width: u32,
    height: u32,
    guides: [Guide; 4],
}

impl Svg {
    /// Load and parse an SVG file
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let svg = Self::parse(&content)?;

        tracing::debug!(
            path = %path.display(),
            width = svg.width,
            height = svg.height,
            "parsed nine-patch source"
        );
        Ok(svg)
    }

    /// Parse an SVG document held in memory
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut size: Option<(u32, u32)> = None;
        let mut guides: [Option<Guide>; 4] = [None; 4];

        loop {
            let event = reader
                .read_event()
                .map_err(|e| NinePatchError::InvalidSvg(e.to_string()))?;

            match event {
                Event::Start(ref element) | Event::Empty(ref element) => {
                    let name = element.local_name();
                    if size.is_none() {
                        if name.as_ref() != b"svg" {
                            return Err(NinePatchError::InvalidSvg(format!(
                                "expected <svg> root element, found <{}>",
                                String::from_utf8_lossy(element.name().as_ref())
                            )));
                        }
                        size = Some(root_size(element)?);
                    } else if name.as_ref() == b"path" {
                        if let Some((kind, guide)) = guide_path(element)? {
                            guides[kind.index()].get_or_insert(guide);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let (width, height) =
            size.ok_or_else(|| NinePatchError::InvalidSvg("missing <svg> root element".into()))?;

        let mut resolved = [Guide::default(); 4];
        for kind in GuideKind::ALL {
            resolved[kind.index()] =
                guides[kind.index()].ok_or(NinePatchError::MissingGuide(kind.id()))?;
        }

        Ok(Self {
            width,
            height,
            guides: resolved,
        })
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// A guide in canvas coordinates
    pub fn guide(&self, kind: GuideKind) -> Guide {
        self.guides[kind.index()]
    }

    /// Bottom-edge padding guide
    pub fn padding_x(&self) -> Guide {
        self.guide(GuideKind::PaddingX)
    }

    /// Right-edge padding guide
    pub fn padding_y(&self) -> Guide {
        self.guide(GuideKind::PaddingY)
    }

    /// Top-edge stretch guide
    pub fn stretch_x(&self) -> Guide {
        self.guide(GuideKind::StretchX)
    }

    /// Left-edge stretch guide
    pub fn stretch_y(&self) -> Guide {
        self.guide(GuideKind::StretchY)
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| NinePatchError::InvalidSvg(e.to_string()))?;

    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| NinePatchError::InvalidSvg(e.to_string()))
    })
    .transpose()
}

fn root_size(element: &BytesStart<'_>) -> Result<(u32, u32)> {
    let dimension = |name: &'static str| -> Result<u32> {
        attribute(element, name)?
            .as_deref()
            .and_then(|v| LEADING_INT.captures(v))
            .and_then(|c| c[1].parse::<u32>().ok())
            .filter(|v| *v > 0)
            .ok_or(NinePatchError::MissingDimension(name))
    };

    Ok((dimension("width")?, dimension("height")?))
}

fn guide_path(element: &BytesStart<'_>) -> Result<Option<(GuideKind, Guide)>> {
    let Some(id) = attribute(element, "id")? else {
        return Ok(None);
    };
    let Some(kind) = GuideKind::from_id(id.as_bytes()) else {
        return Ok(None);
    };
    let d = attribute(element, "d")?.unwrap_or_default();

    Ok(Some((kind, parse_guide(&d))))
}

/// An SVG viewed at a target export size
#[derive(Debug, Clone)]
pub struct ScaledSvg {
    svg: Svg,
    width: u32,
    height: u32,
    scale_ratio_x: f64,
    scale_ratio_y: f64,
}

impl ScaledSvg {
    /// Scale `svg` to `width` x `height` pixels
    pub fn new(svg: Svg, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NinePatchError::InvalidSize(format!(
                "{}x{} (width and height must be positive)",
                width, height
            )));
        }

        let scale_ratio_x = f64::from(width) / f64::from(svg.width());
        let scale_ratio_y = f64::from(height) / f64::from(svg.height());

        Ok(Self {
            svg,
            width,
            height,
            scale_ratio_x,
            scale_ratio_y,
        })
    }

    /// Export width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Export height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal export to canvas ratio
    pub fn scale_ratio_x(&self) -> f64 {
        self.scale_ratio_x
    }

    /// Vertical export to canvas ratio
    pub fn scale_ratio_y(&self) -> f64 {
        self.scale_ratio_y
    }

    /// A guide in export coordinates
    pub fn guide(&self, kind: GuideKind) -> Guide {
        self.svg
            .guide(kind)
            .scaled(self.scale_ratio_x, self.scale_ratio_y)
    }

    /// [`Svg::padding_x`] in export coordinates
    pub fn padding_x(&self) -> Guide {
        self.guide(GuideKind::PaddingX)
    }

    /// [`Svg::padding_y`] in export coordinates
    pub fn padding_y(&self) -> Guide {
        self.guide(GuideKind::PaddingY)
    }

    /// [`Svg::stretch_x`] in export coordinates
    pub fn stretch_x(&self) -> Guide {
        self.guide(GuideKind::StretchX)
    }

    /// [`Svg::stretch_y`] in export coordinates
    pub fn stretch_y(&self) -> Guide {
        self.guide(GuideKind::StretchY)
    }
}
