use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914400.0;
/// English Metric Units per point (1/72 inch).
pub const EMU_PER_PT: f64 = EMU_PER_INCH / 72.0;

/// Converts inches to EMU.
pub fn inches(value: f64) -> f64 {
    value * EMU_PER_INCH
}

/// Specifies a unit of length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    pub magnitude: Option<f64>,
    /// The units for magnitude.
    pub unit: Option<Unit>,
}

impl Dimension {
    pub fn emu(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Emu),
        }
    }

    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    /// The magnitude in EMU, or 0.0 when unset.
    pub fn to_emu(&self) -> f64 {
        let magnitude = self.magnitude.unwrap_or(0.0);
        match self.unit {
            Some(Unit::Pt) => magnitude * EMU_PER_PT,
            _ => magnitude,
        }
    }

    /// The magnitude in points, or 0.0 when unset.
    pub fn to_pt(&self) -> f64 {
        let magnitude = self.magnitude.unwrap_or(0.0);
        match self.unit {
            Some(Unit::Emu) => magnitude / EMU_PER_PT,
            _ => magnitude,
        }
    }
}

/// A width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width. Missing width does not inherit from parents.
    pub width: Option<Dimension>,
    /// The height. Missing height does not inherit from parents.
    pub height: Option<Dimension>,
}

impl Size {
    pub fn emu(width: f64, height: f64) -> Self {
        Self {
            width: Some(Dimension::emu(width)),
            height: Some(Dimension::emu(height)),
        }
    }
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// Formula:
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
///
/// Slides built by this crate only ever use pure translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// The X coordinate scaling element.
    pub scale_x: Option<f64>,
    /// The Y coordinate scaling element.
    pub scale_y: Option<f64>,
    /// The X coordinate translation element.
    pub translate_x: Option<f64>,
    /// The Y coordinate translation element.
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    pub unit: Option<Unit>,
}

impl AffineTransform {
    pub fn translate_emu(x: f64, y: f64) -> Self {
        Self {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(Unit::Emu),
        }
    }
}

/// An axis-aligned rectangle in EMU, used for layout arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::emu(self.width, self.height)
    }

    pub fn transform(&self) -> AffineTransform {
        AffineTransform::translate_emu(self.left, self.top)
    }

    /// Rebuilds a rectangle from an element's transform and size.
    /// Missing parts count as zero.
    pub fn from_parts(transform: Option<&AffineTransform>, size: Option<&Size>) -> Self {
        let to_emu = |value: Option<f64>, unit: Option<&Unit>| {
            Dimension {
                magnitude: value,
                unit: unit.cloned(),
            }
            .to_emu()
        };
        let (left, top) = transform
            .map(|t| {
                (
                    to_emu(t.translate_x, t.unit.as_ref()),
                    to_emu(t.translate_y, t.unit.as_ref()),
                )
            })
            .unwrap_or((0.0, 0.0));
        let width = size
            .and_then(|s| s.width.as_ref())
            .map_or(0.0, Dimension::to_emu);
        let height = size
            .and_then(|s| s.height.as_ref())
            .map_or(0.0, Dimension::to_emu);
        Self::new(left, top, width, height)
    }
}
