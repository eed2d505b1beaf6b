use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    /// The red component of the color, from 0.0 to 1.0.
    pub red: Option<f32>,
    /// The green component of the color, from 0.0 to 1.0.
    pub green: Option<f32>,
    /// The blue component of the color, from 0.0 to 1.0.
    pub blue: Option<f32>,
}

impl RgbColor {
    /// Builds a color from 8-bit channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: Some(f32::from(red) / 255.0),
            green: Some(f32::from(green) / 255.0),
            blue: Some(f32::from(blue) / 255.0),
        }
    }

    /// Formats the color as `#rrggbb`. Missing channels count as 0.
    pub fn to_hex(&self) -> String {
        let channel = |c: Option<f32>| (c.unwrap_or(0.0).clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

/// A solid color value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    /// An opaque RGB color.
    pub rgb_color: RgbColor,
}

/// A color that can either be fully opaque or fully transparent.
/// If opaque, the `opaque_color` field is set. If transparent, the field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    /// If set, this will be used as an opaque color. If unset, the color is rendered as transparent.
    pub opaque_color: Option<OpaqueColor>,
}

impl OptionalColor {
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            opaque_color: Some(OpaqueColor {
                rgb_color: RgbColor::from_rgb8(red, green, blue),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_8_bit_channels() {
        assert_eq!(RgbColor::from_rgb8(0x2c, 0x85, 0x53).to_hex(), "#2c8553");
        let missing = RgbColor {
            red: None,
            green: Some(1.0),
            blue: None,
        };
        assert_eq!(missing.to_hex(), "#00ff00");
    }
}
