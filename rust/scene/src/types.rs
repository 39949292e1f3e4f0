// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for detected floor plan elements

use crate::error::SceneError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Fixed vertical extent of walls (scene units)
pub const WALL_HEIGHT: f64 = 100.0;

/// Fixed vertical extent of doors, windows and furniture (scene units)
pub const STRUCTURE_HEIGHT: f64 = 50.0;

/// Category of a detected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Furniture,
}

impl ElementKind {
    /// All kinds, in scene emission order
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Wall,
        ElementKind::Door,
        ElementKind::Window,
        ElementKind::Furniture,
    ];

    /// Name of the JSON document holding this kind (without extension)
    pub fn asset_name(self) -> &'static str {
        match self {
            ElementKind::Wall => "walls",
            ElementKind::Door => "doors",
            ElementKind::Window => "windows",
            ElementKind::Furniture => "furniture",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Wall => "Wall",
            ElementKind::Door => "Door",
            ElementKind::Window => "Window",
            ElementKind::Furniture => "Furniture",
        }
    }

    /// Surface material assigned to every box of this kind
    pub fn material(self) -> Material {
        match self {
            ElementKind::Wall => Material::new(Color::rgb(0x88, 0x88, 0x88), 0.7, 0.1),
            ElementKind::Door => Material::new(Color::rgb(0x8B, 0x45, 0x13), 0.5, 0.2),
            ElementKind::Window => Material::new(Color::rgb(0x87, 0xCE, 0xEB), 0.5, 0.2),
            ElementKind::Furniture => Material::new(Color::rgb(0x9B, 0x59, 0xB6), 0.5, 0.2),
        }
    }

    /// Vertical extent of boxes of this kind. Not read from the records.
    pub fn vertical_extent(self) -> f64 {
        match self {
            ElementKind::Wall => WALL_HEIGHT,
            _ => STRUCTURE_HEIGHT,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}

/// sRGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// RGBA in 0-1 range, fully opaque
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{}`", hex)))
    }
}

/// Physically based surface parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub const fn new(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
        }
    }
}

/// One detected element: center position and footprint extents in image
/// pixels.
///
/// Decoding is lenient: any field that is not a JSON number becomes NaN, and
/// an element that is not an object becomes an all-NaN record. Such records
/// fail [`FootprintRecord::is_valid`] and are dropped by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FootprintRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FootprintRecord {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Decode from an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_f64).unwrap_or(f64::NAN);
        Self {
            x: field("x"),
            y: field("y"),
            width: field("width"),
            height: field("height"),
        }
    }

    /// All four fields are finite numbers
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl<'de> Deserialize<'de> for FootprintRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Decode one element document. The document must be a JSON array; its
/// elements are decoded leniently.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<FootprintRecord>, SceneError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// The four element lists that make up a floor plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanData {
    pub walls: Vec<FootprintRecord>,
    pub doors: Vec<FootprintRecord>,
    pub windows: Vec<FootprintRecord>,
    pub furniture: Vec<FootprintRecord>,
}

impl FloorPlanData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, kind: ElementKind) -> &[FootprintRecord] {
        match kind {
            ElementKind::Wall => &self.walls,
            ElementKind::Door => &self.doors,
            ElementKind::Window => &self.windows,
            ElementKind::Furniture => &self.furniture,
        }
    }

    /// Replace one list wholesale
    pub fn set(&mut self, kind: ElementKind, records: Vec<FootprintRecord>) {
        match kind {
            ElementKind::Wall => self.walls = records,
            ElementKind::Door => self.doors = records,
            ElementKind::Window => self.windows = records,
            ElementKind::Furniture => self.furniture = records,
        }
    }

    pub fn total_records(&self) -> usize {
        ElementKind::ALL
            .iter()
            .map(|kind| self.records(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_records() {
        let json = br#"[{"x": 10, "y": 20.5, "width": 200, "height": 50}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records, vec![FootprintRecord::new(10.0, 20.5, 200.0, 50.0)]);
        assert!(records[0].is_valid());
    }

    #[test]
    fn test_non_numeric_fields_become_nan() {
        let json = br#"[
            {"x": "10", "y": 20, "width": 30, "height": 40},
            {"x": 1, "y": null, "width": 30, "height": 40},
            {"x": 1, "y": 2, "width": 30},
            {"x": 1, "y": 2, "width": true, "height": 4}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records[0].x.is_nan());
        assert!(records[1].y.is_nan());
        assert!(records[2].height.is_nan());
        assert!(records[3].width.is_nan());
        assert!(records.iter().all(|r| !r.is_valid()));
    }

    #[test]
    fn test_non_object_element_is_all_nan() {
        let records = parse_records(br#"[42, "wall", null]"#).unwrap();
        assert_eq!(records.len(), 3);
        for record in records {
            assert!(record.x.is_nan() && record.y.is_nan());
            assert!(record.width.is_nan() && record.height.is_nan());
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let json = br#"[{"x": 1, "y": 2, "width": 3, "height": 4, "label": "Sliding Door"}]"#;
        let records = parse_records(json).unwrap();
        assert!(records[0].is_valid());
    }

    #[test]
    fn test_non_array_document_is_error() {
        assert!(parse_records(br#"{"x": 1}"#).is_err());
        assert!(parse_records(b"<html>not found</html>").is_err());
    }

    #[test]
    fn test_color_hex() {
        let brown = ElementKind::Door.material().color;
        assert_eq!(brown.to_hex(), "#8b4513");
        assert_eq!(Color::from_hex("#8B4513"), Some(brown));
        assert_eq!(Color::from_hex("87ceeb"), Some(Color::rgb(0x87, 0xCE, 0xEB)));
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#fff"), None);
    }

    #[test]
    fn test_color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0x9B, 0x59, 0xB6)).unwrap();
        assert_eq!(json, "\"#9b59b6\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0x9B, 0x59, 0xB6));
    }

    #[test]
    fn test_floor_plan_set_replaces_wholesale() {
        let mut data = FloorPlanData::new();
        data.set(ElementKind::Door, vec![FootprintRecord::new(0.0, 0.0, 1.0, 1.0); 3]);
        assert_eq!(data.records(ElementKind::Door).len(), 3);

        data.set(ElementKind::Door, vec![FootprintRecord::new(5.0, 5.0, 1.0, 1.0)]);
        assert_eq!(data.records(ElementKind::Door).len(), 1);
        assert_eq!(data.total_records(), 1);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_kind_metadata() {
        let names: Vec<_> = ElementKind::ALL.iter().map(|k| k.asset_name()).collect();
        assert_eq!(names, vec!["walls", "doors", "windows", "furniture"]);
        assert_eq!(ElementKind::Wall.vertical_extent(), WALL_HEIGHT);
        assert_eq!(ElementKind::Furniture.vertical_extent(), STRUCTURE_HEIGHT);
    }
}
