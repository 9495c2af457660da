//! # Text Properties and Font Options
//!
//! Shared font option set for any text-bearing visualization object, plus the
//! [`TextProperty`] record those options resolve onto. The option set is built
//! once by [`font_options`] and merged into an object's registry; after each
//! update the object copies the resolved values onto its text target with
//! [`apply_font_options`].

use std::str::FromStr;

use crate::error::VizError;
use crate::options::{Entry, Options};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Justification {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Justification::Left),
            "center" => Ok(Justification::Center),
            "right" => Ok(Justification::Right),
            other => Err(VizError::InvalidOptionValue {
                name: "justification".to_string(),
                reason: format!("'{}' is not a justification", other),
            }),
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalJustification {
    #[default]
    Bottom,
    Middle,
    Top,
}

impl FromStr for VerticalJustification {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(VerticalJustification::Bottom),
            "middle" => Ok(VerticalJustification::Middle),
            "top" => Ok(VerticalJustification::Top),
            other => Err(VizError::InvalidOptionValue {
                name: "vertical_justification".to_string(),
                reason: format!("'{}' is not a vertical justification", other),
            }),
        }
    }
}

/// Text rendering properties for a label mapper or annotation
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperty {
    pub family: String,
    pub size: i64,
    pub color: [f32; 3],
    pub opacity: f64,
    pub bold: bool,
    pub italic: bool,
    pub justification: Justification,
    pub vertical_justification: VerticalJustification,
}

impl Default for TextProperty {
    fn default() -> Self {
        Self {
            family: "arial".to_string(),
            size: 18,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            bold: false,
            italic: false,
            justification: Justification::Left,
            vertical_justification: VerticalJustification::Bottom,
        }
    }
}

/// The reusable font option set
pub fn font_options() -> Options {
    let mut opt = Options::new();
    opt.add(
        Entry::string("font_family", "arial", "Font family for text rendering")
            .allow(&["arial", "courier", "times"]),
    );
    opt.add(Entry::int("font_size", 18, "Font size in points"));
    opt.add(Entry::color("text_color", [1.0, 1.0, 1.0], "Text color (RGB)"));
    opt.add(Entry::float("text_opacity", 1.0, "Text opacity"));
    opt.add(Entry::bool("bold", false, "Render text in bold"));
    opt.add(Entry::bool("italic", false, "Render text in italics"));
    opt.add(
        Entry::string("justification", "left", "Horizontal text anchor")
            .allow(&["left", "center", "right"]),
    );
    opt.add(
        Entry::string("vertical_justification", "bottom", "Vertical text anchor")
            .allow(&["bottom", "middle", "top"]),
    );
    opt
}

/// Copy resolved font option values onto a text property
pub fn apply_font_options(property: &mut TextProperty, options: &Options) -> Result<(), VizError> {
    property.family = options.get_str("font_family")?.to_string();
    property.size = options.get_int("font_size")?;
    property.color = options.get_color("text_color")?;
    property.opacity = options.get_float("text_opacity")?;
    property.bold = options.get_bool("bold")?;
    property.italic = options.get_bool("italic")?;
    property.justification = options.get_str("justification")?.parse()?;
    property.vertical_justification = options.get_str("vertical_justification")?.parse()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Overrides;

    #[test]
    fn font_options_resolve_onto_text_property() {
        let mut opt = font_options();
        let mut ov = Overrides::new();
        ov.set_str("justification", "center")
            .set_str("vertical_justification", "middle")
            .set_int("font_size", 24)
            .set_color("text_color", [1.0, 0.0, 0.0]);
        opt.apply(&ov).unwrap();

        let mut prop = TextProperty::default();
        apply_font_options(&mut prop, &opt).unwrap();
        assert_eq!(prop.justification, Justification::Center);
        assert_eq!(prop.vertical_justification, VerticalJustification::Middle);
        assert_eq!(prop.size, 24);
        assert_eq!(prop.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn justification_parsing_rejects_unknown_anchors() {
        assert!("center".parse::<Justification>().is_ok());
        assert!("centre".parse::<Justification>().is_err());
        assert!("middle".parse::<VerticalJustification>().is_ok());
        assert!("center".parse::<VerticalJustification>().is_err());
    }
}
