//! CSS colors for fills, strokes and arrowheads.
//!
//! Style settings are plain strings in the configuration file; they become
//! [`Color`] values, backed by the `color` crate's `DynamicColor`, when a
//! renderer is built.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

impl ColorError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A parsed CSS color.
///
/// ```
/// use treehopper_core::color::Color;
///
/// assert!(Color::new("lightblue").is_ok());
/// assert!(Color::new("#1e90ff").is_ok());
/// assert!(Color::new("not-a-color").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    pub fn new(css: &str) -> Result<Self, ColorError> {
        match DynamicColor::from_str(css) {
            Ok(parsed) => Ok(Self(parsed)),
            Err(err) => Err(ColorError {
                input: css.to_owned(),
                reason: err.to_string(),
            }),
        }
    }

    /// The color's text with every character outside `[A-Za-z0-9]` mapped
    /// to `_` (`#` becomes `hex`), prefixed when it would start with a digit.
    pub fn to_id_safe_string(self) -> String {
        let mut id = String::new();
        for ch in self.to_string().chars() {
            match ch {
                '#' => id.push_str("hex"),
                c if c.is_ascii_alphanumeric() => id.push(c),
                _ => id.push('_'),
            }
        }
        if id.starts_with(|c: char| c.is_ascii_digit()) {
            id.insert_str(0, "c_");
        }
        id
    }

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.0.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("black parses as a CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_keeps_input() {
        let err = Color::new("not-a-color").unwrap_err();
        assert_eq!(err.input(), "not-a-color");
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn named_color_id_is_unchanged() {
        assert_eq!(Color::new("blue").unwrap().to_id_safe_string(), "blue");
    }

    #[test]
    fn id_safe_string_has_no_punctuation() {
        for input in ["#ff0000", "rgb(10, 20, 30)", "rgba(10, 20, 30, 0.5)"] {
            let id = Color::new(input).unwrap().to_id_safe_string();
            assert!(
                id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{input} -> {id}"
            );
            assert!(!id.starts_with(|c: char| c.is_ascii_digit()));
        }
    }

    #[test]
    fn equal_inputs_compare_equal() {
        assert_eq!(Color::new("red").unwrap(), Color::new("red").unwrap());
        assert_ne!(Color::new("red").unwrap(), Color::new("blue").unwrap());
    }
}
