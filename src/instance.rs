use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{IndicatorError, IndicatorKind, IndicatorParams, ParamMap};

/// An overlay colour in `#rrggbb` form.
///
/// # Example
///
/// ```
/// use overlay_ta::Color;
///
/// let color: Color = "#1E88E5".parse().unwrap();
/// assert_eq!(color.to_string(), "#1e88e5");
/// assert_eq!(Color::default().to_string(), "#ffc107");
/// assert!("blue".parse::<Color>().is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn components(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Amber, the dashboard's colour for a freshly added overlay.
impl Default for Color {
    fn default() -> Self {
        Self::rgb(0xff, 0xc1, 0x07)
    }
}

impl FromStr for Color {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IndicatorError::InvalidColor(s.to_owned());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid());

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = IndicatorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One active overlay: validated parameters plus how it is labelled and
/// drawn.
///
/// The instance's identity is its [`kind`](IndicatorInstance::kind); a
/// [`Registry`](crate::Registry) holds at most one per kind.
///
/// Serializes in the dashboard's shape. `name` and `color` are optional on
/// input and fall back to the defaults of [`new`](IndicatorInstance::new).
///
/// ```
/// use overlay_ta::{IndicatorInstance, IndicatorKind};
///
/// let instance: IndicatorInstance = serde_json::from_str(
///     r#"{"type": "RSI", "params": {"period": 6}}"#,
/// ).unwrap();
///
/// assert_eq!(instance.kind(), IndicatorKind::Rsi);
/// assert_eq!(instance.name(), "RSI(6)");
/// assert_eq!(instance.color().to_string(), "#ffc107");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance", into = "RawInstance")]
pub struct IndicatorInstance {
    params: IndicatorParams,
    name: String,
    color: Color,
}

impl IndicatorInstance {
    /// An instance named after its parameters, in the default colour.
    #[must_use]
    pub fn new(params: impl Into<IndicatorParams>) -> Self {
        let params = params.into();
        Self {
            name: params.to_string(),
            params,
            color: Color::default(),
        }
    }

    /// An instance of `kind` with its default parameters.
    #[must_use]
    pub fn with_defaults(kind: IndicatorKind) -> Self {
        Self::new(IndicatorParams::default_for(kind))
    }

    /// Validates untyped settings and builds an instance from them.
    ///
    /// # Errors
    ///
    /// See [`validate`](crate::validate).
    pub fn from_settings(kind: IndicatorKind, params: &ParamMap) -> Result<Self, IndicatorError> {
        crate::validate(kind, params).map(Self::new)
    }

    /// Replaces the legend label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> IndicatorKind {
        self.params.kind()
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Display for IndicatorInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.color)
    }
}

#[derive(Serialize, Deserialize)]
struct RawInstance {
    #[serde(rename = "type")]
    kind: IndicatorKind,
    params: ParamMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
}

impl TryFrom<RawInstance> for IndicatorInstance {
    type Error = IndicatorError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        let mut instance = Self::from_settings(raw.kind, &raw.params)?;
        if let Some(name) = raw.name {
            instance.name = name;
        }
        if let Some(color) = raw.color {
            instance.color = color;
        }
        Ok(instance)
    }
}

impl From<IndicatorInstance> for RawInstance {
    fn from(instance: IndicatorInstance) -> Self {
        Self {
            kind: instance.kind(),
            params: instance.params.to_map(),
            name: Some(instance.name),
            color: Some(instance.color),
        }
    }
}
