//! Validated graph requests: mode, label size, zoom and the expression
//! itself. All validation lives here so the script builders and the render
//! session can assume well-formed input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for incoming graph requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("expression must not be empty")]
    EmptyExpression,
    #[error("label size {0} is not one of 1, 2, 3, 4, 6, 8")]
    InvalidLabelSize(u8),
    #[error("zoom level {0} is outside -3..=3")]
    ZoomOutOfRange(i8),
    #[error("unknown graph mode: {0}")]
    UnknownMode(String),
}

/// Which calculator the target page drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphMode {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

impl GraphMode {
    /// Name of the calculator global under `window.GraTeX` on the page.
    pub fn calculator_global(self) -> &'static str {
        match self {
            GraphMode::TwoD => "calculator2D",
            GraphMode::ThreeD => "calculator3D",
        }
    }

    /// Only the 2-D calculator exposes a scriptable viewport.
    pub fn supports_zoom(self) -> bool {
        matches!(self, GraphMode::TwoD)
    }
}

impl FromStr for GraphMode {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2d" => Ok(GraphMode::TwoD),
            "3d" => Ok(GraphMode::ThreeD),
            other => Err(RequestError::UnknownMode(other.to_owned())),
        }
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphMode::TwoD => "2d",
            GraphMode::ThreeD => "3d",
        })
    }
}

/// Label sizes the page's size selector accepts. The numbering has gaps; 5
/// and 7 do not exist on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LabelSize {
    Tiny,
    Small,
    Medium,
    #[default]
    Standard,
    Large,
    Huge,
}

impl LabelSize {
    pub const ALL: [LabelSize; 6] = [
        LabelSize::Tiny,
        LabelSize::Small,
        LabelSize::Medium,
        LabelSize::Standard,
        LabelSize::Large,
        LabelSize::Huge,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            LabelSize::Tiny => 1,
            LabelSize::Small => 2,
            LabelSize::Medium => 3,
            LabelSize::Standard => 4,
            LabelSize::Large => 6,
            LabelSize::Huge => 8,
        }
    }

    /// Value string for the page's `<select>` control.
    pub fn selector_value(self) -> &'static str {
        match self {
            LabelSize::Tiny => "1",
            LabelSize::Small => "2",
            LabelSize::Medium => "3",
            LabelSize::Standard => "4",
            LabelSize::Large => "6",
            LabelSize::Huge => "8",
        }
    }
}

impl TryFrom<u8> for LabelSize {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LabelSize::Tiny),
            2 => Ok(LabelSize::Small),
            3 => Ok(LabelSize::Medium),
            4 => Ok(LabelSize::Standard),
            6 => Ok(LabelSize::Large),
            8 => Ok(LabelSize::Huge),
            other => Err(RequestError::InvalidLabelSize(other)),
        }
    }
}

impl From<LabelSize> for u8 {
    fn from(size: LabelSize) -> u8 {
        size.as_u8()
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Zoom steps away from the default viewport, always within `[-3, 3]`.
/// Positive levels zoom in, negative levels zoom out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct ZoomLevel(i8);

impl ZoomLevel {
    pub const MIN: i8 = -3;
    pub const MAX: i8 = 3;

    /// Half the default viewport width in math units.
    const BASE_HALF_WIDTH: f64 = 10.0;

    pub fn new(level: i8) -> Result<Self, RequestError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(ZoomLevel(level))
        } else {
            Err(RequestError::ZoomOutOfRange(level))
        }
    }

    /// Clamp into range instead of failing.
    pub fn clamped(level: i8) -> Self {
        ZoomLevel(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn level(self) -> i8 {
        self.0
    }

    pub fn is_default(self) -> bool {
        self.0 == 0
    }

    /// One step closer; `None` at the limit.
    pub fn zoom_in(self) -> Option<Self> {
        (self.0 < Self::MAX).then_some(ZoomLevel(self.0 + 1))
    }

    /// One step further out; `None` at the limit.
    pub fn zoom_out(self) -> Option<Self> {
        (self.0 > Self::MIN).then_some(ZoomLevel(self.0 - 1))
    }

    /// Magnification factor relative to the default viewport.
    pub fn magnification(self) -> u32 {
        1u32 << self.0.unsigned_abs()
    }

    /// Half the viewport width at this level.
    pub fn half_width(self) -> f64 {
        if self.0 >= 0 {
            Self::BASE_HALF_WIDTH / f64::from(self.magnification())
        } else {
            Self::BASE_HALF_WIDTH * f64::from(self.magnification())
        }
    }
}

impl TryFrom<i8> for ZoomLevel {
    type Error = RequestError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        ZoomLevel::new(value)
    }
}

impl From<ZoomLevel> for i8 {
    fn from(zoom: ZoomLevel) -> i8 {
        zoom.0
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Things a sanitization pass wants the caller to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestWarning {
    /// The 3-D calculator has no scriptable viewport; the zoom was dropped.
    #[serde(rename = "zoom_ignored_in_3d")]
    ZoomIgnoredIn3d,
}

impl fmt::Display for RequestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestWarning::ZoomIgnoredIn3d => {
                f.write_str("zoom is ignored for 3d graphs; using the default viewport")
            }
        }
    }
}

/// A validated request to render one expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub expression: String,
    #[serde(default)]
    pub mode: GraphMode,
    #[serde(default)]
    pub label_size: LabelSize,
    #[serde(default)]
    pub zoom: ZoomLevel,
}

impl GraphRequest {
    /// A request with default options around a non-empty expression.
    pub fn new(expression: impl Into<String>) -> Result<Self, RequestError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(RequestError::EmptyExpression);
        }
        Ok(GraphRequest {
            expression,
            mode: GraphMode::default(),
            label_size: LabelSize::default(),
            zoom: ZoomLevel::default(),
        })
    }

    pub fn with_mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_label_size(mut self, label_size: LabelSize) -> Self {
        self.label_size = label_size;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    /// Resolve option combinations the page cannot honor. Today that is
    /// zoom on a 3-D graph, which falls back to the default viewport.
    pub fn sanitized(mut self) -> (Self, Vec<RequestWarning>) {
        let mut warnings = Vec::new();
        if !self.mode.supports_zoom() && !self.zoom.is_default() {
            self.zoom = ZoomLevel::default();
            warnings.push(RequestWarning::ZoomIgnoredIn3d);
        }
        (self, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_both_spellings() {
        assert_eq!("2d".parse::<GraphMode>().unwrap(), GraphMode::TwoD);
        assert_eq!("3D".parse::<GraphMode>().unwrap(), GraphMode::ThreeD);
        assert_eq!(
            "flat".parse::<GraphMode>(),
            Err(RequestError::UnknownMode("flat".to_owned()))
        );
    }

    #[test]
    fn mode_knows_its_calculator_global() {
        assert_eq!(GraphMode::TwoD.calculator_global(), "calculator2D");
        assert_eq!(GraphMode::ThreeD.calculator_global(), "calculator3D");
        assert!(GraphMode::TwoD.supports_zoom());
        assert!(!GraphMode::ThreeD.supports_zoom());
    }

    #[test]
    fn label_sizes_are_the_page_values() {
        let values: Vec<u8> = LabelSize::ALL.iter().map(|s| s.as_u8()).collect();
        assert_eq!(values, [1, 2, 3, 4, 6, 8]);
        assert_eq!(LabelSize::default(), LabelSize::Standard);
        assert_eq!(LabelSize::try_from(6).unwrap(), LabelSize::Large);
        assert_eq!(
            LabelSize::try_from(5),
            Err(RequestError::InvalidLabelSize(5))
        );
        assert_eq!(LabelSize::Huge.selector_value(), "8");
    }

    #[test]
    fn zoom_rejects_out_of_range_and_clamps_on_request() {
        assert!(ZoomLevel::new(3).is_ok());
        assert!(ZoomLevel::new(-3).is_ok());
        assert_eq!(ZoomLevel::new(4), Err(RequestError::ZoomOutOfRange(4)));
        assert_eq!(ZoomLevel::clamped(100).level(), 3);
        assert_eq!(ZoomLevel::clamped(-100).level(), -3);
    }

    #[test]
    fn zoom_steps_stop_at_the_limits() {
        let max = ZoomLevel::new(3).unwrap();
        let min = ZoomLevel::new(-3).unwrap();
        assert_eq!(max.zoom_in(), None);
        assert_eq!(min.zoom_out(), None);
        assert_eq!(ZoomLevel::default().zoom_in().unwrap().level(), 1);
        assert_eq!(ZoomLevel::default().zoom_out().unwrap().level(), -1);
    }

    #[test]
    fn zoom_magnification_and_half_width() {
        assert_eq!(ZoomLevel::default().magnification(), 1);
        assert_eq!(ZoomLevel::new(2).unwrap().magnification(), 4);
        assert_eq!(ZoomLevel::new(-3).unwrap().magnification(), 8);

        assert_eq!(ZoomLevel::default().half_width(), 10.0);
        assert_eq!(ZoomLevel::new(1).unwrap().half_width(), 5.0);
        assert_eq!(ZoomLevel::new(3).unwrap().half_width(), 1.25);
        assert_eq!(ZoomLevel::new(-2).unwrap().half_width(), 40.0);
    }

    #[test]
    fn empty_expressions_are_rejected() {
        assert_eq!(
            GraphRequest::new("").unwrap_err(),
            RequestError::EmptyExpression
        );
        assert_eq!(
            GraphRequest::new("   ").unwrap_err(),
            RequestError::EmptyExpression
        );
        assert!(GraphRequest::new("y = x").is_ok());
    }

    #[test]
    fn sanitize_drops_zoom_for_3d() {
        let request = GraphRequest::new("z = x^2 + y^2")
            .unwrap()
            .with_mode(GraphMode::ThreeD)
            .with_zoom(ZoomLevel::new(2).unwrap());
        let (request, warnings) = request.sanitized();
        assert!(request.zoom.is_default());
        assert_eq!(warnings, vec![RequestWarning::ZoomIgnoredIn3d]);
    }

    #[test]
    fn sanitize_keeps_2d_zoom() {
        let request = GraphRequest::new("y = x")
            .unwrap()
            .with_zoom(ZoomLevel::new(-1).unwrap());
        let (request, warnings) = request.sanitized();
        assert_eq!(request.zoom.level(), -1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn zoom_deserialization_validates_range() {
        let ok: ZoomLevel = serde_json::from_str("2").unwrap();
        assert_eq!(ok.level(), 2);
        assert!(serde_json::from_str::<ZoomLevel>("9").is_err());
    }

    #[test]
    fn label_size_serializes_as_its_page_value() {
        assert_eq!(serde_json::to_string(&LabelSize::Large).unwrap(), "6");
        let parsed: LabelSize = serde_json::from_str("8").unwrap();
        assert_eq!(parsed, LabelSize::Huge);
    }
}
