//! Result types produced by the analyzer

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Declared canvas extent of the `<svg>` root
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether a box reaches past the right or bottom edge
    ///
    /// Only the far edges are tested; negative coordinates never count.
    pub fn is_exceeded_by(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x + width > self.width || y + height > self.height
    }
}

/// Issue attached to a single rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RectIssue {
    #[serde(rename = "OUT_OF_BOUNDS")]
    OutOfBounds,
}

impl RectIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            RectIssue::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for RectIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue flagged on a whole design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignIssue {
    #[serde(rename = "EMPTY")]
    Empty,
    #[serde(rename = "OUT_OF_BOUNDS")]
    OutOfBounds,
}

impl DesignIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignIssue::Empty => "EMPTY",
            DesignIssue::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }

    /// Sentence shown to people inspecting a design
    pub fn description(&self) -> &'static str {
        match self {
            DesignIssue::Empty => "No rectangles found",
            DesignIssue::OutOfBounds => "One or more rectangles exceed the SVG boundary",
        }
    }
}

impl fmt::Display for DesignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall classification of a design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    Valid,
    Empty,
    OutOfBounds,
}

impl DesignStatus {
    /// Status implied by an issue list: `Empty` beats `OutOfBounds` beats `Valid`
    pub fn from_issues(issues: &[DesignIssue]) -> Self {
        if issues.contains(&DesignIssue::Empty) {
            DesignStatus::Empty
        } else if issues.contains(&DesignIssue::OutOfBounds) {
            DesignStatus::OutOfBounds
        } else {
            DesignStatus::Valid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DesignStatus::Valid => "valid",
            DesignStatus::Empty => "empty",
            DesignStatus::OutOfBounds => "out_of_bounds",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DesignStatus::Valid => "Valid",
            DesignStatus::Empty => "Empty",
            DesignStatus::OutOfBounds => "Out of bounds",
        }
    }
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle geometry after attribute coercion, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct RectSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

/// A classified rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectItem {
    #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
    x: f64,
    #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
    y: f64,
    #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
    width: f64,
    #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
    height: f64,
    fill: String,
    issue: Option<RectIssue>,
}

impl RectItem {
    fn measure(spec: RectSpec, canvas: Canvas) -> Self {
        let issue = canvas
            .is_exceeded_by(spec.x, spec.y, spec.width, spec.height)
            .then_some(RectIssue::OutOfBounds);
        Self {
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            fill: spec.fill,
            issue,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn issue(&self) -> Option<RectIssue> {
        self.issue
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.issue == Some(RectIssue::OutOfBounds)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Everything derived from one SVG document
///
/// Built only through [`AnalysisResult::new`], which computes the item count,
/// coverage, issues and status from the rectangles. Nothing can change it
/// afterwards, so the derived fields always agree with `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredAnalysis")]
pub struct AnalysisResult {
    filename: String,
    status: DesignStatus,
    #[serde(serialize_with = "serialize_number")]
    svg_width: f64,
    #[serde(serialize_with = "serialize_number")]
    svg_height: f64,
    items_count: usize,
    #[serde(serialize_with = "serialize_number")]
    coverage_ratio: f64,
    issues: Vec<DesignIssue>,
    items: Vec<RectItem>,
}

impl AnalysisResult {
    /// Classify rectangles against the canvas and derive the aggregates
    pub fn new(
        filename: impl Into<String>,
        canvas: Canvas,
        rects: impl IntoIterator<Item = RectSpec>,
    ) -> Self {
        let items: Vec<RectItem> = rects
            .into_iter()
            .map(|spec| RectItem::measure(spec, canvas))
            .collect();
        let coverage_ratio = coverage_ratio(&items, canvas);
        let issues = design_issues(&items);
        let status = DesignStatus::from_issues(&issues);

        Self {
            filename: filename.into(),
            status,
            svg_width: canvas.width,
            svg_height: canvas.height,
            items_count: items.len(),
            coverage_ratio,
            issues,
            items,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn status(&self) -> DesignStatus {
        self.status
    }

    pub fn svg_width(&self) -> f64 {
        self.svg_width
    }

    pub fn svg_height(&self) -> f64 {
        self.svg_height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.svg_width, self.svg_height)
    }

    pub fn items_count(&self) -> usize {
        self.items_count
    }

    pub fn coverage_ratio(&self) -> f64 {
        self.coverage_ratio
    }

    pub fn issues(&self) -> &[DesignIssue] {
        &self.issues
    }

    pub fn items(&self) -> &[RectItem] {
        &self.items
    }

    pub fn has_issue(&self, issue: DesignIssue) -> bool {
        self.issues.contains(&issue)
    }
}

/// Total rectangle area over canvas area; 0 for a zero-area canvas
fn coverage_ratio(items: &[RectItem], canvas: Canvas) -> f64 {
    let canvas_area = canvas.area();
    if canvas_area == 0.0 {
        return 0.0;
    }
    let total: f64 = items.iter().map(RectItem::area).sum();
    total / canvas_area
}

fn design_issues(items: &[RectItem]) -> Vec<DesignIssue> {
    let mut issues = Vec::new();
    if items.is_empty() {
        issues.push(DesignIssue::Empty);
    }
    if items.iter().any(RectItem::is_out_of_bounds) {
        issues.push(DesignIssue::OutOfBounds);
    }
    issues
}

/// JSON has no NaN or infinity; those are written as `"NaN"`, `"Infinity"`
/// and `"-Infinity"` so they read back unchanged
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Number(f64),
    Named(String),
}

/// Inverse of [`serialize_number`]; `null` also reads as NaN
fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StoredNumber>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(StoredNumber::Number(n)) => Ok(n),
        Some(StoredNumber::Named(name)) => match name.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => Err(de::Error::custom(format!("expected a number, got \"{}\"", other))),
        },
    }
}

/// Serialized form of [`AnalysisResult`], checked against a fresh derivation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnalysis {
    filename: String,
    status: DesignStatus,
    #[serde(deserialize_with = "deserialize_number")]
    svg_width: f64,
    #[serde(deserialize_with = "deserialize_number")]
    svg_height: f64,
    items_count: usize,
    issues: Vec<DesignIssue>,
    items: Vec<RectItem>,
}

impl TryFrom<StoredAnalysis> for AnalysisResult {
    type Error = String;

    fn try_from(stored: StoredAnalysis) -> Result<Self, Self::Error> {
        let canvas = Canvas::new(stored.svg_width, stored.svg_height);
        let stored_issues: Vec<Option<RectIssue>> = stored.items.iter().map(|i| i.issue).collect();
        let result = AnalysisResult::new(
            stored.filename,
            canvas,
            stored.items.into_iter().map(|item| RectSpec {
                x: item.x,
                y: item.y,
                width: item.width,
                height: item.height,
                fill: item.fill,
            }),
        );

        for (index, (stored_issue, item)) in stored_issues.iter().zip(&result.items).enumerate() {
            if *stored_issue != item.issue {
                return Err(format!("item {} issue does not match its geometry", index));
            }
        }
        if stored.items_count != result.items_count {
            return Err(format!(
                "itemsCount is {} but there are {} items",
                stored.items_count, result.items_count
            ));
        }
        if stored.issues != result.issues {
            return Err("issues do not match the items".to_string());
        }
        if stored.status != result.status {
            return Err(format!(
                "status '{}' does not match the issues (expected '{}')",
                stored.status, result.status
            ));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> RectSpec {
        RectSpec {
            x,
            y,
            width,
            height,
            fill: "#000000".to_string(),
        }
    }

    #[test]
    fn test_status_priority() {
        assert_eq!(DesignStatus::from_issues(&[]), DesignStatus::Valid);
        assert_eq!(
            DesignStatus::from_issues(&[DesignIssue::OutOfBounds]),
            DesignStatus::OutOfBounds
        );
        assert_eq!(
            DesignStatus::from_issues(&[DesignIssue::Empty, DesignIssue::OutOfBounds]),
            DesignStatus::Empty
        );
    }

    #[test]
    fn test_far_edge_only() {
        let canvas = Canvas::new(100.0, 100.0);
        assert!(!canvas.is_exceeded_by(-50.0, -50.0, 10.0, 10.0));
        assert!(!canvas.is_exceeded_by(50.0, 50.0, 50.0, 50.0));
        assert!(canvas.is_exceeded_by(50.0, 0.0, 50.1, 10.0));
        assert!(canvas.is_exceeded_by(0.0, 95.0, 1.0, 6.0));
    }

    #[test]
    fn test_nan_never_out_of_bounds() {
        let canvas = Canvas::new(100.0, 100.0);
        assert!(!canvas.is_exceeded_by(f64::NAN, 0.0, 10.0, 10.0));
        let canvas = Canvas::new(f64::NAN, f64::NAN);
        assert!(!canvas.is_exceeded_by(0.0, 0.0, 1e9, 1e9));
    }

    #[test]
    fn test_derived_fields() {
        let result = AnalysisResult::new(
            "a.svg",
            Canvas::new(100.0, 100.0),
            vec![rect(0.0, 0.0, 50.0, 50.0), rect(80.0, 80.0, 50.0, 50.0)],
        );
        assert_eq!(result.items_count(), 2);
        assert_eq!(result.coverage_ratio(), 0.5);
        assert_eq!(result.issues(), &[DesignIssue::OutOfBounds]);
        assert_eq!(result.status(), DesignStatus::OutOfBounds);
        assert_eq!(result.items()[0].issue(), None);
        assert_eq!(result.items()[1].issue(), Some(RectIssue::OutOfBounds));
    }

    #[test]
    fn test_coverage_can_exceed_one() {
        let result = AnalysisResult::new(
            "overlap.svg",
            Canvas::new(10.0, 10.0),
            vec![rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0)],
        );
        assert_eq!(result.coverage_ratio(), 2.0);
        assert_eq!(result.status(), DesignStatus::Valid);
    }

    #[test]
    fn test_zero_area_canvas_has_zero_coverage() {
        let result = AnalysisResult::new("z.svg", Canvas::new(0.0, 50.0), vec![rect(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(result.coverage_ratio(), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let result = AnalysisResult::new("a.svg", Canvas::new(100.0, 100.0), vec![rect(0.0, 0.0, 50.0, 50.0)]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["filename"], "a.svg");
        assert_eq!(json["status"], "valid");
        assert_eq!(json["svgWidth"], 100.0);
        assert_eq!(json["itemsCount"], 1);
        assert_eq!(json["coverageRatio"], 0.25);
        assert_eq!(json["issues"], serde_json::json!([]));
        assert_eq!(json["items"][0]["fill"], "#000000");
        assert!(json["items"][0]["issue"].is_null());
    }

    #[test]
    fn test_empty_json_uses_issue_names() {
        let result = AnalysisResult::new("e.svg", Canvas::new(1.0, 1.0), vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "empty");
        assert_eq!(json["issues"], serde_json::json!(["EMPTY"]));
    }

    #[test]
    fn test_nan_survives_json() {
        let result = AnalysisResult::new(
            "nan.svg",
            Canvas::new(100.0, 100.0),
            vec![rect(f64::NAN, 0.0, 10.0, 10.0)],
        );
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains(r#""x":"NaN""#));
        assert!(text.contains(r#""coverageRatio":0.01"#));
        let back: AnalysisResult = serde_json::from_str(&text).unwrap();
        assert!(back.items()[0].x().is_nan());
        assert_eq!(back.status(), DesignStatus::Valid);
    }

    #[test]
    fn test_infinite_geometry_survives_json() {
        let result = AnalysisResult::new(
            "inf.svg",
            Canvas::new(100.0, 100.0),
            vec![rect(0.0, f64::NEG_INFINITY, f64::INFINITY, 1.0)],
        );
        assert_eq!(result.status(), DesignStatus::OutOfBounds);

        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains(r#""width":"Infinity""#));
        assert!(text.contains(r#""y":"-Infinity""#));
        assert!(text.contains(r#""coverageRatio":"Infinity""#));

        let back: AnalysisResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back.items()[0].width(), f64::INFINITY);
        assert_eq!(back.items()[0].y(), f64::NEG_INFINITY);
        assert_eq!(back.items()[0].issue(), Some(RectIssue::OutOfBounds));
        assert_eq!(back.status(), DesignStatus::OutOfBounds);
    }

    #[test]
    fn test_null_geometry_reads_as_nan() {
        let text = r##"{
            "filename": "old.svg",
            "status": "valid",
            "svgWidth": null,
            "svgHeight": 100,
            "itemsCount": 1,
            "coverageRatio": null,
            "issues": [],
            "items": [{"x": null, "y": 0, "width": 1, "height": 1, "fill": "#000000", "issue": null}]
        }"##;
        let back: AnalysisResult = serde_json::from_str(text).unwrap();
        assert!(back.svg_width().is_nan());
        assert!(back.items()[0].x().is_nan());
    }

    #[test]
    fn test_unknown_number_name_rejected() {
        let text = r#"{
            "filename": "bad.svg",
            "status": "empty",
            "svgWidth": "wide",
            "svgHeight": 100,
            "itemsCount": 0,
            "coverageRatio": 0,
            "issues": ["EMPTY"],
            "items": []
        }"#;
        assert!(serde_json::from_str::<AnalysisResult>(text).is_err());
    }

    #[test]
    fn test_inconsistent_json_rejected() {
        let text = r#"{
            "filename": "bad.svg",
            "status": "valid",
            "svgWidth": 100,
            "svgHeight": 100,
            "itemsCount": 0,
            "coverageRatio": 0,
            "issues": [],
            "items": []
        }"#;
        let err = serde_json::from_str::<AnalysisResult>(text).unwrap_err();
        assert!(err.to_string().contains("issues do not match"));
    }
}
