// SPDX-License-Identifier: MIT

//! Visual-analysis tools.
//!
//! Page analyses run through the [`PageRenderer`] seam and score the snapshot
//! against accessibility and performance heuristics plus a static catalog of
//! enterprise UI standards and per-industry benchmarks.

use crate::browser::{PageRenderer, PageSnapshot, Viewport};
use crate::core::error::ToolError;
use crate::core::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

// --- Static schemas ---

static RENDER_AND_ANALYZE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "url": { "type": "string", "description": "URL of the page to analyze" },
            "industry": {
                "type": "string",
                "description": "Industry for best practices comparison",
                "enum": ["hospitality", "healthcare", "education"]
            },
            "viewport": {
                "type": "object",
                "description": "Viewport dimensions",
                "properties": {
                    "width": { "type": "number" },
                    "height": { "type": "number" }
                }
            }
        },
        "required": ["url"]
    })
});

static CROSS_DEVICE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "url": { "type": "string", "description": "URL of the page to analyze" },
            "industry": { "type": "string", "description": "Industry for best practices comparison" }
        },
        "required": ["url"]
    })
});

static BEST_PRACTICES_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "component": { "type": "string", "description": "Component or feature to analyze" },
            "industry": { "type": "string", "description": "Industry for comparison" },
            "compliance": { "type": "string", "description": "Compliance standard to check" }
        },
        "required": ["component", "industry"]
    })
});

// --- Arguments ---

#[derive(Debug, Deserialize)]
pub struct RenderAndAnalyzeArgs {
    pub url: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Deserialize)]
pub struct CrossDeviceArgs {
    pub url: String,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BestPracticesArgs {
    pub component: String,
    pub industry: String,
    #[serde(default)]
    pub compliance: Option<String>,
}

// --- Static catalog ---

fn ui_standards(component: &str) -> &'static [&'static str] {
    match component {
        "enterprise-dashboard" => &[
            "Consistent navigation patterns",
            "Clear information hierarchy",
            "Responsive grid layouts",
            "Accessible color schemes",
            "Professional typography",
        ],
        "mobile-first" => &[
            "Touch-friendly interfaces",
            "Progressive disclosure",
            "Gesture-based navigation",
            "Offline-first design",
            "Performance optimization",
        ],
        "accessibility" => &[
            "WCAG 2.2 AA compliance",
            "Keyboard navigation support",
            "Screen reader compatibility",
            "High contrast modes",
            "Focus management",
        ],
        _ => &[],
    }
}

fn industry_benchmarks(industry: &str) -> Vec<(&'static str, &'static str)> {
    match industry {
        "hospitality" => vec![
            ("booking-flow", "Under 30 seconds to complete"),
            ("mobile-performance", "Lighthouse score > 90"),
            ("accessibility", "WCAG 2.2 AA compliance"),
            ("security", "PCI DSS Level 1 compliance"),
        ],
        "healthcare" => vec![
            ("data-privacy", "HIPAA compliance"),
            ("accessibility", "Section 508 compliance"),
            ("performance", "Sub-second response times"),
            ("security", "HITECH compliance"),
        ],
        "education" => vec![
            ("mobile-first", "Responsive design priority"),
            ("accessibility", "WCAG 2.2 AA compliance"),
            ("performance", "Fast loading on slow connections"),
            ("compliance", "FERPA compliance"),
        ],
        _ => Vec::new(),
    }
}

// --- Scoring ---

struct PageScores {
    accessibility: u32,
    accessibility_issues: Vec<String>,
    performance: u32,
    best_practices: u32,
}

fn score_snapshot(snapshot: &PageSnapshot) -> PageScores {
    let mut issues = Vec::new();
    if snapshot.images_with_alt < snapshot.images {
        issues.push(format!(
            "{} of {} images missing alt text",
            snapshot.images - snapshot.images_with_alt,
            snapshot.images
        ));
    }
    if snapshot.aria_labels == 0 {
        issues.push("No ARIA labels found on the page".to_string());
    }
    if snapshot.title.is_empty() {
        issues.push("Page has no title".to_string());
    }
    let accessibility = 100u32.saturating_sub(issues.len() as u32 * 10);

    // Simplified Lighthouse-style score from wall-clock load time.
    let performance = 100u32.saturating_sub((snapshot.load_time_ms / 100) as u32);
    let best_practices = (accessibility + performance) / 2;

    PageScores {
        accessibility,
        accessibility_issues: issues,
        performance,
        best_practices,
    }
}

fn accessibility_grade(score: u32) -> &'static str {
    if score >= 80 {
        "pass"
    } else if score >= 60 {
        "warning"
    } else {
        "fail"
    }
}

fn recommendations(snapshot: &PageSnapshot, scores: &PageScores) -> Vec<Value> {
    let mut recs = Vec::new();
    if accessibility_grade(scores.accessibility) != "pass" {
        recs.push(json!({
            "category": "accessibility",
            "priority": "high",
            "description": "Improve accessibility compliance",
            "impact": "Better user experience for all users",
            "implementation": "Add alt text, ARIA labels, and improve keyboard navigation",
        }));
    }
    if scores.performance < 90 {
        recs.push(json!({
            "category": "performance",
            "priority": "medium",
            "description": "Optimize page performance",
            "impact": "Faster user experience and better SEO",
            "implementation": "Optimize images, minimize scripts, and improve Core Web Vitals",
        }));
    }
    if snapshot.elements < 5 {
        recs.push(json!({
            "category": "ui",
            "priority": "low",
            "description": "Enhance visual components",
            "impact": "Better user interface and experience",
            "implementation": "Add more interactive components and improve visual hierarchy",
        }));
    }
    recs
}

fn page_analysis(snapshot: &PageSnapshot, industry: &str) -> Value {
    let scores = score_snapshot(snapshot);
    let recs = recommendations(snapshot, &scores);

    let enterprise = if snapshot.elements > 0 {
        vec!["Component-based architecture", "Consistent design patterns"]
    } else {
        vec!["No components detected"]
    };
    let industry_notes = if scores.performance >= 90 {
        vec!["High performance standards met"]
    } else {
        vec!["Performance optimization needed"]
    };

    json!({
        "url": snapshot.url,
        "title": snapshot.title,
        "viewport": snapshot.viewport,
        "loadTimeMs": snapshot.load_time_ms,
        "elements": snapshot.elements,
        "accessibility": {
            "overall": accessibility_grade(scores.accessibility),
            "score": scores.accessibility,
            "issues": scores.accessibility_issues,
        },
        "performance": {
            "loadTimeMs": snapshot.load_time_ms,
            "lighthouseScore": scores.performance,
        },
        "bestPractices": {
            "score": scores.best_practices,
            "enterprise": enterprise,
            "industry": industry_notes,
            "benchmarks": industry_benchmarks(industry)
                .into_iter()
                .map(|(k, v)| json!({ "metric": k, "target": v }))
                .collect::<Vec<_>>(),
        },
        "recommendations": recs,
        "insights": [
            format!(
                "{} scored {}/100 against {} benchmarks",
                snapshot.url, scores.best_practices, industry
            ),
        ],
        "dataPoints": snapshot.elements,
    })
}

const DEVICES: [(&str, Viewport); 3] = [
    (
        "Desktop",
        Viewport {
            width: 1920,
            height: 1080,
        },
    ),
    (
        "Tablet",
        Viewport {
            width: 768,
            height: 1024,
        },
    ),
    (
        "Mobile",
        Viewport {
            width: 375,
            height: 667,
        },
    ),
];

// --- Tools ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualKind {
    RenderAndAnalyze,
    CrossDevice,
    BestPractices,
}

impl VisualKind {
    pub const ALL: [VisualKind; 3] = [
        VisualKind::RenderAndAnalyze,
        VisualKind::CrossDevice,
        VisualKind::BestPractices,
    ];

    fn name(&self) -> &'static str {
        match self {
            VisualKind::RenderAndAnalyze => "renderAndAnalyzePage",
            VisualKind::CrossDevice => "analyzeCrossDevice",
            VisualKind::BestPractices => "crossReferenceBestPractices",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VisualKind::RenderAndAnalyze => {
                "Render deployed page and analyze against enterprise best practices"
            }
            VisualKind::CrossDevice => "Analyze page across multiple devices and viewports",
            VisualKind::BestPractices => {
                "Cross-reference implementation with enterprise best practices"
            }
        }
    }

    fn schema(&self) -> &'static Value {
        match self {
            VisualKind::RenderAndAnalyze => &RENDER_AND_ANALYZE_SCHEMA,
            VisualKind::CrossDevice => &CROSS_DEVICE_SCHEMA,
            VisualKind::BestPractices => &BEST_PRACTICES_SCHEMA,
        }
    }
}

pub struct VisualTool {
    kind: VisualKind,
    renderer: Arc<dyn PageRenderer>,
}

impl VisualTool {
    pub fn new(kind: VisualKind, renderer: Arc<dyn PageRenderer>) -> Self {
        Self { kind, renderer }
    }

    fn parse<T: serde::de::DeserializeOwned>(input: &Value) -> Result<T, ToolError> {
        serde_json::from_value(input.clone()).map_err(|e| ToolError::InvalidArgs(e.to_string()))
    }

    async fn render_and_analyze(&self, args: RenderAndAnalyzeArgs) -> Result<Value, ToolError> {
        let industry = args.industry.as_deref().unwrap_or("hospitality");
        let viewport = args.viewport.unwrap_or_default();
        let snapshot = self.renderer.render(&args.url, viewport).await?;
        let mut payload = page_analysis(&snapshot, industry);
        payload["industry"] = json!(industry);
        Ok(payload)
    }

    async fn cross_device(&self, args: CrossDeviceArgs) -> Result<Value, ToolError> {
        let industry = args.industry.as_deref().unwrap_or("hospitality");

        let mut devices = Vec::with_capacity(DEVICES.len());
        let mut score_total = 0u32;
        for (device, viewport) in DEVICES {
            let snapshot = self.renderer.render(&args.url, viewport).await?;
            let scores = score_snapshot(&snapshot);
            score_total += scores.best_practices;
            devices.push(json!({
                "device": device,
                "viewport": viewport,
                "accessibilityScore": scores.accessibility,
                "performanceScore": scores.performance,
                "bestPracticesScore": scores.best_practices,
            }));
        }
        let consistency = score_total / DEVICES.len() as u32;

        Ok(json!({
            "url": args.url,
            "industry": industry,
            "consistencyScore": consistency,
            "devices": devices,
            "insights": [
                format!("Cross-device consistency for {} is {}/100", args.url, consistency),
            ],
            "dataPoints": DEVICES.len(),
        }))
    }

    fn best_practices(&self, args: BestPracticesArgs) -> Value {
        let standards = ui_standards(&args.component);
        let benchmarks = industry_benchmarks(&args.industry);
        let count = standards.len() + benchmarks.len();

        json!({
            "component": args.component,
            "industry": args.industry,
            "compliance": args.compliance.clone().unwrap_or_else(|| "General".to_string()),
            "enterpriseStandards": standards,
            "industryBenchmarks": benchmarks
                .into_iter()
                .map(|(k, v)| json!({ "metric": k, "target": v }))
                .collect::<Vec<_>>(),
            "insights": [
                format!(
                    "{} cross-referenced against {} {} benchmarks",
                    args.component, args.industry, count
                ),
            ],
            "dataPoints": count,
        })
    }
}

#[async_trait]
impl Tool for VisualTool {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn schema(&self) -> &Value {
        self.kind.schema()
    }

    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        match self.kind {
            VisualKind::RenderAndAnalyze => {
                self.render_and_analyze(Self::parse(&input)?).await
            }
            VisualKind::CrossDevice => self.cross_device(Self::parse(&input)?).await,
            VisualKind::BestPractices => Ok(self.best_practices(Self::parse(&input)?)),
        }
    }
}

/// All three visual-analysis tools over a shared renderer.
pub fn create_tools(renderer: Arc<dyn PageRenderer>) -> Vec<Arc<dyn Tool>> {
    VisualKind::ALL
        .iter()
        .map(|&kind| Arc::new(VisualTool::new(kind, renderer.clone())) as Arc<dyn Tool>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fetch::inspect_markup;

    /// Renderer that serves canned markup without any network access.
    struct CannedRenderer {
        html: &'static str,
        load_time_ms: u64,
    }

    #[async_trait]
    impl PageRenderer for CannedRenderer {
        async fn render(&self, url: &str, viewport: Viewport) -> Result<PageSnapshot, ToolError> {
            Ok(inspect_markup(url, viewport, self.load_time_ms, self.html))
        }
    }

    const ACCESSIBLE_PAGE: &str = r#"<html><head><title>Suites</title></head>
<body><nav aria-label="Main"><a href="/">Home</a></nav>
<img src="/a.png" alt="Suite A"><img src="/b.png" alt="Suite B">
<div><p>Welcome</p></div></body></html>"#;

    fn renderer(html: &'static str, load_time_ms: u64) -> Arc<dyn PageRenderer> {
        Arc::new(CannedRenderer { html, load_time_ms })
    }

    #[tokio::test]
    async fn test_render_and_analyze_scores_accessible_page() {
        let tool = VisualTool::new(VisualKind::RenderAndAnalyze, renderer(ACCESSIBLE_PAGE, 200));
        let payload = tool
            .execute(json!({ "url": "https://vendoora.example" }))
            .await
            .unwrap();

        assert_eq!(payload["accessibility"]["overall"], "pass");
        assert_eq!(payload["accessibility"]["score"], 100);
        assert_eq!(payload["performance"]["lighthouseScore"], 98);
        assert_eq!(payload["industry"], "hospitality");
    }

    #[tokio::test]
    async fn test_missing_alt_text_flagged() {
        let html = r#"<html><head><title>T</title></head><body>
<img src="/a.png"><img src="/b.png" alt="b"></body></html>"#;
        let tool = VisualTool::new(VisualKind::RenderAndAnalyze, renderer(html, 100));
        let payload = tool.execute(json!({ "url": "https://x.example" })).await.unwrap();

        let issues = payload["accessibility"]["issues"].as_array().unwrap();
        assert!(issues.iter().any(|i| i.as_str().unwrap().contains("alt text")));
        assert!(payload["accessibility"]["score"].as_u64().unwrap() < 100);
    }

    #[tokio::test]
    async fn test_slow_page_gets_performance_recommendation() {
        let tool = VisualTool::new(VisualKind::RenderAndAnalyze, renderer(ACCESSIBLE_PAGE, 5000));
        let payload = tool
            .execute(json!({ "url": "https://slow.example" }))
            .await
            .unwrap();

        assert_eq!(payload["performance"]["lighthouseScore"], 50);
        let recs = payload["recommendations"].as_array().unwrap();
        assert!(recs.iter().any(|r| r["category"] == "performance"));
    }

    #[tokio::test]
    async fn test_cross_device_reports_three_devices() {
        let tool = VisualTool::new(VisualKind::CrossDevice, renderer(ACCESSIBLE_PAGE, 200));
        let payload = tool
            .execute(json!({ "url": "https://vendoora.example" }))
            .await
            .unwrap();

        let devices = payload["devices"].as_array().unwrap();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0]["device"], "Desktop");
        assert_eq!(devices[2]["viewport"]["width"], 375);
        assert!(payload["consistencyScore"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_best_practices_catalog_lookup() {
        let tool = VisualTool::new(VisualKind::BestPractices, renderer(ACCESSIBLE_PAGE, 100));
        let payload = tool
            .execute(json!({ "component": "accessibility", "industry": "healthcare" }))
            .await
            .unwrap();

        let standards = payload["enterpriseStandards"].as_array().unwrap();
        assert!(standards
            .iter()
            .any(|s| s.as_str().unwrap().contains("WCAG 2.2")));
        let benchmarks = payload["industryBenchmarks"].as_array().unwrap();
        assert!(benchmarks.iter().any(|b| b["target"] == "HIPAA compliance"));
        assert_eq!(payload["compliance"], "General");
    }

    #[tokio::test]
    async fn test_unknown_component_yields_empty_standards() {
        let tool = VisualTool::new(VisualKind::BestPractices, renderer(ACCESSIBLE_PAGE, 100));
        let payload = tool
            .execute(json!({ "component": "mystery", "industry": "hospitality" }))
            .await
            .unwrap();
        assert!(payload["enterpriseStandards"].as_array().unwrap().is_empty());
    }
}
