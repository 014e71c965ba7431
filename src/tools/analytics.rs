// SPDX-License-Identifier: MIT

//! Analytics tools.
//!
//! These fabricate sample data rather than querying a live store; the
//! generation is seeded from the invocation arguments so the same request
//! always yields the same report, and every payload is flagged
//! `"sampleData": true`. Payloads carry `dataPoints` and `insights`, which the
//! router lifts into the envelope metadata.

use crate::core::error::ToolError;
use crate::core::tool::Tool;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// --- Static schemas ---

static ANALYZE_USER_BEHAVIOR_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "dataSource": { "type": "string", "description": "Source of user behavior data" },
            "timeRange": { "type": "string", "enum": ["1h", "24h", "7d", "30d", "90d"], "default": "7d" },
            "metrics": { "type": "array", "items": { "type": "string" } },
            "includeInsights": { "type": "boolean", "default": true }
        },
        "required": ["dataSource"]
    })
});

static MONITOR_PERFORMANCE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "metricType": { "type": "string", "enum": ["application", "system", "database", "network", "all"] },
            "interval": { "type": "string", "enum": ["1m", "5m", "15m", "1h"], "default": "5m" },
            "includeAlerts": { "type": "boolean", "default": true },
            "threshold": { "type": "number", "default": 0.8 }
        },
        "required": ["metricType"]
    })
});

static BUSINESS_INTELLIGENCE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "reportType": { "type": "string", "enum": ["executive", "operational", "financial", "customer", "comprehensive"] },
            "timeRange": { "type": "string", "enum": ["1d", "7d", "30d", "90d", "1y"], "default": "30d" },
            "includeForecasting": { "type": "boolean", "default": true },
            "format": { "type": "string", "enum": ["json", "csv", "pdf", "dashboard"], "default": "json" }
        },
        "required": ["reportType"]
    })
});

static DATA_VISUALIZATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "chartType": { "type": "string", "enum": ["line", "bar", "pie", "scatter", "heatmap", "dashboard"] },
            "dataSource": { "type": "string" },
            "dimensions": { "type": "array", "items": { "type": "string" } },
            "metrics": { "type": "array", "items": { "type": "string" } },
            "interactive": { "type": "boolean", "default": true }
        },
        "required": ["chartType", "dataSource"]
    })
});

static ANALYZE_TRENDS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "trendType": { "type": "string", "enum": ["user", "business", "technical", "market", "comprehensive"] },
            "timeRange": { "type": "string", "enum": ["30d", "90d", "180d", "1y", "2y"], "default": "90d" },
            "includePredictions": { "type": "boolean", "default": true },
            "confidenceLevel": { "type": "number", "default": 0.95 }
        },
        "required": ["trendType"]
    })
});

static CUSTOM_DASHBOARD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "dashboardName": { "type": "string" },
            "widgets": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string" },
                        "title": { "type": "string" },
                        "dataSource": { "type": "string" }
                    }
                }
            },
            "refreshInterval": { "type": "string", "enum": ["30s", "1m", "5m", "15m", "manual"], "default": "5m" },
            "includeFilters": { "type": "boolean", "default": true }
        },
        "required": ["dashboardName"]
    })
});

// --- Arguments ---

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeUserBehaviorArgs {
    pub data_source: String,
    #[serde(default = "AnalyzeUserBehaviorArgs::default_time_range")]
    pub time_range: String,
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub include_insights: bool,
}

impl AnalyzeUserBehaviorArgs {
    fn default_time_range() -> String {
        "7d".to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorPerformanceArgs {
    pub metric_type: String,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default = "default_true")]
    pub include_alerts: bool,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessIntelligenceArgs {
    pub report_type: String,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default = "default_true")]
    pub include_forecasting: bool,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataVisualizationArgs {
    pub chart_type: String,
    pub data_source: String,
    #[serde(default)]
    pub dimensions: Option<Vec<String>>,
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub interactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTrendsArgs {
    pub trend_type: String,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default = "default_true")]
    pub include_predictions: bool,
    #[serde(default)]
    pub confidence_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDashboardArgs {
    pub dashboard_name: String,
    #[serde(default)]
    pub widgets: Option<Vec<WidgetConfig>>,
    #[serde(default)]
    pub refresh_interval: Option<String>,
    #[serde(default = "default_true")]
    pub include_filters: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub title: String,
    #[serde(default)]
    pub data_source: Option<String>,
}

// --- Sample data generation ---

/// Deterministic RNG per (tool, arguments) so repeated requests reproduce.
fn seeded_rng(tool: &str, args: &Value) -> StdRng {
    let mut hasher = DefaultHasher::new();
    tool.hash(&mut hasher);
    args.to_string().hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

fn time_range_hours(range: &str) -> i64 {
    match range {
        "1h" => 1,
        "24h" | "1d" => 24,
        "7d" => 24 * 7,
        "30d" => 24 * 30,
        "90d" => 24 * 90,
        "180d" => 24 * 180,
        "1y" => 24 * 365,
        "2y" => 24 * 730,
        _ => 24 * 7,
    }
}

const SAMPLE_USERS: [&str; 5] = ["user1", "user2", "user3", "user4", "user5"];
const SAMPLE_ACTIONS: [&str; 5] = ["page_view", "click", "scroll", "form_submit", "purchase"];
const SAMPLE_PAGES: [&str; 5] = ["home", "products", "cart", "checkout", "profile"];

fn user_behavior_payload(args: &AnalyzeUserBehaviorArgs, rng: &mut StdRng) -> Value {
    let hours = time_range_hours(&args.time_range);
    let window_start = Utc::now() - Duration::hours(hours);
    let event_count = 100usize;

    let mut events = Vec::with_capacity(event_count);
    for _ in 0..event_count {
        let user = SAMPLE_USERS[rng.random_range(0..SAMPLE_USERS.len())];
        let offset_mins = rng.random_range(0..hours * 60);
        events.push(json!({
            "userId": user,
            "sessionId": format!("session_{}_{}", user, rng.random_range(0..1000)),
            "timestamp": (window_start + Duration::minutes(offset_mins)).to_rfc3339(),
            "action": SAMPLE_ACTIONS[rng.random_range(0..SAMPLE_ACTIONS.len())],
            "page": SAMPLE_PAGES[rng.random_range(0..SAMPLE_PAGES.len())],
            "durationSecs": rng.random_range(10..310),
        }));
    }
    events.sort_by(|a, b| a["timestamp"].as_str().cmp(&b["timestamp"].as_str()));

    let engagement = json!({
        "sessions": rng.random_range(40..80),
        "avgSessionDurationSecs": rng.random_range(60..600),
        "bounceRate": (rng.random_range(20..60) as f64) / 100.0,
        "conversionRate": (rng.random_range(1..12) as f64) / 100.0,
        "retentionRate": (rng.random_range(30..90) as f64) / 100.0,
    });

    let insights: Vec<String> = if args.include_insights {
        vec![
            format!(
                "Most frequent action over {} is {}",
                args.time_range, SAMPLE_ACTIONS[rng.random_range(0..SAMPLE_ACTIONS.len())]
            ),
            format!(
                "Engagement concentrated on the {} page",
                SAMPLE_PAGES[rng.random_range(0..SAMPLE_PAGES.len())]
            ),
        ]
    } else {
        Vec::new()
    };

    json!({
        "sampleData": true,
        "dataSource": args.data_source,
        "timeRange": args.time_range,
        "requestedMetrics": args.metrics.clone().unwrap_or_else(|| vec![
            "engagement".to_string(),
            "retention".to_string(),
            "conversion".to_string(),
        ]),
        "events": events,
        "engagementMetrics": engagement,
        "insights": insights,
        "dataPoints": event_count,
    })
}

fn performance_payload(args: &MonitorPerformanceArgs, rng: &mut StdRng) -> Value {
    let threshold = args.threshold.unwrap_or(0.8);
    let metric_names: Vec<&str> = match args.metric_type.as_str() {
        "application" => vec!["responseTimeMs", "throughputRps", "errorRate"],
        "system" => vec!["cpuLoad", "memoryUsage", "diskUsage"],
        "database" => vec!["queryTimeMs", "connectionPoolUsage", "slowQueries"],
        "network" => vec!["latencyMs", "packetLoss", "bandwidthUsage"],
        _ => vec![
            "responseTimeMs",
            "throughputRps",
            "errorRate",
            "cpuLoad",
            "memoryUsage",
            "latencyMs",
        ],
    };

    let mut metrics = serde_json::Map::new();
    let mut alerts = Vec::new();
    for name in &metric_names {
        let value = (rng.random_range(0..1000) as f64) / 1000.0;
        metrics.insert(name.to_string(), json!(value));
        if args.include_alerts && value > threshold {
            alerts.push(json!({
                "metric": name,
                "value": value,
                "threshold": threshold,
                "severity": if value > 0.95 { "critical" } else { "warning" },
            }));
        }
    }

    let insights = vec![format!(
        "{} of {} monitored metrics exceeded the {:.2} threshold",
        alerts.len(),
        metric_names.len(),
        threshold
    )];

    json!({
        "sampleData": true,
        "metricType": args.metric_type,
        "interval": args.interval.clone().unwrap_or_else(|| "5m".to_string()),
        "metrics": metrics,
        "alerts": alerts,
        "insights": insights,
        "dataPoints": metric_names.len(),
    })
}

fn business_intelligence_payload(args: &BusinessIntelligenceArgs, rng: &mut StdRng) -> Value {
    let kpis = json!({
        "revenue": rng.random_range(100_000..1_000_000),
        "growthRate": (rng.random_range(-50..250) as f64) / 1000.0,
        "churnRate": (rng.random_range(10..80) as f64) / 1000.0,
        "customerAcquisitionCost": rng.random_range(20..200),
        "netPromoterScore": rng.random_range(10..75),
    });

    let forecast = if args.include_forecasting {
        let mut points = Vec::new();
        let mut base = rng.random_range(100_000..200_000) as f64;
        for month in 1..=6 {
            base *= 1.0 + (rng.random_range(-30..80) as f64) / 1000.0;
            points.push(json!({ "monthAhead": month, "projectedRevenue": base.round() }));
        }
        json!(points)
    } else {
        Value::Null
    };

    json!({
        "sampleData": true,
        "reportType": args.report_type,
        "timeRange": args.time_range.clone().unwrap_or_else(|| "30d".to_string()),
        "format": args.format.clone().unwrap_or_else(|| "json".to_string()),
        "kpis": kpis,
        "forecast": forecast,
        "insights": [
            format!("{} report generated from sample KPIs", args.report_type),
        ],
        "dataPoints": 5,
    })
}

fn data_visualization_payload(args: &DataVisualizationArgs, rng: &mut StdRng) -> Value {
    let point_count = 24usize;
    let series: Vec<Value> = (0..point_count)
        .map(|i| {
            json!({
                "x": i,
                "y": rng.random_range(0..100),
            })
        })
        .collect();

    json!({
        "sampleData": true,
        "chartType": args.chart_type,
        "dataSource": args.data_source,
        "dimensions": args.dimensions.clone().unwrap_or_default(),
        "metrics": args.metrics.clone().unwrap_or_default(),
        "interactive": args.interactive,
        "series": series,
        "insights": [
            format!("Rendered a {} chart from {}", args.chart_type, args.data_source),
        ],
        "dataPoints": point_count,
    })
}

fn trends_payload(args: &AnalyzeTrendsArgs, rng: &mut StdRng) -> Value {
    let range = args.time_range.clone().unwrap_or_else(|| "90d".to_string());
    let weeks = (time_range_hours(&range) / (24 * 7)).max(4) as usize;
    let confidence = args.confidence_level.unwrap_or(0.95);

    let mut value = rng.random_range(40..60) as f64;
    let mut series = Vec::with_capacity(weeks);
    for week in 0..weeks {
        value += (rng.random_range(-40..60) as f64) / 10.0;
        series.push(json!({ "week": week, "value": (value * 10.0).round() / 10.0 }));
    }

    let first = series.first().and_then(|p| p["value"].as_f64()).unwrap_or(0.0);
    let last = series.last().and_then(|p| p["value"].as_f64()).unwrap_or(0.0);
    let direction = if last > first { "upward" } else { "downward" };

    let predictions = if args.include_predictions {
        let slope = (last - first) / weeks.max(1) as f64;
        json!((1..=4)
            .map(|w| json!({
                "weekAhead": w,
                "predicted": ((last + slope * w as f64) * 10.0).round() / 10.0,
                "confidence": confidence,
            }))
            .collect::<Vec<_>>())
    } else {
        Value::Null
    };

    json!({
        "sampleData": true,
        "trendType": args.trend_type,
        "timeRange": range,
        "series": series,
        "direction": direction,
        "predictions": predictions,
        "insights": [
            format!("{} trend is {} over {}", args.trend_type, direction, range),
        ],
        "dataPoints": weeks,
    })
}

fn dashboard_payload(args: &CustomDashboardArgs) -> Value {
    let widgets: Vec<Value> = args
        .widgets
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|w| {
            json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "type": w.widget_type,
                "title": w.title,
                "dataSource": w.data_source.clone().unwrap_or_else(|| "application".to_string()),
            })
        })
        .collect();

    let widget_count = widgets.len();
    json!({
        "sampleData": true,
        "dashboardName": args.dashboard_name,
        "widgets": widgets,
        "refreshInterval": args.refresh_interval.clone().unwrap_or_else(|| "5m".to_string()),
        "includeFilters": args.include_filters,
        "insights": [
            format!("Dashboard '{}' configured with {} widgets", args.dashboard_name, widget_count),
        ],
        "dataPoints": widget_count,
    })
}

// --- Tools ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalyticsKind {
    UserBehavior,
    Performance,
    BusinessIntelligence,
    DataVisualization,
    Trends,
    CustomDashboard,
}

impl AnalyticsKind {
    pub const ALL: [AnalyticsKind; 6] = [
        AnalyticsKind::UserBehavior,
        AnalyticsKind::Performance,
        AnalyticsKind::BusinessIntelligence,
        AnalyticsKind::DataVisualization,
        AnalyticsKind::Trends,
        AnalyticsKind::CustomDashboard,
    ];

    fn name(&self) -> &'static str {
        match self {
            AnalyticsKind::UserBehavior => "analyzeUserBehavior",
            AnalyticsKind::Performance => "monitorPerformance",
            AnalyticsKind::BusinessIntelligence => "generateBusinessIntelligence",
            AnalyticsKind::DataVisualization => "createDataVisualization",
            AnalyticsKind::Trends => "analyzeTrends",
            AnalyticsKind::CustomDashboard => "createCustomDashboard",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            AnalyticsKind::UserBehavior => {
                "Analyze user behavior patterns, engagement metrics, and user journey insights"
            }
            AnalyticsKind::Performance => {
                "Monitor application performance, system metrics, and real-time analytics"
            }
            AnalyticsKind::BusinessIntelligence => {
                "Generate business intelligence reports, KPIs, and strategic insights"
            }
            AnalyticsKind::DataVisualization => {
                "Create charts, graphs, and interactive data visualizations"
            }
            AnalyticsKind::Trends => "Analyze trends, patterns, and predictive analytics",
            AnalyticsKind::CustomDashboard => {
                "Create custom analytics dashboards with configurable widgets and metrics"
            }
        }
    }

    fn schema(&self) -> &'static Value {
        match self {
            AnalyticsKind::UserBehavior => &ANALYZE_USER_BEHAVIOR_SCHEMA,
            AnalyticsKind::Performance => &MONITOR_PERFORMANCE_SCHEMA,
            AnalyticsKind::BusinessIntelligence => &BUSINESS_INTELLIGENCE_SCHEMA,
            AnalyticsKind::DataVisualization => &DATA_VISUALIZATION_SCHEMA,
            AnalyticsKind::Trends => &ANALYZE_TRENDS_SCHEMA,
            AnalyticsKind::CustomDashboard => &CUSTOM_DASHBOARD_SCHEMA,
        }
    }
}

pub struct AnalyticsTool {
    kind: AnalyticsKind,
}

impl AnalyticsTool {
    pub fn new(kind: AnalyticsKind) -> Self {
        Self { kind }
    }

    fn parse<T: serde::de::DeserializeOwned>(input: &Value) -> Result<T, ToolError> {
        serde_json::from_value(input.clone()).map_err(|e| ToolError::InvalidArgs(e.to_string()))
    }
}

#[async_trait]
impl Tool for AnalyticsTool {
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
        let mut rng = seeded_rng(self.kind.name(), &input);

        let payload = match self.kind {
            AnalyticsKind::UserBehavior => {
                let args: AnalyzeUserBehaviorArgs = Self::parse(&input)?;
                user_behavior_payload(&args, &mut rng)
            }
            AnalyticsKind::Performance => {
                let args: MonitorPerformanceArgs = Self::parse(&input)?;
                performance_payload(&args, &mut rng)
            }
            AnalyticsKind::BusinessIntelligence => {
                let args: BusinessIntelligenceArgs = Self::parse(&input)?;
                business_intelligence_payload(&args, &mut rng)
            }
            AnalyticsKind::DataVisualization => {
                let args: DataVisualizationArgs = Self::parse(&input)?;
                data_visualization_payload(&args, &mut rng)
            }
            AnalyticsKind::Trends => {
                let args: AnalyzeTrendsArgs = Self::parse(&input)?;
                trends_payload(&args, &mut rng)
            }
            AnalyticsKind::CustomDashboard => {
                let args: CustomDashboardArgs = Self::parse(&input)?;
                dashboard_payload(&args)
            }
        };

        Ok(payload)
    }
}

/// All six analytics tools, in advertised order.
pub fn create_tools() -> Vec<Arc<dyn Tool>> {
    AnalyticsKind::ALL
        .iter()
        .map(|&kind| Arc::new(AnalyticsTool::new(kind)) as Arc<dyn Tool>)
        .collect()
}
