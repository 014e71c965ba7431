// SPDX-License-Identifier: MIT

//! AI coding assistant tools.
//!
//! Eight operations sharing one shape: read a source file when the operation
//! targets one, build a prompt, forward it to the completion client, and wrap
//! the completion in a markdown report. The missing-credential branch lives in
//! the router's model gate, not here.

use crate::core::error::ToolError;
use crate::core::tool::Tool;
use crate::llm::{CompletionClient, GenerationParams};
use crate::tools::FileReader;
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

const SUPPORTED_LANGUAGES: [&str; 7] = [
    "typescript",
    "javascript",
    "python",
    "java",
    "csharp",
    "go",
    "rust",
];
const SUPPORTED_FRAMEWORKS: [&str; 7] = [
    "react", "vue", "angular", "express", "fastapi", "spring", "dotnet",
];

// --- Static schemas ---

static GENERATE_CODE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "language": { "type": "string", "enum": SUPPORTED_LANGUAGES },
            "framework": { "type": "string", "enum": SUPPORTED_FRAMEWORKS },
            "description": { "type": "string" },
            "requirements": { "type": "array", "items": { "type": "string" } },
            "patterns": { "type": "array", "items": { "type": "string" } },
            "includeTests": { "type": "boolean" },
            "includeDocs": { "type": "boolean" }
        },
        "required": ["language", "description", "requirements"]
    })
});

static ANALYZE_CODE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "includeMetrics": { "type": "boolean" },
            "includeSecurity": { "type": "boolean" },
            "includePerformance": { "type": "boolean" }
        },
        "required": ["filePath"]
    })
});

static REFACTOR_CODE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "refactoringType": { "type": "string", "enum": ["extract", "simplify", "optimize", "modernize"] },
            "preserveTests": { "type": "boolean" },
            "includeComments": { "type": "boolean" }
        },
        "required": ["filePath", "refactoringType"]
    })
});

static GENERATE_TESTS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "testFramework": { "type": "string", "enum": ["jest", "vitest", "mocha", "pytest", "junit"] },
            "coverage": { "type": "string", "enum": ["unit", "integration", "e2e", "all"] },
            "includeMocks": { "type": "boolean" }
        },
        "required": ["filePath", "testFramework"]
    })
});

static OPTIMIZE_PERFORMANCE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "optimizationType": { "type": "string", "enum": ["memory", "cpu", "network", "bundle"] },
            "includeBenchmarks": { "type": "boolean" },
            "targetEnvironment": { "type": "string", "enum": ["browser", "node", "mobile", "desktop"] }
        },
        "required": ["filePath", "optimizationType"]
    })
});

static SECURITY_AUDIT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "auditLevel": { "type": "string", "enum": ["basic", "comprehensive", "penetration"] },
            "includeOWASP": { "type": "boolean" },
            "includeDependencies": { "type": "boolean" }
        },
        "required": ["filePath", "auditLevel"]
    })
});

static CODE_REVIEW_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "reviewFocus": { "type": "string", "enum": ["quality", "security", "performance", "maintainability", "all"] },
            "includeExamples": { "type": "boolean" },
            "includeAlternatives": { "type": "boolean" }
        },
        "required": ["filePath", "reviewFocus"]
    })
});

static GENERATE_DOCUMENTATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filePath": { "type": "string" },
            "docType": { "type": "string", "enum": ["api", "readme", "architecture", "deployment", "user"] },
            "format": { "type": "string", "enum": ["markdown", "html", "pdf", "asciidoc"] },
            "includeExamples": { "type": "boolean" },
            "includeDiagrams": { "type": "boolean" }
        },
        "required": ["filePath", "docType"]
    })
});

// --- Arguments ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeArgs {
    pub language: String,
    #[serde(default)]
    pub framework: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
    #[serde(default)]
    pub include_tests: Option<bool>,
    #[serde(default)]
    pub include_docs: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCodeArgs {
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorCodeArgs {
    pub file_path: String,
    pub refactoring_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestsArgs {
    pub file_path: String,
    pub test_framework: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizePerformanceArgs {
    pub file_path: String,
    pub optimization_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAuditArgs {
    pub file_path: String,
    pub audit_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReviewArgs {
    pub file_path: String,
    pub review_focus: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentationArgs {
    pub file_path: String,
    pub doc_type: String,
}

// --- Actions ---

/// The eight coding operations. Each supplies its own schema, sampling
/// parameters, prompt, and report framing; the dispatch plumbing is shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodingAction {
    GenerateCode,
    AnalyzeCode,
    RefactorCode,
    GenerateTests,
    OptimizePerformance,
    SecurityAudit,
    CodeReview,
    GenerateDocumentation,
}

impl CodingAction {
    pub const ALL: [CodingAction; 8] = [
        CodingAction::GenerateCode,
        CodingAction::AnalyzeCode,
        CodingAction::RefactorCode,
        CodingAction::GenerateTests,
        CodingAction::OptimizePerformance,
        CodingAction::SecurityAudit,
        CodingAction::CodeReview,
        CodingAction::GenerateDocumentation,
    ];

    fn name(&self) -> &'static str {
        match self {
            CodingAction::GenerateCode => "generateCode",
            CodingAction::AnalyzeCode => "analyzeCode",
            CodingAction::RefactorCode => "refactorCode",
            CodingAction::GenerateTests => "generateTests",
            CodingAction::OptimizePerformance => "optimizePerformance",
            CodingAction::SecurityAudit => "securityAudit",
            CodingAction::CodeReview => "codeReview",
            CodingAction::GenerateDocumentation => "generateDocumentation",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            CodingAction::GenerateCode => {
                "Generate production-ready code based on requirements and best practices"
            }
            CodingAction::AnalyzeCode => {
                "Analyze code quality, complexity, and provide optimization recommendations"
            }
            CodingAction::RefactorCode => {
                "Refactor code to improve maintainability, performance, and readability"
            }
            CodingAction::GenerateTests => "Generate comprehensive test suites for existing code",
            CodingAction::OptimizePerformance => {
                "Analyze and optimize code performance with specific recommendations"
            }
            CodingAction::SecurityAudit => {
                "Perform security audit and identify vulnerabilities in code"
            }
            CodingAction::CodeReview => {
                "Perform AI-powered code review with detailed feedback and suggestions"
            }
            CodingAction::GenerateDocumentation => {
                "Generate comprehensive documentation for code, APIs, and systems"
            }
        }
    }

    fn schema(&self) -> &'static Value {
        match self {
            CodingAction::GenerateCode => &GENERATE_CODE_SCHEMA,
            CodingAction::AnalyzeCode => &ANALYZE_CODE_SCHEMA,
            CodingAction::RefactorCode => &REFACTOR_CODE_SCHEMA,
            CodingAction::GenerateTests => &GENERATE_TESTS_SCHEMA,
            CodingAction::OptimizePerformance => &OPTIMIZE_PERFORMANCE_SCHEMA,
            CodingAction::SecurityAudit => &SECURITY_AUDIT_SCHEMA,
            CodingAction::CodeReview => &CODE_REVIEW_SCHEMA,
            CodingAction::GenerateDocumentation => &GENERATE_DOCUMENTATION_SCHEMA,
        }
    }

    fn params(&self) -> GenerationParams {
        match self {
            CodingAction::GenerateCode => GenerationParams::new(0.3, 4000),
            CodingAction::AnalyzeCode => GenerationParams::new(0.2, 2000),
            CodingAction::SecurityAudit => GenerationParams::new(0.2, 3000),
            CodingAction::GenerateDocumentation => GenerationParams::new(0.3, 4000),
            _ => GenerationParams::new(0.3, 3000),
        }
    }
}

fn file_extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("txt")
        .to_ascii_lowercase()
}

/// One coding tool: the action decides everything except the shared plumbing.
pub struct CodeAssistTool {
    action: CodingAction,
    model: Option<Arc<CompletionClient>>,
    reader: Arc<FileReader>,
}

impl CodeAssistTool {
    pub fn new(
        action: CodingAction,
        model: Option<Arc<CompletionClient>>,
        reader: Arc<FileReader>,
    ) -> Self {
        Self {
            action,
            model,
            reader,
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(input: Value) -> Result<T, ToolError> {
        serde_json::from_value(input).map_err(|e| ToolError::InvalidArgs(e.to_string()))
    }

    async fn complete(&self, prompt: &str) -> Result<String, ToolError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ToolError::config("language-model client is not configured"))?;
        model.complete(prompt, &self.action.params()).await
    }

    async fn generate_code(&self, args: GenerateCodeArgs) -> Result<String, ToolError> {
        let framework = args
            .framework
            .as_deref()
            .map(|f| format!(" using {}", f))
            .unwrap_or_default();
        let requirements = args
            .requirements
            .iter()
            .map(|r| format!("- {}", r))
            .collect::<Vec<_>>()
            .join("\n");
        let patterns = args
            .patterns
            .as_ref()
            .map(|p| format!("\nDesign Patterns: {}", p.join(", ")))
            .unwrap_or_default();

        let prompt = format!(
            "Generate production-ready {lang} code{framework} based on the following requirements:\n\n\
             Description: {desc}\n\n\
             Requirements:\n{requirements}{patterns}\n\n\
             Use modern {lang} best practices, proper error handling, and clean code principles.{tests}{docs}\n\
             Generate the complete code structure with all necessary files.",
            lang = args.language,
            framework = framework,
            desc = args.description,
            requirements = requirements,
            patterns = patterns,
            tests = if args.include_tests.unwrap_or(false) {
                " Include unit tests."
            } else {
                ""
            },
            docs = if args.include_docs.unwrap_or(false) {
                " Include README documentation."
            } else {
                ""
            },
        );

        let completion = self.complete(&prompt).await?;
        Ok(format!(
            "## Generated {lang} Code{framework}\n\n\
             **Requirements Fulfilled:**\n{requirements}\n\n\
             **Generated Code:**\n```{lang}\n{completion}\n```",
            lang = args.language,
            framework = framework,
            requirements = requirements,
            completion = completion,
        ))
    }

    /// Shared path for the seven file-targeted actions: read, prompt, frame.
    async fn analyze_file(
        &self,
        file_path: &str,
        focus: &str,
        heading: &str,
    ) -> Result<String, ToolError> {
        let code = self.reader.read_to_string(file_path).await?;
        let extension = file_extension(file_path);

        let prompt = format!(
            "{focus} the following {ext} code:\n\n```{ext}\n{code}\n```\n\n\
             Provide specific, actionable findings with clear structure.",
            focus = focus,
            ext = extension,
            code = code,
        );

        let completion = self.complete(&prompt).await?;
        Ok(format!(
            "## {heading} for {path}\n\n\
             **Language:** {ext}\n\
             **Lines of Code:** {lines}\n\
             **Completed:** {now}\n\n\
             {completion}",
            heading = heading,
            path = file_path,
            ext = extension,
            lines = code.lines().count(),
            now = Utc::now().to_rfc3339(),
            completion = completion,
        ))
    }
}

#[async_trait]
impl Tool for CodeAssistTool {
    fn name(&self) -> &str {
        self.action.name()
    }

    fn description(&self) -> &str {
        self.action.description()
    }

    fn schema(&self) -> &Value {
        self.action.schema()
    }

    fn needs_model(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let report = match self.action {
            CodingAction::GenerateCode => {
                let args: GenerateCodeArgs = Self::parse(input)?;
                self.generate_code(args).await?
            }
            CodingAction::AnalyzeCode => {
                let args: AnalyzeCodeArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    "Analyze the quality, complexity, maintainability, security, and performance of",
                    "Code Analysis Results",
                )
                .await?
            }
            CodingAction::RefactorCode => {
                let args: RefactorCodeArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!(
                        "Refactor (type: {}) while preserving functionality",
                        args.refactoring_type
                    ),
                    "Code Refactoring Results",
                )
                .await?
            }
            CodingAction::GenerateTests => {
                let args: GenerateTestsArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!(
                        "Generate comprehensive {} tests, covering edge cases and failure paths, for",
                        args.test_framework
                    ),
                    "Generated Test Suite",
                )
                .await?
            }
            CodingAction::OptimizePerformance => {
                let args: OptimizePerformanceArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!(
                        "Identify bottlenecks and optimize for {} performance in",
                        args.optimization_type
                    ),
                    "Performance Optimization",
                )
                .await?
            }
            CodingAction::SecurityAudit => {
                let args: SecurityAuditArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!(
                        "Perform a {} security audit, including OWASP Top 10 considerations, on",
                        args.audit_level
                    ),
                    "Security Audit Results",
                )
                .await?
            }
            CodingAction::CodeReview => {
                let args: CodeReviewArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!(
                        "Perform a thorough code review focused on {} of",
                        args.review_focus
                    ),
                    "AI Code Review",
                )
                .await?
            }
            CodingAction::GenerateDocumentation => {
                let args: GenerateDocumentationArgs = Self::parse(input)?;
                self.analyze_file(
                    &args.file_path,
                    &format!("Generate comprehensive {} documentation for", args.doc_type),
                    "Generated Documentation",
                )
                .await?
            }
        };

        Ok(Value::String(report))
    }
}

/// All eight coding tools, in advertised order.
pub fn create_tools(
    model: Option<Arc<CompletionClient>>,
    reader: Arc<FileReader>,
) -> Vec<Arc<dyn Tool>> {
    CodingAction::ALL
        .iter()
        .map(|&action| {
            Arc::new(CodeAssistTool::new(action, model.clone(), Arc::clone(&reader)))
                as Arc<dyn Tool>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_have_unique_names() {
        let mut names: Vec<&str> = CodingAction::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        assert_eq!(
            CodingAction::GenerateCode.schema()["required"],
            json!(["language", "description", "requirements"])
        );
        assert_eq!(
            CodingAction::AnalyzeCode.schema()["required"],
            json!(["filePath"])
        );
    }

    #[test]
    fn test_every_tool_declares_model_dependency() {
        let tools = create_tools(None, Arc::new(FileReader));
        assert_eq!(tools.len(), 8);
        assert!(tools.iter().all(|t| t.needs_model()));
    }

    #[tokio::test]
    async fn test_analyze_code_missing_file_is_file_not_found() {
        let tool = CodeAssistTool::new(CodingAction::AnalyzeCode, None, Arc::new(FileReader));

        let err = tool
            .execute(json!({ "filePath": "/nonexistent/file.ts" }))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("/nonexistent/file.ts"));
    }

    #[tokio::test]
    async fn test_invalid_args_rejected_before_io() {
        let tool = CodeAssistTool::new(CodingAction::RefactorCode, None, Arc::new(FileReader));

        let err = tool.execute(json!({ "filePath": 42 })).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgs(_)));
    }

    #[test]
    fn test_file_extension_fallback() {
        assert_eq!(file_extension("src/app.TS"), "ts");
        assert_eq!(file_extension("Makefile"), "txt");
    }
}
