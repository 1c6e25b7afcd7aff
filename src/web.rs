//! HTTP surface: the analyzer page, a JSON endpoint and a health check.

use crate::analysis::{AnalysisRequest, KeyPhraseResult, LanguageResult, MAX_TEXT_BYTES};
use crate::dispatcher::{AnalysisOutcome, AnalysisReport, Dispatcher};
use crate::language::{LanguageTable, UNKNOWN_CODE};
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language_hint: String,
}

impl From<AnalyzeForm> for AnalysisRequest {
    fn from(form: AnalyzeForm) -> Self {
        AnalysisRequest::new(form.text).with_language_hint(form.language_hint)
    }
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_form))
        .route("/api/analyze", post(analyze_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn index() -> Html<String> {
    Html(render_page("", None))
}

async fn analyze_form(
    State(dispatcher): State<Arc<Dispatcher>>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    let request = AnalysisRequest::from(form);
    let outcome = dispatcher.analyze(&request).await;
    Html(render_page(request.text(), Some(&outcome)))
}

async fn analyze_json(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(request): Json<AnalysisRequest>,
) -> Json<AnalysisOutcome> {
    Json(dispatcher.analyze(&request).await)
}

async fn health() -> &'static str {
    "OK"
}

const STYLE: &str = r#"<style>
:root {
    --primary-bg: #2b5876;
    --secondary-bg: #4e4376;
    --card-bg: #ffffff;
    --text-color: #333333;
    --title-color: #ffffff;
    --subtitle-color: #e0e0e0;
    --button-bg-start: #7b2cbf;
    --button-bg-end: #3f37c9;
    --sidebar-bg-start: #f8f9fa;
    --sidebar-bg-end: #e3f2fd;
    --border-color: #4e4376;
    --shadow-color: rgba(0, 0, 0, 0.3);
}
@media (prefers-color-scheme: dark) {
    :root {
        --primary-bg: #1a2a44;
        --secondary-bg: #2e1a47;
        --card-bg: #2c2c2c;
        --text-color: #e0e0e0;
        --title-color: #e0e0e0;
        --subtitle-color: #b0b0b0;
        --button-bg-start: #9b59b6;
        --button-bg-end: #5b5bd6;
        --sidebar-bg-start: #2c3e50;
        --sidebar-bg-end: #34495e;
        --border-color: #6b4e9b;
        --shadow-color: rgba(0, 0, 0, 0.5);
    }
}
body { display: flex; gap: 20px; margin: 0; padding: 20px; font-family: sans-serif; }
.main {
    flex: 1;
    background: linear-gradient(135deg, var(--primary-bg), var(--secondary-bg));
    padding: 30px;
    border-radius: 15px;
    color: var(--title-color);
}
textarea {
    width: 100%;
    box-sizing: border-box;
    background-color: var(--card-bg);
    border: 2px solid var(--border-color);
    border-radius: 12px;
    padding: 15px;
    font-size: 16px;
    color: var(--text-color);
}
.button {
    display: inline-block;
    background: linear-gradient(45deg, var(--button-bg-start), var(--button-bg-end));
    color: var(--title-color);
    border: none;
    border-radius: 30px;
    padding: 12px 35px;
    font-size: 18px;
    font-weight: bold;
    text-decoration: none;
    box-shadow: 0 4px 15px var(--shadow-color);
    margin: 8px;
    cursor: pointer;
}
.result-card {
    background: var(--card-bg);
    border-left: 5px solid var(--button-bg-start);
    border-radius: 12px;
    padding: 20px;
    margin: 15px 0;
    box-shadow: 0 4px 12px var(--shadow-color);
    color: var(--text-color);
}
.banner { border-radius: 8px; padding: 12px 16px; margin: 12px 0; color: #333333; }
.banner.warning { background: #fff3cd; }
.banner.error { background: #f8d7da; }
.title { font-size: 3.2em; text-align: center; text-shadow: 2px 2px 4px var(--shadow-color); margin-bottom: 10px; }
.subtitle { font-size: 1.6em; text-align: center; color: var(--subtitle-color); margin-bottom: 30px; }
.sidebar {
    width: 300px;
    background: linear-gradient(135deg, var(--sidebar-bg-start), var(--sidebar-bg-end));
    border-radius: 10px;
    padding: 20px;
    box-shadow: 0 4px 10px var(--shadow-color);
    color: var(--text-color);
}
.sidebar-header {
    background: linear-gradient(45deg, var(--button-bg-start), var(--button-bg-end));
    color: var(--title-color);
    padding: 15px;
    border-radius: 8px;
    text-align: center;
    font-size: 1.5em;
    margin-bottom: 20px;
}
.icon { font-size: 1.2em; margin-right: 8px; }
</style>"#;

const SIDEBAR_INTRO: &str = r#"<div class="sidebar-header">📚 About</div>
<ul>
<li><b>Language Detection</b>: identifies the dominant language of the input text.</li>
<li><b>Key Phrase Extraction</b>: extracts significant phrases with confidence scores.</li>
</ul>
<p>Uses <b>Amazon Comprehend</b> when AWS credentials are configured, and an offline mock otherwise.</p>"#;

/// Sidebar listing the languages the table knows about
fn render_sidebar() -> String {
    let table = LanguageTable::get();
    let named: Vec<&str> = table
        .list_all()
        .into_iter()
        .filter(|entry| entry.code != UNKNOWN_CODE)
        .map(|entry| entry.name)
        .collect();

    format!(
        "<aside class=\"sidebar\">{}<p><b>Named languages:</b> {}</p><p><b>Key phrases in:</b> {}</p></aside>",
        SIDEBAR_INTRO,
        named.join(", "),
        table.key_phrase_codes().join(", ")
    )
}

/// Render the full analyzer page, with results when an outcome is given
pub fn render_page(text: &str, outcome: Option<&AnalysisOutcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Comprehend NLP Analyzer</title>");
    html.push_str(STYLE);
    html.push_str("</head><body><main class=\"main\">");
    html.push_str("<div class=\"title\">🌟 Comprehend NLP Analyzer</div>");
    html.push_str(
        "<div class=\"subtitle\">Language Detection &amp; Key Phrase Extraction for Machine Learning</div>",
    );

    html.push_str("<form method=\"post\" action=\"/analyze\">");
    html.push_str(&format!(
        "<label for=\"text\">✍️ Enter your text here (max {} bytes):</label>",
        format_thousands(MAX_TEXT_BYTES)
    ));
    html.push_str(&format!(
        "<textarea id=\"text\" name=\"text\" rows=\"10\" placeholder=\"Type or paste your text...\">{}</textarea>",
        html_escape(text)
    ));
    html.push_str("<button class=\"button\" type=\"submit\">🚀 Analyze Text</button>");
    html.push_str("<a class=\"button\" href=\"/\">🔄 Reset</a>");
    html.push_str("</form>");

    if let Some(outcome) = outcome {
        html.push_str(&render_outcome(outcome));
    }

    html.push_str("</main>");
    html.push_str(&render_sidebar());
    html.push_str("</body></html>");
    html
}

/// Render warnings, errors and result cards for one outcome
pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Skipped { warning } => render_banner("warning", "⚠️", warning),
        AnalysisOutcome::Completed(report) => render_report(report),
    }
}

fn render_report(report: &AnalysisReport) -> String {
    let mut html = String::new();

    if let Some(advisory) = &report.advisory {
        html.push_str(&render_banner("warning", "⚠️", advisory));
    }

    match &report.language {
        LanguageResult::Detected(detected) => {
            html.push_str("<div class=\"result-card\"><h3>🗣️ Language Detection</h3>");
            html.push_str(&format!(
                "<p><span class=\"icon\">🌐</span><b>Detected Language:</b> {}<br>\
                 <span class=\"icon\">📊</span><b>Confidence Score:</b> {}</p>",
                html_escape(&detected.language),
                detected.confidence
            ));
            html.push_str("</div>");
        }
        LanguageResult::Failed { error } => html.push_str(&render_banner("error", "❌", error)),
    }

    match &report.key_phrases {
        KeyPhraseResult::Extracted { key_phrases } => {
            html.push_str("<div class=\"result-card\"><h3>🧠 Key Phrases Extracted</h3>");
            for kp in key_phrases {
                html.push_str(&format!(
                    "<p><span class=\"icon\">🔑</span><b>Phrase:</b> {}<br>\
                     <span class=\"icon\">📈</span><b>Confidence:</b> {}</p>",
                    html_escape(&kp.phrase),
                    kp.confidence
                ));
            }
            html.push_str("</div>");
        }
        KeyPhraseResult::Failed { error } => html.push_str(&render_banner("error", "❌", error)),
    }

    html
}

fn render_banner(kind: &str, icon: &str, message: &str) -> String {
    format!(
        "<div class=\"banner {}\">{} {}</div>",
        kind,
        icon,
        html_escape(message)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a count with comma thousands separators (5000 -> "5,000")
fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
