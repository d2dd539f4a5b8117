//! Server-rendered question form

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use super::ApiState;

const PAGE_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; background: #f7f7f7; margin: 0; padding: 0; }
        .container { max-width: 600px; margin: 40px auto; background: #fff; border-radius: 8px; box-shadow: 0 2px 8px #ccc; padding: 32px; }
        h2 { color: #2c3e50; }
        label { font-weight: bold; }
        input[type=text] { width: 90%; padding: 10px; margin: 10px 0 20px 0; border: 1px solid #ccc; border-radius: 4px; }
        input[type=submit] { background: #007bff; color: #fff; border: none; padding: 10px 24px; border-radius: 4px; cursor: pointer; font-size: 16px; }
        input[type=submit]:hover { background: #0056b3; }
        .response-box { background: #f1f8e9; border: 1px solid #b2dfdb; border-radius: 4px; padding: 16px; margin-top: 24px; color: #222; }
        .footer { margin-top: 40px; color: #888; font-size: 13px; text-align: center; }
"#;

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

/// Escape HTML special characters
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the page, with a response box when there is something to show
pub fn render_page(response: Option<&str>) -> String {
    let response_box = match response {
        Some(text) if !text.is_empty() => format!(
            r#"
        <div class="response-box">
            <strong>Response:</strong><br>
            <div style="white-space: pre-wrap;">{}</div>
        </div>"#,
            html_escape(text)
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>AI Tutor Agent</title>
    <style>{style}    </style>
</head>
<body>
    <div class="container">
        <h2>AI Tutor Agent</h2>
        <form method="post">
            <label for="query">Ask a question:</label><br>
            <input type="text" id="query" name="query" placeholder="e.g. What is the speed of light?" required>
            <input type="submit" value="Ask">
        </form>{response_box}
        <div class="footer">&copy; 2025 AI Tutor Agent | Powered by Gemini &amp; Rust</div>
    </div>
</body>
</html>
"#,
        style = PAGE_STYLE,
        response_box = response_box,
    )
}

/// GET /
pub async fn index() -> Html<String> {
    Html(render_page(None))
}

/// POST /
pub async fn submit(State(state): State<ApiState>, Form(form): Form<AskForm>) -> Html<String> {
    info!("Question received via form");
    let answer = state.tutor.handle_query(&form.query).await;
    Html(render_page(Some(&answer.to_string())))
}

pub fn page_routes(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(state)
}
