//! HTML fragments for each step view. Service-supplied text always goes
//! through `escape_html`; labels are static and written as-is.

use std::fmt::Write;

use crate::models::{AnalysisView, FinalView, GalleryView, StepIndicator};
use crate::utils::escape_html;

pub fn analysis_html(view: &AnalysisView) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<div id=\"intent-result\">");
    let _ = writeln!(html, "<p><strong>입력:</strong> {}</p>", escape_html(&view.query));
    for field in &view.fields {
        let _ = writeln!(
            html,
            "<p><strong>{}:</strong> {}</p>",
            field.label,
            escape_html(&field.value)
        );
    }
    if !view.keywords.is_empty() {
        let keywords: Vec<String> = view.keywords.iter().map(|k| escape_html(k)).collect();
        let _ = writeln!(html, "<p><strong>키워드:</strong> {}</p>", keywords.join(", "));
    }
    let _ = writeln!(html, "</div>");

    let _ = writeln!(html, "<div id=\"trends-result\">");
    for item in &view.trends {
        let _ = writeln!(
            html,
            "<div class=\"trend-item\">{}. {}</div>",
            item.number,
            escape_html(&item.text)
        );
    }
    let _ = writeln!(html, "</div>");
    let _ = writeln!(
        html,
        "<p id=\"trends-summary\">{}</p>",
        escape_html(&view.summary)
    );
    if let Some(confirmation) = &view.confirmation {
        let _ = writeln!(
            html,
            "<p class=\"confirmation\">{}</p>",
            escape_html(confirmation)
        );
    }
    html
}

pub fn gallery_html(view: &GalleryView) -> String {
    let mut html = String::new();
    if let Some(message) = &view.selection_message {
        let _ = writeln!(html, "<p class=\"selection-message\">{}</p>", escape_html(message));
    }
    let _ = writeln!(html, "<div id=\"prompts-container\">");
    for card in &view.cards {
        let payload = serde_json::to_string(&card.select).unwrap_or_default();
        let _ = writeln!(html, "<div class=\"prompt-card\">");
        let _ = writeln!(
            html,
            "<div class=\"prompt-card-title\">{} {}</div>",
            escape_html(&card.icon),
            escape_html(&card.name)
        );
        let _ = writeln!(
            html,
            "<div class=\"prompt-card-description\">{}</div>",
            escape_html(&card.description)
        );
        let _ = writeln!(
            html,
            "<div class=\"prompt-card-best-for\">💡 최적: {}</div>",
            escape_html(&card.best_for)
        );
        let open = if card.preview.expanded { " open" } else { "" };
        let _ = writeln!(html, "<details{}>", open);
        let _ = writeln!(html, "<summary>{}</summary>", card.preview.summary);
        let _ = writeln!(
            html,
            "<div class=\"prompt-preview\">{}</div>",
            escape_html(&card.preview.body)
        );
        let _ = writeln!(html, "</details>");
        let _ = writeln!(
            html,
            "<button class=\"btn btn-primary\" data-index=\"{}\" data-candidate=\"{}\">✅ 이 전략 선택</button>",
            card.number,
            escape_html(&payload)
        );
        let _ = writeln!(html, "</div>");
    }
    let _ = writeln!(html, "</div>");
    html
}

pub fn final_html(view: &FinalView) -> String {
    format!(
        "<p id=\"selected-strategy-name\">✅ <strong>{}</strong> 전략을 선택하셨습니다!</p>\n<pre id=\"final-prompt\">{}</pre>\n",
        escape_html(&view.strategy_name),
        escape_html(&view.prompt)
    )
}

pub fn indicators_html(indicators: &[StepIndicator]) -> String {
    let mut html = String::from("<ol class=\"step-indicators\">\n");
    for indicator in indicators {
        let mut classes = vec!["step-indicator"];
        if indicator.active {
            classes.push("active");
        }
        if indicator.completed {
            classes.push("completed");
        }
        let _ = writeln!(
            html,
            "<li id=\"step-indicator-{}\" class=\"{}\">{}</li>",
            indicator.step.number(),
            classes.join(" "),
            indicator.step.title()
        );
    }
    html.push_str("</ol>\n");
    html
}
