//! Pure functions from validated results to view descriptions.

use crate::models::{
    AnalysisResult, AnalysisView, Disclosure, FinalView, GalleryView, LabeledField,
    PromptCandidate, PromptCard, PromptSet, TrendItem,
};

pub const PREVIEW_SUMMARY: &str = "📋 프롬프트 미리보기 (클릭)";

pub fn confidence_text(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

pub fn render_analysis(result: &AnalysisResult) -> AnalysisView {
    let intent = &result.intent;
    let confidence = confidence_text(intent.confidence);

    let fields = vec![
        LabeledField { label: "목적", value: intent.primary_intent.clone() },
        LabeledField { label: "형식", value: intent.output_type.clone() },
        LabeledField { label: "대상", value: intent.target_audience.clone() },
        LabeledField { label: "분야", value: intent.domain.clone() },
        LabeledField { label: "신뢰도", value: confidence.clone() },
    ];

    let trends = result
        .trends
        .trends
        .iter()
        .enumerate()
        .map(|(i, text)| TrendItem { number: i + 1, text: text.clone() })
        .collect();

    AnalysisView {
        query: result.query.clone(),
        fields,
        confidence_text: confidence,
        keywords: intent.keywords.clone(),
        trends,
        summary: result.trends.summary.clone(),
        confirmation: result.confirmation_message.clone(),
    }
}

pub fn render_gallery(set: &PromptSet, selection_message: Option<&str>) -> GalleryView {
    let cards = set
        .prompts
        .iter()
        .enumerate()
        .map(|(i, candidate)| PromptCard {
            number: i + 1,
            icon: candidate.icon.clone(),
            name: candidate.name.clone(),
            description: candidate.description.clone(),
            best_for: candidate.best_for.clone(),
            preview: Disclosure {
                summary: PREVIEW_SUMMARY,
                body: candidate.prompt.clone(),
                expanded: false,
            },
            select: candidate.clone(),
        })
        .collect();

    GalleryView {
        selection_message: selection_message.map(str::to_string),
        cards,
    }
}

pub fn render_final(candidate: &PromptCandidate) -> FinalView {
    FinalView {
        strategy_name: candidate.name.clone(),
        prompt: candidate.prompt.clone(),
    }
}
