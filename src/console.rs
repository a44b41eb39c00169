use tokio::sync::watch;

use promptflow::models::{AnalysisView, FinalView, GalleryView, Step, StrategySummary, WizardView};
use promptflow::services::markup;

const RULE: &str = "────────────────────────────────────────";

pub fn print_help() {
    println!(
        "\n프롬프트 엔지니어링 자동화\n\
         1단계  요청을 그대로 입력하거나 `analyze <text>`\n\
         2단계  `generate` 로 전략 생성\n\
         3단계  `show <n>` 미리보기, `select <n>` 선택\n\
         4단계  `copy` 클립보드 복사\n\
         언제든 `restart`, `strategies`, `help`, `quit`\n"
    );
}

/// Print view snapshots as they are published until the controller goes away.
pub async fn render_loop(mut rx: watch::Receiver<WizardView>, as_html: bool) {
    let mut last: Option<WizardView> = None;
    loop {
        let view = rx.borrow_and_update().clone();
        render(&view, last.as_ref(), as_html);
        last = Some(view);
        if rx.changed().await.is_err() {
            break;
        }
    }
}

fn render(view: &WizardView, last: Option<&WizardView>, as_html: bool) {
    let moved = last.map_or(true, |l| {
        l.current_step != view.current_step || l.scroll_epoch != view.scroll_epoch
    });

    if let Some(message) = &view.loading {
        if last.map_or(true, |l| l.loading.as_ref() != Some(message)) {
            println!("⏳ {}", message);
        }
    }

    if moved {
        print_step(view, as_html);
    } else if let (Some(gallery), Some(previous)) = (&view.gallery, last) {
        if previous.gallery.as_ref() != Some(gallery) {
            print_gallery(gallery, as_html);
        }
    }

    if let Some(last) = last {
        if last.copy_button != view.copy_button && view.final_prompt.is_some() {
            println!("[{}]", view.copy_button.label);
        }
        if view.catalog.is_some() && last.catalog != view.catalog {
            if let Some(catalog) = &view.catalog {
                print_catalog(catalog);
            }
        }
    }

    if let Some(notification) = &view.notification {
        let fresh = last
            .and_then(|l| l.notification.as_ref())
            .map_or(true, |n| n.id != notification.id);
        if fresh {
            eprintln!("❌ {}", notification.message);
        }
    }
}

fn print_step(view: &WizardView, as_html: bool) {
    println!("\n{}", RULE);
    if as_html {
        print!("{}", markup::indicators_html(&view.indicators));
    } else {
        let line: Vec<String> = view
            .indicators
            .iter()
            .map(|i| {
                let mark = if i.active {
                    "▶"
                } else if i.completed {
                    "✔"
                } else {
                    "·"
                };
                format!("{} {}", mark, i.step)
            })
            .collect();
        println!("{}", line.join("   "));
    }
    println!("{}", RULE);

    match view.current_step {
        Step::Input => println!("무엇을 만들고 싶으신가요? 요청을 입력하세요."),
        Step::AnalysisReview => {
            if let Some(analysis) = &view.analysis {
                print_analysis(analysis, as_html);
            }
            println!("\n`generate` 로 프롬프트 전략을 생성합니다.");
        }
        Step::StrategySelection => {
            if let Some(gallery) = &view.gallery {
                print_gallery(gallery, as_html);
            }
        }
        Step::FinalPrompt => {
            if let Some(final_view) = &view.final_prompt {
                print_final(final_view, as_html);
                println!("[{}]", view.copy_button.label);
            }
        }
    }
}

fn print_analysis(view: &AnalysisView, as_html: bool) {
    if as_html {
        print!("{}", markup::analysis_html(view));
        return;
    }
    println!("입력: {}", view.query);
    for field in &view.fields {
        println!("{}: {}", field.label, field.value);
    }
    if !view.keywords.is_empty() {
        println!("키워드: {}", view.keywords.join(", "));
    }
    println!("\n📈 최신 트렌드");
    for item in &view.trends {
        println!("  {}. {}", item.number, item.text);
    }
    println!("\n{}", view.summary);
    if let Some(confirmation) = &view.confirmation {
        println!("\n{}", confirmation);
    }
}

fn print_gallery(view: &GalleryView, as_html: bool) {
    if as_html {
        print!("{}", markup::gallery_html(view));
        return;
    }
    if let Some(message) = &view.selection_message {
        println!("{}\n", message);
    }
    for card in &view.cards {
        println!("[{}] {} {}", card.number, card.icon, card.name);
        println!("    {}", card.description);
        println!("    💡 최적: {}", card.best_for);
        if card.preview.expanded {
            for line in card.preview.body.lines() {
                println!("    │ {}", line);
            }
        } else {
            println!("    {}  (`show {}`)", card.preview.summary, card.number);
        }
        println!();
    }
    println!("`select <번호>` 로 전략을 선택하세요.");
}

fn print_final(view: &FinalView, as_html: bool) {
    if as_html {
        print!("{}", markup::final_html(view));
        return;
    }
    println!("✅ {} 전략을 선택하셨습니다!\n", view.strategy_name);
    println!("{}", view.prompt);
    println!();
}

fn print_catalog(catalog: &[StrategySummary]) {
    println!("\n사용 가능한 전략");
    for strategy in catalog {
        println!(
            "  {} {} - {} (최적: {})",
            strategy.icon, strategy.name, strategy.description, strategy.best_for
        );
    }
}
