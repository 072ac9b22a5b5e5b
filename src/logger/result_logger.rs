use terminal_size::{terminal_size, Width};
use crate::config::constants::DISCLAIMER;
use crate::enums::prediction::Prediction;
use crate::enums::request_state::RequestState;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::file_info::FileInfo;
use crate::structs::historical_analysis::HistoricalAnalysis;
use crate::structs::image_summary::ImageSummary;

const MAX_WIDTH: usize = 80;
const BAR_WIDTH: usize = 30;

pub struct ResultLogger;

impl ResultLogger {
    pub fn print_analysis(result: &AnalysisResult, state: RequestState, file_info: Option<&FileInfo>) {
        let width = panel_width();
        let rule = "━".repeat(width);

        println!("\n{}", rule);

        if let Some(info) = file_info {
            println!("📄 {}", info.name);
            println!("   Size: {}   Type: {}", info.size, info.mime_type);
            println!("   Dimensions: {}   Last modified: {}", info.dimensions, info.last_modified);
            println!("{}", "─".repeat(width));
        }

        if result.is_error() {
            println!("❌ Analysis failed");
        } else if state == RequestState::Degraded {
            println!("⚠️  Partial result");
        }

        println!("{} Prediction: {}", result.prediction.emoji(), result.prediction);

        if let Some(confidence) = result.confidence_score {
            println!("   Confidence: {:.1}%", confidence * 100.0);
        }

        if let Some(probabilities) = &result.probabilities {
            println!("\n   Probabilities:");
            for prediction in Prediction::ALL {
                let value = probabilities.get(prediction);
                println!("   {:<10} {} {:>5.1}%", prediction.as_str(), bar(value), value * 100.0);
            }
        }

        if let Some(explanation) = &result.explanation {
            println!();
            for line in wrap(explanation, width.saturating_sub(3)) {
                println!("   {}", line);
            }
        }

        if !result.is_error() {
            println!("\n{}", "─".repeat(width));
            for line in wrap(DISCLAIMER, width) {
                println!("{}", line);
            }
        }

        println!("{}\n", rule);
    }

    pub fn print_summary(summary: &ImageSummary) {
        let width = panel_width();
        println!("\n📝 Image summary");
        println!("{}", "━".repeat(width));
        for line in wrap(&summary.summary, width) {
            println!("{}", line);
        }
        println!("{}\n", "━".repeat(width));
    }

    pub fn print_history(rows: &[HistoricalAnalysis]) {
        if rows.is_empty() {
            println!("📭 No analyses yet.");
            return;
        }

        println!("\n{:<12} {:<24} {:<11} {:>10}", "Date", "Image", "Prediction", "Confidence");
        println!("{}", "─".repeat(60));
        for row in rows {
            println!(
                "{:<12} {:<24} {} {:<8} {:>10}",
                row.date.format("%Y-%m-%d"),
                row.image_name,
                row.prediction.emoji(),
                row.prediction.as_str(),
                row.confidence_percent()
            );
        }
        println!();
    }
}

fn panel_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| usize::from(w))
        .unwrap_or(MAX_WIDTH)
        .min(MAX_WIDTH)
}

fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
