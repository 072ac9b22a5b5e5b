use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::DISCLAIMER;
use crate::enums::prediction::Prediction;
use crate::enums::report_format::ReportFormat;
use crate::errors::{LungLensError, LungLensResult};
use crate::helpers::html::escape_html;
use crate::structs::analysis_report::AnalysisReport;

pub struct ReportExporter;

impl ReportExporter {
    pub fn render(format: ReportFormat, report: &AnalysisReport) -> LungLensResult<String> {
        match format {
            ReportFormat::Markdown => Ok(render_markdown(report)),
            ReportFormat::Html => Ok(render_html(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Write the report under `output_dir` and return the file it landed in.
    pub fn export(output_dir: &Path, format: ReportFormat, report: &AnalysisReport) -> LungLensResult<PathBuf> {
        let content = Self::render(format, report)?;

        fs::create_dir_all(output_dir).map_err(|e| {
            LungLensError::file_error(&output_dir.display().to_string(), "create directory", &e.to_string())
        })?;

        let file_name = format!(
            "lunglens-report-{}.{}",
            report.generated_at.format("%Y%m%d-%H%M%S"),
            format.extension()
        );
        let path = output_dir.join(file_name);

        fs::write(&path, content)
            .map_err(|e| LungLensError::file_error(&path.display().to_string(), "write report", &e.to_string()))?;

        log::info!("📄 Report saved to {}", path.display());
        Ok(path)
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn render_markdown(report: &AnalysisReport) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "# LungLens Analysis Report\n");
    let _ = writeln!(out, "Generated: {}\n", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    if let Some(info) = &report.file_info {
        let _ = writeln!(out, "## Image\n");
        let _ = writeln!(out, "| Field | Value |\n|---|---|");
        let _ = writeln!(out, "| Name | {} |", info.name);
        let _ = writeln!(out, "| Size | {} |", info.size);
        let _ = writeln!(out, "| Type | {} |", info.mime_type);
        let _ = writeln!(out, "| Dimensions | {} |", info.dimensions);
        let _ = writeln!(out, "| Last modified | {} |\n", info.last_modified);
    }

    let _ = writeln!(out, "## Result\n");
    if result.is_error() {
        let _ = writeln!(out, "**Analysis failed**\n");
    }
    let _ = writeln!(out, "**Prediction:** {}\n", result.prediction);

    if let Some(confidence) = result.confidence_score {
        let _ = writeln!(out, "**Confidence:** {}\n", percent(confidence));
    }

    if let Some(probabilities) = &result.probabilities {
        let _ = writeln!(out, "### Probabilities\n");
        for prediction in Prediction::ALL {
            let _ = writeln!(out, "- {}: {}", prediction, percent(probabilities.get(prediction)));
        }
        out.push('\n');
    }

    if let Some(explanation) = &result.explanation {
        let _ = writeln!(out, "### Explanation\n\n{}\n", explanation);
    }

    if !result.is_error() {
        let _ = writeln!(out, "> {}", DISCLAIMER);
    }

    out
}

fn render_html(report: &AnalysisReport) -> String {
    let result = &report.result;
    let mut body = String::new();

    if let Some(info) = &report.file_info {
        body.push_str("<h2>Image</h2>\n<table>\n");
        for (label, value) in [
            ("Name", &info.name),
            ("Size", &info.size),
            ("Type", &info.mime_type),
            ("Dimensions", &info.dimensions),
            ("Last modified", &info.last_modified),
        ] {
            let _ = writeln!(body, "<tr><th>{}</th><td>{}</td></tr>", label, escape_html(value));
        }
        body.push_str("</table>\n");
    }

    let heading = if result.is_error() { "Analysis failed" } else { "Result" };
    let _ = writeln!(body, "<h2>{}</h2>", heading);
    let _ = writeln!(
        body,
        "<p><span class=\"badge badge-{}\">{}</span></p>",
        result.prediction.badge_variant(),
        result.prediction
    );

    if let Some(confidence) = result.confidence_score {
        let _ = writeln!(body, "<p>Confidence: {}</p>", percent(confidence));
    }

    if let Some(probabilities) = &result.probabilities {
        body.push_str("<ul>\n");
        for prediction in Prediction::ALL {
            let _ = writeln!(body, "<li>{}: {}</li>", prediction, percent(probabilities.get(prediction)));
        }
        body.push_str("</ul>\n");
    }

    if let Some(explanation) = &result.explanation {
        let _ = writeln!(body, "<p class=\"explanation\">{}</p>", escape_html(explanation));
    }

    if !result.is_error() {
        let _ = writeln!(body, "<p class=\"disclaimer\">{}</p>", escape_html(DISCLAIMER));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>LungLens Analysis Report</title>\n</head>\n<body>\n<h1>LungLens Analysis Report</h1>\n<p>Generated: {}</p>\n{}</body>\n</html>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::analysis_result::AnalysisResult;

    #[test]
    fn error_reports_skip_the_disclaimer() {
        let report = AnalysisReport::new(None, AnalysisResult::error());
        let markdown = ReportExporter::render(ReportFormat::Markdown, &report).expect("markdown");

        assert!(markdown.contains("Analysis failed"));
        assert!(!markdown.contains(DISCLAIMER));
    }

    #[test]
    fn html_escapes_model_text() {
        let mut result = AnalysisResult::new(Prediction::Benign);
        result.explanation = Some("<script>alert(1)</script>".to_string());
        let html = ReportExporter::render(ReportFormat::Html, &AnalysisReport::new(None, result)).expect("html");

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("badge-secondary"));
    }
}
