//! Run report rendering (text or JSON)

use crate::audio::AudioStream;
use crate::entropy::Histogram;
use crate::error::Result;
use crate::pipeline::{ExtractionSettings, PipelineOutput};
use hiss_common::config::ReportFormat;
use serde::Serialize;
use std::fmt::Write;

/// Bins used for the report histograms
pub const REPORT_HISTOGRAM_BINS: usize = 100;

/// Widest bar drawn in a text histogram
const BAR_WIDTH: usize = 50;

/// Everything printed after a successful run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub sample_rate: u32,
    pub sample_count: usize,
    pub seconds_per_chunk: f64,
    #[serde(flatten)]
    pub output: PipelineOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_histogram: Option<Histogram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers_histogram: Option<Histogram>,
}

impl Report {
    pub fn new(
        source: impl Into<String>,
        stream: &AudioStream,
        settings: &ExtractionSettings,
        output: PipelineOutput,
    ) -> Self {
        Self {
            source: source.into(),
            sample_rate: stream.sample_rate(),
            sample_count: stream.len(),
            seconds_per_chunk: settings.seconds_per_chunk,
            output,
            source_histogram: None,
            numbers_histogram: None,
        }
    }

    /// Attach histograms of the source samples and the generated numbers
    pub fn with_histograms(mut self, stream: &AudioStream) -> Self {
        self.source_histogram = Histogram::from_values(stream.samples(), REPORT_HISTOGRAM_BINS);
        self.numbers_histogram =
            Histogram::from_values(&self.output.numbers, REPORT_HISTOGRAM_BINS);
        self
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let numbers: Vec<String> = self.output.numbers.iter().map(u8::to_string).collect();

        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "Source: {} ({} samples at {} Hz)",
            self.source, self.sample_count, self.sample_rate
        );
        let _ = writeln!(
            out,
            "Shannon entropy for provided source: {}",
            self.output.source_entropy
        );
        let _ = writeln!(out, "Generated random numbers: [{}]", numbers.join(", "));
        let _ = writeln!(
            out,
            "Entropy of the generated output: {}",
            self.output.output_entropy
        );

        if let Some(hist) = &self.source_histogram {
            let _ = writeln!(out, "\nSource sample distribution (counts):");
            let counts: Vec<f64> = hist.counts.iter().map(|&c| c as f64).collect();
            out.push_str(&render_bars(hist, &counts));
        }
        if let Some(hist) = &self.numbers_histogram {
            let _ = writeln!(out, "\nGenerated number distribution (density):");
            out.push_str(&render_bars(hist, &hist.density()));
        }

        out
    }
}

/// One line per non-empty bin: lower edge, value, proportional bar
fn render_bars(hist: &Histogram, values: &[f64]) -> String {
    let peak = values.iter().cloned().fold(0.0f64, f64::max);
    let mut out = String::new();
    if peak <= 0.0 {
        return out;
    }

    for (index, (&value, &count)) in values.iter().zip(&hist.counts).enumerate() {
        if count == 0 {
            continue;
        }
        let width = ((value / peak) * BAR_WIDTH as f64).round().max(1.0) as usize;
        let _ = writeln!(
            out,
            "{:>14.2} | {:<bar$} {:.4}",
            hist.bin_start(index),
            "#".repeat(width),
            value,
            bar = BAR_WIDTH
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> (Report, AudioStream) {
        let stream = AudioStream::new(8000, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let settings = ExtractionSettings {
            seconds_per_chunk: 0.0005,
            count: 2,
            workers: 1,
        };
        let output = PipelineOutput {
            numbers: vec![128, 26],
            source_entropy: 3.0,
            output_entropy: 1.0,
            samples_per_chunk: 4,
        };
        (Report::new("noise.wav", &stream, &settings, output), stream)
    }

    #[test]
    fn test_text_report_lines() {
        let (report, _) = sample_report();
        let text = report.render(ReportFormat::Text).unwrap();
        assert!(text.contains("Source: noise.wav (8 samples at 8000 Hz)"));
        assert!(text.contains("Shannon entropy for provided source: 3\n"));
        assert!(text.contains("Generated random numbers: [128, 26]"));
        assert!(text.contains("Entropy of the generated output: 1\n"));
        assert!(!text.contains("distribution"));
    }

    #[test]
    fn test_json_report_fields() {
        let (report, _) = sample_report();
        let json = report.render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["numbers"], serde_json::json!([128, 26]));
        assert_eq!(value["source"], "noise.wav");
        assert_eq!(value["samples_per_chunk"], 4);
        assert!(value.get("source_histogram").is_none());
    }

    #[test]
    fn test_histograms_rendered_when_attached() {
        let (report, stream) = sample_report();
        let report = report.with_histograms(&stream);
        let text = report.render(ReportFormat::Text).unwrap();
        assert!(text.contains("Source sample distribution (counts):"));
        assert!(text.contains("Generated number distribution (density):"));
        // two generated numbers -> two bars
        let number_section = text.split("(density):").nth(1).unwrap();
        assert_eq!(number_section.lines().filter(|l| l.contains('#')).count(), 2);
    }
}
