//! Plain-text rendering of a report, panel by panel.

use chrono::{DateTime, Local};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use super::{AnalysisNote, AnalysisReport};
use crate::figures::Evidence;
use crate::types::PosCategory;

/// Render the report as text, stamped with the current local time.
pub fn render_text(report: &AnalysisReport) -> String {
    render_text_at(report, Local::now())
}

/// Render the report as text with an explicit timestamp.
pub fn render_text_at(report: &AnalysisReport, generated: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LitLoom Analysis Report");
    let _ = writeln!(out, "Generated {}", generated.format("%Y-%m-%d %H:%M"));

    heading(&mut out, "Poem Overview");
    let _ = writeln!(out, "Content Snippet:\n  \"{}\"\n", report.snippet_preview());
    let _ = writeln!(
        out,
        "The poem has {} lines, {} words and {} stanzas.\n",
        report.line_count(),
        report.word_count(),
        report.stanza_count()
    );
    let scheme = if report.rhyme_scheme().is_empty() {
        "Not detected"
    } else {
        report.rhyme_scheme_by_stanza()
    };
    let _ = writeln!(out, "Rhyme Scheme: {scheme}\n");
    let _ = writeln!(out, "Rhyming Word Groups:");
    let groups: Vec<_> = report.rhyme_groups().iter().filter(|g| g.lines.len() > 1).collect();
    if groups.is_empty() {
        let _ = writeln!(out, "  - None detected");
    }
    for group in groups {
        let _ = writeln!(out, "  {}: {}", group.letter, group.words.join(" / "));
    }

    heading(&mut out, "Parts of Speech");
    let label_width = PosCategory::all().iter().map(|c| c.name().width()).max().unwrap_or_default();
    for &category in PosCategory::all() {
        let count = report.pos_frequencies().get(&category).copied().unwrap_or_default();
        if count == 0 {
            continue;
        }
        let words = report.pos_words().get(&category).map(|w| w.join(", ")).unwrap_or_default();
        let _ = writeln!(out, "  {} {count:>4}  {words}", pad(category.name(), label_width));
    }

    heading(&mut out, "Figures of Speech");
    if report.figures_of_speech().is_empty() {
        let _ = writeln!(out, "  - No figures of speech detected.");
    }
    for figure in report.figures_of_speech() {
        let detail = match &figure.evidence {
            Evidence::Simile { marker } => format!("marker: {marker}"),
            Evidence::Metaphor { tenor, copula, vehicle } => format!("{tenor} {copula} {vehicle}"),
            Evidence::Alliteration { sound, members } => format!("/{sound}/: {}", members.join(", ")),
        };
        let _ = writeln!(
            out,
            "  {} line {:>3} [{}] \"{}\" ({detail})",
            pad(figure.kind().name(), "Alliteration".width()),
            figure.span.line + 1,
            figure.confidence,
            figure.excerpt,
        );
    }

    heading(&mut out, "Sentimental Tone");
    let tone = report.tone();
    let _ = writeln!(out, "Overall Tone: {} ({:.3})", tone.overall.label, tone.overall.score);
    let _ = writeln!(out, "{}", tone.overall.label.mood());
    if let Some(b) = tone.breakdown {
        let _ = writeln!(
            out,
            "Positive {:.1}%  Neutral {:.1}%  Negative {:.1}%",
            b.positive * 100.0,
            b.neutral * 100.0,
            b.negative * 100.0
        );
    }
    if tone.stanzas.len() > 1 {
        for (i, stanza) in tone.stanzas.iter().enumerate() {
            let _ = writeln!(out, "  Stanza {:>2}: {} ({:.3})", i + 1, stanza.label, stanza.score);
        }
    }

    if report.degraded() {
        heading(&mut out, "Notes");
        for note in report.notes() {
            let _ = writeln!(out, "  - {}", describe(note));
        }
    }

    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.width()));
}

/// Pad to a display width, counting wide characters correctly.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

fn describe(note: &AnalysisNote) -> String {
    match note {
        AnalysisNote::MissingPronunciation { line, word } => {
            format!("line {}: \"{word}\" not in dictionary, rhyme sound approximated", line + 1)
        }
        AnalysisNote::TaggerFailure { line, word, message, .. } => {
            format!("line {}: could not tag \"{word}\" ({message})", line + 1)
        }
        AnalysisNote::ScorerFailure { line, message } => {
            format!("line {}: tone scored neutral ({message})", line + 1)
        }
    }
}
