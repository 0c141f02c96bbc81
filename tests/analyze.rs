//! End-to-end tests for `analyze` with the built-in and file-loaded collaborators.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::path::PathBuf;

use litloom::config::Config;
use litloom::error::Error;
use litloom::figures::Evidence;
use litloom::report::AnalysisNote;
use litloom::types::{Confidence, FigureKind, PosCategory, ToneLabel};
use litloom::{analyze, AnalysisContext, AnalysisReport};

const POEMS: &[&str] = &[
    "The cat sat on the mat\nThe dog ran to the fog",
    "I greet the day\nI fear the night\nI walk away\nI seek the light",
    "Peter Piper picked a peck of pickled peppers",
    "Life is like a box of chocolates",
    "I am so happy and joyful today",
    "Shall I compare thee to a summer's day?\nThou art more lovely and more temperate:\n\n\
     Rough winds do shake the darling buds of May,\nAnd summer's lease hath all too short a date;",
    "My love is a red red rose\nHer heart was as cold as ice\n\nThe stars were lanterns in the sky",
    "   \n\n  ",
    "!!! ... ???",
];

fn run(text: &str) -> AnalysisReport {
    analyze(text, &AnalysisContext::builtin()).unwrap()
}

fn figures_of(report: &AnalysisReport, kind: FigureKind) -> Vec<&litloom::figures::FigureMatch> {
    report.figures_of_speech().iter().filter(|f| f.kind() == kind).collect()
}

#[test]
fn scenario_couplet_rhymes() {
    assert_eq!(run(POEMS[0]).rhyme_scheme(), "AA");
}

#[test]
fn scenario_alternating_rhyme() {
    let report = run(POEMS[1]);
    assert_eq!(report.rhyme_scheme(), "ABAB");
    assert_eq!(report.rhyme_letters(), ["A", "B", "A", "B"]);
}

#[test]
fn scenario_peter_piper_alliteration() {
    let report = run(POEMS[2]);
    let matches = figures_of(&report, FigureKind::Alliteration);
    assert_eq!(matches.len(), 1);
    let m = matches[0];
    assert!(m.span.len() >= 4);
    assert_eq!(m.confidence, Confidence::High);
    match &m.evidence {
        Evidence::Alliteration { sound, members } => {
            assert_eq!(sound, "p");
            assert!(members.len() >= 4);
        }
        other => panic!("expected alliteration evidence, got {other:?}"),
    }
}

#[test]
fn scenario_simile_with_like() {
    let report = run(POEMS[3]);
    let similes = figures_of(&report, FigureKind::Simile);
    assert_eq!(similes.len(), 1);
    assert!(matches!(&similes[0].evidence, Evidence::Simile { marker } if marker == "like"));
    assert!(figures_of(&report, FigureKind::Metaphor).is_empty());
}

#[test]
fn scenario_positive_tone() {
    let report = run(POEMS[4]);
    assert_eq!(report.tone().overall.label, ToneLabel::Positive);
    assert!(report.tone().overall.score >= 0.05);
}

#[test]
fn scheme_length_matches_line_count() {
    for poem in POEMS {
        let report = run(poem);
        assert_eq!(report.rhyme_letters().len(), report.line_count(), "{poem:?}");
        assert_eq!(report.rhyme_scheme().chars().count(), report.line_count(), "{poem:?}");
    }
}

#[test]
fn analysis_is_deterministic() {
    for poem in POEMS {
        assert_eq!(run(poem), run(poem), "{poem:?}");
        assert_eq!(run(poem).to_json().unwrap(), run(poem).to_json().unwrap());
    }
}

#[test]
fn alliteration_never_below_three_members() {
    for poem in POEMS {
        for m in figures_of(&run(poem), FigureKind::Alliteration) {
            match &m.evidence {
                Evidence::Alliteration { members, .. } => assert!(members.len() >= 3),
                other => panic!("unexpected evidence {other:?}"),
            }
        }
    }
}

#[test]
fn simile_and_metaphor_never_share_tokens() {
    for poem in POEMS {
        let report = run(poem);
        for simile in figures_of(&report, FigureKind::Simile) {
            for metaphor in figures_of(&report, FigureKind::Metaphor) {
                assert!(!simile.span.overlaps(&metaphor.span), "{poem:?}");
            }
        }
    }
}

#[test]
fn tone_labels_follow_thresholds() {
    for poem in POEMS {
        let tone = run(poem).tone().clone();
        assert_eq!(tone.overall.label, ToneLabel::from_score(tone.overall.score));
        for stanza in &tone.stanzas {
            assert_eq!(stanza.label, ToneLabel::from_score(stanza.score));
            assert!((-1.0..=1.0).contains(&stanza.score));
        }
    }
}

#[test]
fn empty_input_has_empty_shape() {
    for text in ["", "   \n\n  "] {
        let report = run(text);
        assert_eq!(report.rhyme_scheme(), "");
        assert_eq!(report.line_count(), 0);
        assert!(report.figures_of_speech().is_empty());
        assert_eq!(report.tone().overall.label, ToneLabel::Neutral);
        assert!(!report.degraded());
    }
}

#[test]
fn soundless_end_words_do_not_rhyme_with_each_other() {
    let report = run("ends in y\nends in h\nthe cat\nthe dog");
    assert_eq!(report.rhyme_scheme(), "ABCC");
}

#[test]
fn punctuation_only_poem_is_not_an_error() {
    let report = run(POEMS[8]);
    assert_eq!(report.line_count(), 1);
    assert_eq!(report.word_count(), 0);
    assert_eq!(report.rhyme_scheme(), "A");
}

#[test]
fn stanzas_and_word_groups() {
    let report = run(POEMS[6]);
    assert_eq!(report.stanza_count(), 2);
    assert_eq!(report.rhyme_scheme_by_stanza().split(' ').count(), 2);
    assert_eq!(report.tone().stanzas.len(), 2);
    assert!(report.pos_words()[&PosCategory::Noun].contains(&"rose".to_string()));
    assert!(!figures_of(&report, FigureKind::Metaphor).is_empty());
    assert!(!figures_of(&report, FigureKind::Simile).is_empty());
}

#[test]
fn missing_pronunciation_degrades_report() {
    let report = run("The cat sat on the mat\nThe dog met a flibbertigibbet");
    assert!(report.degraded());
    assert!(report.notes().iter().any(|n| matches!(
        n,
        AnalysisNote::MissingPronunciation { line: 1, word } if word == "flibbertigibbet"
    )));
    assert_eq!(report.rhyme_letters().len(), 2);
}

#[test]
fn report_serializes_camel_case() {
    let json: serde_json::Value = serde_json::from_str(&run(POEMS[3]).to_json().unwrap()).unwrap();
    assert_eq!(json["lineCount"], 1);
    assert_eq!(json["rhymeScheme"], "A");
    assert_eq!(json["figuresOfSpeech"][0]["kind"], "simile");
    assert_eq!(json["figuresOfSpeech"][0]["marker"], "like");
    assert_eq!(json["tone"]["overall"]["label"], "neutral");
}

fn temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn configured_sentiment_lexicon_is_used() {
    let lexicon = temp_file("# custom\nzorble\t3.0\t0.5\t[3, 3]\n");
    let mut config = Config::default();
    config.sentiment_lexicon_path = Some(lexicon.path().to_path_buf());
    let ctx = AnalysisContext::from_config(&config).unwrap();
    let report = analyze("the zorble of the morning", &ctx).unwrap();
    assert_eq!(report.tone().overall.label, ToneLabel::Positive);
    // builtin words are gone with a replacement lexicon
    let report = analyze("I am so happy", &ctx).unwrap();
    assert_eq!(report.tone().overall.label, ToneLabel::Neutral);
}

#[test]
fn configured_tagger_entries_are_merged() {
    let lexicon = temp_file("zorble\tVERB\n");
    let mut config = Config::default();
    config.pos_lexicon_path = Some(lexicon.path().to_path_buf());
    let ctx = AnalysisContext::from_config(&config).unwrap();
    let report = analyze("the birds zorble", &ctx).unwrap();
    assert!(report.pos_words()[&PosCategory::Verb].contains(&"zorble".to_string()));
    assert!(report.pos_words()[&PosCategory::Noun].contains(&"birds".to_string()));
}

#[test]
fn empty_or_missing_data_files_are_refused() {
    let empty = temp_file(";;; nothing here\n");
    let mut config = Config::default();
    config.cmudict_path = Some(empty.path().to_path_buf());
    let err = AnalysisContext::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::CollaboratorUnavailable { collaborator: "pronunciation dictionary", .. }));

    let mut config = Config::default();
    config.pos_lexicon_path = Some(PathBuf::from("/nonexistent/litloom/pos.tsv"));
    let err = AnalysisContext::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::CollaboratorUnavailable { collaborator: "part-of-speech tagger", .. }));
    assert!(err.is_fatal());
}
