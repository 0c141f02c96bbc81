//! `litloom` - analyze a poem from the command line.

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use litloom::config::Config;
use litloom::constants::spelling::DEFAULT_SUGGESTIONS;
use litloom::phonetics::CmuDict;
use litloom::pos::LexiconTagger;
use litloom::report::render_text;
use litloom::services::spelling::SpellChecker;
use litloom::{analyze, AnalysisContext, AnalysisReport};

/// Example poems, separated by `%%` lines.
const SAMPLES: &str = include_str!("../data/samples.txt");

const USAGE: &str = "\
Usage: litloom [FILE|-] [options]

Reads a poem from FILE, or from stdin when FILE is omitted or '-'.

Options:
  --json         Print the report as JSON
  --copy         Copy the text report to the clipboard
  --spell        List unknown words with suggestions
  --batch DIR    Analyze every .txt file under DIR
  --sample N     Analyze bundled example poem N (1-based)
  -V, --version  Show the version
  -h, --help     Show this help

Environment:
  LITLOOM_CMUDICT, LITLOOM_SENTIMENT_LEXICON, LITLOOM_POS_LEXICON,
  LITLOOM_WORDLIST, LITLOOM_RHYME_TOLERANCE, LITLOOM_ALLITERATION_WINDOW, RUST_LOG";

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    input: Option<String>,
    json: bool,
    copy: bool,
    spell: bool,
    batch: Option<PathBuf>,
    sample: Option<usize>,
}

/// What the invocation asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Analyze(Options),
    Help,
    Version,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--json" => opts.json = true,
            "--copy" => opts.copy = true,
            "--spell" => opts.spell = true,
            "--batch" => {
                let dir = args.next().context("--batch needs a directory")?;
                opts.batch = Some(PathBuf::from(dir));
            }
            "--sample" => {
                let n = args.next().context("--sample needs a number")?;
                opts.sample = Some(n.parse().with_context(|| format!("invalid sample number {n:?}"))?);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n\n{USAGE}"),
            _ if opts.input.is_some() => bail!("only one input file may be given"),
            _ => opts.input = Some(arg),
        }
    }

    Ok(Command::Analyze(opts))
}

fn sample(n: usize) -> Result<&'static str> {
    let poems: Vec<&str> = SAMPLES.split("\n%%\n").map(str::trim).collect();
    match n.checked_sub(1).and_then(|i| poems.get(i)) {
        Some(poem) => Ok(poem),
        None => bail!("no sample {n}; choose 1 to {}", poems.len()),
    }
}

fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read poem from stdin")?;
            Ok(text)
        }
        Some(path) => fs_err::read_to_string(path).context("failed to read poem"),
    }
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", render_text(report));
    }
    Ok(())
}

/// Vocabulary matching the configured collaborators.
fn spell_checker(config: &Config) -> Result<SpellChecker> {
    let dict = match &config.cmudict_path {
        Some(path) => CmuDict::load(path)?,
        None => CmuDict::builtin(),
    };
    let mut tagger = LexiconTagger::builtin();
    if let Some(path) = &config.pos_lexicon_path {
        tagger = tagger.merged_with(LexiconTagger::load(path)?);
    }
    let checker = SpellChecker::from_collaborators(&dict, &tagger);
    match &config.wordlist_path {
        Some(path) => Ok(checker.merged_with(SpellChecker::load(path)?)),
        None => Ok(checker),
    }
}

fn print_spelling(text: &str, checker: &SpellChecker) {
    let unknown = checker.unknown_words(text);
    println!("\nSpelling\n--------");
    if unknown.is_empty() {
        println!("  - No unknown words.");
    }
    for word in unknown {
        let suggestions = checker.suggestions(&word, DEFAULT_SUGGESTIONS);
        if suggestions.is_empty() {
            println!("  {word}: no suggestions");
        } else {
            println!("  {word}: {}", suggestions.join(", "));
        }
    }
}

/// Write text to the system clipboard, warning when none is available.
fn copy_to_clipboard(text: &str) {
    match Clipboard::new().and_then(|mut cb| cb.set_text(text.to_owned())) {
        Ok(()) => eprintln!("Report copied to clipboard."),
        Err(e) => tracing::warn!("Could not copy report to clipboard: {e}"),
    }
}

fn run_batch(dir: &Path, ctx: &AnalysisContext, json: bool) -> Result<()> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")))
        .collect();
    files.sort();
    tracing::info!("Analyzing {} poems under {}", files.len(), dir.display());

    let results: Vec<(PathBuf, Result<AnalysisReport>)> = files
        .into_par_iter()
        .map(|path| {
            let report = fs_err::read_to_string(&path)
                .context("failed to read poem")
                .and_then(|text| analyze(&text, ctx).map_err(anyhow::Error::from));
            (path, report)
        })
        .collect();

    let mut failed = 0;
    let mut reports = Vec::new();
    for (path, result) in results {
        match result {
            Ok(report) if json => reports.push(serde_json::json!({
                "file": path.display().to_string(),
                "report": report,
            })),
            Ok(report) => println!("== {} ==\n{}", path.display(), render_text(&report)),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e:#}", path.display());
            }
        }
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        bail!("{failed} poem(s) could not be analyzed");
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays the report
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let command = parse_args(env::args().skip(1))?;
    let config = Config::load()?;
    let opts = match command {
        Command::Analyze(opts) => opts,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("{} {}", config.app_name(), config.app_version());
            return Ok(());
        }
    };
    if config.uses_external_data() {
        tracing::info!("Using configured data files in place of built-in lexicons");
    }
    let ctx = AnalysisContext::from_config(&config)?;
    tracing::debug!("Using {ctx:?}");

    if let Some(dir) = &opts.batch {
        return run_batch(dir, &ctx, opts.json);
    }

    let text = match opts.sample {
        Some(n) => sample(n)?.to_string(),
        None => read_input(opts.input.as_deref())?,
    };

    let report = analyze(&text, &ctx)?;
    print_report(&report, opts.json)?;

    if opts.spell {
        print_spelling(&text, &spell_checker(&config)?);
    }
    if opts.copy {
        copy_to_clipboard(&render_text(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_args() {
        let Command::Analyze(opts) = parse_args(args(&["poem.txt", "--json", "--sample", "2"])).unwrap() else {
            panic!("expected analyze command");
        };
        assert_eq!(opts.input.as_deref(), Some("poem.txt"));
        assert!(opts.json);
        assert_eq!(opts.sample, Some(2));
        assert_eq!(parse_args(args(&["--help"])).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["poem.txt", "-V"])).unwrap(), Command::Version);
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--batch"])).is_err());
        assert!(parse_args(args(&["a.txt", "b.txt"])).is_err());
    }

    #[test]
    fn test_samples() {
        assert!(sample(1).unwrap().starts_with("Shall I compare thee"));
        assert!(sample(3).unwrap().starts_with("Peter Piper"));
        assert!(sample(0).is_err());
        assert!(sample(99).is_err());
    }

    #[test]
    fn test_spell_checker_merges_configured_wordlist() {
        use std::io::Write;

        let mut words = tempfile::NamedTempFile::new().unwrap();
        writeln!(words, "snickersnee").unwrap();
        let mut config = Config::default();
        config.wordlist_path = Some(words.path().to_path_buf());
        let checker = spell_checker(&config).unwrap();
        assert!(checker.is_known("snickersnee"));
        assert!(checker.is_known("played"));

        let mut missing = Config::default();
        missing.wordlist_path = Some(PathBuf::from("/nonexistent/litloom/words.txt"));
        assert!(spell_checker(&missing).is_err());
    }

    #[test]
    fn test_every_sample_analyzes() {
        let ctx = AnalysisContext::builtin();
        for n in 1..=5 {
            let report = analyze(sample(n).unwrap(), &ctx).unwrap();
            assert!(report.line_count() > 0);
        }
    }
}
