use anyhow::{Context, Result, bail};
use clinote_config::Config;
use clinote_engine::{AnnotationEngine, Classification, DecorationSet, Document, HighlightMode};
use std::{env, path::PathBuf, process};

struct Args {
    note_path: PathBuf,
    all_sentences: bool,
    terms: Vec<String>,
}

fn usage(program: &str) -> String {
    format!("Usage: {program} [--all] [--terms term1,term2,...] <note-file>")
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut note_path = None;
    let mut all_sentences = false;
    let mut terms = Vec::new();

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--all" => all_sentences = true,
            "--terms" => {
                let Some(list) = rest.next() else {
                    bail!("--terms needs a comma-separated list");
                };
                terms.extend(list.split(',').map(|t| t.trim().to_string()));
            }
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            path if note_path.is_none() => note_path = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument '{extra}'"),
        }
    }

    let Some(note_path) = note_path else {
        bail!("No note file provided");
    };
    Ok(Args {
        note_path,
        all_sentences,
        terms,
    })
}

fn print_overlay(title: &str, engine: &AnnotationEngine, overlay: &DecorationSet) -> Result<()> {
    println!("{title}:");
    if overlay.is_empty() {
        println!("  (none)");
    }
    for decoration in overlay {
        let text = engine
            .document()
            .text_between(decoration.span.from, decoration.span.to)?;
        let marker = match decoration.classification {
            Classification::Unmatched => "?",
            Classification::Matched => "+",
        };
        println!(
            "  {marker} [{}..{}] {:?}: {text}",
            decoration.span.from, decoration.span.to, decoration.hint
        );
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("clinote");
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load()? {
        Some(config) => {
            log::info!("Using config from {}", config_path.display());
            config
        }
        None => {
            log::debug!(
                "No config at {}, using bundled lexicon",
                config_path.display()
            );
            Config::default()
        }
    };
    let mut engine_config = config.engine_config()?;
    if args.all_sentences {
        engine_config.highlight_mode = HighlightMode::AllSentences;
    }

    let text = std::fs::read_to_string(&args.note_path)
        .with_context(|| format!("Failed to read note '{}'", args.note_path.display()))?;
    let document = Document::from_plain_text(&text);
    log::info!(
        "Annotating {} ({} chars)",
        args.note_path.display(),
        document.len()
    );

    let mut engine = AnnotationEngine::new(&engine_config, document);

    let title = match engine_config.highlight_mode {
        HighlightMode::UnmatchedOnly => "Unrecognised sentences",
        HighlightMode::AllSentences => "Sentences",
    };
    let overlay = engine.decorations().clone();
    print_overlay(title, &engine, &overlay)?;

    if !args.terms.is_empty() {
        let highlights = engine.term_highlights(&args.terms);
        print_overlay("Term highlights", &engine, &highlights)?;
    }

    println!("Tasks:");
    let tasks = engine.close();
    if tasks.is_empty() {
        println!("  (none)");
    }
    for task in tasks.iter() {
        println!("  [ ] {task}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("clinote")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_note_path_only() {
        let parsed = parse_args(&args(&["note.txt"])).unwrap();
        assert_eq!(parsed.note_path, PathBuf::from("note.txt"));
        assert!(!parsed.all_sentences);
        assert!(parsed.terms.is_empty());
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&["--all", "--terms", "aspirin, mg", "note.txt"])).unwrap();
        assert!(parsed.all_sentences);
        assert_eq!(parsed.terms, vec!["aspirin", "mg"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--terms"])).is_err());
        assert!(parse_args(&args(&["--verbose", "note.txt"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }
}
