//! bracket-colorizer - print a source file with matching brackets colored
//!
//! Runs one colorizer pass over a file and writes it to the terminal.
//! With `--watch` the file is polled and edits are fed through the
//! incremental rescan path.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use bracket_colorizer::colorizer::ScanPhase;
use bracket_colorizer::render::TerminalRenderer;
use bracket_colorizer::{ClockScheduler, ColorizerError, ColorizerManager, Config, Result, TextDocument};
use tracing_subscriber::EnvFilter;

/// How often `--watch` re-reads the file
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    language: Option<String>,
    watch: bool,
    file: Option<PathBuf>,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr so stdout only carries the colored file
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let Some(path) = options.file else {
        print_usage();
        return Err(ColorizerError::Usage("missing FILE argument".to_string()));
    };

    let config = match &options.config {
        Some(config_path) => Config::load(config_path)?,
        None => Config::load_or_default()?,
    };
    let mut manager = ColorizerManager::new(config);

    let language = options
        .language
        .or_else(|| manager.detect_language(&path).map(str::to_string))
        .unwrap_or_else(|| "plaintext".to_string());
    tracing::info!(?path, %language, "colorizing");

    let mut doc = TextDocument::from_file(&path, language.clone())?;
    let id = path.display().to_string();
    let mut renderer = TerminalRenderer::new();

    manager.open_document(&id, &language)?;
    manager.update_decorations(&id, &doc, &mut renderer)?;

    let mut stdout = io::stdout();
    if !options.watch {
        renderer.paint(&doc, &mut stdout)?;
        writeln!(stdout)?;
        return Ok(());
    }

    renderer.repaint(&doc, &mut stdout)?;
    let mut scheduler = ClockScheduler::new();
    loop {
        thread::sleep(POLL_INTERVAL);

        let contents = std::fs::read_to_string(&path)?;
        if let Some(change) = doc.set_text(contents) {
            manager.on_did_change(&id, &[change], &mut scheduler, &doc, &mut renderer)?;
            // Zero timeout rescans synchronously
            let idle = manager
                .session(&id)
                .is_some_and(|session| session.phase() == ScanPhase::Idle);
            if idle {
                renderer.repaint(&doc, &mut stdout)?;
            }
        }

        for handle in scheduler.poll() {
            if manager.on_timer(&id, handle, &doc, &mut renderer)? {
                renderer.repaint(&doc, &mut stdout)?;
            }
        }
    }
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let value = iter
                    .next()
                    .ok_or_else(|| ColorizerError::Usage(format!("{} needs a file", arg)))?;
                options.config = Some(PathBuf::from(value));
            }
            "--language" | "-l" => {
                let value = iter
                    .next()
                    .ok_or_else(|| ColorizerError::Usage(format!("{} needs a language id", arg)))?;
                options.language = Some(value.clone());
            }
            "--watch" => options.watch = true,
            other if other.starts_with('-') => {
                return Err(ColorizerError::Usage(format!("unknown option: {}", other)));
            }
            file => {
                if options.file.is_some() {
                    return Err(ColorizerError::Usage("only one FILE may be given".to_string()));
                }
                options.file = Some(PathBuf::from(file));
            }
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("bracket-colorizer {} - color matching brackets", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: bracket-colorizer [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config FILE    Read settings from FILE instead of ~/.bracket-colorizer.toml");
    println!("  -l, --language ID    Language id (default: from the file extension)");
    println!("      --watch          Re-read FILE on change and recolor incrementally");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Set RUST_LOG=debug to see scan passes on stderr");
}

fn print_version() {
    println!("bracket-colorizer {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["-l", "python", "--watch", "main.rs"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.language.as_deref(), Some("python"));
        assert!(options.watch);
        assert_eq!(options.file, Some(PathBuf::from("main.rs")));
        assert!(options.config.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&args(&["--config"])), Err(ColorizerError::Usage(_))));
        assert!(matches!(parse_args(&args(&["--bogus"])), Err(ColorizerError::Usage(_))));
        assert!(matches!(parse_args(&args(&["a", "b"])), Err(ColorizerError::Usage(_))));
    }
}
