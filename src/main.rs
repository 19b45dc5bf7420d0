//! twistlex - TwistLang syntax classifier and include resolver
//!
//! Prints a `.twist` file with syntax colors, dumps the style runs for a
//! byte range, or resolves the include directive on a given line.

use std::env;
use std::fs;
use std::io::{self, IsTerminal};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use twistlex::config::Config;
use twistlex::error::{Error, Result};
use twistlex::render;
use twistlex::syntax::{is_twist_file, IncrementalLexer, LANGUAGE_NAME};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    file: PathBuf,
    runs: bool,
    range: Option<Range<usize>>,
    goto: Option<usize>,
    include_paths: Vec<PathBuf>,
    no_color: bool,
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(opts) = parse_args(&args)? else {
        return Ok(());
    };

    let config = Config::load()?;
    debug!(?opts, "starting");

    if !is_twist_file(&opts.file) {
        warn!(file = %opts.file.display(), "not a .twist file, highlighting anyway");
    }

    match opts.goto {
        Some(line) => goto_include(&opts, &config, line),
        None => highlight(&opts, &config),
    }
}

fn highlight(opts: &Options, config: &Config) -> Result<()> {
    let buffer = fs::read(&opts.file)?;
    let lexer = IncrementalLexer::new(config.vocabulary()?);
    let range = opts.range.clone().unwrap_or(0..buffer.len());
    let restyle = lexer.restyle(&buffer, range);

    let mut out = io::stdout().lock();
    if opts.runs {
        render::write_runs(&mut out, &buffer, &restyle)
    } else {
        let color = config.color && !opts.no_color && io::stdout().is_terminal();
        render::write_highlighted(&mut out, &buffer, &restyle, color)
    }
}

fn goto_include(opts: &Options, config: &Config, line_no: usize) -> Result<()> {
    let buffer = fs::read(&opts.file)?;
    let text = String::from_utf8_lossy(&buffer);
    let line = line_no
        .checked_sub(1)
        .and_then(|idx| text.lines().nth(idx))
        .ok_or_else(|| Error::Usage(format!("line {} is out of range", line_no)))?;

    let mut resolver = config.resolver();
    for path in &opts.include_paths {
        resolver.add_search_path(path);
    }

    let base_dir = opts
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let path = resolver.resolve_line(line, base_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn parse_range(spec: &str) -> Result<Range<usize>> {
    let bad = || Error::Usage(format!("invalid range {:?}, expected START:END", spec));
    let (start, end) = spec.split_once(':').ok_or_else(bad)?;
    let start = start.trim().parse::<usize>().map_err(|_| bad())?;
    let end = end.trim().parse::<usize>().map_err(|_| bad())?;
    Ok(start..end)
}

/// Parse arguments. `Ok(None)` means help or version was printed.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut opts = Options::default();
    let mut file = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| Error::Usage(format!("{} needs a value", name)))
        };
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--runs" => opts.runs = true,
            "--no-color" => opts.no_color = true,
            "--range" => opts.range = Some(parse_range(&value("--range")?)?),
            "--goto" => {
                let v = value("--goto")?;
                let line = v
                    .parse::<usize>()
                    .map_err(|_| Error::Usage(format!("invalid line number {:?}", v)))?;
                opts.goto = Some(line);
            }
            "-I" => opts.include_paths.push(PathBuf::from(value("-I")?)),
            other if other.starts_with('-') => {
                return Err(Error::Usage(format!("unknown option {}", other)));
            }
            other => {
                if file.replace(PathBuf::from(other)).is_some() {
                    return Err(Error::Usage("only one FILE may be given".to_string()));
                }
            }
        }
    }

    opts.file = file.ok_or_else(|| Error::Usage("no FILE given (see --help)".to_string()))?;
    Ok(Some(opts))
}

fn print_usage() {
    println!(
        "twistlex {} - {} syntax classifier",
        env!("CARGO_PKG_VERSION"),
        LANGUAGE_NAME
    );
    println!();
    println!("Usage: twistlex [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  --runs              Print one line per style run instead of colored text");
    println!("  --range START:END   Only classify this byte range");
    println!("  --goto LINE         Resolve the #include on LINE (1-based) and print its path");
    println!("  -I DIR              Add an include search path");
    println!("  --no-color          Never emit terminal colors");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Settings are read from ~/.twistlex.toml. Set RUST_LOG=debug for tracing.");
}

fn print_version() {
    println!("twistlex {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_highlight() {
        let opts = parse_args(&args(&["main.twist"])).unwrap().unwrap();
        assert_eq!(opts.file, PathBuf::from("main.twist"));
        assert!(!opts.runs);
        assert_eq!(opts.goto, None);
    }

    #[test]
    fn test_parse_args_all_options() {
        let opts = parse_args(&args(&[
            "--runs", "--range", "4:20", "-I", "lib", "--goto", "3", "--no-color", "a.twist",
        ]))
        .unwrap()
        .unwrap();
        assert!(opts.runs);
        assert!(opts.no_color);
        assert_eq!(opts.range, Some(4..20));
        assert_eq!(opts.goto, Some(3));
        assert_eq!(opts.include_paths, vec![PathBuf::from("lib")]);
        assert_eq!(opts.file, PathBuf::from("a.twist"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&args(&[])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["--range"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["--range", "4-20", "a"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["--goto", "x", "a"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["--bogus", "a"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["a", "b"])), Err(Error::Usage(_))));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0:10").unwrap(), 0..10);
        assert_eq!(parse_range(" 3 : 7 ").unwrap(), 3..7);
        assert!(parse_range("3").is_err());
    }
}
