use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use textmetrics::config::runtime::{FileConfig, LexiconPaths};
use textmetrics::logging::service::LoggingService;
use textmetrics::{batch, engine, logging};
use textmetrics::{documents, report, BatchConfig, Lexicon};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.txt|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1..]);

    // Config file logging preferences win over environment defaults
    let file_config = match &options.config_path {
        Some(path) => FileConfig::from_path(Path::new(path))?,
        None => FileConfig::default(),
    };

    match &file_config.logging {
        Some(prefs) => logging::init_global_logging_with_service(Arc::new(
            LoggingService::from_preferences(prefs),
        ))?,
        None => logging::init_global_logging()?,
    }

    let batch_config = resolve_batch_config(&options, &file_config);
    let lexicon = Arc::new(load_lexicon(&options, &file_config)?);

    let input_path = Path::new(&options.input);
    if input_path.is_file() {
        process_single_document(input_path, &lexicon, &options)?;
    } else if input_path.is_dir() {
        process_directory(input_path, lexicon, &batch_config, &options)?;
    } else {
        eprintln!("Error: Input must be a text file or directory");
        eprintln!("  Path: {}", input_path.display());
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("textmetrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Lexicon-based sentiment and readability metrics for text documents");
    println!();
    println!("USAGE:");
    println!(
        "    {} <input.txt> [options]          # Analyze single document",
        program_name
    );
    println!(
        "    {} <directory> [options]          # Analyze all .txt documents",
        program_name
    );
    println!();
    println!("LEXICON (all three required, via flags or config file):");
    println!("    --positive FILE     Positive word list, one word per line");
    println!("    --negative FILE     Negative word list, one word per line");
    println!("    --stopwords FILE    Stop-word list, one word per line");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --output FILE       Write a JSON report to FILE");
    println!("    --config FILE       Load settings from a TOML config file");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --parallel          Force parallel processing (default)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --fail-fast         Stop on first failed document");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("OUTPUT:");
    println!("    Single document: the metrics record as pretty JSON on stdout");
    println!("    Directory: batch summary plus cargo-style per-document errors;");
    println!("    with --output, the full report including every record");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} article.txt --positive pos.txt --negative neg.txt --stopwords stop.txt",
        program_name
    );
    println!(
        "    {} corpus/ --config analyzer.toml --output report.json",
        program_name
    );
    println!(
        "    {} corpus/ --threads 4 --fail-fast --quiet",
        program_name
    );
}

// ============================================================================
// OPTION PARSING
// ============================================================================

#[derive(Debug, Default)]
struct CliOptions {
    input: String,
    positive: Option<String>,
    negative: Option<String>,
    stopwords: Option<String>,
    output: Option<String>,
    config_path: Option<String>,
    sequential: bool,
    threads: Option<usize>,
    no_recursive: bool,
    fail_fast: bool,
    quiet: bool,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        input: args[0].clone(),
        ..Default::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--positive" => {
                if let Some(value) = take_value(args, &mut i, "--positive") {
                    options.positive = Some(value);
                }
            }
            "--negative" => {
                if let Some(value) = take_value(args, &mut i, "--negative") {
                    options.negative = Some(value);
                }
            }
            "--stopwords" => {
                if let Some(value) = take_value(args, &mut i, "--stopwords") {
                    options.stopwords = Some(value);
                }
            }
            "--output" => {
                if let Some(value) = take_value(args, &mut i, "--output") {
                    options.output = Some(value);
                }
            }
            "--config" => {
                if let Some(value) = take_value(args, &mut i, "--config") {
                    options.config_path = Some(value);
                }
            }
            "--sequential" => {
                options.sequential = true;
            }
            "--parallel" => {
                options.sequential = false;
            }
            "--threads" => {
                if let Some(value) = take_value(args, &mut i, "--threads") {
                    match value.parse::<usize>() {
                        Ok(threads) => options.threads = Some(threads.clamp(1, 32)),
                        Err(_) => {
                            eprintln!("Warning: Invalid thread count '{}', using default", value)
                        }
                    }
                }
            }
            "--no-recursive" => {
                options.no_recursive = true;
            }
            "--fail-fast" => {
                options.fail_fast = true;
            }
            "--quiet" => {
                options.quiet = true;
            }
            unknown => {
                eprintln!("Warning: Unknown option '{}'", unknown);
            }
        }
        i += 1;
    }

    options
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Option<String> {
    if *i + 1 < args.len() {
        *i += 1;
        Some(args[*i].clone())
    } else {
        eprintln!("Warning: {} requires a value", flag);
        None
    }
}

fn resolve_batch_config(options: &CliOptions, file_config: &FileConfig) -> BatchConfig {
    let mut config = BatchConfig::from_preferences(&file_config.batch_preferences());

    if options.sequential {
        config.max_threads = 1;
    }
    if let Some(threads) = options.threads {
        config.max_threads = threads;
    }
    if options.fail_fast {
        config.fail_fast = true;
    }
    if options.quiet {
        config.progress_reporting = false;
    }

    config
}

/// CLI lexicon flags win over the config file's [lexicon] section
fn load_lexicon(
    options: &CliOptions,
    file_config: &FileConfig,
) -> Result<Lexicon, Box<dyn std::error::Error>> {
    let from_config = file_config.lexicon.as_ref();

    let resolve = |cli: &Option<String>, pick: fn(&LexiconPaths) -> &String, flag: &str| {
        cli.clone()
            .or_else(|| from_config.map(|paths| pick(paths).clone()))
            .ok_or_else(|| {
                format!(
                    "Missing {} word list: pass {} or set it in the config file",
                    flag.trim_start_matches("--"),
                    flag
                )
            })
    };

    let positive = resolve(&options.positive, |p| &p.positive, "--positive")?;
    let negative = resolve(&options.negative, |p| &p.negative, "--negative")?;
    let stopwords = resolve(&options.stopwords, |p| &p.stopwords, "--stopwords")?;

    Ok(Lexicon::load_from_files(
        &PathBuf::from(positive),
        &PathBuf::from(negative),
        &PathBuf::from(stopwords),
    )?)
}

// ============================================================================
// PROCESSING
// ============================================================================

fn process_single_document(
    path: &Path,
    lexicon: &Lexicon,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !options.quiet {
        println!("Analyzing document: {}", path.display());
    }

    let document = match documents::load_document(path) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    };

    match engine::compute(&document.id, &document.text, lexicon) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);

            if let Some(output) = &options.output {
                std::fs::write(output, serde_json::to_string_pretty(&record)?)?;
                if !options.quiet {
                    println!("Record written to {}", output);
                }
            }
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn process_directory(
    dir: &Path,
    lexicon: Arc<Lexicon>,
    config: &BatchConfig,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !options.quiet {
        println!("Starting batch analysis: {}", dir.display());
        println!(
            "Configuration: {} threads, recursive={}, fail_fast={}",
            config.max_threads, !options.no_recursive, config.fail_fast
        );
    }

    match batch::analyze_directory(dir, lexicon, config, !options.no_recursive) {
        Ok(results) => {
            if !options.quiet {
                println!("\nBatch analysis completed!");
                print_batch_results(&results);
            }

            if let Some(output) = &options.output {
                let batch_report = report::BatchReport::from_results(&results);
                batch_report.write_to_file(Path::new(output))?;
                if !options.quiet {
                    println!("Report written to {}", output);
                }
            }

            logging::print_cargo_style_summary();

            if results.has_failures() {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Batch analysis failed: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("Batch Summary:");
    println!("  Documents processed: {}", results.documents_processed);
    println!(
        "  Successful: {} ({:.1}%)",
        results.successful.len(),
        results.success_rate() * 100.0
    );
    println!("  Failed: {}", results.failed.len());
    println!("  Total time: {:.2}s", results.duration.as_secs_f64());

    if !results.failed.is_empty() {
        println!("\nFailed Documents:");
        for (id, failure) in &results.failed {
            println!("  {}: {}", id, failure);
        }
    }

    if !results.successful.is_empty() && results.successful.len() <= 10 {
        println!("\nAnalyzed Documents:");
        for (id, record) in &results.successful {
            println!(
                "  {}: {} words, fog index {:.2}, polarity {:+.3}",
                id, record.word_count, record.fog_index, record.polarity_score
            );
        }
    } else if results.successful.len() > 10 {
        println!(
            "\n{} documents analyzed (showing first 5):",
            results.successful.len()
        );
        for (id, record) in results.successful.iter().take(5) {
            println!(
                "  {}: {} words, fog index {:.2}, polarity {:+.3}",
                id, record.word_count, record.fog_index, record.polarity_score
            );
        }
        println!("  ... and {} more", results.successful.len() - 5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let parsed = parse_options(&args(&[
            "corpus/",
            "--positive",
            "pos.txt",
            "--negative",
            "neg.txt",
            "--stopwords",
            "stop.txt",
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
        ]));

        assert_eq!(parsed.input, "corpus/");
        assert_eq!(parsed.positive.as_deref(), Some("pos.txt"));
        assert_eq!(parsed.threads, Some(4));
        assert!(parsed.fail_fast);
        assert!(parsed.no_recursive);
        assert!(!parsed.sequential);
    }

    #[test]
    fn test_parse_options_invalid_threads() {
        let parsed = parse_options(&args(&["corpus/", "--threads", "lots"]));
        assert_eq!(parsed.threads, None);
    }

    #[test]
    fn test_resolve_batch_config_overrides() {
        let parsed = parse_options(&args(&["corpus/", "--sequential", "--quiet"]));
        let config = resolve_batch_config(&parsed, &FileConfig::default());

        assert_eq!(config.max_threads, 1);
        assert!(!config.progress_reporting);
    }

    #[test]
    fn test_lexicon_paths_from_config_file() {
        let file_config = FileConfig {
            lexicon: Some(LexiconPaths {
                positive: "p.txt".to_string(),
                negative: "n.txt".to_string(),
                stopwords: "s.txt".to_string(),
            }),
            ..Default::default()
        };

        let parsed = parse_options(&args(&["corpus/"]));
        // Paths resolve from the config file but the files do not exist
        let result = load_lexicon(&parsed, &file_config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_missing_lexicon_flag() {
        let parsed = parse_options(&args(&["corpus/", "--positive", "p.txt"]));
        let result = load_lexicon(&parsed, &FileConfig::default());

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("negative"));
    }
}
