use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use std::io;
use std::process::ExitCode;

use dotquill::config::Config;
use dotquill::document::flatten::{flatten, unflatten_tree};
use dotquill::document::node::Tree;
use dotquill::dotpath;
use dotquill::file::loader::{load_tree_file, load_tree_file_as, load_tree_from_reader, parse_tree};
use dotquill::file::saver::{save_tree_file, serialize_tree};
use dotquill::file::DocumentFormat;
use dotquill::search::{self, Criteria, SearchMatch};

/// dotquill - read, write, flatten and search nested config files by dot path
#[derive(Parser)]
#[command(name = "dotquill")]
#[command(version)]
#[command(about = "Dot-notation access to JSON, YAML and TOML documents", long_about = None)]
struct Cli {
    /// Document to operate on ("-" reads stdin)
    file: String,

    /// Input format (inferred from the file name when omitted, json for stdin)
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,

    /// Output format (defaults to the config file setting)
    #[arg(short, long, value_enum)]
    output: Option<DocumentFormat>,

    /// Print JSON on a single line
    #[arg(short, long)]
    compact: bool,

    /// Store the effective output settings in the config file
    #[arg(long)]
    save_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a path (exit status 1 when absent)
    Get { path: String },
    /// Report whether a path exists (exit status 1 when it does not)
    Has { path: String },
    /// Print the decoded segments of a path, one per line
    Keys { path: String },
    /// Set the value at a path; VALUE is parsed as JSON, else taken as a string
    Set {
        path: String,
        value: String,
        /// Save the result back to FILE instead of printing it
        #[arg(short, long)]
        write: bool,
    },
    /// Print the document as a single-level map of escaped paths
    Flatten,
    /// Expand a single-level map of escaped paths into a nested document
    Unflatten,
    /// Search by path, substring, keywords and regex
    Search {
        /// Exact path to resolve
        #[arg(long)]
        path: Option<String>,
        /// Substring of a generated path
        #[arg(long)]
        like: Option<String>,
        /// Keyword matched against paths and string values (repeatable)
        #[arg(short = 'k', long = "keyword")]
        keywords: Vec<String>,
        /// Pattern searched for in generated paths (plain or /pattern/flags)
        #[arg(long)]
        regex: Option<String>,
        /// Criteria as a JSON object, e.g. '{"like": "port"}'
        #[arg(long, conflicts_with_all = ["path", "like", "keywords", "regex"])]
        criteria: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder.init();
}

fn load_input(cli: &Cli) -> Result<Tree> {
    if cli.file == "-" {
        let format = cli.format.unwrap_or_default();
        return load_tree_from_reader(io::stdin().lock(), format)
            .context("Failed to load document from stdin");
    }
    match cli.format {
        Some(format) => load_tree_file_as(&cli.file, format),
        None => load_tree_file(&cli.file),
    }
}

/// Prints scalars bare and containers in the configured output format.
fn print_tree(tree: &Tree, format: DocumentFormat, config: &Config) -> Result<()> {
    match tree {
        Tree::String(s) => println!("{}", s),
        Tree::Number(n) => println!("{}", n),
        Tree::Boolean(b) => println!("{}", b),
        Tree::Null => println!("null"),
        Tree::Object(_) | Tree::Array(_) => print!("{}", serialize_tree(tree, format, config)?),
    }
    Ok(())
}

fn parse_value_arg(raw: &str) -> Tree {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Tree::from)
        .unwrap_or_else(|_| Tree::from(raw))
}

fn build_criteria(
    path: Option<String>,
    like: Option<String>,
    keywords: Vec<String>,
    regex: Option<String>,
    criteria: Option<String>,
) -> Result<Criteria> {
    if let Some(raw) = criteria {
        let document = parse_tree(&raw, DocumentFormat::Json).context("Invalid --criteria")?;
        return Ok(Criteria::from_tree(&document)?);
    }

    let mut built = Criteria::new();
    built.path = path;
    built.like = like;
    if !keywords.is_empty() {
        built = built.with_keywords(keywords);
    }
    if let Some(pattern) = regex {
        built = built.with_regex_str(&pattern)?;
    }
    if built.is_empty() {
        anyhow::bail!("search needs at least one of --path, --like, --keyword, --regex or --criteria");
    }
    Ok(built)
}

/// Builds the list of match records. TOML cannot hold an array at the root,
/// so for TOML the list is nested under `matches`.
fn matches_to_tree(matches: &[SearchMatch<'_>], format: DocumentFormat) -> Tree {
    let records = Tree::Array(
        matches
            .iter()
            .map(|found| {
                let mut record = IndexMap::new();
                record.insert("path".to_string(), Tree::from(found.path.as_str()));
                record.insert("kind".to_string(), Tree::from(found.kind.as_str()));
                record.insert("value".to_string(), found.value.clone());
                Tree::Object(record)
            })
            .collect(),
    );
    match format {
        DocumentFormat::Toml => {
            let mut wrapper = IndexMap::new();
            wrapper.insert("matches".to_string(), records);
            Tree::Object(wrapper)
        }
        DocumentFormat::Json | DocumentFormat::Yaml => records,
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load();
    if let Some(output) = cli.output {
        config.output_format = output;
    }
    if cli.compact {
        config.compact_output = true;
    }
    let output = config.output_format;
    if cli.save_config {
        config.save().context("Failed to save config")?;
        log::info!("saved config to {:?}", Config::config_path());
    }

    let mut tree = load_input(&cli)?;

    match cli.command {
        Command::Get { path } => match dotpath::read(&tree, &path)? {
            Some(value) => print_tree(value, output, &config)?,
            None => {
                log::debug!("no value at '{}'", path);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Has { path } => {
            let found = dotpath::exists(&tree, &path)?;
            println!("{}", found);
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Keys { path } => {
            for segment in dotpath::split(&path) {
                println!("{}", segment);
            }
        }
        Command::Set { path, value, write } => {
            dotpath::write(&mut tree, &path, parse_value_arg(&value))?;
            if write {
                if cli.file == "-" {
                    anyhow::bail!("--write needs a file, not stdin");
                }
                save_tree_file(&cli.file, &tree, &config)?;
            } else {
                print_tree(&tree, output, &config)?;
            }
        }
        Command::Flatten => {
            let flat = Tree::Object(flatten(&tree)?);
            print_tree(&flat, output, &config)?;
        }
        Command::Unflatten => {
            let nested = unflatten_tree(&tree)?;
            print_tree(&nested, output, &config)?;
        }
        Command::Search {
            path,
            like,
            keywords,
            regex,
            criteria,
        } => {
            let criteria = build_criteria(path, like, keywords, regex, criteria)?;
            let matches = search::has(&tree, &criteria)?;
            print_tree(&matches_to_tree(&matches, output), output, &config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_arg() {
        assert_eq!(parse_value_arg("10"), Tree::from(10));
        assert_eq!(parse_value_arg("{\"a\": true}"), Tree::from(json!({"a": true})));
        assert_eq!(parse_value_arg("plain text"), Tree::from("plain text"));
    }

    #[test]
    fn test_build_criteria_requires_something() {
        assert!(build_criteria(None, None, vec![], None, None).is_err());
    }

    #[test]
    fn test_build_criteria_from_json() {
        let criteria =
            build_criteria(None, None, vec![], None, Some(r#"{"like": "port"}"#.to_string()))
                .unwrap();
        assert_eq!(criteria.like.as_deref(), Some("port"));
    }

    #[test]
    fn test_matches_to_tree() {
        let tree = Tree::from(json!({"a": {"b": 1}}));
        let matches = search::has(&tree, &Criteria::new().with_like("b")).unwrap();
        assert_eq!(
            matches_to_tree(&matches, DocumentFormat::Json),
            Tree::from(json!([{"path": "a.b", "kind": "like", "value": 1}]))
        );
    }

    #[test]
    fn test_matches_to_tree_toml_output() {
        let tree = Tree::from(json!({"a": {"b": 1}}));
        let matches = search::has(&tree, &Criteria::new().with_like("b")).unwrap();
        let records = matches_to_tree(&matches, DocumentFormat::Toml);
        assert_eq!(
            records,
            Tree::from(json!({"matches": [{"path": "a.b", "kind": "like", "value": 1}]}))
        );

        let text = serialize_tree(&records, DocumentFormat::Toml, &Config::default()).unwrap();
        let parsed = parse_tree(&text, DocumentFormat::Toml).unwrap();
        assert_eq!(parsed, records);
    }
}
