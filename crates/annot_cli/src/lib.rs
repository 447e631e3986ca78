use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use annot_answer::{annotate_request, AnnotateRequest, AnnotatedAnswer, PassthroughPaths};
use annot_core::config::{Settings, SuggestionConfig};
use annot_core::error::AppError;
use annot_core::metadata::{group_metadata_csv, is_metadata_file, DocumentMetadata};
use annot_core::suggest::{Tag, TagCatalog};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "annot")]
#[command(about = "Annotate model answers with citations and follow-up questions")]
pub struct Cli {
    /// JSON settings file; missing fields keep their defaults.
    #[arg(long, global = true, env = "ANNOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Annotate one answer request (JSON) and print the result.
    Annotate {
        /// Request file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: PathBuf,
        /// Print only the rendered answer markup.
        #[arg(long, default_value_t = false)]
        html: bool,
    },
    /// Suggest tags from a JSON array of known values.
    Suggest {
        #[arg(long)]
        values: PathBuf,
        #[arg(long, default_value = "")]
        filter: String,
        /// Already selected tag keys.
        #[arg(long, value_delimiter = ',')]
        selected: Vec<String>,
        #[arg(long, default_value_t = false)]
        allow_new: bool,
        /// Noun used in the "no results" hint.
        #[arg(long, default_value = "author")]
        kind: String,
    },
    /// Group a `filename,key,value` metadata CSV by document.
    Metadata {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct SuggestResponse {
    pub suggestions: Vec<Tag>,
    pub no_results_text: Option<String>,
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, AppError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new("CLI_CONFIG_READ_FAILED", "Failed to read settings file")
            .with_details(format!("path={}; err={e}", path.display()))
    })?;
    Settings::from_json_str(&raw)
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, AppError> {
    let read_err = |e: std::io::Error| {
        AppError::new("CLI_INPUT_READ_FAILED", "Failed to read input")
            .with_details(format!("path={}; err={e}", path.display()))
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(read_err)
    }
}

pub fn annotate_json(raw_request: &str, settings: &Settings) -> Result<AnnotatedAnswer, AppError> {
    let request: AnnotateRequest = serde_json::from_str(raw_request).map_err(|e| {
        AppError::new("CLI_INPUT_PARSE_FAILED", "Failed to parse annotate request")
            .with_details(e.to_string())
    })?;
    annotate_request(&request, &settings.annotator, &PassthroughPaths)
}

pub fn suggest_json(
    raw_values: &str,
    filter: &str,
    selected: &[String],
    config: SuggestionConfig,
    kind: &str,
) -> Result<SuggestResponse, AppError> {
    let values: Vec<String> = serde_json::from_str(raw_values).map_err(|e| {
        AppError::new("CLI_INPUT_PARSE_FAILED", "Failed to parse tag values")
            .with_details(e.to_string())
    })?;
    let catalog = TagCatalog::from_raw(values, config);
    let selected: Vec<Tag> = selected.iter().map(Tag::existing).collect();
    let suggestions = catalog.suggest(filter, &selected);
    let no_results_text = suggestions
        .is_empty()
        .then(|| catalog.no_results_text(kind));
    Ok(SuggestResponse {
        suggestions,
        no_results_text,
    })
}

pub fn load_metadata(path: &Path) -> Result<DocumentMetadata, AppError> {
    if !is_metadata_file(path) {
        return Err(AppError::new(
            "CLI_METADATA_NOT_CSV",
            "Metadata input must be a .csv file",
        )
        .with_details(format!("path={}", path.display())));
    }
    let raw = read_input(path)?;
    group_metadata_csv(&raw)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        AppError::new("CLI_OUTPUT_SERIALIZE_FAILED", "Failed to serialize output")
            .with_details(e.to_string())
    })
}

/// Execute one parsed command and return what should be printed to stdout.
pub fn execute(cli: Cli) -> Result<String, AppError> {
    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Annotate { input, html } => {
            let raw = read_input(&input)?;
            let out = annotate_json(&raw, &settings)?;
            tracing::info!(
                approach = %out.approach,
                work_citations = out.work_citations.len(),
                web_citations = out.web_citations.len(),
                warnings = out.warnings.len(),
                "annotated"
            );
            if html {
                Ok(out.answer_html)
            } else {
                to_json(&out)
            }
        }
        Command::Suggest {
            values,
            filter,
            selected,
            allow_new,
            kind,
        } => {
            let raw = read_input(&values)?;
            let mut config = settings.suggestions;
            config.allow_new |= allow_new;
            let resp = suggest_json(&raw, &filter, &selected, config, &kind)?;
            to_json(&resp)
        }
        Command::Metadata { input } => {
            let out = load_metadata(&input)?;
            tracing::info!(
                documents = out.documents.len(),
                skipped = out.warnings.len(),
                "loaded metadata"
            );
            to_json(&out)
        }
    }
}

pub fn run() -> Result<String, AppError> {
    execute(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_annotate_flags() {
        let cli = Cli::try_parse_from(["annot", "annotate", "--input", "req.json", "--html"])
            .expect("parse");
        match cli.command {
            Command::Annotate { input, html } => {
                assert_eq!(input, PathBuf::from("req.json"));
                assert!(html);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_selected_list() {
        let cli = Cli::try_parse_from([
            "annot", "suggest", "--values", "v.json", "--filter", "sm", "--selected", "A,B",
        ])
        .expect("parse");
        match cli.command {
            Command::Suggest { selected, .. } => assert_eq!(selected, vec!["A", "B"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
