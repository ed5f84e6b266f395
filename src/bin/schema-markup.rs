//! Schema Markup CLI
//!
//! Command-line interface for generating and checking schema.org JSON-LD.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use schema_markup::{
    check_document, expand, generate, load_json, load_values, load_values_reader, to_script_tag,
    validate, FieldError, FieldPath, GenerateOptions, LookupError, SchemaType, ValidateError,
};

#[derive(Parser)]
#[command(name = "schema-markup")]
#[command(about = "Generate and check schema.org JSON-LD markup")]
#[command(version)]
struct Cli {
    /// Log pipeline stages to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported schema types
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fields of a schema type
    Fields {
        /// Schema type (e.g. Article, FAQPage)
        #[arg(value_parser = parse_schema_type)]
        schema_type: SchemaType,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a JSON-LD document from form values
    Generate {
        /// Schema type (e.g. Article, FAQPage)
        #[arg(long = "type", short, value_parser = parse_schema_type)]
        schema_type: SchemaType,

        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Wrap the document in a <script type="application/ld+json"> element
        #[arg(long, conflicts_with = "json")]
        script: bool,

        /// Output the document and field errors together as JSON
        #[arg(long)]
        json: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fail when nothing but @context and @type would be emitted
        #[arg(long)]
        require_content: bool,
    },

    /// Validate form values without generating a document
    Validate {
        /// Schema type (e.g. Article, FAQPage)
        #[arg(long = "type", short, value_parser = parse_schema_type)]
        schema_type: SchemaType,

        #[command(flatten)]
        input: InputArgs,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Check an existing JSON-LD document
    Check {
        /// Document file, or - for stdin
        document: PathBuf,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema of a type's documents
    Schema {
        /// Schema type (e.g. Article, FAQPage)
        #[arg(long = "type", short, value_parser = parse_schema_type)]
        schema_type: SchemaType,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Form values file (JSON object), or - for stdin
    values: Option<PathBuf>,

    /// Set a field by dot path, e.g. --set offers.price=9.99 (repeatable)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    sets: Vec<String>,

    /// Treat top-level keys of the values file as dot paths
    #[arg(long)]
    flat: bool,
}

fn parse_schema_type(s: &str) -> Result<SchemaType, String> {
    s.parse().map_err(|e: LookupError| {
        let known: Vec<&str> = SchemaType::ALL.iter().map(|t| t.as_str()).collect();
        format!("{}; expected one of: {}", e, known.join(", "))
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Types { json } => run_types(json),
        Commands::Fields { schema_type, json } => run_fields(schema_type, json),
        Commands::Generate {
            schema_type,
            input,
            pretty,
            script,
            json,
            output,
            require_content,
        } => run_generate(GenerateArgs {
            schema_type,
            input,
            pretty,
            script,
            json_output: json,
            output,
            require_content,
        }),
        Commands::Validate {
            schema_type,
            input,
            json,
        } => run_validate(schema_type, &input, json),
        Commands::Check { document, json } => run_check(&document, json),
        Commands::Schema {
            schema_type,
            pretty,
        } => run_schema(schema_type, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run_types(json_output: bool) -> Result<(), u8> {
    if json_output {
        let types: Vec<Value> = SchemaType::ALL
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": t.as_str(),
                    "label": t.label(),
                    "description": t.description(),
                })
            })
            .collect();
        println!("{}", Value::Array(types));
    } else {
        for t in SchemaType::ALL {
            println!("{:<16} {:<18} {}", t.as_str(), t.label(), t.description());
        }
    }
    Ok(())
}

fn run_fields(schema_type: SchemaType, json_output: bool) -> Result<(), u8> {
    let fields = schema_type.contract().flatten();

    if json_output {
        let fields: Vec<Value> = fields
            .iter()
            .map(|(path, spec)| {
                serde_json::json!({
                    "path": path,
                    "label": spec.label,
                    "kind": spec.kind.describe(),
                    "required": spec.required,
                })
            })
            .collect();
        println!("{}", Value::Array(fields));
    } else {
        for (path, spec) in &fields {
            let marker = if spec.required { "*" } else { " " };
            println!("{} {:<34} {:<22} {}", marker, path, spec.label, spec.kind.describe());
        }
    }
    Ok(())
}

/// Assemble raw values from a file or stdin plus `--set` overrides.
fn read_values(input: &InputArgs) -> Result<Map<String, Value>, String> {
    let mut values = match &input.values {
        Some(path) if path == Path::new("-") => {
            load_values_reader(std::io::stdin().lock()).map_err(|e| e.to_string())?
        }
        Some(path) => load_values(path).map_err(|e| e.to_string())?,
        None => Map::new(),
    };

    if input.flat {
        values = expand(&values).map_err(|e| e.to_string())?;
    }

    for assignment in &input.sets {
        let (path, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("invalid --set \"{}\": expected PATH=VALUE", assignment))?;
        let path = FieldPath::parse(path).map_err(|e| e.to_string())?;
        path.set(&mut values, Value::String(value.to_string()));
    }

    Ok(values)
}

/// IO failures exit with 3, everything else with 2.
fn input_exit_code(input: &InputArgs) -> u8 {
    match &input.values {
        Some(path) if path != Path::new("-") && !path.exists() => 3,
        _ => 2,
    }
}

struct GenerateArgs {
    schema_type: SchemaType,
    input: InputArgs,
    pretty: bool,
    script: bool,
    json_output: bool,
    output: Option<PathBuf>,
    require_content: bool,
}

fn run_generate(args: GenerateArgs) -> Result<(), u8> {
    let GenerateArgs {
        schema_type,
        input,
        pretty,
        script,
        json_output,
        output,
        require_content,
    } = args;

    let values = read_values(&input).map_err(|e| {
        eprintln!("Error: {}", e);
        input_exit_code(&input)
    })?;

    let options = GenerateOptions::new().require_content(require_content);
    let generated = generate(schema_type, &values, &options);

    let rendered = if json_output {
        render_json(&generated, pretty)
    } else {
        match &generated.document {
            Some(document) if script => to_script_tag(document),
            Some(document) => render_json(document, pretty),
            None => {
                report_field_errors(&generated.errors);
                eprintln!("Error: document has no fields beyond @context and @type");
                return Err(2);
            }
        }
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", rendered);
        }
    }

    if generated.document.is_none() {
        Err(2)
    } else if generated.is_valid() {
        Ok(())
    } else {
        if !json_output {
            report_field_errors(&generated.errors);
        }
        Err(1)
    }
}

fn render_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn run_validate(schema_type: SchemaType, input: &InputArgs, json_output: bool) -> Result<(), u8> {
    let values = read_values(input).map_err(|e| {
        report_error(json_output, &e);
        input_exit_code(input)
    })?;

    report_validation(validate(schema_type, &values), json_output, schema_type.as_str())
}

fn run_check(document_path: &Path, json_output: bool) -> Result<(), u8> {
    let document = if document_path == Path::new("-") {
        load_values_reader(std::io::stdin().lock()).map(Value::Object)
    } else {
        load_json(document_path)
    }
    .map_err(|e| {
        report_error(json_output, &format!("loading document: {}", e));
        e.exit_code() as u8
    })?;

    let type_id = document
        .get("@type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    report_validation(check_document(&document).map(|_| ()), json_output, type_id)
}

fn report_validation(
    result: Result<(), ValidateError>,
    json_output: bool,
    type_id: &str,
) -> Result<(), u8> {
    match result {
        Ok(()) => {
            if json_output {
                println!("{}", serde_json::json!({ "valid": true, "type": type_id }));
            } else {
                println!("Valid {}", type_id);
            }
            Ok(())
        }
        Err(ValidateError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "type": type_id,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                report_field_errors(&errors);
            }
            Err(1)
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

fn run_schema(schema_type: SchemaType, pretty: bool) -> Result<(), u8> {
    let schema = schema_type.contract().to_json_schema();
    let rendered = render_json(&schema, pretty).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    println!("{}", rendered);
    Ok(())
}

fn report_field_errors(errors: &[FieldError]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Validation failed:");
    for error in errors {
        eprintln!("  {}", error);
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
