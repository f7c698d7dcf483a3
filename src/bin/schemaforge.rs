//! schemaforge — compile schema IR files to DDL and ER diagrams
//!
//! # Usage
//!
//! ```bash
//! # DDL for the dialect stored in the file
//! schemaforge sql blog.json
//!
//! # Same schema, compiled for MySQL, without the timestamp line
//! schemaforge sql blog.json --dialect mysql --no-timestamp
//!
//! # Mermaid ER diagram
//! schemaforge diagram blog.json -o blog.mmd
//!
//! # Every artifact into ./build
//! schemaforge export blog.json --dir build
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use schemaforge::config::Config;
use schemaforge::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemaforge")]
#[command(version)]
#[command(about = "Compile schema IR to SQL DDL and ER diagrams", long_about = None)]
#[command(after_help = "EXAMPLES:
    schemaforge sql blog.json
    schemaforge sql blog.json --dialect mysql -o blog.sql
    schemaforge diagram blog.json
    schemaforge export blog.json --dir build --format all
    schemaforge new \"Inventory\" --dialect mysql > inventory.json")]
struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./schemaforge.toml, then the user config)
    #[arg(long, global = true, env = "SCHEMAFORGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Sql,
    Diagram,
    Json,
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Sql => vec![ExportFormat::Sql],
            Self::Diagram => vec![ExportFormat::Diagram],
            Self::Json => vec![ExportFormat::Json],
            Self::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema file to SQL DDL
    Sql {
        /// Schema IR (JSON)
        schema: PathBuf,
        /// Override the schema's dialect
        #[arg(short, long)]
        dialect: Option<Dialect>,
        /// Omit the `-- Generated:` header line
        #[arg(long)]
        no_timestamp: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compile a schema file to a Mermaid ER diagram
    Diagram {
        /// Schema IR (JSON)
        schema: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write export artifacts next to each other
    Export {
        /// Schema IR (JSON)
        schema: PathBuf,
        /// Target directory (default: [export] dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Which artifacts to write
        #[arg(short, long, value_enum, default_value = "all")]
        format: FormatArg,
    },
    /// Print an empty schema skeleton as JSON
    New {
        /// Schema name
        name: String,
        #[arg(short, long, default_value = "postgresql")]
        dialect: Dialect,
    },
    /// Show how logical column types map to a dialect
    Types {
        /// Only this dialect (default: all)
        #[arg(short, long)]
        dialect: Option<Dialect>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "schemaforge=debug"
    } else {
        "schemaforge=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Sql {
            schema,
            dialect,
            no_timestamp,
            output,
        } => {
            let mut options = config.compile_options();
            if dialect.is_some() {
                options.dialect = dialect;
            }
            if no_timestamp {
                options.timestamp = false;
            }
            let schema = read_schema(&schema)?;
            let sql = SqlCompiler::with_options(options).compile(&schema);
            emit(&sql, output.as_deref())
        }
        Commands::Diagram { schema, output } => {
            let schema = read_schema(&schema)?;
            let diagram = DiagramCompiler::new().compile(&schema);
            emit(&diagram, output.as_deref())
        }
        Commands::Export {
            schema,
            dir,
            format,
        } => {
            let dir = dir.unwrap_or_else(|| config.export.dir.clone());
            export(&schema, &dir, format, config.compile_options())
        }
        Commands::New { name, dialect } => {
            let schema = SchemaDefinition::new(name, dialect);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Commands::Types { dialect } => {
            match dialect {
                Some(d) => show_types(&[d]),
                None => show_types(&Dialect::ALL),
            }
            Ok(())
        }
    }
}

fn read_schema(path: &Path) -> Result<SchemaDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let schema: SchemaDefinition = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a valid schema", path.display()))?;
    tracing::debug!(path = %path.display(), schema = %schema.name, "loaded schema");
    Ok(schema)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn export(path: &Path, dir: &Path, format: FormatArg, options: CompileOptions) -> Result<()> {
    let schema = read_schema(path)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create '{}'", dir.display()))?;

    let mut workspace = Workspace::with_options(options);
    workspace.load(schema);

    for format in format.formats() {
        let written = workspace.export(format)?.write_to(dir)?;
        println!("{} {}", "✓".green(), written.display().to_string().cyan());
    }
    Ok(())
}

fn show_types(dialects: &[Dialect]) {
    let generators: Vec<_> = dialects.iter().map(|d| d.generator()).collect();

    print!("{:14}", "Type".white().bold());
    for d in dialects {
        print!(" {:26}", d.label().white().bold());
    }
    println!();
    println!("{}", "─".repeat(14 + 27 * dialects.len()).dimmed());

    for ty in ColumnType::ALL {
        print!("{:14}", ty.name().cyan());
        for generator in &generators {
            let sql = if ty == ColumnType::Enum {
                let declared = if generator.declares_enum_types() {
                    "CREATE TYPE ... AS ENUM"
                } else {
                    "ENUM(...)"
                };
                format!("{} / {}", declared, generator.empty_enum_type())
            } else {
                generator.scalar_type(ty, None, None, None)
            };
            print!(" {:26}", sql);
        }
        println!();
    }
}
