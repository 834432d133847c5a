use clap::Parser;
use docmodel::{PassKind, Pipeline, PipelineOptions, outline};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// docmodel - Rewrite and outline documentation models
#[derive(Parser, Debug)]
#[command(name = "docmodel")]
#[command(about = "Run rewrite passes over a serialized declaration forest", long_about = None)]
struct Args {
    /// Module forest as JSON (`-` reads stdin)
    model: PathBuf,

    /// Pipeline options file (JSON)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Run exactly these passes, in order, instead of the configured ones
    #[arg(long = "pass", value_name = "NAME")]
    passes: Vec<PassKind>,

    /// Fail if any type is still unresolved after the passes
    #[arg(long)]
    fail_on_unresolved: bool,

    /// Print the rewritten forest as JSON instead of an outline
    #[arg(long)]
    json: bool,
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .into_diagnostic()
            .wrap_err("Failed to read model from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
}

/// Options file first, then command-line overrides.
fn resolve_options(args: &Args) -> Result<PipelineOptions> {
    let mut options = match &args.options {
        Some(path) => PipelineOptions::from_json(&read_input(path)?)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid options in {}", path.display()))?,
        None => PipelineOptions::default(),
    };
    if !args.passes.is_empty() {
        options.passes = args.passes.clone();
    }
    options.fail_on_unresolved |= args.fail_on_unresolved;
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use DOCMODEL_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("DOCMODEL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = resolve_options(&args)?;
    debug!(?options, "Resolved pipeline options");

    let modules = docmodel::from_json(&read_input(&args.model)?)
        .into_diagnostic()
        .wrap_err("Failed to parse module forest")?;

    let mut pipeline = Pipeline::from_options(&options);
    let modules = pipeline.run(&modules).into_diagnostic()?;

    if args.json {
        println!("{}", docmodel::to_json(&modules).into_diagnostic()?);
    } else {
        print!("{}", outline::render(&modules));
    }
    Ok(())
}
