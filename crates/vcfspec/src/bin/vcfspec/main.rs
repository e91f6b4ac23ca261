mod cli;

use anyhow::Context;
use std::io::Write;
use std::path::Path;
use vcfspec::defaults::Defaults;
use vcfspec::projector::Projector;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("VCFSPEC_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Convert(convert_cli) => convert(convert_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn convert(cli: cli::ConvertCommand) -> anyhow::Result<()> {
    let defaults = load_defaults(cli.defaults.as_deref())?;
    let text = read_input(cli.input.as_deref())?;

    let parsed = vcfspec::parse(&text);
    for diagnostic in &parsed.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let projector = Projector::new(&defaults);
    let spec = projector.project(&parsed.variables);

    let summary = spec.summary();
    tracing::info!(
        variables = parsed.variables.len(),
        hosts = summary.hosts,
        networks = summary.networks,
        switches = summary.switches,
        nsx_managers = summary.nsx_managers,
        appliances = ?summary.appliances,
        "Converted"
    );

    output(&cli.output, &spec)?;

    tracing::info!(
        url = %projector.upload_url(&parsed.variables),
        "Upload to Cloud Builder for validation, navigate to: Bring-up → Upload JSON"
    );

    anyhow::ensure!(
        !cli.deny_warnings || parsed.diagnostics.is_empty(),
        "{} diagnostic(s) while parsing",
        parsed.diagnostics.len()
    );

    Ok(())
}

fn load_defaults(path: Option<&Path>) -> anyhow::Result<Defaults> {
    match path {
        Some(path) => Ok(Defaults::load_file(path)?),
        None => Ok(Defaults::default()),
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            tracing::info!(path=%path.display(), "Reading tfvars");
            std::fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path.display()))
        }
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn output<T: serde::Serialize>(output: &cli::OutputArgs, value: &T) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match &output.file {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(&mut writer, value)?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
        }
    };

    writer.flush()?;

    if let Some(path) = &output.file {
        tracing::info!(path=%path.display(), "Wrote spec");
    }

    Ok(())
}

/// developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<()> {
    match cli.command {
        cli::DevSubCommand::Variables { input } => {
            let parsed = vcfspec::parse(&read_input(input.as_deref())?);
            println!("{:#?}", parsed.variables);
            for diagnostic in &parsed.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
        }
        cli::DevSubCommand::Defaults { defaults } => {
            let defaults = load_defaults(defaults.as_deref())?;
            serde_yaml::to_writer(std::io::stdout(), &defaults)?;
        }
    }

    Ok(())
}
