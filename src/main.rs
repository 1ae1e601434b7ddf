mod cli;
mod logger;

use std::process::ExitCode;

use clap::Parser;
use log::error;
use xsd_model::{ReadOptions, Schema, SchemaSet, XsdError};

fn report_schema(set: &SchemaSet, schema: &Schema) {
    println!("{} ({})", schema.uri(), schema.filename().display());
    for import in schema.imports() {
        println!(
            "  import {}",
            import.namespace.as_deref().unwrap_or("(no namespace)")
        );
    }
    for element in schema.elements(set) {
        println!("  element {}", element.name());
        for attribute in element.attributes() {
            println!(
                "    {}: {} [{}]",
                attribute.name(),
                attribute.attribute_type(),
                attribute.use_()
            );
        }
    }
}

fn run(cli: &cli::Cli) -> Result<(), XsdError> {
    let options = ReadOptions {
        allow_dtd: cli.allow_dtd,
    };
    let set = SchemaSet::with_options(&cli.files, options)?.process()?;

    match cli.namespace.as_deref() {
        Some(uri) => report_schema(&set, set.schema(uri)?),
        None => {
            for schema in set.schemas() {
                report_schema(&set, schema);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logger::init(cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
