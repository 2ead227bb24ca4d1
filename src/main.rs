use std::path::PathBuf;
use std::process;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use docscrub::docx::{SystemClock, cleared_output_path};
use docscrub::{ScrubMode, ScrubReport, scrub_docx};

/// Elimina autores y fechas de un documento Word (.docx).
#[derive(Debug, Parser)]
#[command(name = "docscrub", version, about)]
struct Cli {
    /// Documento Word de entrada.
    input: PathBuf,

    /// Enmascara las fechas de los comentarios en lugar de borrarlas.
    #[arg(short = 'm', long = "mask")]
    mask: bool,

    /// Ruta del documento limpio (por defecto `<nombre>_cleared.<extensión>`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Imprime el resumen en JSON.
    #[arg(long)]
    json: bool,

    /// Muestra trazas de depuración.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = if cli.mask {
        ScrubMode::Mask
    } else {
        ScrubMode::Erase
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cleared_output_path(&cli.input));

    if !cli.json {
        println!(
            "\n{}",
            style("│ Eliminando metadata de documento Word...").dim()
        );
    }

    match scrub_docx(
        &cli.input,
        &output,
        mode,
        &SystemClock,
        &mut rand::thread_rng(),
    ) {
        Ok(report) if cli.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("{}", style(format!("│ Error: {}", error)).red());
                process::exit(1);
            }
        },
        Ok(report) => render_report(&report),
        Err(error) => {
            eprintln!("\n{}", style("┌─ No se pudo limpiar el documento ─").red());
            eprintln!("{}", style(format!("│ {}", error)).red());
            eprintln!("{}", style("└─").red());
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render_report(report: &ScrubReport) {
    println!(
        "\n{}",
        style("┌─ Metadata Eliminada Exitosamente ─").green()
    );
    println!(
        "{}",
        style(format!("│ Archivo: {}", report.output.display()))
            .green()
            .bold()
    );
    println!(
        "{}",
        style(format!(
            "│ Autores anonimizados: {}",
            report.authors_replaced
        ))
        .green()
    );
    match report.mode {
        ScrubMode::Erase => println!(
            "{}",
            style(format!("│ Fechas borradas: {}", report.dates_erased)).green()
        ),
        ScrubMode::Mask => println!(
            "{}",
            style(format!(
                "│ Fechas borradas: {} · fechas de comentarios enmascaradas: {}",
                report.dates_erased, report.dates_masked
            ))
            .green()
        ),
    }
    if report.comments_part.is_none() {
        println!(
            "{}",
            style("│ El documento no contiene comentarios.").yellow()
        );
    }
    println!(
        "{}",
        style(format!(
            "│ Partes copiadas sin cambios: {}",
            report.parts_copied
        ))
        .dim()
    );
    println!("{}", style("└─").green());
}
