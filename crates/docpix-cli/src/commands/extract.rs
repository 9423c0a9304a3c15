use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use console::Style;
use docpix_core::config::AppConfig;
use docpix_core::error::Severity;
use docpix_core::io::extract::extract_images;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Args)]
pub struct ExtractArgs {
    /// Input .docx document
    pub file: PathBuf,

    /// Output folder (default: extracted_images next to the document)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep files already in the output folder
    #[arg(long)]
    pub keep_existing: bool,
}

pub fn run(args: &ExtractArgs, config: &AppConfig) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.file));

    let mut extract_config = config.extract.clone();
    if args.keep_existing {
        extract_config.clear_destination = false;
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Extracting [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let result = extract_images(&args.file, &output, &extract_config, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) if e.severity() == Severity::Warning => {
            let warn = Style::new().yellow().bold();
            println!(
                "{}: {e} in {}",
                warn.apply_to(Severity::Warning),
                args.file.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let label = Style::new().dim();
    let value = Style::new().bold();
    println!(
        "  {:<12}{}",
        label.apply_to("Order"),
        value.apply_to(
            report
                .strategy
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".into())
        )
    );
    for file in &report.written {
        println!(
            "  {:<12}{} <- {}",
            label.apply_to(format!("#{}", file.ordinal)),
            file.path.display(),
            file.member
        );
    }
    for skipped in &report.skipped {
        println!(
            "  {:<12}{} ({:?})",
            label.apply_to(format!("#{} skip", skipped.ordinal)),
            skipped.member,
            skipped.reason
        );
    }
    println!(
        "\nExtracted {} image(s) to {}",
        report.count(),
        output.display()
    );
    Ok(())
}

fn default_output_dir(document: &Path) -> PathBuf {
    document
        .parent()
        .unwrap_or(Path::new("."))
        .join("extracted_images")
}
