use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use rastermill::{
    calculate_aspect_ratio, format_file_size, generate_output_path, get_image_info, process_path,
    Algorithm, BatchProcessor, Cli, Commands, DefaultEngine, MetadataReader, RecipeArgs,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Process {
            input,
            output,
            recipe,
            algorithm,
            optimize_png,
        } => run_process(input, output, recipe, algorithm, optimize_png),
        Commands::Batch {
            input,
            output,
            recipe,
            algorithm,
            optimize_png,
            threads,
            recursive,
        } => run_batch(
            input,
            output,
            recipe,
            algorithm,
            optimize_png,
            threads,
            recursive,
        ),
        Commands::Info { input } => run_info(input),
    }
}

fn run_process(
    input: PathBuf,
    output: Option<PathBuf>,
    recipe: RecipeArgs,
    algorithm: Algorithm,
    optimize_png: bool,
) -> anyhow::Result<()> {
    let recipe = recipe.to_recipe()?;

    let engine = DefaultEngine::new()
        .with_algorithm(algorithm.into())
        .with_png_optimization(optimize_png);

    let artifact = process_path(&engine, &input, &recipe)
        .with_context(|| format!("failed to process {}", input.display()))?;

    let output_path = generate_output_path(
        &input,
        output.as_deref(),
        "derived",
        artifact.file_type.extension(),
    );
    std::fs::write(&output_path, &artifact.bytes)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!(
        "Processed image saved to: {} ({}x{}, {})",
        output_path.display(),
        artifact.width,
        artifact.height,
        format_file_size(artifact.bytes.len() as u64)
    );

    Ok(())
}

fn run_batch(
    input: PathBuf,
    output: PathBuf,
    recipe: RecipeArgs,
    algorithm: Algorithm,
    optimize_png: bool,
    threads: usize,
    recursive: bool,
) -> anyhow::Result<()> {
    let recipe = recipe.to_recipe()?;

    let processor = BatchProcessor::new(recipe, threads)?
        .with_algorithm(algorithm.into())
        .with_png_optimization(optimize_png);

    let stats = processor.process_directory(&input, &output, recursive)?;

    println!(
        "Batch processing complete. Processed {} images to: {}",
        stats.processed_count,
        output.display()
    );
    for (path, error) in &stats.errors {
        eprintln!("failed: {}: {}", path, error);
    }

    Ok(())
}

fn run_info(input: PathBuf) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("file does not exist: {}", input.display());
    }

    let file_size = std::fs::metadata(&input)?.len();
    let (width, height, format) = get_image_info(&input)?;
    let aspect_ratio = calculate_aspect_ratio(width, height);

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", width, height);
    println!("Aspect Ratio: {:.2}", aspect_ratio);
    println!("Format: {}", format);

    match MetadataReader::new().read(&input)? {
        Some(exif) => {
            println!();
            println!("=== EXIF Metadata ===");
            for field in exif.fields() {
                println!("{}: {}", field.tag, field.display_value().with_unit(&exif));
            }
        }
        None => println!("Has EXIF metadata: false"),
    }

    Ok(())
}
