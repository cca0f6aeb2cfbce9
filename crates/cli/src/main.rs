use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::{Dataset, DatasetInfo};
use stats::{GenreCount, TopMovie, TopRatedQuery, YearlyCount};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// movie-stats - Descriptive statistics for a movie metadata CSV
#[derive(Parser)]
#[command(name = "movie-stats")]
#[command(about = "Summarize a movie metadata CSV and export it as JSON Lines", long_about = None)]
struct Cli {
    /// Path to the movie metadata CSV
    #[arg(short, long, default_value = "./movies_metadata.csv")]
    input: PathBuf,

    /// Where to write the JSON Lines export
    #[arg(short, long, default_value = "movies_metadata.json")]
    output: PathBuf,

    /// Number of top-rated movies to show
    #[arg(long, default_value = "5")]
    top: usize,

    /// Vote count a movie must exceed to be ranked
    #[arg(long, default_value = "8000")]
    min_votes: u64,

    /// Average rating a movie must exceed to be ranked
    #[arg(long, default_value = "8.0")]
    min_rating: f64,

    /// Print the reports without writing the export
    #[arg(long)]
    skip_export: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Dataset::load_from_csv(&cli.input)
        .with_context(|| format!("Failed to load dataset from {}", cli.input.display()))?;
    info!("Loaded dataset in {:?}", start.elapsed());

    print_info(&dataset.info());
    separator();

    println!(
        "{} {}",
        "Number of unique movies:".bold(),
        stats::unique_title_count(&dataset)
    );
    separator();

    let average = stats::average_rating(&dataset)
        .map(|avg| format!("{avg:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!("{} {}", "Average rating of all movies:".bold(), average);
    separator();

    let query = TopRatedQuery {
        limit: cli.top,
        min_votes: cli.min_votes,
        min_rating: cli.min_rating,
    };
    print_top_movies(&stats::top_rated_movies(&dataset, &query), &query);
    separator();

    print_years(&stats::movies_per_year(&dataset));
    separator();

    print_genres(&stats::movies_per_genre(&dataset));
    separator();

    if cli.skip_export {
        info!("Skipping export");
    } else {
        dataset
            .export_jsonl(&cli.output)
            .with_context(|| format!("Failed to export dataset to {}", cli.output.display()))?;
        println!(
            "{} Saved {} rows to {}",
            "✓".green(),
            dataset.len(),
            cli.output.display()
        );
    }

    Ok(())
}

fn separator() {
    println!("{}", "-".repeat(49).dimmed());
}

/// Helper function to print the dataset shape
fn print_info(info: &DatasetInfo) {
    println!("{}", "Dataset Info:".bold().blue());
    println!("{} rows, {} columns", info.row_count, info.columns.len());
    for (idx, column) in info.columns.iter().enumerate() {
        println!(
            " {:>3}  {:<24} {:>8} non-missing  {:?}",
            idx, column.name, column.non_missing, column.kind
        );
    }
}

fn print_top_movies(movies: &[TopMovie], query: &TopRatedQuery) {
    println!(
        "{}",
        format!(
            "Top {} highest rated movies (rating > {}, votes > {}):",
            query.limit, query.min_rating, query.min_votes
        )
        .bold()
        .blue()
    );
    if movies.is_empty() {
        println!("  (no movies pass the thresholds)");
    }
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} - {:.1} ({} votes)",
            (rank + 1).to_string().green(),
            movie.title.as_deref().unwrap_or("<untitled>"),
            movie.vote_average,
            movie.vote_count
        );
    }
}

fn print_years(years: &[YearlyCount]) {
    println!("{}", "Number of movies released per year:".bold().blue());
    println!("  {:>12}  {:>11}", "release_year", "movie_count");
    for year in years {
        println!("  {:>12}  {:>11}", year_label(year.release_year), year.movie_count);
    }
}

fn print_genres(genres: &[GenreCount]) {
    println!("{}", "Number of movies per genre:".bold().blue());
    println!("  {:<20} {:>6}", "genre", "count");
    for genre in genres {
        println!("  {:<20} {:>6}", genre.genre_name, genre.count);
    }
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
