use data_loader::Dataset;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("movies_metadata.csv"));

    println!("Loading {}...\n", path.display());

    let start = Instant::now();
    let dataset = Dataset::load_from_csv(&path).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let info = dataset.info();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows: {}", info.row_count);
    println!("Columns: {}", info.columns.len());
    println!("\nPerformance: {:.0} rows/second",
             info.row_count as f64 / elapsed.as_secs_f64());
}
