use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "corpfinder", about = "Company website crawler and fuzzy company matcher")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and extract signals for a list of websites
    Scrape {
        /// Input CSV with a single `domain` column
        #[arg(short, long)]
        input: String,

        /// Output path for `scraped_company_data.csv`
        #[arg(short, long, default_value = "scraped_company_data.csv")]
        output: String,
    },
    /// Merge scraped rows with a company-name table and load them into the index
    BuildIndex {
        /// `scraped_company_data.csv`-shaped input
        #[arg(long)]
        scraped: String,

        /// `sample-websites-company-names.csv`-shaped input
        #[arg(long)]
        names: String,

        /// Output path for the merged `merged_company_profiles.csv`
        #[arg(long, default_value = "merged_company_profiles.csv")]
        output: String,
    },
    /// Match every row of an API-style input CSV against the index
    Match {
        /// `API-input-sample.csv`-shaped input
        #[arg(short, long)]
        input: String,

        /// Output path for the match results CSV
        #[arg(short, long, default_value = "match_results.csv")]
        output: String,
    },
    /// Run the HTTP service adapter
    Serve,
}
