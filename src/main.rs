use anyhow::{bail, Context, Result};
use clap::Parser;
use cotscraper::{
    fetch::{save_zip, Downloader},
    load_cot_zip, parse_cot_zip,
    process::write_parquet,
    records_from_table, schema, CotTable,
};
use futures::{stream, StreamExt};
use rayon::prelude::*;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Download and parse CFTC disaggregated futures-only COT reports"
)]
struct Args {
    /// Report years to fetch (2006-2100)
    #[arg(required_unless_present = "zip")]
    years: Vec<i32>,

    /// Parse a local ZIP archive instead of downloading
    #[arg(long, conflicts_with = "years")]
    zip: Option<PathBuf>,

    /// Keep only these tickers (GC, SI, HG, PL); repeatable
    #[arg(short, long)]
    ticker: Vec<String>,

    /// Keep only these CFTC contract market codes; repeatable
    #[arg(short, long)]
    code: Vec<String>,

    /// Write one Parquet file per report into this directory instead of
    /// printing JSON lines
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save each downloaded archive into this directory
    #[arg(long)]
    save_zips: Option<PathBuf>,

    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Maximum simultaneous downloads
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) resolve the code filter ──────────────────────────────────
    let mut codes: Vec<String> = schema::codes_for_tickers(args.ticker.as_slice())?
        .into_iter()
        .map(str::to_string)
        .collect();
    codes.extend(args.code.iter().map(|c| c.trim().to_string()));
    let filter = (!codes.is_empty()).then_some(codes.as_slice());
    if let Some(f) = filter {
        info!(codes = ?f, "filtering by contract code");
    }

    // ─── 3) load archives ────────────────────────────────────────────
    let tables: Vec<(String, CotTable)> = if let Some(path) = &args.zip {
        let table = load_cot_zip(path, filter)
            .with_context(|| format!("parsing {}", path.display()))?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "local".to_string());
        vec![(label, table)]
    } else {
        let archives = fetch_years(&args).await?;
        // parsing is CPU-bound; spread the years over the rayon pool
        archives
            .par_iter()
            .map(|(year, data)| {
                parse_cot_zip(data, filter)
                    .map(|t| (year.to_string(), t))
                    .with_context(|| format!("parsing {} report", year))
            })
            .collect::<Result<Vec<_>>>()?
    };

    // ─── 4) emit ─────────────────────────────────────────────────────
    if let Some(dir) = &args.output {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for (label, table) in &tables {
            let path = dir.join(format!("cot_{}.parquet", label));
            write_parquet(table, &path).with_context(|| format!("writing {}", path.display()))?;
        }
    } else {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for (label, table) in &tables {
            let records =
                records_from_table(table).with_context(|| format!("mapping {} records", label))?;
            for record in &records {
                serde_json::to_writer(&mut out, record)?;
                out.write_all(b"\n")?;
            }
        }
        out.flush()?;
    }

    let total: usize = tables.iter().map(|(_, t)| t.num_rows()).sum();
    info!(reports = tables.len(), rows = total, "done");
    Ok(())
}

/// Download every requested year, at most `concurrency` at a time.
/// Returns archives sorted by year; the first failure aborts the run.
async fn fetch_years(args: &Args) -> Result<Vec<(i32, Vec<u8>)>> {
    let mut years = args.years.clone();
    years.sort_unstable();
    years.dedup();
    if years.is_empty() {
        bail!("no years requested");
    }

    let downloader = Downloader::with_timeout(Duration::from_secs(args.timeout_secs))?;
    let save_dir = args.save_zips.as_ref();

    let mut results: Vec<(i32, Result<Vec<u8>>)> = stream::iter(years)
        .map(|year| {
            let dl = &downloader;
            async move {
                let data: Result<Vec<u8>> = async {
                    let bytes = dl.download(year).await?;
                    if let Some(dir) = save_dir {
                        save_zip(year, &bytes, dir).await?;
                    }
                    Ok::<_, anyhow::Error>(bytes)
                }
                .await;
                (year, data)
            }
        })
        .buffer_unordered(args.concurrency.max(1))
        .collect()
        .await;
    results.sort_by_key(|(year, _)| *year);

    let mut archives = Vec::with_capacity(results.len());
    for (year, data) in results {
        match data {
            Ok(bytes) => archives.push((year, bytes)),
            Err(e) => {
                warn!(year, error = %e, "download failed");
                return Err(e.context(format!("downloading {} report", year)));
            }
        }
    }
    Ok(archives)
}
