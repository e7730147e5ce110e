//! Catalog query benchmarking tool
//!
//! Loads a JSON product catalog and measures the latency of the query
//! pipeline on it.
//!
//! ## What It Benchmarks
//!
//! 1. **Index build**: normalizing every searchable field of every product
//! 2. **Search**: fuzzy text search per query
//! 3. **Query**: search + filters + price sort, the full storefront path
//! 4. **Suggest**: autocomplete names per query
//!
//! ## Usage
//!
//! ```bash
//! # Benchmark with queries taken from the catalog's own product names
//! ./target/release/catalog_bench /path/to/catalog.json
//!
//! # Benchmark specific queries
//! ./target/release/catalog_bench /path/to/catalog.json "teal vase" kettel lamp
//!
//! # Show index build logs
//! RUST_LOG=aisle_core=debug ./target/release/catalog_bench catalog.json
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Search ===
//! --------------------------------
//! Mode        : Search
//! Elapsed     : 1.204 ms
//! Queries     : 8
//! Queries/sec : 6_644
//! Hits        : 412
//! --------------------------------
//! ```
//!
//! Build in release mode; debug builds are an order of magnitude slower.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use aisle_core::{Catalog, Engine, FilterSpec, MatchIndex, Query, SortMode};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;
const DEFAULT_QUERIES: usize = 8;
const SUGGEST_LIMIT: usize = 8;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: catalog_bench <catalog.json> [query...]");
    }

    let path = &args[1];
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let catalog = Catalog::from_reader(BufReader::new(file))
        .with_context(|| format!("loading catalog from {path}"))?;

    let queries: Vec<String> = if args.len() > 2 {
        args[2..].to_vec()
    } else {
        sample_queries(&catalog)
    };
    if queries.is_empty() {
        bail!("catalog is empty and no queries were given");
    }

    println!("Products:  {}", fmt_count(catalog.len() as u64));
    println!("Queries:   {:?}\n", queries);

    bench_build(&catalog);

    let engine = Engine::new(catalog);
    println!("Index:     {}\n", engine.stats());

    bench_search(&engine, &queries);
    bench_query(&engine, &queries);
    bench_suggest(&engine, &queries);

    let metrics = engine.metrics();
    tracing::info!(
        queries = metrics.queries_executed,
        suggestions = metrics.suggestions_served,
        "benchmark finished"
    );

    Ok(())
}

/// Every n-th product name, so the queries spread over the catalog.
fn sample_queries(catalog: &Catalog) -> Vec<String> {
    let step = (catalog.len() / DEFAULT_QUERIES).max(1);
    catalog
        .iter()
        .step_by(step)
        .take(DEFAULT_QUERIES)
        .map(|product| product.name.clone())
        .collect()
}

fn bench_build(catalog: &Catalog) {
    println!("=== Index build ===");

    warmup(|| {
        std::hint::black_box(MatchIndex::build(catalog));
    });

    let elapsed = measure(|| {
        std::hint::black_box(MatchIndex::build(catalog));
    });

    print_perf("Build", elapsed, catalog.len() as u64, "Products", None);
}

fn bench_search(engine: &Engine, queries: &[String]) {
    println!("=== Search ===");

    warmup(|| {
        for query in queries {
            std::hint::black_box(engine.search(query));
        }
    });

    let mut hits = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        for query in queries {
            local += engine.search(query).len() as u64;
        }
        hits = local;
        std::hint::black_box(hits);
    });

    print_perf("Search", elapsed, queries.len() as u64, "Queries", Some(hits));
}

fn bench_query(engine: &Engine, queries: &[String]) {
    let filters = match engine.price_bounds() {
        Some(bounds) => FilterSpec::new()
            .in_stock_only()
            .with_price_range(bounds.min, (bounds.min + bounds.max) / 2.0),
        None => FilterSpec::new(),
    };
    let prepared: Vec<Query> = queries
        .iter()
        .map(|text| {
            Query::text(text.as_str())
                .with_filters(filters.clone())
                .sorted_by(SortMode::PriceLowHigh)
                .with_limit(20)
        })
        .collect();

    println!("=== Query (filters + sort) ===");

    warmup(|| {
        for query in &prepared {
            std::hint::black_box(engine.query(query));
        }
    });

    let mut hits = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        for query in &prepared {
            local += engine.query(query).len() as u64;
        }
        hits = local;
        std::hint::black_box(hits);
    });

    print_perf("Query", elapsed, prepared.len() as u64, "Queries", Some(hits));
}

fn bench_suggest(engine: &Engine, queries: &[String]) {
    println!("=== Suggest ===");

    warmup(|| {
        for query in queries {
            std::hint::black_box(engine.suggestions(query, SUGGEST_LIMIT));
        }
    });

    let mut names = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        for query in queries {
            local += engine.suggestions(query, SUGGEST_LIMIT).len() as u64;
        }
        names = local;
        std::hint::black_box(names);
    });

    print_perf("Suggest", elapsed, queries.len() as u64, "Queries", Some(names));
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, elapsed: Duration, ops: u64, unit: &str, hits: Option<u64>) {
    let secs = elapsed.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} ms", secs * 1000.0);
    println!("{:<12}: {}", unit, fmt_count(ops));
    println!("{:<12}: {}", format!("{unit}/sec"), fmt_count((ops as f64 / secs) as u64));

    if let Some(hits) = hits {
        println!("Hits        : {}", fmt_count(hits));
    }

    println!("--------------------------------\n");
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
