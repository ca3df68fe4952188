use anyhow::{Context, Result};
use clap::Parser;
use flatmap::StaticFlatMap;

/// Number of entries the demo map can hold
const CAPACITY: usize = 100;

type DemoMap = StaticFlatMap<i64, i64, CAPACITY>;

/// Fill a fixed-capacity flat map through indexed assignment and print it
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Entries to assign, as KEY=VALUE. Later assignments to the same key
    /// overwrite earlier ones.
    #[arg(value_parser = parse_pair, default_values = ["1=2", "2=10", "3=5"])]
    pairs: Vec<(i64, i64)>,

    /// Print entries from the largest key down
    #[arg(long)]
    reverse: bool,
}

fn parse_pair(s: &str) -> Result<(i64, i64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim().parse().map_err(|e| format!("bad key `{key}`: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value `{value}`: {e}"))?;
    Ok((key, value))
}

fn build_map(pairs: &[(i64, i64)]) -> Result<DemoMap> {
    let mut map = DemoMap::new();
    for &(key, value) in pairs {
        *map
            .get_or_insert_default(key)
            .with_context(|| format!("assigning {key}={value}"))? = value;
    }
    Ok(map)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let map = build_map(&args.pairs)?;
    tracing::info!(entries = map.len(), capacity = map.capacity(), "map built");

    let entries: Box<dyn Iterator<Item = &(i64, i64)>> = if args.reverse {
        Box::new(map.iter().rev())
    } else {
        Box::new(map.iter())
    };
    for (key, value) in entries {
        println!("{},{}", key, value);
    }
    println!();
    Ok(())
}
