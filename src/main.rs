use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use geoloc_china::config::Config;
use geoloc_china::location::{annotate, AnnotatedLocation, DictionaryStore, LocationResolver};
use geoloc_china::{logging, server};
use tracing::{error, info};

/// geoloc — resolve Chinese addresses to province, city and county geocodes.
///
/// Reads addresses from arguments, from --input (one per line, blank line =
/// no address), or from stdin.
///
/// Examples:
///   geoloc 浙江省杭州市西湖区文三路
///   geoloc --input addresses.txt --format tsv
///   geoloc --dict dictionary.json --parallel < addresses.txt
///   geoloc --serve --port 8080
#[derive(Parser)]
#[command(name = "geoloc", version, about, long_about = None)]
struct Cli {
    /// Address strings to resolve.
    addresses: Vec<String>,

    /// File with one address per line.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// JSON dictionary file (defaults to ~/.geoloc/dictionary.json, then the built-in sample).
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Resolve on all CPU cores.
    #[arg(long)]
    parallel: bool,

    /// Start the HTTP API instead of resolving once.
    #[arg(long)]
    serve: bool,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// Debug-level logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Tsv,
}

/// Absent fields in tabular output.
const NA: &str = "NA";

fn main() {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if cli.dict.is_some() {
        config.dictionary_path = cli.dict.clone();
    }
    config.parallel |= cli.parallel;
    config.verbose |= cli.verbose;
    if let Some(ref host) = cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    logging::init(config.verbose);

    let store = DictionaryStore::from_provider(config.provider().as_ref()).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = runtime.block_on(server::start(store, config.parallel, &config.host, config.port)) {
            error!("Server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // ── Batch mode ──────────────────────────────────────────────

    let inputs = read_inputs(&cli).unwrap_or_else(|e| {
        error!("Cannot read input: {}", e);
        std::process::exit(1);
    });
    info!(count = inputs.len(), "resolving addresses");

    let resolver = LocationResolver::new(&store);
    let rows = annotate(&resolver, &inputs, config.parallel);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match cli.format {
        Format::Json => write_json(&mut out, &rows),
        Format::Tsv => write_tsv(&mut out, &rows),
    };
    if let Err(e) = written.and_then(|_| out.flush()) {
        error!("Cannot write output: {}", e);
        std::process::exit(1);
    }
}

/// Arguments win over --input, which wins over stdin.
fn read_inputs(cli: &Cli) -> io::Result<Vec<Option<String>>> {
    if !cli.addresses.is_empty() {
        return Ok(cli.addresses.iter().map(|a| to_input(a)).collect());
    }
    match &cli.input {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            io::BufReader::new(file).lines().map(|l| l.map(|l| to_input(&l))).collect()
        }
        None => io::stdin().lock().lines().map(|l| l.map(|l| to_input(&l))).collect(),
    }
}

/// A blank line stands for a missing address. Anything else is kept as given.
fn to_input(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

fn write_json<W: Write>(out: &mut W, rows: &[AnnotatedLocation]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)
}

fn write_tsv<W: Write>(out: &mut W, rows: &[AnnotatedLocation]) -> io::Result<()> {
    writeln!(out, "location\tprovince\tcity\tcounty\tprovince_code\tcity_code\tcounty_code")?;
    for row in rows {
        let m = &row.resolved;
        let fields = [
            text_field(row.location.as_deref()),
            text_field(m.province.as_deref()),
            text_field(m.city.as_deref()),
            text_field(m.county.as_deref()),
            code_field(m.province_code),
            code_field(m.city_code),
            code_field(m.county_code),
        ];
        writeln!(out, "{}", fields.join("\t"))?;
    }
    Ok(())
}

fn text_field(value: Option<&str>) -> String {
    value.map(|v| v.replace('\t', " ")).unwrap_or_else(|| NA.to_string())
}

fn code_field(value: Option<u32>) -> String {
    value.map(|c| c.to_string()).unwrap_or_else(|| NA.to_string())
}
