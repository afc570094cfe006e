use anyhow::Context;
use serde::Serialize;
use tp7::{Fraction, Properties};
use tracing_subscriber::filter::LevelFilter;

const DEFAULTS: [(i64, i64); 4] = [(8, 3), (1, 9), (7, 4), (6, 4)];

pub struct Cli {
    pub verbose: u32,
    pub json: bool,
    pub fractions: [Fraction; 4],
}

fn usage<S: AsRef<str>>(progname: S, code: i32) -> ! {
    eprintln!(
        "Usage: {} [-v] [-json] [num den [num den [num den [num den]]]]",
        progname.as_ref()
    );
    std::process::exit(code);
}

fn parse_options() -> Cli {
    let mut args = std::env::args();
    let Some(progname) = args.next() else {
        usage("tp7", 1);
    };

    let mut verbose = 0;
    let mut json = false;
    let mut terms = Vec::new();

    for arg in args {
        match arg.as_str() {
            "-v" => verbose += 1,
            "-json" => json = true,
            "-h" | "-help" => usage(progname, 0),
            term => {
                let Ok(term) = term.parse::<i64>() else {
                    eprintln!("{term:?} is not an integer");
                    usage(progname, 1);
                };
                terms.push(term);
            }
        }
    }

    if terms.len() % 2 != 0 {
        eprintln!("every numerator needs a denominator");
        usage(progname, 1);
    }
    if terms.len() > 2 * DEFAULTS.len() {
        eprintln!("at most {} fractions are supported", DEFAULTS.len());
        usage(progname, 1);
    }

    let mut fractions = [Fraction::default(); 4];
    for (i, slot) in fractions.iter_mut().enumerate() {
        let (n, d) = match terms.get(2 * i..2 * i + 2) {
            Some(&[n, d]) => (n, d),
            _ => DEFAULTS[i],
        };
        *slot = match Fraction::new(n, d) {
            Ok(f) => f,
            Err(err) => {
                eprintln!("fraction {}: {err}", i + 1);
                usage(progname, 1);
            }
        };
    }

    Cli {
        verbose,
        json,
        fractions,
    }
}

#[derive(Debug, Serialize)]
struct Report {
    fractions: [Fraction; 3],
    sum: Fraction,
    mixed: String,
    difference: Fraction,
    product: Fraction,
    quotient: Fraction,
    power: Fraction,
    equal: bool,
    float: f64,
    properties: Properties,
    adjacent: bool,
}

impl Report {
    fn new([f1, f2, f3, f4]: [Fraction; 4]) -> anyhow::Result<Self> {
        Ok(Self {
            fractions: [f1, f2, f3],
            sum: f1.try_add(f2).with_context(|| format!("{f1} + {f2}"))?,
            mixed: f1.as_mixed_number(),
            difference: f1.try_sub(f2).with_context(|| format!("{f1} - {f2}"))?,
            product: f1.try_mul(f4).with_context(|| format!("{f1} * {f4}"))?,
            quotient: f1.try_div(f2).with_context(|| format!("{f1} / {f2}"))?,
            power: f2.try_pow(f3).with_context(|| format!("{f2} ** {f3}"))?,
            equal: f1 == f2,
            float: f4.to_f64(),
            properties: f1.properties(),
            adjacent: f1.is_adjacent_to(&f3),
        })
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [f1, f2, f3] = &self.fractions;
        writeln!(f, "{} {} {}", f1, f2, f3)?;
        writeln!(f, "{}", self.sum)?;
        writeln!(f, "{}", self.mixed)?;
        writeln!(f, "{}", self.difference)?;
        writeln!(f, "{}", self.product)?;
        writeln!(f, "{}", self.quotient)?;
        writeln!(f, "{}", self.power)?;
        writeln!(f, "{}", self.equal)?;
        writeln!(f, "float {}", self.float)?;
        writeln!(f, "zero {}", self.properties.contains(Properties::ZERO))?;
        writeln!(f, "integer {}", self.properties.contains(Properties::INTEGER))?;
        writeln!(f, "proper {}", self.properties.contains(Properties::PROPER))?;
        writeln!(f, "unit {}", self.properties.contains(Properties::UNIT))?;
        write!(f, "adjacent {}", self.adjacent)
    }
}

#[inline]
fn level(verbose: u32) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = parse_options();

    tracing_subscriber::fmt()
        .with_max_level(level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(fractions = ?cli.fractions, "running walkthrough");
    let report = Report::new(cli.fractions)?;
    tracing::info!(properties = ?report.properties, "walkthrough done");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
