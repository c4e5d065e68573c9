/*! Accuracy testing for symmetric delete spellers

A tool to help testing the quality of a word frequency list as a spelling
corrector. Shows how often the expected correction is the first suggestion,
among the first five, or anywhere in the suggestions.

# Usage examples

It's a command-line tool:
```console
$ cargo run -- typos.txt frequency_dictionary_en_82_765.txt
```
will produce statistics of spelling corrections.

It is possible to fine-tune the options using a configuration file in json
format:
```console
$ cargo run -- --config config.json typos.txt frequency_dictionary_en_82_765.txt
```
where the file holds an [`AccuracyConfig`], e.g.
`{"speller":{"max_dictionary_edit_distance":2,"prefix_length":7},"verbosity":"all","max_edit_distance":2,"include_unknown":false}`.

Phrases can be tested with compound correction instead of word lookup:
```console
$ cargo run -- --compound --bigrams bigrams.txt phrases.txt unigrams.txt
```
For automated testing in CI there is a --threshold parametre:
```console
$ cargo run -- --threshold 0.9 typos.txt frequency_dictionary_en_82_765.txt
```
*/

use chrono::prelude::*;
use std::error::Error;
use std::{
    io::Write,
    time::{Instant, SystemTime},
};

use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use symdel::lexicon::{load_bigrams, load_unigrams};
use symdel::speller::suggestion::Suggestion;
use symdel::speller::{Speller, SpellerConfig, SymSpellBuilder, Verbosity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct AccuracyConfig {
    speller: SpellerConfig,
    verbosity: Verbosity,
    max_edit_distance: usize,
    include_unknown: bool,
}

static CFG: AccuracyConfig = AccuracyConfig {
    speller: SpellerConfig::default(),
    verbosity: Verbosity::All,
    max_edit_distance: 2,
    include_unknown: false,
};

fn load_words(
    path: &str,
    max_words: Option<usize>,
) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(rdr
        .records()
        .filter_map(Result::ok)
        .filter_map(|r| {
            r.get(0)
                .and_then(|x| r.get(1).map(|y| (x.to_string(), y.to_string())))
        })
        .take(max_words.unwrap_or(std::usize::MAX))
        .collect())
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let ms = self.secs * 1000 + (self.subsec_nanos as u64 / 1_000_000);
        write!(f, "{}ms", ms)
    }
}

#[derive(Debug, Serialize)]
struct AccuracyResult<'a> {
    input: &'a str,
    expected: &'a str,
    distance: usize,
    suggestions: Vec<Suggestion>,
    position: Option<usize>,
    time: Time,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a AccuracyConfig,
    summary: Summary,
    results: Vec<AccuracyResult<'a>>,
    start_timestamp: Time,
    total_time: Time,
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    first_position: u32,
    top_five: u32,
    any_position: u32,
    no_suggestions: u32,
    only_wrong: u32,
    slowest_lookup: Time,
    fastest_lookup: Time,
    average_position_of_correct: f32,
    average_suggestions_for_correct: f32,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let percent =
            |v: u32| -> String { format!("{:.2}%", v as f32 / self.total_words as f32 * 100f32) };

        write!(
            f,
            "[#1] {} [^5] {} [any] {} [none] {} [wrong] {} [fast] {} [slow] {}",
            percent(self.first_position),
            percent(self.top_five),
            percent(self.any_position),
            percent(self.no_suggestions),
            percent(self.only_wrong),
            self.fastest_lookup,
            self.slowest_lookup
        )
    }
}

impl Summary {
    fn new(results: &[AccuracyResult<'_>]) -> Summary {
        let mut summary = Summary::default();

        results.iter().for_each(|result| {
            summary.total_words += 1;

            if let Some(position) = result.position {
                summary.any_position += 1;

                if position == 0 {
                    summary.first_position += 1;
                }

                if position < 5 {
                    summary.top_five += 1;
                }
            } else if result.suggestions.is_empty() {
                summary.no_suggestions += 1;
            } else {
                summary.only_wrong += 1;
            }
        });

        summary.slowest_lookup = results.iter().map(|x| x.time).max().unwrap_or_default();
        summary.fastest_lookup = results.iter().map(|x| x.time).min().unwrap_or_default();

        let positions: Vec<(usize, usize)> = results
            .iter()
            .filter_map(|r| r.position.map(|p| (p, r.suggestions.len())))
            .collect();

        if !positions.is_empty() {
            let count = positions.len() as f32;
            summary.average_position_of_correct =
                positions.iter().map(|(p, _)| p).sum::<usize>() as f32 / count;
            summary.average_suggestions_for_correct =
                positions.iter().map(|(_, n)| n).sum::<usize>() as f32 / count;
        }

        summary
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "symdel-accuracy",
    version,
    about = "Accuracy testing for symdel."
)]
struct Args {
    /// Provide JSON config file to override test defaults
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// The 'input -> expected' list in tab-delimited value file (TSV)
    words: Option<String>,

    /// Use the given word frequency list
    unigrams: Option<PathBuf>,

    /// Word pair frequency list used for compound correction
    #[arg(short = 'b', long)]
    bigrams: Option<PathBuf>,

    /// Column delimiter of the frequency lists
    #[arg(short = 'd', long, default_value_t = ' ')]
    delimiter: char,

    /// Test compound correction of whole phrases instead of word lookup
    #[arg(long)]
    compound: bool,

    /// The file path for the JSON report output
    #[arg(short = 'o', long = "json-output")]
    json_output: Option<String>,

    /// The file path for the TSV line append
    #[arg(short = 't', long = "tsv-output")]
    tsv_output: Option<String>,

    /// Truncate typos list to max number of words specified
    #[arg(short = 'w', long = "max-words")]
    max_words: Option<usize>,

    /// Minimum precision @ 5 for automated testing
    #[arg(short = 'T', long)]
    threshold: Option<f32>,
}

fn git_output(args: &[&str]) -> Result<String, Box<dyn Error>> {
    let output = std::process::Command::new("git").args(args).output()?;
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let args = Args::parse();

    let cfg: AccuracyConfig = match args.config {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(file)?
        }
        None => CFG,
    };

    if !args.delimiter.is_ascii() {
        return Err("delimiter must be a single ASCII character".into());
    }
    let delimiter = args.delimiter as u8;

    let unigrams = match args.unigrams {
        Some(path) => load_unigrams(path, delimiter)?,
        None => {
            eprintln!("No frequency list for given path; aborting.");
            std::process::exit(1);
        }
    };
    let bigrams = match args.bigrams {
        Some(path) => load_bigrams(path, delimiter)?,
        None => Default::default(),
    };

    let speller = SymSpellBuilder::new()
        .config(cfg.speller)
        .unigram_lexicon(unigrams)
        .bigram_lexicon(bigrams)
        .build()?;
    log::info!("Built speller with {} deletes", speller.deletes().len());

    let words = match args.words {
        Some(path) => load_words(&path, args.max_words)?,
        None => {
            eprintln!("No word list for given path; aborting.");
            std::process::exit(1);
        }
    };

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|(input, expected)| {
            let now = Instant::now();
            let suggestions = if args.compound {
                speller.lookup_compound(input, cfg.max_edit_distance, cfg.include_unknown)
            } else {
                speller.lookup_with_max_distance(
                    input,
                    cfg.verbosity,
                    cfg.max_edit_distance,
                    cfg.include_unknown,
                )
            };
            let now = now.elapsed();

            let suggestions = suggestions.unwrap_or_else(|e| {
                log::error!("Lookup of {} failed: {}", input, e);
                vec![]
            });

            let time = Time {
                secs: now.as_secs(),
                subsec_nanos: now.subsec_nanos(),
            };

            let position = suggestions.iter().position(|x| x.value == expected);

            let distance = strsim::osa_distance(input, expected);
            AccuracyResult {
                input,
                expected,
                distance,
                time,
                suggestions,
                position,
            }
        })
        .collect::<Vec<_>>();

    let now = start_time.elapsed();
    let total_time = Time {
        secs: now.as_secs(),
        subsec_nanos: now.subsec_nanos(),
    };
    let now_date = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
    let start_timestamp = Time {
        secs: now_date.as_secs(),
        subsec_nanos: now_date.subsec_nanos(),
    };

    let summary = Summary::new(&results);
    println!("{}", summary);

    if let Some(path) = args.json_output {
        let output = std::fs::File::create(path)?;
        let report = Report {
            config: &cfg,
            summary: summary.clone(),
            results,
            start_timestamp,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    } else if let Some(path) = args.tsv_output {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let md = output.metadata()?;
        if md.len() == 0 {
            // new file, write headers:
            output
                .write_all(b"id\tdate\ttag/branch\ttop1\ttop5\tworse\tno suggs\twrong suggs\n")?;
        }
        let line = [
            git_output(&["rev-parse", "--short", "HEAD"])?,
            Local::now().to_rfc3339(),
            git_output(&["describe"])?,
            summary.first_position.to_string(),
            summary.top_five.to_string(),
            summary.any_position.to_string(),
            summary.no_suggestions.to_string(),
            summary.only_wrong.to_string(),
        ]
        .join("\t");
        writeln!(output, "{}", line)?;
    };

    println!("Done!");
    match args.threshold {
        Some(threshold) => {
            if threshold < (summary.top_five as f32 / summary.total_words as f32 * 100.0) {
                Ok(())
            } else {
                Err("accuracy @5 lower threshold")?
            }
        }
        None => Ok(()),
    }
}
