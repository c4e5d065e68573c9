use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use symdel::lexicon::{load_bigrams, load_unigrams};
use symdel::speller::{
    suggestion::Suggestion, Speller, SpellerConfig, SymSpell, SymSpellBuilder, Verbosity,
};

trait OutputWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool);
    fn write_suggestions(&mut self, input: &str, suggestions: &[Suggestion]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &input,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _input: &str, suggestions: &[Suggestion]) {
        for sugg in suggestions {
            println!("{}\t\t{}\t{}", sugg.value, sugg.distance, sugg.frequency);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct SuggestionRequest {
    input: String,
    is_correct: bool,
    suggestions: Vec<Suggestion>,
}

#[derive(Default, Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        Self::default()
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            input: input.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _input: &str, suggestions: &[Suggestion]) {
        if let Some(last) = self.results.last_mut() {
            last.suggestions = suggestions.to_vec();
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "symdel",
    about = "Spelling correction with symmetric delete dictionaries"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Get suggestions for single words
    Lookup(LookupArgs),

    /// Correct whole phrases, including missing and extra spaces
    Compound(CompoundArgs),
}

#[derive(Debug, Parser)]
struct LexiconArgs {
    /// Word frequency list, one `word<delimiter>count` per line
    #[arg(short = 'u', long = "unigrams")]
    unigram_path: PathBuf,

    /// Word pair frequency list, one `word1<delimiter>word2<delimiter>count` per line
    #[arg(short = 'b', long = "bigrams")]
    bigram_path: Option<PathBuf>,

    /// Column delimiter of the frequency lists
    #[arg(short = 'd', long, default_value_t = ' ')]
    delimiter: char,

    /// Edit distance the dictionary is precalculated for
    #[arg(long)]
    max_dictionary_edit_distance: Option<usize>,

    /// Number of leading characters used for generating deletes
    #[arg(long)]
    prefix_length: Option<usize>,

    /// Uses supplied speller config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct LookupArgs {
    #[command(flatten)]
    lexicon: LexiconArgs,

    /// One of top, closest or all
    #[arg(short = 'v', long, default_value_t = Verbosity::Closest)]
    verbosity: Verbosity,

    /// Maximum edit distance of suggestions
    #[arg(short = 'm', long)]
    max_edit_distance: Option<usize>,

    /// Return the input itself when nothing is found
    #[arg(short = 'U', long)]
    include_unknown: bool,

    /// Always show suggestions even if word is correct
    #[arg(short = 'S', long = "always-suggest")]
    always_suggest: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Words to be processed
    inputs: Vec<String>,
}

#[derive(Debug, Parser)]
struct CompoundArgs {
    #[command(flatten)]
    lexicon: LexiconArgs,

    /// Maximum edit distance per word
    #[arg(short = 'm', long)]
    max_edit_distance: Option<usize>,

    /// Keep words that have no suggestion
    #[arg(short = 'U', long)]
    include_unknown: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Phrases to be processed
    inputs: Vec<String>,
}

fn load_speller(args: &LexiconArgs) -> anyhow::Result<Arc<SymSpell>> {
    // 1. default config
    let mut config = SpellerConfig::default();

    // 2. config from explicit config file
    if let Some(config_path) = &args.config {
        let config_file = std::fs::File::open(config_path)?;
        config = serde_json::from_reader(config_file)?;
    }

    // 3. config from other command line flags
    if let Some(v) = args.max_dictionary_edit_distance {
        config.max_dictionary_edit_distance = v;
    }
    if let Some(v) = args.prefix_length {
        config.prefix_length = v;
    }

    if !args.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character");
    }
    let delimiter = args.delimiter as u8;

    let unigrams = load_unigrams(&args.unigram_path, delimiter)?;
    let bigrams = match &args.bigram_path {
        Some(path) => load_bigrams(path, delimiter)?,
        None => Default::default(),
    };

    log::info!(
        "Loaded {} unigrams and {} bigrams",
        unigrams.len(),
        bigrams.len()
    );

    Ok(SymSpellBuilder::new()
        .config(config)
        .unigram_lexicon(unigrams)
        .bigram_lexicon(bigrams)
        .build()?)
}

fn read_inputs(inputs: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer
        .lines()
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect())
}

fn writer(json: bool) -> Box<dyn OutputWriter> {
    if json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    }
}

fn lookup(args: LookupArgs) -> anyhow::Result<()> {
    let speller = load_speller(&args.lexicon)?;
    let max_edit_distance = args
        .max_edit_distance
        .unwrap_or_else(|| speller.max_dictionary_edit_distance());
    let mut writer = writer(args.json);

    for word in read_inputs(args.inputs)? {
        let suggestions = speller.lookup_with_max_distance(
            &word,
            args.verbosity,
            max_edit_distance,
            args.include_unknown,
        )?;
        let is_correct = suggestions.first().map_or(false, |s| s.distance == 0);
        writer.write_correction(&word, is_correct);

        if args.always_suggest || !is_correct {
            writer.write_suggestions(&word, &suggestions);
        }
    }

    writer.finish()
}

fn compound(args: CompoundArgs) -> anyhow::Result<()> {
    let speller = load_speller(&args.lexicon)?;
    let max_edit_distance = args
        .max_edit_distance
        .unwrap_or_else(|| speller.max_dictionary_edit_distance());
    let mut writer = writer(args.json);

    for phrase in read_inputs(args.inputs)? {
        let suggestions =
            speller.lookup_compound(&phrase, max_edit_distance, args.include_unknown)?;
        let is_correct = suggestions.first().map_or(false, |s| s.distance == 0);
        writer.write_correction(&phrase, is_correct);
        writer.write_suggestions(&phrase, &suggestions);
    }

    writer.finish()
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();

    match args.command {
        None => Ok(()),
        Some(Command::Lookup(args)) => lookup(args),
        Some(Command::Compound(args)) => compound(args),
    }
}
