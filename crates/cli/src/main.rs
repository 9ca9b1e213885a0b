//! srcpack CLI — packs source files into sharded record containers
//! with a label as either obfuscated or non-obfuscated.
//!
//! Exit codes: 0 on success, 1 on validation failure or a mid-run
//! abort. Pre-flight failures (bad label, missing file list, unusable
//! output directory) are reported before any shard file is created.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use srcpack_writer::{
    FileList, Label, PackConfig, PackSummary, ReadPolicy, ShardedWriter, DEFAULT_SHARD_CAPACITY,
};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("srcpack")
        .about("Packs source files into sharded record containers with an obfuscation label")
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .required(true)
                .value_name("DIR")
                .help("Output directory for shard files"),
        )
        .arg(
            Arg::new("files")
                .short('f')
                .long("files")
                .required(true)
                .value_name("FILE")
                .help("List of source files to pack, one path per line"),
        )
        .arg(
            Arg::new("label")
                .short('l')
                .long("label")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .value_name("LABEL")
                .help("Obfuscation label for files, either 0 (non-obfuscated) or 1 (obfuscated)"),
        )
        .arg(
            Arg::new("records")
                .short('n')
                .long("records")
                .default_value("65536")
                .value_parser(value_parser!(usize))
                .value_name("NUM")
                .help("Number of records to store in each shard file"),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .default_value("")
                .value_name("PREFIX")
                .help("Prefix to add to generated shard filenames"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print per-record progress"),
        )
        .arg(
            Arg::new("skip-unreadable")
                .long("skip-unreadable")
                .action(ArgAction::SetTrue)
                .help("Skip unreadable source files instead of aborting the run"),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = build_cli().get_matches();
    match run(&matches) {
        Ok(summary) => {
            info!(
                shards = summary.shards_written,
                records = summary.records_written,
                skipped = summary.skipped,
                "packing complete"
            );
        }
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<PackSummary, String> {
    let dir = matches
        .get_one::<String>("dir")
        .ok_or("missing output directory")?;
    let files = matches
        .get_one::<String>("files")
        .ok_or("missing file list")?;
    let raw_label = matches
        .get_one::<i64>("label")
        .copied()
        .ok_or("missing label")?;
    let capacity = matches
        .get_one::<usize>("records")
        .copied()
        .unwrap_or(DEFAULT_SHARD_CAPACITY);
    let prefix = matches
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_default();

    let label = Label::try_from(raw_label).map_err(|e| e.to_string())?;
    let read_policy = if matches.get_flag("skip-unreadable") {
        ReadPolicy::SkipAndLog
    } else {
        ReadPolicy::FailFast
    };

    let config = PackConfig::new(label)
        .capacity(capacity)
        .prefix(prefix)
        .verbose(matches.get_flag("verbose"))
        .read_policy(read_policy);

    // Open the list before touching the output directory so a missing
    // list fails with no side effects.
    let list = FileList::open(files).map_err(|e| e.to_string())?;
    let writer = ShardedWriter::new(dir, config).map_err(|e| e.to_string())?;
    writer.pack_lines(list).map_err(|e| e.to_string())
}
