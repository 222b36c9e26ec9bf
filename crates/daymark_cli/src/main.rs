//! Document-loader CLI over the daymark engine.
//!
//! # Responsibility
//! - Play the external-collaborator role: read daily `.md` documents from a
//!   directory fully into memory, segment them, print a filtered and
//!   chronologically ordered view plus the global tag index.
//! - Keep failures per-file; a broken document never stops its siblings.

use daymark_core::{Note, NoteCollection, NoteTimestamp, SortDirection};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: daymark_cli <notes-dir> [--tag TAG] [--oldest-first]";

struct Args {
    notes_dir: PathBuf,
    active_tag: Option<String>,
    direction: SortDirection,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut notes_dir = None;
        let mut active_tag = None;
        let mut direction = SortDirection::NewestFirst;

        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--tag" => {
                    active_tag =
                        Some(raw.next().ok_or_else(|| "--tag needs a value".to_string())?);
                }
                "--oldest-first" => direction = SortDirection::OldestFirst,
                other if other.starts_with("--") => {
                    return Err(format!("unknown option `{other}`"));
                }
                _ if notes_dir.is_none() => notes_dir = Some(PathBuf::from(arg)),
                other => return Err(format!("unexpected argument `{other}`")),
            }
        }

        Ok(Self {
            notes_dir: notes_dir.ok_or_else(|| "missing <notes-dir>".to_string())?,
            active_tag,
            direction,
        })
    }
}

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("DAYMARK_LOG_DIR") {
        if let Err(message) =
            daymark_core::init_logging(daymark_core::default_log_level(), &log_dir)
        {
            eprintln!("logging disabled: {message}");
        }
    }

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let documents = match read_documents(&args.notes_dir) {
        Ok(documents) => documents,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let collection = NoteCollection::from_documents(documents);
    print_view(&collection, args.active_tag.as_deref(), args.direction);
    ExitCode::SUCCESS
}

/// Reads every `.md` file in `notes_dir`, sorted by file name so output is
/// deterministic. Unreadable files are reported and skipped.
fn read_documents(notes_dir: &Path) -> Result<Vec<(String, String)>, String> {
    let entries = fs::read_dir(notes_dir)
        .map_err(|err| format!("cannot read directory `{}`: {err}", notes_dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        let source_id = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        match fs::read_to_string(&path) {
            Ok(raw_text) => documents.push((source_id, raw_text)),
            Err(err) => {
                warn!("event=document_skipped module=cli status=warn source_id={source_id}");
                eprintln!("skipping `{}`: {err}", path.display());
            }
        }
    }
    Ok(documents)
}

fn print_view(collection: &NoteCollection, active_tag: Option<&str>, direction: SortDirection) {
    let index = collection.tag_index();
    let tags: Vec<String> = index.iter().map(|tag| format!("#{tag}")).collect();
    println!("tags: {}", tags.join(" "));

    for note in collection.view(active_tag, direction) {
        println!("-- {} ({})", format_timestamp(&note), note.source_id);
        print!("{}", note.body);
        if !note.body.ends_with('\n') {
            println!();
        }
    }
}

fn format_timestamp(note: &Note) -> String {
    match &note.created_at {
        NoteTimestamp::Valid { at } => at.format("%Y-%m-%d %H:%M").to_string(),
        NoteTimestamp::Invalid { raw, .. } => format!("invalid timestamp `{raw}`"),
    }
}
