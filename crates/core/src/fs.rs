use std::collections::HashSet;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::input::InputFile;

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// How to enumerate and decode the files under a root.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub extensions: HashSet<String>,
    pub encoding: &'static Encoding,
    pub max_file_size: Option<u64>,
    pub respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            encoding: encoding_rs::UTF_8,
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE_BYTES),
            respect_gitignore: true,
        }
    }
}

pub fn default_extensions() -> HashSet<String> {
    ["sql", "pkg", "pks", "pkb"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Enumerates the eligible files under `root` in file-path order, decoding
/// each with the configured encoding (BOMs win over it). Unreadable, binary,
/// and oversize files are logged and skipped, never fatal.
pub fn collect_input_files(root: &Path, options: &WalkOptions) -> io::Result<Vec<InputFile>> {
    let meta = std::fs::metadata(root)
        .map_err(|err| io::Error::new(err.kind(), format!("root {}: {err}", root.display())))?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("root {} is not a directory", root.display()),
        ));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .follow_links(false)
        .ignore(false)
        .git_ignore(options.respect_gitignore)
        .parents(false)
        .require_git(false)
        .sort_by_file_path(std::cmp::Ord::cmp);

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "walk error, skipping entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !has_eligible_extension(path, &options.extensions) {
            continue;
        }
        if let Some(file) = read_input_file(root, path, options) {
            files.push(file);
        }
    }

    Ok(files)
}

fn has_eligible_extension(path: &Path, extensions: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn read_input_file(root: &Path, path: &Path, options: &WalkOptions) -> Option<InputFile> {
    if let Some(max_file_size) = options.max_file_size {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > max_file_size => {
                debug!(path = %path.display(), size = meta.len(), "skipping oversize file");
                return None;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot stat file, skipping");
                return None;
            }
        }
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read file, skipping");
            return None;
        }
    };
    if bytes.contains(&0) {
        debug!(path = %path.display(), "skipping binary file");
        return None;
    }

    let (contents, _, had_errors) = options.encoding.decode(&bytes);
    if had_errors {
        warn!(path = %path.display(), encoding = options.encoding.name(), "malformed characters replaced during decode");
    }

    Some(InputFile::new(make_rel_path(root, path), contents.into_owned()))
}

fn make_rel_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}
