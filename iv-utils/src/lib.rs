// Shared helpers for the pack tools: comment-tolerant JSON text handling and
// definition-file discovery.

use std::fs;
use std::path::{Path, PathBuf};

pub mod json_text;

pub use json_text::{parse_lenient, strip_json_comments, to_pretty, validate_text, write_pretty};

/// Every `.json` file under `root`, recursively, sorted for stable runs.
pub fn collect_json_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    visit(root, &mut out);
    out.sort();
    out
}

fn visit(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit(&path, out);
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            out.push(path);
        }
    }
}
