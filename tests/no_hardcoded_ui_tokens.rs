//! Glyphs and box-drawing characters belong in `src/ui/theme.rs`; every
//! other UI or command file must go through the theme so ASCII fallbacks
//! keep working.

use std::path::{Path, PathBuf};

const THEME: &str = "src/ui/theme.rs";

const GLYPHS: &[char] = &[
    '\u{2713}', '\u{2717}', '\u{26a0}', '\u{21b3}', '\u{2191}', '\u{1f332}', '\u{1f50d}',
    '\u{251c}', '\u{2514}', '\u{2502}', '\u{256d}', '\u{256e}', '\u{2570}', '\u{256f}',
    '\u{2500}',
];

fn rust_sources(roots: &[&str]) -> Vec<PathBuf> {
    let mut pending: Vec<PathBuf> = roots.iter().map(PathBuf::from).collect();
    let mut files = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files
}

#[test]
fn ui_glyphs_only_live_in_theme() {
    let offenders: Vec<String> = rust_sources(&["src/commands", "src/ui"])
        .into_iter()
        .filter(|path| path != Path::new(THEME))
        .flat_map(|path| {
            let content = std::fs::read_to_string(&path).unwrap();
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(GLYPHS))
                .map(|(idx, line)| format!("{}:{}: {}", path.display(), idx + 1, line.trim()))
                .collect::<Vec<_>>()
        })
        .collect();

    assert!(
        offenders.is_empty(),
        "hardcoded UI glyphs outside {}:\n{}",
        THEME,
        offenders.join("\n")
    );
}
