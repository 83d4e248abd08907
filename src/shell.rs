//! Interactive terminal shell
//!
//! The classic workflow: banner, numbered menu, free-text prompts. Every
//! prompt trims its input and treats an empty line as "do nothing". Store
//! failures are printed and the menu resumes; only a failure to read
//! interactive input ends the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;

use crate::android;
use crate::store::TranslationMemory;
use crate::ui::{self, theme, Icons};
use crate::Result;

const LOGO: &str = r#"
 _     _
| |   (_)_ __   __ _  ___
| |   | | '_ \ / _` |/ _ \
| |___| | | | | (_| | (_) |
|_____|_|_| |_|\__, |\___/
               |___/
"#;

/// Run the menu loop over standard input
pub fn run(tm: &TranslationMemory) -> Result<()> {
    let stdin = io::stdin();
    run_with_input(tm, &mut stdin.lock())
}

/// Run the menu loop over any line source (tests drive this directly)
pub fn run_with_input(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    println!("{}", ui::muted(LOGO));
    ui::banner(
        "Lingo Translation Memory",
        &format!("Version {}", env!("CARGO_PKG_VERSION")),
    );

    loop {
        print_menu();
        let Some(choice) = prompt(input, "Choose an action")? else {
            break;
        };
        match choice.as_str() {
            "" => continue,
            "1" => search_sources(tm, input)?,
            "2" => search_translations(tm, input)?,
            "3" => add_source(tm, input)?,
            "4" => add_translation(tm, input)?,
            "5" => show_comments(tm, input)?,
            "6" => import_android(tm, input)?,
            "7" => build_android(tm, input)?,
            "8" => ui::warn("Apple .strings export is not implemented yet"),
            "9" => show_stats(tm),
            "q" | "quit" | "exit" => break,
            other => ui::warn(&format!("Unknown choice: {}", other)),
        }
    }

    ui::success("Bye");
    Ok(())
}

fn print_menu() {
    ui::section("Main Menu");
    menu_item("1", Icons::SEARCH, "Search sources");
    menu_item("2", Icons::BOOK, "Search translations");
    menu_item("3", Icons::PENCIL, "Add source");
    menu_item("4", Icons::GLOBE, "Add translation");
    menu_item("5", Icons::SPEECH, "Show comments");
    menu_item("6", Icons::ROBOT, "Import Android strings.xml");
    menu_item("7", Icons::PACKAGE, "Build Android strings.xml");
    menu_item("8", Icons::APPLE, "Export Apple .strings");
    menu_item("9", Icons::STATS, "Store statistics");
    menu_item("q", " ", "Quit");
}

fn menu_item(key: &str, icon: &str, label: &str) {
    println!(
        "  {} {} {}",
        format!("[{}]", key).style(theme().prompt.clone()),
        icon,
        label
    );
}

/// Prompt for one trimmed line; `None` means end of input
fn prompt(input: &mut dyn BufRead, label: &str) -> Result<Option<String>> {
    print!("{}> ", label.style(theme().prompt.clone()));
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Report a store failure and keep the session alive
fn report<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            ui::error(&e.to_string());
            None
        }
    }
}

fn search_sources(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(term) = prompt(input, "Search term")? else {
        return Ok(());
    };
    if term.is_empty() {
        return Ok(());
    }
    let Some(hits) = report(tm.search_sources(&term)) else {
        return Ok(());
    };
    if hits.is_empty() {
        ui::empty("No sources matched.");
        return Ok(());
    }
    for hit in hits {
        ui::source_line(&hit.source);
    }
    Ok(())
}

fn search_translations(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(term) = prompt(input, "Search term")? else {
        return Ok(());
    };
    if term.is_empty() {
        return Ok(());
    }
    let Some(hits) = report(tm.search_translations(&term)) else {
        return Ok(());
    };
    if hits.is_empty() {
        ui::empty("No sources matched.");
        return Ok(());
    }
    for hit in hits {
        ui::source_line(&hit.source);
        for t in &hit.translations {
            ui::translation_line(&t.lang, &t.text);
        }
    }
    Ok(())
}

fn add_source(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(text) = prompt(input, "Source text")? else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }

    let mut comments = Vec::new();
    loop {
        let Some(comment) = prompt(input, "Comment (empty to finish)")? else {
            break;
        };
        if comment.is_empty() {
            break;
        }
        comments.push(comment);
    }

    if let Some(guid) = report(tm.add_source(&text, &comments)) {
        ui::success(&format!("Stored source {}", ui::dim(&guid)));
    }
    Ok(())
}

fn add_translation(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(text) = prompt(input, "Source text")? else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }
    let Some(found) = report(tm.guid_for_source(&text)) else {
        return Ok(());
    };
    let Some(guid) = found else {
        ui::warn(&format!("No source with text: {}", text));
        return Ok(());
    };

    if let Some(codes) = report(tm.existing_language_codes()) {
        ui::info("Languages in store", &codes.join(", "));
    }
    let Some(lang) = prompt(input, "Language code")? else {
        return Ok(());
    };
    if lang.is_empty() {
        return Ok(());
    }
    let Some(translation) = prompt(input, "Translation")? else {
        return Ok(());
    };
    if translation.is_empty() {
        return Ok(());
    }

    if report(tm.add_translation(&guid, &lang, &translation)).is_some() {
        ui::success(&format!(
            "Stored {} translation of {}",
            crate::language::display_name(&lang),
            text
        ));
    }
    Ok(())
}

fn show_comments(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(text) = prompt(input, "Source text")? else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }
    let Some(found) = report(tm.comments_for_source(&text)) else {
        return Ok(());
    };
    match found {
        None => ui::warn(&format!("No source with text: {}", text)),
        Some(comments) if comments.is_empty() => ui::empty("No comments."),
        Some(comments) => {
            for comment in comments {
                println!("- {}", comment);
            }
        }
    }
    Ok(())
}

fn import_android(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    let Some(path) = prompt(input, "Path to strings.xml")? else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }
    let spinner = ui::Spinner::new("Importing...");
    match report(android::import_strings(tm, &PathBuf::from(path))) {
        Some(stats) => {
            spinner.finish_with_message("Done");
            ui::success(&format!(
                "Imported {} entries ({} new)",
                stats.total, stats.created
            ));
        }
        None => spinner.finish_with_message("Failed"),
    }
    Ok(())
}

fn build_android(tm: &TranslationMemory, input: &mut dyn BufRead) -> Result<()> {
    if let Some(codes) = report(tm.existing_language_codes()) {
        ui::info("Languages in store", &codes.join(", "));
    }
    let Some(lang) = prompt(input, "Language code")? else {
        return Ok(());
    };
    if lang.is_empty() {
        return Ok(());
    }
    let Some(path) = prompt(input, "Output path")? else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }
    if let Some(stats) = report(android::build_strings(tm, &lang, &PathBuf::from(path))) {
        ui::success(&format!("Wrote {} entries", stats.written));
        if stats.missing > 0 {
            ui::warn(&format!("{} sources have no {} translation", stats.missing, lang));
        }
    }
    Ok(())
}

fn show_stats(tm: &TranslationMemory) {
    if let Some(stats) = report(tm.stats()) {
        println!("{}", ui::stats_table(&stats));
    }
}
