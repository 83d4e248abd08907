use tabled::{settings::Style, Table, Tabled};

use crate::language::Language;
use crate::store::StoreStats;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Records")]
    records: String,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn stats_table(stats: &StoreStats) -> String {
    let rows = vec![
        StatsRow { records: "Sources".to_string(), count: stats.sources },
        StatsRow { records: "Comments".to_string(), count: stats.comments },
        StatsRow { records: "Translations".to_string(), count: stats.translations },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "Language")]
    language: &'static str,
    #[tabled(rename = "Code")]
    code: &'static str,
}

pub fn language_table(languages: &[Language]) -> String {
    let rows: Vec<LanguageRow> = languages
        .iter()
        .map(|l| LanguageRow { language: l.name, code: l.code })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
