pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    banner, dim, empty, error, info, muted, section, source_line, success, translation_line, warn,
};
pub use progress::Spinner;
pub use table::{language_table, stats_table};
pub use theme::{theme, Theme};
