pub struct Icons;

impl Icons {
    pub const GLOBE: &str = "🌍";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const SPEECH: &str = "💬";
    pub const PENCIL: &str = "📝";
    pub const BOOK: &str = "📖";
    pub const PACKAGE: &str = "📦";
    pub const ROBOT: &str = "🤖";
    pub const APPLE: &str = "🍎";
    pub const EMPTY: &str = "∅";
}
