//! Help text for every command, collected once at startup.

use std::{collections::BTreeMap, fmt::Write};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpEntry {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    usage: &'static str,
}

impl HelpEntry {
    /// `{prefix}` in `usage` is replaced with the bot's prefix when rendered.
    pub const fn new(
        name: &'static str,
        category: &'static str,
        description: &'static str,
        usage: &'static str,
    ) -> Self {
        Self {
            name,
            category,
            description,
            usage,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn category(&self) -> &'static str {
        self.category
    }
}

#[derive(Clone, Debug, Default)]
pub struct HelpRegistry {
    entries: BTreeMap<&'static str, HelpEntry>,
}

impl HelpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: HelpEntry) -> &mut Self {
        if let Some(old) = self.entries.insert(entry.name, entry) {
            tracing::warn!(command = old.name, "help entry registered twice, keeping the newest");
        }

        self
    }

    pub fn get(&self, name: &str) -> Option<&HelpEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every command, grouped by category.
    pub fn overview(&self, prefix: &str) -> String {
        let mut categories: BTreeMap<&str, Vec<&HelpEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            categories.entry(entry.category()).or_default().push(entry);
        }

        let mut text = String::new();
        for (category, entries) in categories {
            let _ = writeln!(text, "**{category}**");
            for entry in entries {
                let _ = writeln!(text, "`{prefix}{}`: {}", entry.name, entry.description);
            }
        }

        let _ = write!(
            text,
            "\nuse `{prefix}help <command>` for more on a single command"
        );

        text
    }

    pub fn detail(&self, name: &str, prefix: &str) -> String {
        let name = name.trim().trim_start_matches(prefix);

        match self.get(name) {
            Some(entry) => format!(
                "**{prefix}{}** ({})\n{}\n\n{}",
                entry.name,
                entry.category,
                entry.description,
                entry.usage.replace("{prefix}", prefix)
            ),
            None => format!("no help available for `{name}`"),
        }
    }

    pub fn render(&self, command: Option<&str>, prefix: &str) -> String {
        match command {
            Some(name) if !name.trim().is_empty() => self.detail(name, prefix),
            _ => self.overview(prefix),
        }
    }
}
