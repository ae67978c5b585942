//! Two-language text switching.
//!
//! Markup opts in per element with `data-i18n="key"` (plus `data-i18n-html`
//! when the translation carries inline emphasis). Elements are collected
//! into a [`TranslationRegistry`] once per mount and re-rendered from the
//! static [`TranslationTable`] whenever the language changes.

use std::cell::Cell;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

pub mod dom;
pub mod translations;

pub const STORAGE_KEY: &str = "estada-language";

pub static TRANSLATIONS: Lazy<TranslationTable> = Lazy::new(|| {
    TranslationTable::new(&[
        (Language::En, translations::EN),
        (Language::Mk, translations::MK),
    ])
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Mk,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Mk => "mk",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Mk => "MK",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::En => Language::Mk,
            Language::Mk => Language::En,
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "mk" => Some(Language::Mk),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub struct TranslationTable {
    entries: HashMap<Language, HashMap<&'static str, &'static str>>,
}

impl TranslationTable {
    pub fn new(tables: &[(Language, &[(&'static str, &'static str)])]) -> Self {
        let entries = tables
            .iter()
            .map(|(lang, pairs)| (*lang, pairs.iter().copied().collect()))
            .collect();
        Self { entries }
    }

    pub fn supports(&self, lang: Language) -> bool {
        self.entries.contains_key(&lang)
    }

    pub fn lookup(&self, lang: Language, key: &str) -> Option<&'static str> {
        self.entries.get(&lang)?.get(key).copied()
    }

    pub fn keys(&self, lang: Language) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .entries
            .get(&lang)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}

/// Where the chosen language survives reloads.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&self, code: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// input, textarea and select
    FormControl { has_placeholder: bool },
    /// the document `<title>`
    Title,
    Text { allow_markup: bool },
}

pub trait TranslatableNode {
    fn role(&self) -> NodeRole;
    fn set_text(&self, text: &str);
    fn set_markup(&self, markup: &str);
    fn set_value(&self, value: &str);
    fn set_placeholder(&self, text: &str);
    fn set_document_title(&self, title: &str);
}

pub fn apply_translation<N: TranslatableNode>(node: &N, text: &str) {
    match node.role() {
        NodeRole::FormControl { has_placeholder: true } => node.set_placeholder(text),
        NodeRole::FormControl { has_placeholder: false } => node.set_value(text),
        NodeRole::Title => node.set_document_title(text),
        NodeRole::Text { allow_markup: true } => node.set_markup(text),
        NodeRole::Text { allow_markup: false } => node.set_text(text),
    }
}

pub struct TranslationRegistry<N> {
    entries: Vec<(N, String)>,
}

impl<N> Default for TranslationRegistry<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N: TranslatableNode> TranslationRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node: N, key: impl Into<String>) {
        self.entries.push((node, key.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many elements were updated. Keys missing from `lang`
    /// leave their element untouched.
    pub fn render(&self, table: &TranslationTable, lang: Language) -> usize {
        let mut updated = 0;
        for (node, key) in &self.entries {
            if let Some(text) = table.lookup(lang, key) {
                apply_translation(node, text);
                updated += 1;
            }
        }
        updated
    }
}

impl<N: TranslatableNode> FromIterator<(N, String)> for TranslationRegistry<N> {
    fn from_iter<I: IntoIterator<Item = (N, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

pub struct LanguageController<S> {
    table: &'static TranslationTable,
    store: S,
    current: Cell<Language>,
}

impl<S: PreferenceStore> LanguageController<S> {
    /// Reads the stored preference once; unknown or missing values fall back to English.
    pub fn load(table: &'static TranslationTable, store: S) -> Self {
        let current = store
            .load()
            .and_then(|code| Language::from_code(&code))
            .filter(|lang| table.supports(*lang))
            .unwrap_or_default();
        Self {
            table,
            store,
            current: Cell::new(current),
        }
    }

    pub fn current(&self) -> Language {
        self.current.get()
    }

    /// The toggle always offers the language that is not active.
    pub fn toggle_label(&self) -> &'static str {
        self.current().other().short_label()
    }

    pub fn toggle<N: TranslatableNode>(&self, registry: &TranslationRegistry<N>) -> Language {
        let next = self.current().other();
        self.switch_to(next, registry);
        next
    }

    pub fn set_language<N: TranslatableNode>(
        &self,
        code: &str,
        registry: &TranslationRegistry<N>,
    ) -> Result<Language, I18nError> {
        let lang = Language::from_code(code)
            .filter(|lang| self.table.supports(*lang))
            .ok_or_else(|| I18nError::UnsupportedLanguage(code.to_string()))?;
        self.switch_to(lang, registry);
        Ok(lang)
    }

    pub fn render<N: TranslatableNode>(&self, registry: &TranslationRegistry<N>, lang: Language) -> usize {
        registry.render(self.table, lang)
    }

    /// Never fails: an unknown key comes back unchanged.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.table.lookup(self.current(), key).unwrap_or(key)
    }

    fn switch_to<N: TranslatableNode>(&self, lang: Language, registry: &TranslationRegistry<N>) {
        self.current.set(lang);
        self.store.save(lang.code());
        self.render(registry, lang);
    }
}
