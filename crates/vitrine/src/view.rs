//! Render targets the renderer writes into.
//!
//! The renderer never looks elements up by itself. It is given a [`View`] exposing a fixed set of named [`Slot`]s and
//! the list of elements tagged for translation. [`Document`] is the in-memory view backing the portfolio page.
use std::fmt::{self, Display, Formatter};

use maud::Markup;
use rustc_hash::FxHashMap;

use crate::errors::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Projects,
    Articles,
    LanguageIndicator,
}

impl Slot {
    /// Element id of the slot in the rendered page.
    pub fn id(&self) -> &'static str {
        match self {
            Slot::Projects => "projectsGrid",
            Slot::Articles => "articlesList",
            Slot::LanguageIndicator => "currentLang",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An element whose text is looked up in the translation table through `key`.
///
/// Elements with an `icon` keep it in front of the text when the text is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedElement {
    pub key: String,
    pub icon: Option<String>,
    pub text: String,
}

impl TaggedElement {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            icon: None,
            text: text.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

pub trait View {
    fn has_slot(&self, slot: Slot) -> bool;

    /// Replaces the whole content of `slot`.
    fn fill(&mut self, slot: Slot, content: Markup) -> Result<(), ViewError>;

    fn tagged_elements(&mut self) -> &mut [TaggedElement];

    /// Sets the language of the whole document (the `lang` attribute of a page).
    fn set_language(&mut self, code: &str);
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    language: String,
    slots: FxHashMap<Slot, String>,
    elements: Vec<TaggedElement>,
}

impl Document {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_slot(mut self, slot: Slot, initial: impl Into<String>) -> Self {
        self.slots.insert(slot, initial.into());
        self
    }

    pub fn with_element(mut self, element: TaggedElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current HTML content of `slot`, if the document has it.
    pub fn slot(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn element(&self, key: &str) -> Option<&TaggedElement> {
        self.elements.iter().find(|element| element.key == key)
    }

    pub fn elements(&self) -> &[TaggedElement] {
        &self.elements
    }
}

impl View for Document {
    fn has_slot(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    fn fill(&mut self, slot: Slot, content: Markup) -> Result<(), ViewError> {
        match self.slots.get_mut(&slot) {
            Some(current) => {
                *current = content.into_string();
                Ok(())
            }
            None => Err(ViewError::MissingSlot(slot)),
        }
    }

    fn tagged_elements(&mut self) -> &mut [TaggedElement] {
        &mut self.elements
    }

    fn set_language(&mut self, code: &str) {
        self.language = code.to_string();
    }
}
