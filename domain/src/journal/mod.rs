//! Journals: named collections of context trees for later inspection.
//!
//! A viewer only reads the trees it is given; nothing in this module
//! mutates a [`Context`].

use crate::context::{Context, ContextReport};
use serde::Serialize;
use serde_json::Value;

/// A top-level context tree with a title.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub abstract_text: Option<String>,
    pub entry_point: Context,
}

impl Page {
    pub fn new(title: impl Into<String>, entry_point: Context) -> Self {
        Self {
            title: title.into(),
            abstract_text: None,
            entry_point,
        }
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Journal {
    pub title: String,
    pub abstract_text: Option<String>,
    pub pages: Vec<Page>,
}

impl Journal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            abstract_text: None,
            pages: Vec::new(),
        }
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn report(&self) -> JournalReport {
        JournalReport {
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            pages: self
                .pages
                .iter()
                .map(|page| PageReport {
                    title: page.title.clone(),
                    abstract_text: page.abstract_text.clone(),
                    entry_point: page.entry_point.report(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalReport {
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub pages: Vec<PageReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub entry_point: ContextReport,
}

/// Renders log payloads a viewer knows how to display.
pub trait DataView {
    /// What the view produces (markup, a widget, plain text...).
    type Output;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn is_compatible(&self, data: &Value) -> bool;

    fn view(&self, data: &Value) -> Self::Output;
}

/// First view of `views` compatible with `data`.
pub fn select_view<'v, V: DataView>(views: &'v [V], data: &Value) -> Option<&'v V> {
    views.iter().find(|view| view.is_compatible(data))
}
