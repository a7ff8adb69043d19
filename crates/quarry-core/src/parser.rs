//! XML parser for Infos data files
//!
//! Builds a small owned element tree. Only element names, their leading text
//! and their child elements are kept; attributes, comments and processing
//! instructions carry nothing the decoders read.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// A parsed XML element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name (e.g., "Entry" or "zType")
    pub name: String,
    /// Raw text appearing before the first child element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element with no text or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Trimmed text content, or None if empty or whitespace-only
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// First direct child with the given tag name
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first direct child with the given tag name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(Element::text)
    }
}

/// Parse an XML file into its root element
pub fn parse_xml<P: AsRef<Path>>(path: P) -> Result<Element> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_xml_str(&content, path)
}

/// Parse XML from a string (useful for testing)
pub fn parse_xml_str<P: AsRef<Path>>(content: &str, source_name: P) -> Result<Element> {
    let path = source_name.as_ref().to_path_buf();
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| Error::Xml {
            path: path.clone(),
            message: format!("{} at byte {}", e, reader.buffer_position()),
        })?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(Element::new(name));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                close_element(Element::new(name), &mut stack, &mut root, &path)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| Error::Xml {
                    path: path.clone(),
                    message: "unexpected closing tag".to_string(),
                })?;
                close_element(element, &mut stack, &mut root, &path)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| Error::Xml {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                append_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let data = data.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml {
            path,
            message: format!("unexpected end of file inside <{}>", open.name),
        });
    }

    root.ok_or_else(|| Error::Xml {
        path,
        message: "no root element found".to_string(),
    })
}

/// Attach a finished element to its parent, or make it the document root
fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    path: &Path,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(Error::Xml {
                path: path.to_path_buf(),
                message: format!("junk after document element: <{}>", element.name),
            })
        }
    }
    Ok(())
}

/// Text only counts while the open element has no children yet
fn append_text(stack: &mut [Element], text: &str) {
    if let Some(open) = stack.last_mut() {
        if open.children.is_empty() {
            open.text.push_str(text);
        }
    }
}
