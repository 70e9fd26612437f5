//! XML reading for E-utilities responses.
//!
//! Documents are read with `quick-xml` into a small owned [`Element`] tree. Namespace prefixes
//! are dropped, attributes are ignored, and text is kept in document order so inline markup such
//! as `<i>` inside a title survives as plain text.

use std::borrow::Cow;

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;

/// One XML element with its children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
  /// Local tag name, without namespace prefix
  pub name:     String,
  /// Child elements and text runs
  pub children: Vec<Node>,
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// A nested element
  Element(Element),
  /// A run of unescaped character data
  Text(String),
}

impl Element {
  /// Creates an empty element with the given tag name.
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), children: Vec::new() } }

  /// Iterates over the direct child elements, skipping text.
  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      Node::Text(_) => None,
    })
  }

  /// Returns the first direct child element named `name`.
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.elements().find(|element| element.name == name)
  }

  /// Returns the first descendant named `name`, searching depth-first in document order.
  ///
  /// The element itself is not considered.
  pub fn find(&self, name: &str) -> Option<&Element> {
    self.elements().find_map(|element| {
      if element.name == name {
        Some(element)
      } else {
        element.find(name)
      }
    })
  }

  /// Returns every descendant named `name` in document order.
  pub fn find_all(&self, name: &str) -> Vec<&Element> {
    let mut found = Vec::new();
    self.collect_named(name, &mut found);
    found
  }

  /// Depth-first accumulator behind [`Element::find_all`].
  fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
    for element in self.elements() {
      if element.name == name {
        found.push(element);
      }
      element.collect_named(name, found);
    }
  }

  /// All text inside this element, including nested markup, with whitespace collapsed.
  pub fn text(&self) -> String {
    let mut raw = String::new();
    self.collect_text(&mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
  }

  /// Like [`Element::text`], but `None` when the element holds no visible text.
  pub fn non_empty_text(&self) -> Option<String> {
    let text = self.text();
    (!text.is_empty()).then_some(text)
  }

  /// Appends every text run below this element to `raw`.
  fn collect_text(&self, raw: &mut String) {
    for node in &self.children {
      match node {
        Node::Text(text) => raw.push_str(text),
        Node::Element(element) => element.collect_text(raw),
      }
    }
  }
}

/// Reads a complete XML document into an [`Element`] tree.
///
/// The returned element is an unnamed document root whose children are the top-level nodes, so
/// [`Element::find`] on it also matches the document element itself.
///
/// # Errors
///
/// Returns [`PubfetchError::Xml`] for malformed markup (including mismatched end tags) and
/// [`PubfetchError::TruncatedDocument`] if the input ends inside an open element.
pub fn parse_document(data: &[u8]) -> Result<Element> {
  let xml = String::from_utf8_lossy(data);
  trace!("Parsing XML document: {}", xml);

  let mut reader = Reader::from_str(&xml);
  let mut stack = vec![Element::default()];

  loop {
    match reader.read_event()? {
      Event::Start(ref e) => stack.push(Element::new(local_name(e))),
      Event::Empty(ref e) => push_node(&mut stack, Node::Element(Element::new(local_name(e)))),
      Event::Text(ref e) => {
        let text = match e.unescape() {
          Ok(text) => text,
          Err(err) => {
            warn!("Keeping undecodable XML text verbatim: {err}");
            String::from_utf8_lossy(e)
          },
        };
        if !text.is_empty() {
          push_node(&mut stack, Node::Text(text.into_owned()));
        }
      },
      Event::CData(ref e) => {
        let text: Cow<str> = String::from_utf8_lossy(e);
        push_node(&mut stack, Node::Text(text.into_owned()));
      },
      Event::End(_) =>
        if stack.len() > 1 {
          if let Some(element) = stack.pop() {
            push_node(&mut stack, Node::Element(element));
          }
        },
      Event::Eof => break,
      _ => (),
    }
  }

  if let Some(open) = stack.get(1) {
    return Err(PubfetchError::TruncatedDocument(open.name.clone()));
  }
  Ok(stack.into_iter().next().unwrap_or_default())
}

/// Extracts identifiers from an `esearch` XML response.
///
/// # Errors
///
/// Returns [`PubfetchError::ApiError`] if the result carries an `<ERROR>` element and
/// [`PubfetchError::MissingElement`] if the document is not an `<eSearchResult>`.
pub fn parse_search_ids(data: &[u8]) -> Result<Vec<String>> {
  let document = parse_document(data)?;
  let result =
    document.find("eSearchResult").ok_or(PubfetchError::MissingElement("eSearchResult"))?;

  if let Some(error) = result.child("ERROR") {
    return Err(PubfetchError::ApiError(error.text()));
  }
  if let Some(errors) = result.child("ErrorList") {
    warn!("Search reported: {}", errors.text());
  }
  if let Some(count) = result.child("Count") {
    debug!("Search matched {} records in total", count.text());
  }

  Ok(
    result
      .child("IdList")
      .map(|list| {
        list
          .elements()
          .filter(|element| element.name == "Id")
          .filter_map(Element::non_empty_text)
          .collect()
      })
      .unwrap_or_default(),
  )
}

/// Local tag name of a start or empty tag.
fn local_name(e: &BytesStart) -> String {
  String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Attaches a node to the innermost open element.
fn push_node(stack: &mut [Element], node: Node) {
  if let Some(parent) = stack.last_mut() {
    parent.children.push(node);
  }
}
