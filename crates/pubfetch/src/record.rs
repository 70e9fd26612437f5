//! Normalized output records and the author entries they are built from.

use super::*;

/// Separator used when a list field is flattened into one CSV cell.
pub const LIST_DELIMITER: &str = "; ";

/// Column header of the CSV export, in field order.
pub const CSV_HEADER: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-Academic Authors",
  "Company Affiliations",
  "Corresponding Author Email",
];

lazy_static! {
  /// Loose address matcher for emails embedded in affiliation text.
  static ref EMAIL: Regex =
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
      .expect("email pattern is valid");
}

/// One classified article.
///
/// Scalar fields always hold real data or [`NOT_AVAILABLE`]. The list fields may be empty, in
/// which case they export as [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  /// PubMed identifier (PMID)
  pub identifier:           String,
  /// Article title
  pub title:                String,
  /// Publication year
  pub publication_year:     String,
  /// Display names of authors whose affiliation is neither academic nor a company
  pub non_academic_authors: Vec<String>,
  /// Affiliation texts that matched a company keyword
  pub company_affiliations: Vec<String>,
  /// Email of the last affiliated author that has one
  pub corresponding_email:  String,
}

/// Author information parsed from an `<Author>` entry.
///
/// # Examples
///
/// ```
/// use pubfetch::Author;
///
/// let author = Author {
///   name:        "Ada Lovelace".to_string(),
///   affiliation: Some("Analytical Engines Ltd, London".to_string()),
///   email:       None,
/// };
/// assert!(author.affiliation.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  /// Display name, or [`NOT_AVAILABLE`]
  pub name:        String,
  /// Text of the first affiliation, if any
  pub affiliation: Option<String>,
  /// Contact email, if any
  pub email:       Option<String>,
}

impl Record {
  /// The six CSV cells for this record, in [`CSV_HEADER`] order.
  pub fn to_row(&self) -> [String; 6] {
    [
      or_placeholder(&self.identifier),
      or_placeholder(&self.title),
      or_placeholder(&self.publication_year),
      join_or_placeholder(&self.non_academic_authors),
      join_or_placeholder(&self.company_affiliations),
      or_placeholder(&self.corresponding_email),
    ]
  }
}

impl Author {
  /// Reads name, affiliation and email from an `<Author>` element.
  ///
  /// The name is `ForeName LastName`, the last name alone, or the `CollectiveName` of a group
  /// author. The email is taken from `<ElectronicAddress>` when present, otherwise from the first
  /// address written into the affiliation text.
  pub fn from_element(author: &Element) -> Self {
    let last = author.child("LastName").and_then(Element::non_empty_text);
    let fore = author.child("ForeName").and_then(Element::non_empty_text);
    let name = match (fore, last) {
      (Some(fore), Some(last)) => format!("{fore} {last}"),
      (None, Some(last)) => last,
      (Some(fore), None) => fore,
      (None, None) => author
        .child("CollectiveName")
        .and_then(Element::non_empty_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    };

    let affiliation = author.find("Affiliation").and_then(Element::non_empty_text);
    let email = author
      .find("ElectronicAddress")
      .and_then(Element::non_empty_text)
      .or_else(|| affiliation.as_deref().and_then(extract_email));

    Self { name, affiliation, email }
  }
}

/// First email address found in free text.
pub fn extract_email(text: &str) -> Option<String> {
  EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// Substitutes [`NOT_AVAILABLE`] for blank values.
fn or_placeholder(value: &str) -> String {
  if value.trim().is_empty() {
    NOT_AVAILABLE.to_string()
  } else {
    value.to_string()
  }
}

/// Flattens a list field into one cell.
fn join_or_placeholder(values: &[String]) -> String {
  if values.is_empty() {
    NOT_AVAILABLE.to_string()
  } else {
    values.join(LIST_DELIMITER)
  }
}
