//! Affiliation classification.
//!
//! Classification is a two-tier keyword match over free text, not entity recognition. Company
//! keywords are checked first, so an affiliation such as "University Medical Center Inc." counts
//! as a company. Keywords match as case-insensitive substrings anywhere in the text, which means
//! short keywords like `inc` also fire inside longer words. Both effects are accepted. Academic
//! acronyms such as `MIT` are the exception: they match only as whole words with exact case, so
//! a bare "MIT" affiliation is academic while "Smith Lab" is not.
//!
//! # Examples
//!
//! ```
//! use pubfetch::{AffiliationKind, Classifier, KeywordConfig};
//!
//! let classifier = Classifier::new(&KeywordConfig::default()).unwrap();
//! assert_eq!(classifier.affiliation_kind("Acme PHARMA GmbH"), AffiliationKind::Company);
//! assert_eq!(classifier.affiliation_kind("Harvard University"), AffiliationKind::Academic);
//! assert_eq!(classifier.affiliation_kind("MIT"), AffiliationKind::Academic);
//! assert_eq!(classifier.affiliation_kind("Mayo Clinic"), AffiliationKind::NonAcademic);
//! ```

use super::*;

/// Outcome of classifying one affiliation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationKind {
  /// Matched a company keyword
  Company,
  /// Matched an academic keyword and no company keyword
  Academic,
  /// Matched neither keyword set
  NonAcademic,
}

/// Compiled keyword sets.
#[derive(Debug, Clone)]
pub struct Classifier {
  /// Alternation of the company keywords, `None` when the set is empty
  company:  Option<Regex>,
  /// Alternation of the academic keywords, `None` when the set is empty
  academic: Option<Regex>,
  /// Whole-word alternation of the academic acronyms, `None` when the set is empty
  acronyms: Option<Regex>,
}

impl Classifier {
  /// Compiles the keyword sets into case-insensitive matchers.
  ///
  /// Keywords are matched literally; blank keywords are skipped.
  pub fn new(keywords: &KeywordConfig) -> Result<Self> {
    Ok(Self {
      company:  keyword_matcher(&keywords.company)?,
      academic: keyword_matcher(&keywords.academic)?,
      acronyms: acronym_matcher(&keywords.academic_acronyms)?,
    })
  }

  /// Classifies one affiliation text, giving company keywords priority.
  pub fn affiliation_kind(&self, affiliation: &str) -> AffiliationKind {
    if matches_any(self.company.as_ref(), affiliation) {
      AffiliationKind::Company
    } else if matches_any(self.academic.as_ref(), affiliation)
      || matches_any(self.acronyms.as_ref(), affiliation)
    {
      AffiliationKind::Academic
    } else {
      AffiliationKind::NonAcademic
    }
  }

  /// Builds a [`Record`] from one `<PubmedArticle>` entry.
  ///
  /// Authors are visited in document order. Authors with no affiliation are skipped entirely;
  /// for the rest the affiliation decides which list, if any, they land in, and any email they
  /// carry replaces the one seen so far.
  ///
  /// # Errors
  ///
  /// Returns [`PubfetchError::MissingElement`] if the entry has no `<PMID>`.
  pub fn classify(&self, article: &Element) -> Result<Record> {
    let identifier = article
      .find("PMID")
      .and_then(Element::non_empty_text)
      .ok_or(PubfetchError::MissingElement("PMID"))?;

    let title = article
      .find("ArticleTitle")
      .and_then(Element::non_empty_text)
      .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let publication_year = article
      .find("PubDate")
      .and_then(publication_year)
      .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut non_academic_authors = Vec::new();
    let mut company_affiliations = Vec::new();
    let mut corresponding_email = NOT_AVAILABLE.to_string();

    for author in article.find_all("Author").into_iter().map(Author::from_element) {
      let Some(affiliation) = author.affiliation else {
        trace!("PMID {identifier}: skipping unaffiliated author {}", author.name);
        continue;
      };

      match self.affiliation_kind(&affiliation) {
        AffiliationKind::Company => company_affiliations.push(affiliation),
        AffiliationKind::NonAcademic => non_academic_authors.push(author.name),
        AffiliationKind::Academic => (),
      }

      if let Some(email) = author.email {
        corresponding_email = email;
      }
    }

    debug!(
      "PMID {identifier}: {} company affiliations, {} non-academic authors",
      company_affiliations.len(),
      non_academic_authors.len()
    );

    Ok(Record {
      identifier,
      title,
      publication_year,
      non_academic_authors,
      company_affiliations,
      corresponding_email,
    })
  }
}

/// Year of a `<PubDate>`: its `<Year>`, else the first year inside `<MedlineDate>`.
fn publication_year(pub_date: &Element) -> Option<String> {
  lazy_static! {
    /// First plausible four digit year.
    static ref YEAR: Regex = Regex::new(r"\b(1[89]|20)\d{2}\b").expect("year pattern is valid");
  }

  pub_date.child("Year").and_then(Element::non_empty_text).or_else(|| {
    pub_date
      .child("MedlineDate")
      .and_then(Element::non_empty_text)
      .and_then(|text| YEAR.find(&text).map(|m| m.as_str().to_string()))
  })
}

/// Compiles a keyword list into one case-insensitive literal alternation.
fn keyword_matcher(keywords: &[String]) -> Result<Option<Regex>> {
  let Some(alternatives) = alternation(keywords) else {
    warn!("Empty keyword set, it will never match");
    return Ok(None);
  };
  Ok(Some(RegexBuilder::new(&alternatives).case_insensitive(true).build()?))
}

/// Compiles an acronym list into one case-sensitive whole-word alternation.
fn acronym_matcher(acronyms: &[String]) -> Result<Option<Regex>> {
  match alternation(acronyms) {
    Some(alternatives) => Ok(Some(Regex::new(&format!(r"\b(?:{alternatives})\b"))?)),
    None => Ok(None),
  }
}

/// Escaped `a|b|c` pattern of the non-blank entries, `None` if there are none.
fn alternation(words: &[String]) -> Option<String> {
  let alternatives: Vec<String> = words
    .iter()
    .map(|word| word.trim())
    .filter(|word| !word.is_empty())
    .map(regex::escape)
    .collect();
  (!alternatives.is_empty()).then(|| alternatives.join("|"))
}

/// Whether an optional matcher fires on `text`.
fn matches_any(matcher: Option<&Regex>, text: &str) -> bool {
  matcher.is_some_and(|re| re.is_match(text))
}
