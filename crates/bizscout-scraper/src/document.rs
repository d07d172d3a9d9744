//! Static-document field extraction.
//!
//! Walks the fetched listing HTML with the CSS half of a [`LocatorSet`] and
//! produces one raw candidate per field. Misses are logged and returned as
//! `None`; only a missing business id is fatal.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::locators::LocatorSet;
use crate::parse_helpers::{
    capture_business_id, pair_schedule, phone_from_label_group, split_location,
};
use crate::types::{Location, PageCandidates, Schedule};

/// Compiled selectors for one [`LocatorSet`].
pub struct DocumentExtractor {
    locators: LocatorSet,
    link_href: Selector,
    title: Selector,
    image: Selector,
    label_paragraph: Selector,
    website_link: Selector,
    address_line: Selector,
    rating: Selector,
    reviews_paragraph: Selector,
    category_edit_anchor: Selector,
    schedule_header_cell: Selector,
    schedule_cell_text: Selector,
}

fn compile(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidLocator {
        locator: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Trimmed, non-empty text nodes that are direct children of `el`.
fn own_texts(el: ElementRef<'_>) -> impl Iterator<Item = String> + '_ {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| {
            let s: &str = &text.text;
            s.trim().to_owned()
        })
        .filter(|s| !s.is_empty())
}

fn first_own_text(el: ElementRef<'_>) -> Option<String> {
    own_texts(el).next()
}

fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

fn child_elements<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

impl DocumentExtractor {
    /// Compiles every CSS locator in `locators`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidLocator`] if a selector does not parse.
    pub fn new(locators: LocatorSet) -> Result<Self, ScraperError> {
        Ok(Self {
            locators,
            link_href: compile(locators.link_href)?,
            title: compile(locators.title)?,
            image: compile(locators.image)?,
            label_paragraph: compile(locators.label_paragraph)?,
            website_link: compile(locators.website_link)?,
            address_line: compile(locators.address_line)?,
            rating: compile(locators.rating)?,
            reviews_paragraph: compile(locators.reviews_paragraph)?,
            category_edit_anchor: compile(locators.category_edit_anchor)?,
            schedule_header_cell: compile(locators.schedule_header_cell)?,
            schedule_cell_text: compile(locators.schedule_cell_text)?,
        })
    }

    /// Parses `html` and extracts every document-backed field.
    ///
    /// `page_url` is the URL the document was fetched from and becomes the
    /// record URL verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ExtractionFailed`] when the page carries no
    /// `/biz/<id>?` link. All other misses resolve to `None`.
    pub fn extract(&self, page_url: &str, html: &str) -> Result<PageCandidates, ScraperError> {
        let doc = Html::parse_document(html);

        let id = self.parse_id(&doc)?;
        tracing::debug!(page_url, business_id = %id, "extracted business id");

        Ok(PageCandidates {
            id,
            url: page_url.to_owned(),
            title: self.parse_title(&doc),
            image_url: self.parse_image_url(&doc),
            phone: self.parse_phone(&doc),
            website: self.parse_website(&doc),
            location: self.parse_location(&doc),
            rating: self.parse_rating(&doc),
            reviews: self.parse_reviews(&doc),
            categories: self.parse_categories(&doc),
            schedule: self.parse_schedule(&doc),
        })
    }

    /// Id captured from the first `/biz/<id>?` link in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ExtractionFailed`] when no link matches.
    pub fn parse_id(&self, doc: &Html) -> Result<String, ScraperError> {
        doc.select(&self.link_href)
            .filter_map(|el| el.value().attr("href"))
            .find_map(capture_business_id)
            .ok_or_else(|| {
                tracing::warn!("current markup does not allow extracting the business id");
                ScraperError::ExtractionFailed {
                    what: "no /biz/<id>? link found on the page".to_owned(),
                }
            })
    }

    fn parse_title(&self, doc: &Html) -> Option<String> {
        let title = doc.select(&self.title).find_map(first_own_text);
        if title.is_none() {
            tracing::debug!(field = "title", "structural miss");
        }
        title
    }

    fn parse_image_url(&self, doc: &Html) -> Option<String> {
        doc.select(&self.image)
            .find_map(|el| el.value().attr("src"))
            .map(str::to_owned)
    }

    /// Parent of the first paragraph whose full text equals `label`.
    fn label_group<'a>(&self, doc: &'a Html, label: &str) -> Option<ElementRef<'a>> {
        doc.select(&self.label_paragraph)
            .find(|p| full_text(*p) == label)
            .and_then(parent_element)
    }

    fn parse_phone(&self, doc: &Html) -> Option<String> {
        let texts: Vec<String> = self
            .label_group(doc, self.locators.phone_label)
            .map(|group| group.select(&self.label_paragraph).flat_map(own_texts).collect())
            .unwrap_or_default();
        let phone = phone_from_label_group(&texts);
        if phone.is_none() {
            tracing::warn!(
                field = "phone",
                found = texts.len(),
                "phone number not found next to its label"
            );
        }
        phone
    }

    fn parse_website(&self, doc: &Html) -> Option<String> {
        self.label_group(doc, self.locators.website_label)?
            .select(&self.website_link)
            .find_map(|a| a.value().attr("href"))
            .map(str::to_owned)
    }

    fn parse_location(&self, doc: &Html) -> Option<Location> {
        let lines: Vec<String> = doc.select(&self.address_line).flat_map(own_texts).collect();
        let location = split_location(&lines);
        if location.is_none() {
            tracing::warn!(
                field = "location",
                ?lines,
                "address block does not end in \"City, ST ZIP\""
            );
        }
        location
    }

    fn parse_rating(&self, doc: &Html) -> Option<String> {
        doc.select(&self.rating)
            .find_map(|el| el.value().attr("aria-label"))
            .map(str::to_owned)
    }

    fn parse_reviews(&self, doc: &Html) -> Option<String> {
        doc.select(&self.reviews_paragraph)
            .filter_map(first_own_text)
            .find(|text| text.contains(self.locators.reviews_marker))
    }

    /// Anchor texts at `span > span > a` beside the category "Edit" link.
    fn parse_categories(&self, doc: &Html) -> Option<Vec<String>> {
        let edit_text = self.locators.category_edit_text;
        let categories: Vec<String> = doc
            .select(&self.category_edit_anchor)
            .filter(|a| first_own_text(*a).is_some_and(|t| t.contains(edit_text)))
            .filter_map(parent_element)
            .flat_map(|parent| child_elements(parent, "span"))
            .flat_map(|outer| child_elements(outer, "span"))
            .flat_map(|inner| child_elements(inner, "a"))
            .flat_map(own_texts)
            .collect();

        if categories.is_empty() {
            tracing::debug!(field = "categories", "structural miss");
            None
        } else {
            Some(categories)
        }
    }

    /// Paragraph texts of every row in the table body whose header names the first day.
    fn parse_schedule(&self, doc: &Html) -> Option<Schedule> {
        let first_day = self.locators.schedule_first_day;
        let tokens: Vec<String> = doc
            .select(&self.schedule_header_cell)
            .find(|p| first_own_text(*p).is_some_and(|t| t.contains(first_day)))
            .and_then(parent_element) // th
            .and_then(parent_element) // tr
            .and_then(parent_element) // tbody
            .map(|body| {
                child_elements(body, "tr")
                    .flat_map(|row| row.select(&self.schedule_cell_text))
                    .flat_map(own_texts)
                    .collect()
            })
            .unwrap_or_default();

        let schedule = pair_schedule(&tokens);
        if schedule.is_none() {
            tracing::warn!(
                field = "schedule",
                found = tokens.len(),
                "opening-hours table has fewer than 14 cells"
            );
        }
        schedule
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
