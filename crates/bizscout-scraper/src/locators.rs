//! Structural queries for every listing-page field, keyed by markup version.
//!
//! Document locators are CSS selectors evaluated against the fetched HTML.
//! Interactive locators are XPath expressions handed to the browser, which
//! evaluates them against the live (post-click) DOM.

use bizscout_core::MarkupVersion;

/// One row of selectors and label texts per markup generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorSet {
    pub version: MarkupVersion,

    /// Any element carrying an `href`; scanned for `/biz/<id>?` links.
    pub link_href: &'static str,
    pub title: &'static str,
    /// `src` holder for the hero image: an image directly inside a link.
    pub image: &'static str,
    /// Paragraphs that may carry a field label such as "Phone number".
    pub label_paragraph: &'static str,
    pub phone_label: &'static str,
    pub website_label: &'static str,
    /// Resolved under the website label's parent.
    pub website_link: &'static str,
    pub address_line: &'static str,
    pub rating: &'static str,
    pub reviews_paragraph: &'static str,
    pub reviews_marker: &'static str,
    pub category_edit_anchor: &'static str,
    pub category_edit_text: &'static str,
    /// Header-cell paragraphs of the opening-hours table.
    pub schedule_header_cell: &'static str,
    pub schedule_first_day: &'static str,
    pub schedule_cell_text: &'static str,

    pub read_more_control: &'static str,
    pub blurb_headers: &'static str,
    pub blurb_sections: &'static str,
    pub more_attributes_control: &'static str,
    pub amenity_tags: &'static str,
}

const CURRENT: LocatorSet = LocatorSet {
    version: MarkupVersion::Current,
    link_href: "[href]",
    title: "h1",
    image: "a > img[src]",
    label_paragraph: "p",
    phone_label: "Phone number",
    website_label: "Business website",
    website_link: "p > a[href]",
    address_line: "address > p > span",
    rating: r#"div[aria-label*="rating"]"#,
    reviews_paragraph: "p",
    reviews_marker: "reviews",
    category_edit_anchor: "a",
    category_edit_text: "Edit",
    schedule_header_cell: "div > table > tbody th > p",
    schedule_first_day: "Mon",
    schedule_cell_text: "p",

    read_more_control: r#"//button/div/span[contains(text(), "Read more")]"#,
    blurb_headers: r#"//h2[contains(text(), "From the business")]/../../..//h5"#,
    blurb_sections: r#"//h2[contains(text(), "From the business")]/../..//h5/../.."#,
    more_attributes_control: r#"//p[contains(text(), "More Attributes")]"#,
    amenity_tags: r#"//h4[contains(text(), "Amenities and More")]/../../..//div//span"#,
};

const LEGACY: LocatorSet = LocatorSet {
    version: MarkupVersion::Legacy,
    rating: r#"div[role="img"][aria-label*="star rating"]"#,
    read_more_control: r#"//button/span[contains(text(), "Read more")]"#,
    blurb_headers: r#"//h4[contains(text(), "From the business")]/../../..//h5"#,
    blurb_sections: r#"//h4[contains(text(), "From the business")]/../..//h5/../.."#,
    more_attributes_control: r#"//button[contains(text(), "More Attributes")]"#,
    amenity_tags: r#"//h4[contains(text(), "Amenities")]/../../..//div//span"#,
    ..CURRENT
};

impl LocatorSet {
    #[must_use]
    pub fn for_version(version: MarkupVersion) -> Self {
        match version {
            MarkupVersion::Current => CURRENT,
            MarkupVersion::Legacy => LEGACY,
        }
    }
}

impl Default for LocatorSet {
    fn default() -> Self {
        CURRENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_version_tags_the_set_with_its_version() {
        assert_eq!(
            LocatorSet::for_version(MarkupVersion::Current).version,
            MarkupVersion::Current
        );
        assert_eq!(
            LocatorSet::for_version(MarkupVersion::Legacy).version,
            MarkupVersion::Legacy
        );
    }

    #[test]
    fn legacy_shares_document_labels_with_current() {
        let legacy = LocatorSet::for_version(MarkupVersion::Legacy);
        assert_eq!(legacy.phone_label, CURRENT.phone_label);
        assert_eq!(legacy.address_line, CURRENT.address_line);
        assert_ne!(legacy.amenity_tags, CURRENT.amenity_tags);
    }

    #[test]
    fn every_css_locator_parses() {
        for set in [CURRENT, LEGACY] {
            for css in [
                set.link_href,
                set.title,
                set.image,
                set.label_paragraph,
                set.website_link,
                set.address_line,
                set.rating,
                set.reviews_paragraph,
                set.category_edit_anchor,
                set.schedule_header_cell,
                set.schedule_cell_text,
            ] {
                assert!(
                    scraper::Selector::parse(css).is_ok(),
                    "selector {css:?} should parse"
                );
            }
        }
    }
}
