// src/output/render.rs
use super::types::OutputFormat;
use crate::error::AppError;
use crate::types::Page;
use serde::Serialize;

#[derive(Serialize)]
struct Listing<'a> {
    root: &'a Page,
    count: usize,
    pages: &'a [Page],
}

/// Renders the pages collected under `root`.
///
/// Pages are emitted in traversal order and duplicates are kept, matching
/// what the traversal returned.
pub fn render_pages(root: &Page, pages: &[Page], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for page in pages {
                out.push_str(page.title().as_str());
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let listing = Listing {
                root,
                count: pages.len(),
                pages,
            };
            let mut out = serde_json::to_string_pretty(&listing)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NamespaceId, Title};
    use pretty_assertions::assert_eq;

    fn pages() -> Vec<Page> {
        vec![
            Page::new(Title::new("P1").unwrap(), Some(11), NamespaceId::MAIN),
            Page::new(Title::new("P2").unwrap(), None, NamespaceId::MAIN),
            Page::new(Title::new("P1").unwrap(), Some(11), NamespaceId::MAIN),
        ]
    }

    #[test]
    fn text_lists_one_title_per_line() {
        let root = Page::category("A").unwrap();
        let out = render_pages(&root, &pages(), OutputFormat::Text).unwrap();
        assert_eq!(out, "P1\nP2\nP1\n");
    }

    #[test]
    fn text_of_empty_listing_is_empty() {
        let root = Page::category("A").unwrap();
        assert_eq!(render_pages(&root, &[], OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn json_listing() {
        let root = Page::category("A").unwrap();
        let out = render_pages(&root, &pages()[..2], OutputFormat::Json).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r#"
        {
          "root": {
            "title": "Category:A",
            "namespace": 14
          },
          "count": 2,
          "pages": [
            {
              "title": "P1",
              "page_id": 11,
              "namespace": 0
            },
            {
              "title": "P2",
              "namespace": 0
            }
          ]
        }
        "#);
    }
}
