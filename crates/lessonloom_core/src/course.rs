//! Course entity.

use crate::Page;
use serde::{Deserialize, Serialize};

/// A chapter of pages plus the teacher's framing.
///
/// The roadmap is produced once from every page image and the context; no
/// other stage reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    /// Course identifier
    pub id: String,
    /// Course title
    pub title: String,
    /// Teacher-supplied context (grade level, goals, emphasis)
    pub context: String,
    /// Chapter-level teaching roadmap
    pub roadmap: String,
    /// Set by the operator once the roadmap is accepted
    pub is_confirmed: bool,
    /// Pages, in ingestion order
    pub pages: Vec<Page>,
}

impl Course {
    /// Pages sorted by page number, ties kept in ingestion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lessonloom_core::{AssetId, Course, Page};
    ///
    /// let course = Course {
    ///     pages: vec![
    ///         Page::new("b", 2, AssetId::from("b.png")),
    ///         Page::new("a", 1, AssetId::from("a.png")),
    ///     ],
    ///     ..Default::default()
    /// };
    /// let ids: Vec<_> = course.pages_in_order().iter().map(|p| p.id.as_str()).collect();
    /// assert_eq!(ids, ["a", "b"]);
    /// ```
    pub fn pages_in_order(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().collect();
        pages.sort_by_key(|page| page.page_number);
        pages
    }
}
