//! Registry of the categories the article service ships with.

/// Known article categories.
///
/// The server stores the category as a free-form string; this registry
/// covers the values the service's own forms offer, for pickers and
/// normalization. Unknown strings are still valid article data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Politics,
    Sports,
    Health,
    Education,
    Fashion,
    Other,
}

impl Category {
    /// Returns all known categories.
    pub fn all() -> &'static [Category] {
        &[
            Category::Politics,
            Category::Sports,
            Category::Health,
            Category::Education,
            Category::Fashion,
            Category::Other,
        ]
    }

    /// Returns the wire value the server stores for this category.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Politics => "Politique",
            Category::Sports => "Sport",
            Category::Health => "Santé",
            Category::Education => "Éducation",
            Category::Fashion => "Mode",
            Category::Other => "Autres",
        }
    }

    /// Returns the human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Fashion => "Fashion",
            Category::Other => "Other",
        }
    }

    /// Returns the category for a wire value or label, if known.
    pub fn from_id(id: &str) -> Option<Category> {
        match id.trim().to_lowercase().as_str() {
            "politique" | "politics" => Some(Category::Politics),
            "sport" | "sports" => Some(Category::Sports),
            "santé" | "health" => Some(Category::Health),
            "éducation" | "education" => Some(Category::Education),
            "mode" | "fashion" => Some(Category::Fashion),
            "autres" | "other" => Some(Category::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: wire values round-trip through `from_id`.
    #[test]
    fn test_category_from_id() {
        for category in Category::all() {
            assert_eq!(Category::from_id(category.id()), Some(*category));
            assert_eq!(Category::from_id(category.label()), Some(*category));
        }
        assert_eq!(Category::from_id("jazz"), None);
    }
}
