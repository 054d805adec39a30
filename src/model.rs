use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Placeholder strings shown when optional content is missing. Shared by the
/// preview, PDF and DOCX backends so degraded output cannot drift between them.
pub mod placeholder {
    pub const TITLE: &str = "Título sem texto";
    pub const PARAGRAPH: &str = "Parágrafo vazio";
    pub const QUOTE: &str = "Citação vazia";
    pub const ABSTRACT: &str = "Resumo vazio";
    pub const IMAGE_ALT: &str = "Imagem do documento";

    pub fn list_item(index: usize) -> String {
        format!("Item {}", index + 1)
    }

    pub fn reference(index: usize) -> String {
        format!("Referência {}", index + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Cover,
    Title,
    Paragraph,
    Quote,
    Image,
    List,
    OrderedList,
    Table,
    Footnote,
    Abstract,
    Keywords,
    References,
    Toc,
    PageBreak,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Rows padded or truncated to the header count. External mutation bugs can
    /// produce ragged rows; renderers consume this accessor instead of `rows`
    /// so they always see a rectangular grid.
    pub fn rectangular_rows(&self) -> Vec<Vec<&str>> {
        let ncols = self.headers.len();
        self.rows
            .iter()
            .map(|row| {
                (0..ncols)
                    .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                    .collect()
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverData {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub city: String,
    /// 4-digit year, kept as a string (it is display text, not arithmetic).
    #[serde(default)]
    pub year: String,
}

impl CoverData {
    /// Authors in display order: locale-aware, case- and accent-insensitive.
    /// The stored order is never touched; every backend sorts independently
    /// through this accessor.
    pub fn sorted_authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = self
            .authors
            .iter()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
            .collect();
        authors.sort_by_key(|a| collation_key(a));
        authors
    }
}

/// Case- and accent-insensitive sort key: NFD, combining marks stripped,
/// lowercased. Matches pt-BR base-sensitivity collation for the names that
/// actually occur on cover pages.
fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One document unit. `body` carries only the fields meaningful for the
/// block's kind; the JSON wire format keeps `id` and the `type` tag at the
/// top level of each object, camelCase field names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(flatten)]
    pub body: BlockBody,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockBody {
    #[serde(rename_all = "camelCase")]
    Cover {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cover_data: Option<CoverData>,
    },
    #[serde(rename_all = "camelCase")]
    Title {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
    },
    #[serde(rename_all = "camelCase")]
    Paragraph {
        #[serde(default)]
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    Quote {
        #[serde(default)]
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        /// Percent of the text width, 100 when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_width: Option<f32>,
    },
    #[serde(rename_all = "camelCase")]
    List {
        #[serde(default)]
        list_items: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    OrderedList {
        #[serde(default)]
        list_items: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_data: Option<TableData>,
    },
    #[serde(rename_all = "camelCase")]
    Footnote {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        footnote_number: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Abstract {
        #[serde(default)]
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    Keywords {
        #[serde(default)]
        keywords: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    References {
        #[serde(default)]
        references: Vec<String>,
    },
    Toc {},
    PageBreak {},
}

impl BlockBody {
    pub fn kind(&self) -> Kind {
        match self {
            BlockBody::Cover { .. } => Kind::Cover,
            BlockBody::Title { .. } => Kind::Title,
            BlockBody::Paragraph { .. } => Kind::Paragraph,
            BlockBody::Quote { .. } => Kind::Quote,
            BlockBody::Image { .. } => Kind::Image,
            BlockBody::List { .. } => Kind::List,
            BlockBody::OrderedList { .. } => Kind::OrderedList,
            BlockBody::Table { .. } => Kind::Table,
            BlockBody::Footnote { .. } => Kind::Footnote,
            BlockBody::Abstract { .. } => Kind::Abstract,
            BlockBody::Keywords { .. } => Kind::Keywords,
            BlockBody::References { .. } => Kind::References,
            BlockBody::Toc {} => Kind::Toc,
            BlockBody::PageBreak {} => Kind::PageBreak,
        }
    }
}

impl Block {
    pub fn kind(&self) -> Kind {
        self.body.kind()
    }

    /// Title level clamped to 1..=5. Out-of-range input is an external bug;
    /// we degrade rather than fail.
    pub fn title_level(&self) -> u8 {
        match &self.body {
            BlockBody::Title { level, .. } => level.unwrap_or(1).clamp(1, 5),
            _ => 1,
        }
    }

    /// Body text with the canonical placeholder substituted when empty.
    /// The single source of default text for every backend.
    pub fn display_content(&self) -> &str {
        let (content, fallback) = match &self.body {
            BlockBody::Title { content, .. } => (content, placeholder::TITLE),
            BlockBody::Paragraph { content } => (content, placeholder::PARAGRAPH),
            BlockBody::Quote { content } => (content, placeholder::QUOTE),
            BlockBody::Abstract { content } => (content, placeholder::ABSTRACT),
            BlockBody::Footnote { content, .. } => (content, ""),
            _ => return "",
        };
        if content.is_empty() { fallback } else { content }
    }

    /// List items with empty entries replaced by their positional placeholder.
    pub fn display_items(&self) -> Vec<String> {
        let items = match &self.body {
            BlockBody::List { list_items } | BlockBody::OrderedList { list_items } => list_items,
            _ => return Vec::new(),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if item.is_empty() {
                    placeholder::list_item(i)
                } else {
                    item.clone()
                }
            })
            .collect()
    }

    pub fn display_references(&self) -> Vec<String> {
        let BlockBody::References { references } = &self.body else {
            return Vec::new();
        };
        references
            .iter()
            .enumerate()
            .map(|(i, r)| {
                if r.is_empty() {
                    placeholder::reference(i)
                } else {
                    r.clone()
                }
            })
            .collect()
    }

    pub fn display_alt(&self) -> &str {
        match &self.body {
            BlockBody::Image { alt, .. } => alt
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(placeholder::IMAGE_ALT),
            _ => "",
        }
    }

    pub fn footnote_number(&self) -> u32 {
        match &self.body {
            BlockBody::Footnote {
                footnote_number, ..
            } => footnote_number.unwrap_or(1),
            _ => 1,
        }
    }
}
