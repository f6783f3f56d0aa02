//! Column schema for the raw and cleaned CSV files
//!
//! Producers of the raw file do not always agree on header spelling or case.
//! Every semantic field has a canonical header plus a static list of accepted
//! aliases; headers are resolved against that table once, when a file is
//! loaded, into a [`ColumnMap`].

/// Header of the raw dataset file, in column order
pub const RAW_COLUMNS: [&str; 9] = [
    "Title",
    "Price",
    "Availability",
    "Rating",
    "DetailURL",
    "Category",
    "UPC",
    "Description",
    "Product Type",
];

/// Header of the cleaned dataset file, in column order
pub const CLEANED_COLUMNS: [&str; 10] = [
    "Title",
    "Price",
    "PriceNum",
    "Stock",
    "Rating",
    "RatingText",
    "Category",
    "UPC",
    "Description",
    "DetailURL",
];

/// Semantic fields recognized in a raw dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Price,
    Availability,
    Rating,
    Category,
    Identifier,
    Description,
    DetailUrl,
    ProductType,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Price,
        Field::Availability,
        Field::Rating,
        Field::Category,
        Field::Identifier,
        Field::Description,
        Field::DetailUrl,
        Field::ProductType,
    ];

    /// The header this field is written under
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Availability => "Availability",
            Self::Rating => "Rating",
            Self::Category => "Category",
            Self::Identifier => "UPC",
            Self::Description => "Description",
            Self::DetailUrl => "DetailURL",
            Self::ProductType => "Product Type",
        }
    }

    /// Accepted header spellings, lowercase; the first is the canonical one
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Title => &["title", "name", "book title"],
            Self::Price => &["price", "price_text"],
            Self::Availability => &["availability", "availability_text"],
            Self::Rating => &["rating", "rating_token", "star rating"],
            Self::Category => &["category"],
            Self::Identifier => &["upc", "identifier"],
            Self::Description => &["description"],
            Self::DetailUrl => &["detailurl", "detail_url", "detail url", "url"],
            Self::ProductType => &["product type", "product_type", "producttype"],
        }
    }

    /// Returns true if `header` names this field, ignoring case and surrounding whitespace
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        self.aliases().iter().any(|alias| *alias == header)
    }

    /// Finds the field a header names, if any
    pub fn for_header(header: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|field| field.matches(header))
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Positions of each semantic field within a concrete header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; 9],
}

impl ColumnMap {
    /// Resolves a header row against the alias table
    ///
    /// Headers that match no field are ignored. When two headers name the
    /// same field, the leftmost one wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut map = Self::default();
        for (position, header) in headers.iter().enumerate() {
            if let Some(field) = Field::for_header(header.as_ref()) {
                map.positions[field.slot()].get_or_insert(position);
            }
        }
        map
    }

    /// Column index of `field`, or None when the file lacks it
    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.slot()]
    }

    pub fn contains(&self, field: Field) -> bool {
        self.position(field).is_some()
    }

    /// Fields the source file did not provide
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// Renames matched headers to their canonical names, leaving the rest untouched
    pub fn canonical_headers<S: AsRef<str>>(&self, headers: &[S]) -> Vec<String> {
        headers
            .iter()
            .enumerate()
            .map(|(position, header)| {
                Field::ALL
                    .into_iter()
                    .find(|field| self.position(*field) == Some(position))
                    .map(|field| field.canonical_name().to_string())
                    .unwrap_or_else(|| header.as_ref().to_string())
            })
            .collect()
    }
}
