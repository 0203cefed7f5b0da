/// A book that can be downloaded and gifted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_BOOK_ID: &str = "partnership-strategy";

static BOOKS: &[Book] = &[Book {
    id: DEFAULT_BOOK_ID,
    title: "Партнёрство как стратегия",
    author: "Игорь Иванов",
    emoji: "🤝",
    description: "Как построить сеть партнёров, которая заменит платную рекламу",
}];

pub fn books() -> &'static [Book] {
    BOOKS
}

pub fn find(id: &str) -> Option<&'static Book> {
    BOOKS.iter().find(|b| b.id == id)
}

/// Unknown ids resolve to the book of the month.
pub fn find_or_default(id: &str) -> &'static Book {
    find(id).unwrap_or_else(default_book)
}

pub fn default_book() -> &'static Book {
    &BOOKS[0]
}
