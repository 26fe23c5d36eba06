use bookshelf_data::Entity;
use garde::Validate;
use serde::{Deserialize, Serialize};

/// A book record. `id` is absent until the store assigns one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(length(min = 1))]
    pub author: String,
    #[garde(skip)]
    #[serde(default)]
    pub publication_year: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub isbn: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            publication_year: None,
            isbn: None,
        }
    }

    pub fn publication_year(mut self, year: impl Into<String>) -> Self {
        self.publication_year = Some(year.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }
}

impl Entity for Book {
    type Id = i64;

    fn table_name() -> &'static str {
        "books"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "author", "publication_year", "isbn"]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Book { id: Some(id), ..self }
    }

    fn without_id(self) -> Self {
        Book { id: None, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_omits_missing_id() {
        let book = Book::new("Dune", "Herbert").publication_year("1965");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["publicationYear"], "1965");
        assert!(json.get("id").is_none());
        assert!(json["isbn"].is_null());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let book: Book = serde_json::from_str(r#"{"title":"Emma","author":"Austen"}"#).unwrap();
        assert_eq!(book, Book::new("Emma", "Austen"));
    }

    #[test]
    fn rejects_empty_title() {
        let report = Book::new("", "Herbert").validate().unwrap_err();
        assert!(report.iter().any(|(path, _)| path.to_string() == "title"));
    }

    #[test]
    fn select_clause_lists_every_column() {
        assert_eq!(
            Book::select_clause(),
            "SELECT id, title, author, publication_year, isbn FROM books"
        );
    }
}
