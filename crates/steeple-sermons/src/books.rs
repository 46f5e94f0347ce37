//! Books of the Bible
//!
//! Canonical order is what sermon book archives sort by; names are matched
//! case-insensitively so taxonomy terms typed by hand still line up.

use serde::Serialize;
use std::fmt;

/// Which part of the canon a book belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// Heading used when listing books by testament
    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Testament",
            Self::New => "New Testament",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// A book of the Bible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BibleBook {
    pub name: &'static str,
    pub testament: Testament,
}

const OLD_TESTAMENT: [&str; 39] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
];

const NEW_TESTAMENT: [&str; 27] = [
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Canonical list of books
#[derive(Debug, Clone, Copy, Default)]
pub struct BibleBooks;

/// The books of the Bible
pub fn bible_books() -> BibleBooks {
    BibleBooks
}

impl BibleBooks {
    pub fn old_testament(&self) -> impl Iterator<Item = BibleBook> {
        OLD_TESTAMENT.iter().map(|&name| BibleBook {
            name,
            testament: Testament::Old,
        })
    }

    pub fn new_testament(&self) -> impl Iterator<Item = BibleBook> {
        NEW_TESTAMENT.iter().map(|&name| BibleBook {
            name,
            testament: Testament::New,
        })
    }

    /// Old then New Testament, in canonical order
    pub fn all(&self) -> impl Iterator<Item = BibleBook> {
        self.old_testament().chain(self.new_testament())
    }

    pub fn len(&self) -> usize {
        OLD_TESTAMENT.len() + NEW_TESTAMENT.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up a book by name, ignoring case and surrounding whitespace
    pub fn find(&self, name: &str) -> Option<BibleBook> {
        let name = name.trim();
        self.all().find(|book| book.name.eq_ignore_ascii_case(name))
    }

    /// Zero-based position of a book in the full canon
    pub fn canonical_position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.all()
            .position(|book| book.name.eq_ignore_ascii_case(name))
    }
}

/// Book names grouped by testament, in canonical order
///
/// Names that are not books of the Bible (topical series, apocrypha, typos)
/// land in `other` in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookGroups {
    pub old: Vec<String>,
    pub new: Vec<String>,
    pub other: Vec<String>,
}

/// Group sermon book names by testament
pub fn group_by_testament<I, T>(names: I) -> BookGroups
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let books = bible_books();
    let mut known: Vec<(usize, Testament, String)> = Vec::new();
    let mut groups = BookGroups::default();

    for name in names {
        let name = name.as_ref();
        match books.find(name) {
            Some(book) => {
                let position = books.canonical_position(book.name).unwrap_or(usize::MAX);
                known.push((position, book.testament, name.to_string()));
            }
            None => groups.other.push(name.to_string()),
        }
    }

    known.sort_by_key(|(position, _, _)| *position);
    for (_, testament, name) in known {
        match testament {
            Testament::Old => groups.old.push(name),
            Testament::New => groups.new.push(name),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canon_sizes() {
        let books = bible_books();
        assert_eq!(books.old_testament().count(), 39);
        assert_eq!(books.new_testament().count(), 27);
        assert_eq!(books.all().count(), books.len());
        assert_eq!(books.len(), 66);
    }

    #[test]
    fn test_canonical_order() {
        let books = bible_books();
        let all: Vec<_> = books.all().collect();
        assert_eq!(all.first().unwrap().name, "Genesis");
        assert_eq!(all[38].name, "Malachi");
        assert_eq!(all[39].name, "Matthew");
        assert_eq!(all.last().unwrap().name, "Revelation");
    }

    #[test]
    fn test_find_ignores_case() {
        let book = bible_books().find("  song of solomon ").unwrap();
        assert_eq!(book.name, "Song of Solomon");
        assert_eq!(book.testament, Testament::Old);

        assert_eq!(bible_books().find("1 JOHN").unwrap().testament, Testament::New);
        assert_eq!(bible_books().find("Maccabees"), None);
    }

    #[test]
    fn test_canonical_position() {
        let books = bible_books();
        assert_eq!(books.canonical_position("genesis"), Some(0));
        assert_eq!(books.canonical_position("Matthew"), Some(39));
        assert_eq!(books.canonical_position("Revelation"), Some(65));
        assert_eq!(books.canonical_position("Advent Series"), None);
    }

    #[test]
    fn test_group_by_testament() {
        let groups = group_by_testament([
            "Romans",
            "Advent",
            "genesis",
            "Acts",
            "Psalms",
            "Family",
        ]);

        assert_eq!(groups.old, vec!["genesis", "Psalms"]);
        assert_eq!(groups.new, vec!["Acts", "Romans"]);
        assert_eq!(groups.other, vec!["Advent", "Family"]);
    }

    #[test]
    fn test_testament_labels() {
        assert_eq!(Testament::Old.to_string(), "old");
        assert_eq!(Testament::New.label(), "New Testament");
    }
}
