//! Sermon content helpers for Steeple
//!
//! - [`books`]: the books of the Bible in canonical order, by testament
//! - [`media`]: download and file details for a sermon's video, audio, and PDF

pub mod books;
pub mod media;

pub use books::{bible_books, group_by_testament, BibleBook, BookGroups, Testament};
pub use media::{MediaFile, MediaKind, SermonData, SermonMeta, UploadsDir};
