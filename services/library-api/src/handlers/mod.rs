//! HTTP handlers

mod catalog;
mod health;
mod users;

pub use catalog::{
    add_book, all_authors, all_books, count_authors, count_books, edit_author, find_author,
    find_book,
};
pub use health::health;
pub use users::{create_user, login, me};
