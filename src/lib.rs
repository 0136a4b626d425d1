//! Content dashboard client for the studio marketing site.
//!
//! | Module      | Role                                                     |
//! |-------------|----------------------------------------------------------|
//! | `api`       | `Backend` trait, reqwest client, wire types              |
//! | `config`    | Environment-driven client configuration                  |
//! | `error`     | Error enums with stable codes                            |
//! | `forms`     | Card (drag-and-drop tag), feedback, and homepage forms   |
//! | `notice`    | User-facing success/error messages                       |
//! | `portfolio` | Cards joined with tag names                              |
//! | `session`   | Operator login state and its persistence                 |
//!
//! Tag selection itself lives in the `dnd` crate.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod notice;
pub mod portfolio;
pub mod session;
