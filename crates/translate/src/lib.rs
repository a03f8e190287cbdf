//! Shared translation types and traits.
//!
//! This crate provides the types used across all translation providers:
//! [`Lang`], the [`Error`] taxonomy, the page snapshot types, and the
//! [`Translator`] trait. Also provides [`HttpTransport`], the
//! timeout-bounded HTTP transport shared by the wire adapters.

pub use error::Error;
pub use lang::Lang;
pub use page::{Fragment, FragmentId, PageSnapshot};
pub use reqwest::{self, Client};
pub use translator::Translator;
pub use transport::HttpTransport;

mod error;
mod lang;
mod page;
mod translator;
mod transport;

/// Result alias used throughout the provider stack.
pub type Result<T> = std::result::Result<T, Error>;
