//! # Wayfinder Extract
//!
//! Binds request data to declared handler parameters.
//!
//! | Parameter type | Source |
//! |----------------|--------|
//! | `Context` | The request context, injected as-is |
//! | `QueryMap` | Every query parameter; repeated keys become lists |
//! | any other | Path capture, then bound query key, then query by name |
//!
//! Raw strings are converted with [`convert`]. A value that does not convert
//! binds as null under [`ConversionPolicy::Lenient`] and fails with an
//! [`ExtractionError`] under [`ConversionPolicy::Strict`].

#![doc(html_root_url = "https://docs.rs/wayfinder-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod convert;
mod error;

pub use binder::ArgumentBinder;
pub use convert::{convert, ConversionError, ConversionPolicy};
pub use error::{ExtractionError, ExtractionSource};
