//! Doc Engine - Document byte handling for the filing pipeline
//!
//! Everything that touches raw attachment bytes lives here:
//! - `extract` - Pull plain text out of PDF, DOCX and TXT payloads
//! - `image` - Re-encode photographs into base64 data URIs
//! - `filing` - Render a drafted filing into a DOCX file on disk
//!
//! # Architecture
//!
//! The crate is a set of pure-ish functions over byte slices plus one
//! filesystem sink (`filing::render`). Routing between extraction
//! strategies is total over [`domain::DocumentKind`]; unsupported kinds
//! are rejected by the caller before the bytes ever reach this crate,
//! and defensively rejected here as well.
//!
//! # Example
//!
//! ```ignore
//! use doc_engine::{extract_text, FilingConfig};
//! use domain::DocumentKind;
//!
//! let text = extract_text(DocumentKind::PlainText, b"hello")?;
//! assert_eq!(text, "hello");
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod filing;
pub mod image;

pub use config::FilingConfig;
pub use error::DocumentError;
pub use extract::extract_text;
pub use filing::render_filing;
pub use image::to_data_uri;
