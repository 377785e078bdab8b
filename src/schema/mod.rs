//! Attribute schema module
//!
//! Every resource type declares the attributes it understands and how each
//! one behaves: whether the caller must supply it, whether the server
//! assigns it, whether it is a secret. The schema is the single place the
//! loosely-typed desired state handed over by a host is checked before a
//! reconciler sees it.
//!
//! # Features
//!
//! - **Attribute kinds**: Required, Optional, OptionalComputed, Computed
//! - **Boundary validation**: Unknown attributes, wrong types and missing required values are rejected
//! - **Defaults**: Optional attributes with a declared default are filled in
//! - **Computed stripping**: Server-assigned attributes are ignored on input

mod types;
mod validate;

pub use types::{Attribute, AttributeKind, ResourceSchema};

#[cfg(test)]
mod tests;
