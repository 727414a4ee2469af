//! Layer effects driven by the alpha channel.
//!
//! Unlike filters, layer effects use the alpha channel as a silhouette and
//! paint around it rather than recoloring existing pixels. They are applied
//! at render time and never become part of the filter history.

pub mod stroke;
