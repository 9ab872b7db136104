//! HTTP collaborators for article-sync
//!
//! Concrete implementations of the core's collaborator seams: a microCMS
//! content source and a Qiita publisher. Transport failures surface as
//! the core's source/publish errors; the runner decides what is fatal.

pub mod microcms;
pub mod qiita;

pub use microcms::MicroCmsClient;
pub use qiita::QiitaClient;
