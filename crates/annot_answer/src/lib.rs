pub mod annotate;
pub mod click;
pub mod fragments;
pub mod group;
pub mod linkify;
pub mod markers;
pub mod model;
pub mod render;
pub mod resolve;

pub use annotate::{annotate, annotate_request};
pub use click::CitationClickHandler;
pub use model::{AnnotateInput, AnnotateRequest, AnnotatedAnswer, AnswerNode, CitationClick};
pub use resolve::{FilePathResolver, PassthroughPaths};
