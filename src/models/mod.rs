pub mod document;
pub mod item_code;
pub mod loaders;
pub mod problem;

pub use document::{DocumentBody, SourceDocument};
pub use item_code::ItemCode;
pub use loaders::{load_all_documents, load_document, load_segmenter_options};
pub use problem::{ProblemBlock, SegmentationReport};
