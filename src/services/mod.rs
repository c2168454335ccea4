pub mod result_writer;
pub mod split_service;
pub mod warn_writer;

pub use result_writer::ResultWriter;
pub use split_service::{SplitRequest, SplitResponse, SplitService};
pub use warn_writer::WarnWriter;
