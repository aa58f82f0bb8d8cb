pub mod bulk_writer;
pub mod game_handle;
pub mod streaming_writer;
pub mod traits;

pub use bulk_writer::BulkTranscriptWriter;
pub use game_handle::GameHandle;
pub use streaming_writer::StreamingTranscriptWriter;
pub use traits::TranscriptWriter;
