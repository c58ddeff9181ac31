pub mod pdf;
pub mod youtube;

pub use pdf::{PdfExtractConverter, PdfExtractor, PdfTextConverter};
pub use youtube::{
    video_id_from_url, CaptionLine, HttpTranscriptFetcher, TranscriptExtractor, TranscriptFetcher,
};
