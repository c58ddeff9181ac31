pub mod health_handler;
pub mod quiz_handler;
pub mod summary_handler;

pub use health_handler::health_check;
pub use quiz_handler::{generate_quiz, generate_quiz_by_query};
pub use summary_handler::{
    generate_summary_pdf, generate_summary_youtube, generate_summary_youtube_by_query,
};
