use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{YoutubeLinkQuery, YoutubeLinkRequest},
        response::SummaryResponse,
    },
};

/// Collects the bytes of the `pdf_file` field from a multipart upload.
async fn read_pdf_upload(payload: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != "pdf_file" {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("invalid multipart payload: {e}")))?
        {
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(AppError::ValidationError(
        "upload must include a 'pdf_file' field".to_string(),
    ))
}

#[post("/generate/summary/pdf")]
pub async fn generate_summary_pdf(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let pdf_bytes = read_pdf_upload(&mut payload).await?;
    if pdf_bytes.is_empty() {
        return Err(AppError::ValidationError(
            "'pdf_file' field contained no data".to_string(),
        ));
    }

    let text = state.pdf_extractor.extract_text(&pdf_bytes).await?;
    let summary = state.summary_service.create_summary(&text).await?;
    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}

#[post("/generate/summary/youtube")]
pub async fn generate_summary_youtube(
    state: web::Data<AppState>,
    request: web::Json<YoutubeLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    summarize_link(&state, &request.link).await
}

/// Query-parameter variant of the youtube summary endpoint.
#[get("/generate/summary/youtube")]
pub async fn generate_summary_youtube_by_query(
    state: web::Data<AppState>,
    query: web::Query<YoutubeLinkQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    summarize_link(&state, &query.youtube_link).await
}

async fn summarize_link(state: &AppState, link: &str) -> Result<HttpResponse, AppError> {
    let text = state.transcript_extractor.extract_transcript(link).await?;
    let summary = state.summary_service.create_summary(&text).await?;
    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}
