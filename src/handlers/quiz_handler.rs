use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{QuizTextQuery, QuizTextRequest},
        response::QuizResponse,
    },
};

#[post("/generate/quiz/")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizTextRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state.quiz_service.generate_quiz(&request.text).await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}

/// Query-parameter variant of the quiz endpoint.
#[get("/generate/quiz/")]
pub async fn generate_quiz_by_query(
    state: web::Data<AppState>,
    query: web::Query<QuizTextQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let quiz = state.quiz_service.generate_quiz(&query.text).await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}
