use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{
    ApplicationsResponse, CreateApplicationRequest, UpdateApplicationStatusRequest,
};

use crate::database::applications as applications_db;
use crate::database::jobs as jobs_db;
use crate::database::AsyncDbConnection;

#[derive(Deserialize)]
pub struct ListApplicationsQuery {
    job_id: Option<i64>,
    candidate_uid: Option<String>,
}

pub async fn create_application(
    db_conn: web::Data<AsyncDbConnection>,
    request: web::Json<CreateApplicationRequest>,
) -> ActixResult<HttpResponse> {
    // Applying to a missing or closed posting is a client error
    let job = jobs_db::get_job(db_conn.as_ref().clone(), request.job_id)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    if !job.is_active {
        return Err(actix_web::error::ErrorBadRequest(
            "This role is no longer open for applications",
        ));
    }

    let application = applications_db::insert_application(db_conn.as_ref().clone(), &request)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Created().json(application))
}

pub async fn list_applications(
    db_conn: web::Data<AsyncDbConnection>,
    query: web::Query<ListApplicationsQuery>,
) -> ActixResult<HttpResponse> {
    let applications = applications_db::list_applications(
        db_conn.as_ref().clone(),
        query.job_id,
        query.candidate_uid.as_deref(),
    )
    .await
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApplicationsResponse { applications }))
}

pub async fn update_application_status(
    db_conn: web::Data<AsyncDbConnection>,
    path: web::Path<i64>,
    request: web::Json<UpdateApplicationStatusRequest>,
) -> ActixResult<HttpResponse> {
    let application_id = path.into_inner();

    let application = applications_db::update_application_status(
        db_conn.as_ref().clone(),
        application_id,
        request.status,
    )
    .await
    .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(application))
}
