use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{CreateJobRequest, JobsResponse, UpdateJobRequest};
use std::sync::Arc;

use crate::database::jobs as jobs_db;
use crate::database::AsyncDbConnection;
use crate::helpers::job_cache::JobListingCache;

#[derive(Deserialize)]
pub struct ListJobsQuery {
    active: Option<bool>,
}

pub async fn list_jobs(
    db_conn: web::Data<AsyncDbConnection>,
    query: web::Query<ListJobsQuery>,
) -> ActixResult<HttpResponse> {
    let jobs = jobs_db::list_jobs(db_conn.as_ref().clone(), query.active.unwrap_or(true))
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

pub async fn get_job(
    db_conn: web::Data<AsyncDbConnection>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let job_id = path.into_inner();

    let job = jobs_db::get_job(db_conn.as_ref().clone(), job_id)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(job))
}

pub async fn create_job(
    db_conn: web::Data<AsyncDbConnection>,
    job_cache: web::Data<Arc<JobListingCache>>,
    request: web::Json<CreateJobRequest>,
) -> ActixResult<HttpResponse> {
    let job = jobs_db::insert_job(db_conn.as_ref().clone(), &request)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    job_cache.invalidate().await;

    Ok(HttpResponse::Created().json(job))
}

pub async fn update_job(
    db_conn: web::Data<AsyncDbConnection>,
    job_cache: web::Data<Arc<JobListingCache>>,
    path: web::Path<i64>,
    request: web::Json<UpdateJobRequest>,
) -> ActixResult<HttpResponse> {
    let job_id = path.into_inner();

    let job = jobs_db::update_job(db_conn.as_ref().clone(), job_id, &request)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    job_cache.invalidate().await;

    Ok(HttpResponse::Ok().json(job))
}

pub async fn delete_job(
    db_conn: web::Data<AsyncDbConnection>,
    job_cache: web::Data<Arc<JobListingCache>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let job_id = path.into_inner();

    jobs_db::delete_job(db_conn.as_ref().clone(), job_id)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    job_cache.invalidate().await;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": 1 })))
}
