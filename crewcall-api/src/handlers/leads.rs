use actix_web::{web, HttpResponse, Result as ActixResult};
use importers::lead_csv;
use serde::Deserialize;
use shared_types::{
    CreateLeadRequest, DeleteLeadsRequest, ImportLeadsRequest, ImportLeadsResponse, LeadDraft,
    LeadStatus, LeadsResponse, UpdateLeadNotesRequest, UpdateLeadStatusRequest,
};
use tracing::{error, info};

use crate::database::leads as leads_db;
use crate::database::AsyncDbConnection;

const UPLOAD_FAILED: &str = "Upload failed. Check CSV format.";

#[derive(Deserialize)]
pub struct LeadFilterQuery {
    status: Option<String>,
    q: Option<String>,
}

fn parse_status_filter(raw: &Option<String>) -> ActixResult<Option<LeadStatus>> {
    match raw {
        None => Ok(None),
        Some(value) => LeadStatus::parse(value).map(Some).ok_or_else(|| {
            actix_web::error::ErrorBadRequest(format!("Unknown lead status: {}", value))
        }),
    }
}

fn summary_message(added: usize, skipped: usize) -> String {
    if added > 0 && skipped == 0 {
        format!("✅ Uploaded {} leads!", added)
    } else if added > 0 {
        format!(
            "✅ {} new leads added. ⚠️ {} duplicate(s) skipped.",
            added, skipped
        )
    } else {
        format!(
            "No new leads — all {} rows already exist in your database.",
            skipped
        )
    }
}

pub async fn import_leads(
    db_conn: web::Data<AsyncDbConnection>,
    request: web::Json<ImportLeadsRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    if lead_csv::ensure_csv_filename(&request.filename).is_err() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Only .csv files can be imported."
        })));
    }

    let existing = leads_db::list_leads(db_conn.as_ref().clone(), None, None)
        .await
        .map_err(|e| {
            error!("Failed to load existing leads for import: {}", e);
            actix_web::error::ErrorInternalServerError(UPLOAD_FAILED)
        })?;

    let plan = lead_csv::plan_import(request.content.as_bytes(), &existing).map_err(|e| {
        error!("Lead CSV did not parse: {}", e);
        actix_web::error::ErrorBadRequest(UPLOAD_FAILED)
    })?;

    let added = plan.accepted.len();
    let skipped = plan.skipped.len();

    if added == 0 && skipped == 0 {
        return Ok(HttpResponse::Ok().json(ImportLeadsResponse {
            message: "No data found in CSV.".to_string(),
            added: 0,
            skipped: 0,
            leads: vec![],
        }));
    }

    if added == 0 {
        return Ok(HttpResponse::Ok().json(ImportLeadsResponse {
            message: summary_message(0, skipped),
            added: 0,
            skipped,
            leads: vec![],
        }));
    }

    // One timestamp for the whole batch
    let uploaded_at = chrono::Utc::now().to_rfc3339();

    let created = leads_db::insert_leads_batch(db_conn.as_ref().clone(), &plan.accepted, &uploaded_at)
        .await
        .map_err(|e| {
            error!("Lead batch write failed: {}", e);
            actix_web::error::ErrorInternalServerError(UPLOAD_FAILED)
        })?;

    info!(
        "Imported {} leads from {} ({} skipped)",
        added, request.filename, skipped
    );

    Ok(HttpResponse::Ok().json(ImportLeadsResponse {
        message: summary_message(added, skipped),
        added,
        skipped,
        leads: created,
    }))
}

pub async fn export_leads(
    db_conn: web::Data<AsyncDbConnection>,
    query: web::Query<LeadFilterQuery>,
) -> ActixResult<HttpResponse> {
    let status = parse_status_filter(&query.status)?;

    let leads = leads_db::list_leads(db_conn.as_ref().clone(), status, query.q.as_deref())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let csv_text = lead_csv::export_csv(&leads)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"leads.csv\"",
        ))
        .body(csv_text))
}

pub async fn list_leads(
    db_conn: web::Data<AsyncDbConnection>,
    query: web::Query<LeadFilterQuery>,
) -> ActixResult<HttpResponse> {
    let status = parse_status_filter(&query.status)?;

    let leads = leads_db::list_leads(db_conn.as_ref().clone(), status, query.q.as_deref())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(LeadsResponse { leads }))
}

pub async fn create_lead(
    db_conn: web::Data<AsyncDbConnection>,
    request: web::Json<CreateLeadRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    if request.title.trim().is_empty() {
        return Err(actix_web::error::ErrorBadRequest("Lead title is required"));
    }

    let draft = LeadDraft {
        title: request.title,
        phone: request.phone,
        email1: request.email1,
        email2: request.email2,
        email3: None,
        email4: None,
        email5: None,
        website: request.website,
        url: request.url,
        instagram1: request.instagram1,
        instagram2: None,
        facebook1: request.facebook1,
        facebook2: None,
        linkedin1: request.linkedin1,
        linkedin2: None,
        youtube1: None,
        youtube2: None,
        tiktok1: None,
        tiktok2: None,
        twitter1: None,
        twitter2: None,
        city: request.city,
        image_url: request.image_url,
        notes: request.notes,
    };

    let uploaded_at = chrono::Utc::now().to_rfc3339();

    let lead = leads_db::insert_lead(db_conn.as_ref().clone(), &draft, &uploaded_at)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Created().json(lead))
}

pub async fn update_lead_status(
    db_conn: web::Data<AsyncDbConnection>,
    path: web::Path<i64>,
    request: web::Json<UpdateLeadStatusRequest>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();

    leads_db::update_lead_status(db_conn.as_ref().clone(), lead_id, request.status)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    let lead = leads_db::get_lead(db_conn.as_ref().clone(), lead_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(lead))
}

pub async fn update_lead_notes(
    db_conn: web::Data<AsyncDbConnection>,
    path: web::Path<i64>,
    request: web::Json<UpdateLeadNotesRequest>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();

    leads_db::update_lead_notes(db_conn.as_ref().clone(), lead_id, &request.notes)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    let lead = leads_db::get_lead(db_conn.as_ref().clone(), lead_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(lead))
}

pub async fn delete_lead(
    db_conn: web::Data<AsyncDbConnection>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();

    leads_db::delete_lead(db_conn.as_ref().clone(), lead_id)
        .await
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": 1 })))
}

pub async fn delete_leads(
    db_conn: web::Data<AsyncDbConnection>,
    request: web::Json<DeleteLeadsRequest>,
) -> ActixResult<HttpResponse> {
    let deleted = leads_db::delete_leads(db_conn.as_ref().clone(), &request.ids)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted })))
}

#[cfg(test)]
mod tests {
    use super::summary_message;

    #[test]
    fn test_summary_messages() {
        assert_eq!(summary_message(3, 0), "✅ Uploaded 3 leads!");
        assert_eq!(
            summary_message(2, 5),
            "✅ 2 new leads added. ⚠️ 5 duplicate(s) skipped."
        );
        assert_eq!(
            summary_message(0, 4),
            "No new leads — all 4 rows already exist in your database."
        );
    }
}
