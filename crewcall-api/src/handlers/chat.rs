use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use shared_types::{ChatRequest, ChatResponse, JobPosting};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::database::AsyncDbConnection;
use crate::helpers::job_cache::JobListingCache;
use crate::helpers::rate_limit::RateLimiter;
use crate::integrations::gemini::GeminiClient;

fn build_system_prompt(jobs: &[JobPosting]) -> String {
    let mut prompt = String::from(
        "You are the assistant on the CrewCall Staffing website. CrewCall \
         provides trained staff for events: bartenders, ushers, hosts, \
         runners and floor managers. Answer questions about the services, \
         and help candidates find and apply to open roles. Keep replies \
         short and concrete. If someone wants to hire staff, point them to \
         the contact form.\n\nCurrent open roles:\n",
    );

    if jobs.is_empty() {
        prompt.push_str("(no open roles right now)\n");
    }

    for job in jobs {
        prompt.push_str(&format!("- {}", job.title));
        if let Some(city) = &job.city {
            prompt.push_str(&format!(", {}", city));
        }
        if let Some(event_date) = &job.event_date {
            prompt.push_str(&format!(", {}", event_date));
        }
        if let Some(pay_rate) = &job.pay_rate {
            prompt.push_str(&format!(", pay {}", pay_rate));
        }
        prompt.push('\n');
    }

    prompt
}

pub async fn chat(
    db_conn: web::Data<AsyncDbConnection>,
    limiter: web::Data<Arc<RateLimiter>>,
    job_cache: web::Data<Arc<JobListingCache>>,
    gemini: web::Data<Arc<GeminiClient>>,
    request: web::Json<ChatRequest>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    if request.message.trim().is_empty() {
        return Err(actix_web::error::ErrorBadRequest("Message is empty"));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // Limit by network peer when known, by session otherwise
    let client_key = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| session_id.clone());

    if !limiter.check(&client_key).await {
        warn!("Chat rate limit hit for {}", client_key);
        return Ok(HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Too many messages. Please wait a moment and try again."
        })));
    }

    let jobs = job_cache
        .get_or_refresh(db_conn.as_ref().clone())
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let system_prompt = build_system_prompt(&jobs);

    let reply = gemini
        .generate_reply(&system_prompt, &request.message)
        .await
        .map_err(|e| {
            error!("Chat completion failed: {}", e);
            actix_web::error::ErrorInternalServerError("The assistant is unavailable right now.")
        })?;

    Ok(HttpResponse::Ok().json(ChatResponse { reply, session_id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, city: Option<&str>, pay: Option<&str>) -> JobPosting {
        JobPosting {
            id: 1,
            title: title.to_string(),
            description: None,
            city: city.map(str::to_string),
            event_date: None,
            pay_rate: pay.map(str::to_string),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_prompt_lists_open_roles() {
        let prompt = build_system_prompt(&[
            job("Bartender", Some("Tel Aviv"), Some("70/hr")),
            job("Usher", None, None),
        ]);

        assert!(prompt.contains("- Bartender, Tel Aviv, pay 70/hr\n"));
        assert!(prompt.contains("- Usher\n"));
    }

    #[test]
    fn test_prompt_without_roles() {
        let prompt = build_system_prompt(&[]);
        assert!(prompt.contains("(no open roles right now)"));
    }
}
