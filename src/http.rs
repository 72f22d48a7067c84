#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use actix_web::{get, route, web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::AppState;

#[derive(Debug, Deserialize)]
pub struct MemLoadQuery {
    mem: Option<String>,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CpuLoadQuery {
    time: Option<String>,
}

#[route("/memLoad", method = "GET", method = "POST")]
pub async fn mem_load(query: web::Query<MemLoadQuery>, data: web::Data<AppState>) -> HttpResponse {
    let duration_seconds = match crate::validation::parse_duration_seconds(query.time.as_deref()) {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(format!("{e:#}")),
    };
    let memory_mb = match crate::validation::parse_memory_mb(query.mem.as_deref()) {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(format!("{e:#}")),
    };
    info!(host = %data.hostname, memory_mb, duration_seconds, "mem load request");
    data.metrics.mem_load_requests_total.inc();
    let registry = data.registry.clone();
    let finished = data.finished_tx.clone();
    let mtr = data.metrics.clone();
    tokio::spawn(async move {
        crate::lib_mem::memory_load(registry, finished, mtr, memory_mb, duration_seconds).await;
    });
    HttpResponse::Ok().body(format!(
        "[{}] MemLoad request for {memory_mb} MB memory for {duration_seconds} seconds\n",
        data.hostname
    ))
}

#[route("/cpuLoad", method = "GET", method = "POST")]
pub async fn cpu_load(query: web::Query<CpuLoadQuery>, data: web::Data<AppState>) -> HttpResponse {
    let duration_seconds = match crate::validation::parse_duration_seconds(query.time.as_deref()) {
        Ok(v) => v,
        Err(e) => return HttpResponse::BadRequest().body(format!("{e:#}")),
    };
    info!(host = %data.hostname, duration_seconds, "cpu load request");
    data.metrics.cpu_load_requests_total.inc();
    let slot = data.cpu_slot.clone();
    let mtr = data.metrics.clone();
    tokio::spawn(async move {
        crate::lib_cpu::cpu_load(slot, mtr, duration_seconds).await;
    });
    HttpResponse::Ok().body(format!(
        "[{}] CPULoad request for {duration_seconds} seconds\n",
        data.hostname
    ))
}

#[get("/curLoad")]
pub async fn cur_load(data: web::Data<AppState>) -> HttpResponse {
    let sizes = data.registry.snapshot();
    let mut body = format!(
        "[{}] Current memory load operations: {}\n",
        data.hostname,
        sizes.len()
    );
    for (i, mb) in sizes.iter().enumerate() {
        body.push_str(&format!("#{i}: {mb}MB\n"));
    }
    HttpResponse::Ok().body(body)
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/readiness")]
pub async fn readiness() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/metrics")]
pub async fn scrape_metrics(data: web::Data<AppState>) -> HttpResponse {
    match data.metrics.encode_text() {
        Ok(buf) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buf),
        Err(e) => {
            error!(error = %format!("{e:#}"), "encode metrics failed");
            HttpResponse::InternalServerError().body("encode metrics failed")
        }
    }
}

/// Env var first, then the usual file, matching what container runtimes set.
#[must_use]
pub fn resolve_hostname() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| {
        std::fs::read_to_string("/etc/hostname")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    })
}

pub async fn serve(bind: &str) -> std::io::Result<()> {
    let (state, worker) = crate::service::bootstrap(resolve_hostname()).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, format!("state init: {e:#}"))
    })?;
    tokio::spawn(worker.run());
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(mem_load)
            .service(cpu_load)
            .service(cur_load)
            .service(health)
            .service(readiness)
            .service(scrape_metrics)
    })
    .bind(bind)?
    .run()
    .await
}
