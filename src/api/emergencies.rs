use actix_web::{web, HttpResponse, Responder};

use crate::{database::MongoDB, models::CustomResponse, services::emergency_service};

/// GET /api/v1/emergencies - Lista toda a coleção
#[utoipa::path(
    get,
    path = "/api/v1/emergencies",
    tag = "Emergencies",
    responses(
        (status = 200, description = "Envelope SUCCESS com a lista completa, ou ERROR se vazia", body = CustomResponse)
    )
)]
pub async fn get_all_emergencies(db: web::Data<MongoDB>) -> impl Responder {
    log::info!("📋 GET /emergencies");

    HttpResponse::Ok().json(emergency_service::get_all_emergencies(db.get_ref()).await)
}

/// GET /api/v1/emergencies/open - Emergências abertas (filtro herdado do app)
#[utoipa::path(
    get,
    path = "/api/v1/emergencies/open",
    tag = "Emergencies",
    responses(
        (status = 200, description = "Envelope SUCCESS com as emergências abertas", body = CustomResponse)
    )
)]
pub async fn get_emergencies_by_status(db: web::Data<MongoDB>) -> impl Responder {
    log::info!("📋 GET /emergencies/open");

    HttpResponse::Ok().json(emergency_service::get_emergencies_by_status(db.get_ref()).await)
}

/// GET /api/v1/emergencies/{uid} - Busca emergência pelo campo uid
#[utoipa::path(
    get,
    path = "/api/v1/emergencies/{uid}",
    tag = "Emergencies",
    params(
        ("uid" = String, Path, description = "Identificador opaco da emergência")
    ),
    responses(
        (status = 200, description = "Envelope SUCCESS com a emergência, ou ERROR", body = CustomResponse)
    )
)]
pub async fn get_emergency_by_uid(
    db: web::Data<MongoDB>,
    uid: web::Path<String>,
) -> impl Responder {
    log::info!("🔍 GET /emergencies/{}", uid);

    HttpResponse::Ok().json(emergency_service::get_emergency_by_uid(db.get_ref(), &uid).await)
}
