use actix_web::{web, HttpResponse, Responder};

use crate::{
    database::MongoDB,
    models::{CustomResponse, UserProfile},
    services::user_service,
};

/// POST /api/v1/users - Insere perfil com chave gerada pelo banco
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserProfile,
    responses(
        (status = 200, description = "Envelope SUCCESS com docId gerado, ou ERROR", body = CustomResponse)
    )
)]
pub async fn set_user_profile(
    db: web::Data<MongoDB>,
    user: web::Json<UserProfile>,
) -> impl Responder {
    log::info!("📝 POST /users - Creating profile for {}", user.email);

    HttpResponse::Ok().json(user_service::set_user_profile(db.get_ref(), user.into_inner()).await)
}

/// PATCH /api/v1/users - Merge-update do perfil com chave uid
#[utoipa::path(
    patch,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserProfile,
    responses(
        (status = 200, description = "Envelope SUCCESS ecoando o registro, ou ERROR", body = CustomResponse)
    )
)]
pub async fn update_user_profile(
    db: web::Data<MongoDB>,
    user: web::Json<UserProfile>,
) -> impl Responder {
    log::info!("🔧 PATCH /users - Updating profile {}", user.uid);

    HttpResponse::Ok()
        .json(user_service::update_user_profile(db.get_ref(), user.into_inner()).await)
}

/// PUT /api/v1/users - Grava o perfil na chave uid (substituição completa)
#[utoipa::path(
    put,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserProfile,
    responses(
        (status = 200, description = "Envelope SUCCESS com o instante da escrita, ou ERROR", body = CustomResponse)
    )
)]
pub async fn set_user_profile_uid(
    db: web::Data<MongoDB>,
    user: web::Json<UserProfile>,
) -> impl Responder {
    log::info!("📝 PUT /users - Upserting profile {}", user.uid);

    HttpResponse::Ok()
        .json(user_service::set_user_profile_uid(db.get_ref(), user.into_inner()).await)
}

/// GET /api/v1/users/{uid} - Busca perfil pelo campo uid
#[utoipa::path(
    get,
    path = "/api/v1/users/{uid}",
    tag = "Users",
    params(
        ("uid" = String, Path, description = "Identificador opaco do usuário")
    ),
    responses(
        (status = 200, description = "Envelope SUCCESS com o perfil, ou ERROR", body = CustomResponse)
    )
)]
pub async fn get_user_profile_by_uid(
    db: web::Data<MongoDB>,
    uid: web::Path<String>,
) -> impl Responder {
    log::info!("🔍 GET /users/{}", uid);

    HttpResponse::Ok().json(user_service::get_user_profile_by_uid(db.get_ref(), &uid).await)
}
