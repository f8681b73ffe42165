use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emergency Service API",
        version = "1.0.0",
        description = "Backend de emergências odontológicas. \n\nCRUD de perfis de usuário e registros de emergência sobre MongoDB, com envelope uniforme `{status, message, payload}` em toda resposta. A criação de emergências no banco dispara um multicast FCM para os usuários ativos (processo em background, sem endpoint).",
        contact(
            name = "Emergency Service Team",
            email = "support@emergency-service.com"
        )
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::set_user_profile,
        crate::api::users::update_user_profile,
        crate::api::users::set_user_profile_uid,
        crate::api::users::get_user_profile_by_uid,

        // Emergencies
        crate::api::emergencies::get_all_emergencies,
        crate::api::emergencies::get_emergencies_by_status,
        crate::api::emergencies::get_emergency_by_uid,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::CustomResponse,
            crate::models::ResponseStatus,
            crate::models::UserProfile,
            crate::models::Emergency,
            crate::models::Dentist,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Users", description = "User profile CRUD. Every response is the uniform {status, message, payload} envelope."),
        (name = "Emergencies", description = "Emergency record queries. Read-only: records are created by the mobile app directly in the database."),
    )
)]
pub struct ApiDoc;
