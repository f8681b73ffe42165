use serde::{Deserialize, Serialize};

/// Status do envelope: todo handler responde SUCCESS ou ERROR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope uniforme de resposta (o app mobile espera exatamente este formato)
///
/// O payload tem três formas, herdadas do contrato original:
/// - sucesso: dados já codificados como string JSON
/// - falha de operação: `null` (o detalhe fica só nos logs)
/// - falha de validação / não encontrado: campo ausente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CustomResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub payload: Option<serde_json::Value>,
}

impl CustomResponse {
    /// Sucesso com payload já codificado em string JSON
    pub fn success(message: &str, payload: String) -> Self {
        CustomResponse {
            status: ResponseStatus::Success,
            message: message.to_string(),
            payload: Some(serde_json::Value::String(payload)),
        }
    }

    /// Erro de validação ou registro não encontrado - payload ausente
    pub fn error(message: &str) -> Self {
        CustomResponse {
            status: ResponseStatus::Error,
            message: message.to_string(),
            payload: None,
        }
    }

    /// Erro com detalhe codificado no payload (ex: {"errorDetail": "uid"})
    pub fn error_detail(message: &str, detail: String) -> Self {
        CustomResponse {
            status: ResponseStatus::Error,
            message: message.to_string(),
            payload: Some(serde_json::Value::String(detail)),
        }
    }

    /// Falha de operação (banco/rede) - payload null, detalhe nos logs
    pub fn failure(message: &str) -> Self {
        CustomResponse {
            status: ResponseStatus::Error,
            message: message.to_string(),
            payload: Some(serde_json::Value::Null),
        }
    }
}
