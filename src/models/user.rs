use serde::{Deserialize, Serialize};

/// Perfil de usuário (coleção `users` no MongoDB)
///
/// Os nomes de campo no wire seguem o contrato camelCase do app mobile,
/// incluindo a grafia legada `adress1..3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub adress1: String,
    pub adress2: String,
    pub adress3: String,
    pub mini_resume: String,

    /// Usuário ativo recebe notificações de novas emergências
    pub status: bool,

    /// Token de push do dispositivo; nem todo perfil tem um registrado
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,

    /// Identificador opaco fornecido pelo app (não é gerado aqui)
    #[serde(default)]
    pub uid: String,

    pub foto_perfil: String,
}

impl UserProfile {
    /// True se o registro traz um uid utilizável como chave de documento
    pub fn has_uid(&self) -> bool {
        !self.uid.is_empty()
    }
}
