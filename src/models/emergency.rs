use serde::{Deserialize, Serialize};

/// Status observados no produto; o campo é texto livre no banco
pub const STATUS_NEW: &str = "new";
pub const STATUS_DRAFT: &str = "draft";

/// Dentista referenciado nas listas de aceite/rejeição de uma emergência
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Dentist {
    pub name: String,
    pub uid: String,
}

/// Registro de emergência (coleção `emergency` no MongoDB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Emergency {
    pub name: String,
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,

    #[serde(default)]
    pub uid: String,

    /// Texto livre; valores observados: "new", "draft"
    pub status: String,

    /// O app envia `null` quando nenhum dentista aceitou/rejeitou ainda
    #[serde(default)]
    pub accept_dentist_list: Option<Vec<Dentist>>,
    #[serde(default)]
    pub reject_dentist_list: Option<Vec<Dentist>>,
}

impl Emergency {
    /// Filtro de "emergências abertas" herdado do app: aceita "new" e, para
    /// "draft", o teste da lista de aceite passa tanto com a lista presente
    /// quanto ausente - o ramo é sempre verdadeiro.
    pub fn is_open(&self) -> bool {
        self.status == STATUS_NEW
            || (self.status == STATUS_DRAFT
                && (self.accept_dentist_list.is_some() || self.accept_dentist_list.is_none()))
    }
}
