// ==================== EMERGENCY NOTIFICATION FAN-OUT ====================
// Quando uma emergência nova entra no banco: conta as emergências "new",
// busca os usuários ativos e envia UM multicast FCM com todos os tokens.

use async_trait::async_trait;
use serde::Serialize;
use std::env;

use crate::database::{EmergencyStore, UserStore};
use crate::models::{UserProfile, STATUS_NEW};
use crate::utils::AppError;

const FCM_SEND_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Despacho de push multicast: um request para N tokens. O resultado por
/// token não é inspecionado, o lote vale como um todo.
#[async_trait]
pub trait PushDispatcher: Send + Sync {
    async fn send_multicast(&self, tokens: &[String], text: &str) -> Result<(), AppError>;
}

/// Cliente FCM (HTTP API) via reqwest
#[derive(Clone)]
pub struct FcmClient {
    client: reqwest::Client,
    server_key: Option<String>,
}

#[derive(Serialize)]
struct MulticastMessage<'a> {
    registration_ids: &'a [String],
    data: MessageData<'a>,
}

#[derive(Serialize)]
struct MessageData<'a> {
    text: &'a str,
}

impl FcmClient {
    pub fn from_env() -> Self {
        let server_key = env::var("FCM_SERVER_KEY").ok();

        if server_key.is_none() {
            log::warn!("⚠️  FCM_SERVER_KEY not set - push dispatch will fail");
        }

        FcmClient {
            client: reqwest::Client::new(),
            server_key,
        }
    }
}

#[async_trait]
impl PushDispatcher for FcmClient {
    async fn send_multicast(&self, tokens: &[String], text: &str) -> Result<(), AppError> {
        let server_key = self
            .server_key
            .as_ref()
            .ok_or_else(|| AppError::DispatchError("FCM_SERVER_KEY not found".to_string()))?;

        let message = MulticastMessage {
            registration_ids: tokens,
            data: MessageData { text },
        };

        let response = self
            .client
            .post(FCM_SEND_ENDPOINT)
            .header("Authorization", format!("key={}", server_key))
            .timeout(std::time::Duration::from_secs(10))
            .json(&message)
            .send()
            .await
            .map_err(|e| AppError::DispatchError(format!("Failed to send FCM request: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::DispatchError(format!(
                "FCM API error: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Texto da notificação de novas emergências
pub fn notification_text(num_emergencies: u64) -> String {
    format!("{} Novas Emergências foram encontradas", num_emergencies)
}

/// Tokens dos usuários ativos, na ordem retornada pelo banco. Token ausente
/// entra como string vazia - o app sempre mandou a lista inteira, sem filtrar.
pub fn collect_device_tokens(users: &[UserProfile]) -> Vec<String> {
    users
        .iter()
        .map(|user| user.fcm_token.clone().unwrap_or_default())
        .collect()
}

/// Conta emergências "new", coleta os tokens dos usuários ativos e envia um
/// único multicast. Falha de despacho é logada e propagada ao chamador; quem
/// observa o stream de criação decide o que fazer com ela.
pub async fn send_emergency_notification<S, D>(store: &S, dispatcher: &D) -> Result<(), AppError>
where
    S: UserStore + EmergencyStore,
    D: PushDispatcher,
{
    let num_emergencies = store.count_emergencies_by_status(STATUS_NEW).await?;

    let active_users = store.find_active_profiles().await?;
    let tokens = collect_device_tokens(&active_users);

    let text = notification_text(num_emergencies);

    match dispatcher.send_multicast(&tokens, &text).await {
        Ok(()) => {
            log::info!("✅ Notificações enviadas com sucesso ({} tokens)", tokens.len());
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Erro ao enviar as notificações: {}", e);
            Err(e)
        }
    }
}
