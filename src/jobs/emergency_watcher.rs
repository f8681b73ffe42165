// ==================== EMERGENCY WATCHER ====================
// Observa a coleção `emergency` por change stream e dispara o fan-out de
// notificações a cada documento inserido - o app mobile grava emergências
// direto no banco, então a criação é um evento de storage, não um endpoint.

use futures::stream::StreamExt;
use mongodb::change_stream::event::OperationType;
use tokio::time::{sleep, Duration};

use crate::{
    database::{MongoDB, EMERGENCY_COLLECTION},
    models::Emergency,
    services::notification_service::{self, FcmClient},
};

/// Inicia o watcher de emergências em background.
/// Se o stream cair (failover, rede), reabre depois de uma pausa curta;
/// eventos inseridos durante a janela fechada não são reprocessados.
pub async fn start_emergency_watcher(db: MongoDB, fcm: FcmClient) {
    log::info!("👀 Starting emergency watcher (change stream on `{}`)", EMERGENCY_COLLECTION);

    tokio::spawn(async move {
        loop {
            match watch_emergency_inserts(&db, &fcm).await {
                Ok(()) => log::warn!("⚠️  Emergency change stream ended, reopening..."),
                Err(e) => log::error!("❌ Emergency change stream failed: {}", e),
            }

            sleep(Duration::from_secs(5)).await;
        }
    });

    log::info!("✅ Emergency watcher started successfully");
}

async fn watch_emergency_inserts(db: &MongoDB, fcm: &FcmClient) -> Result<(), String> {
    let collection = db.collection::<Emergency>(EMERGENCY_COLLECTION);

    let mut stream = collection
        .watch()
        .await
        .map_err(|e| format!("Failed to open change stream: {}", e))?;

    while let Some(event) = stream.next().await {
        let event = event.map_err(|e| format!("Change stream error: {}", e))?;

        if !matches!(event.operation_type, OperationType::Insert) {
            continue;
        }

        match &event.full_document {
            Some(emergency) => {
                log::info!("🚨 Nova emergência criada: {}", emergency.uid);
            }
            None => {
                log::warn!("No data associated with the event");
            }
        }

        // a falha já foi logada pelo serviço; o stream segue aberto e o
        // próximo insert tenta de novo
        if let Err(e) = notification_service::send_emergency_notification(db, fcm).await {
            log::error!("❌ Notification fan-out failed: {}", e);
        }
    }

    Ok(())
}
