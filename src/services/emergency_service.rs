use crate::database::EmergencyStore;
use crate::models::{CustomResponse, Emergency};

/// Busca por igualdade no campo `uid`; retorna só o primeiro documento.
pub async fn get_emergency_by_uid<S: EmergencyStore>(store: &S, uid: &str) -> CustomResponse {
    match store.find_emergency_by_uid(uid).await {
        Ok(Some(emergency)) => match serde_json::to_string(&emergency) {
            Ok(encoded) => CustomResponse::success("Emergencia encontrado", encoded),
            Err(e) => {
                log::error!("Exception: {}", e);
                CustomResponse::failure("Erro ao buscar emergencia - Verificar Logs")
            }
        },
        Ok(None) => CustomResponse::error("Emergencia não encontrada"),
        Err(e) => {
            log::error!("❌ Erro ao buscar emergencia pelo UID: {}", uid);
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao buscar emergencia - Verificar Logs")
        }
    }
}

/// Toda a coleção, sem filtro. Coleção vazia é "não encontrada", não exceção.
pub async fn get_all_emergencies<S: EmergencyStore>(store: &S) -> CustomResponse {
    match store.find_all_emergencies().await {
        Ok(emergencies) if !emergencies.is_empty() => encode_list(&emergencies),
        Ok(_) => CustomResponse::error("Nenhuma emergência encontrada"),
        Err(e) => {
            log::error!("❌ Erro ao buscar emergências: {}", e);
            CustomResponse::failure("Erro ao buscar emergências - Verificar Logs")
        }
    }
}

/// Busca tudo e filtra no serviço com a condição herdada de "aberta"
/// (`Emergency::is_open`). O teste de coleção vazia acontece antes do filtro:
/// coleção com registros mas nenhum aberto responde SUCCESS com lista vazia.
pub async fn get_emergencies_by_status<S: EmergencyStore>(store: &S) -> CustomResponse {
    match store.find_all_emergencies().await {
        Ok(emergencies) if !emergencies.is_empty() => {
            let open: Vec<Emergency> = emergencies
                .into_iter()
                .filter(|emergency| emergency.is_open())
                .collect();
            encode_list(&open)
        }
        Ok(_) => CustomResponse::error("Nenhuma emergência encontrada"),
        Err(e) => {
            log::error!("❌ Erro ao buscar emergências: {}", e);
            CustomResponse::failure("Erro ao buscar emergências - Verificar Logs")
        }
    }
}

fn encode_list(emergencies: &[Emergency]) -> CustomResponse {
    match serde_json::to_string(emergencies) {
        Ok(encoded) => CustomResponse::success("Emergências encontradas", encoded),
        Err(e) => {
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao buscar emergências - Verificar Logs")
        }
    }
}
