use serde_json::json;

use crate::database::UserStore;
use crate::models::{CustomResponse, UserProfile};

/// Insere um perfil novo com chave gerada pelo banco.
///
/// Caminho alternativo a `set_user_profile_uid`: aqui a chave do documento
/// não é o uid do usuário, os dois convivem no banco (ver DESIGN.md).
pub async fn set_user_profile<S: UserStore>(store: &S, user: UserProfile) -> CustomResponse {
    match store.insert_profile(&user).await {
        Ok(doc_id) if !doc_id.is_empty() => CustomResponse::success(
            "Perfil de usuário inserido",
            json!({ "docId": doc_id }).to_string(),
        ),
        Ok(_) => CustomResponse::error_detail(
            "Não foi possível inserir o perfil do usuário.",
            json!({ "errorDetail": "doc.id" }).to_string(),
        ),
        Err(e) => {
            log::error!("❌ Erro ao incluir perfil: {}", user.email);
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao incluir usuário - Verificar Logs")
        }
    }
}

/// Merge-update do perfil com chave `uid`. Sem uid não toca no banco.
pub async fn update_user_profile<S: UserStore>(store: &S, user: UserProfile) -> CustomResponse {
    if !user.has_uid() {
        return CustomResponse::error("O objeto do usuário não tem um ID válido.");
    }

    match store.update_profile(&user).await {
        Ok(()) => match serde_json::to_string(&user) {
            Ok(encoded) => CustomResponse::success("Perfil de usuário atualizado", encoded),
            Err(e) => {
                log::error!("Exception: {}", e);
                CustomResponse::failure("Erro ao atualizar usuário - Verificar Logs")
            }
        },
        Err(e) => {
            log::error!("❌ Erro ao atualizar perfil: {}", user.email);
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao atualizar usuário - Verificar Logs")
        }
    }
}

/// Grava o perfil usando o próprio uid como chave do documento (substituição
/// completa, não merge). Sem uid não toca no banco.
pub async fn set_user_profile_uid<S: UserStore>(store: &S, user: UserProfile) -> CustomResponse {
    if !user.has_uid() {
        return CustomResponse::error_detail(
            "Usuário não autenticado",
            json!({ "errorDetail": "uid" }).to_string(),
        );
    }

    match store.replace_profile(&user).await {
        Ok(write_seconds) => CustomResponse::success(
            "Perfil de usuário inserido",
            json!({ "docId": write_seconds }).to_string(),
        ),
        Err(e) => {
            log::error!("❌ Erro ao incluir perfil: {}", user.email);
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao incluir usuário - Verificar Logs")
        }
    }
}

/// Busca por igualdade no campo `uid` (não é lookup de chave); retorna só o
/// primeiro documento encontrado.
pub async fn get_user_profile_by_uid<S: UserStore>(store: &S, uid: &str) -> CustomResponse {
    match store.find_profile_by_uid(uid).await {
        Ok(Some(user)) => match serde_json::to_string(&user) {
            Ok(encoded) => CustomResponse::success("Perfil de usuário encontrado", encoded),
            Err(e) => {
                log::error!("Exception: {}", e);
                CustomResponse::failure("Erro ao buscar perfil do usuário - Verificar Logs")
            }
        },
        Ok(None) => CustomResponse::error("Perfil de usuário não encontrado"),
        Err(e) => {
            log::error!("❌ Erro ao buscar perfil do usuário pelo UID: {}", uid);
            log::error!("Exception: {}", e);
            CustomResponse::failure("Erro ao buscar perfil do usuário - Verificar Logs")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseStatus;
    use crate::utils::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store em memória que registra cada escrita, para verificar os caminhos
    /// que não podem tocar no banco
    #[derive(Default)]
    struct MemoryUserStore {
        // (chave do documento, conteúdo)
        docs: Mutex<Vec<(String, UserProfile)>>,
        writes: Mutex<usize>,
    }

    impl MemoryUserStore {
        fn stored(&self) -> Vec<(String, UserProfile)> {
            self.docs.lock().unwrap().clone()
        }

        fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn insert_profile(&self, user: &UserProfile) -> Result<String, AppError> {
            *self.writes.lock().unwrap() += 1;
            let mut docs = self.docs.lock().unwrap();
            let doc_id = format!("generated-{}", docs.len() + 1);
            docs.push((doc_id.clone(), user.clone()));
            Ok(doc_id)
        }

        async fn update_profile(&self, user: &UserProfile) -> Result<(), AppError> {
            *self.writes.lock().unwrap() += 1;
            let mut docs = self.docs.lock().unwrap();
            match docs.iter_mut().find(|(key, _)| key == &user.uid) {
                Some((_, stored)) => {
                    *stored = user.clone();
                    Ok(())
                }
                None => Err(AppError::NotFound(format!(
                    "No profile stored under key {}",
                    user.uid
                ))),
            }
        }

        async fn replace_profile(&self, user: &UserProfile) -> Result<i64, AppError> {
            *self.writes.lock().unwrap() += 1;
            let mut docs = self.docs.lock().unwrap();
            docs.retain(|(key, _)| key != &user.uid);
            docs.push((user.uid.clone(), user.clone()));
            Ok(1_700_000_000)
        }

        async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .map(|(_, user)| user)
                .find(|user| user.uid == uid)
                .cloned())
        }

        async fn find_active_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .map(|(_, user)| user.clone())
                .filter(|user| user.status)
                .collect())
        }
    }

    fn sample_user(uid: &str) -> UserProfile {
        UserProfile {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "11999990000".to_string(),
            cep: "01310-100".to_string(),
            adress1: "Av. Paulista, 1000".to_string(),
            adress2: "Bela Vista".to_string(),
            adress3: "São Paulo - SP".to_string(),
            mini_resume: "Dentista clínica geral".to_string(),
            status: true,
            fcm_token: Some("token-1".to_string()),
            uid: uid.to_string(),
            foto_perfil: "fotos/ana.jpg".to_string(),
        }
    }

    fn payload_string(response: &CustomResponse) -> String {
        match response.payload.as_ref() {
            Some(serde_json::Value::String(s)) => s.clone(),
            other => panic!("payload não é string JSON: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_returns_generated_key_and_stores_record() {
        let store = MemoryUserStore::default();
        let user = sample_user("user-1");

        let response = set_user_profile(&store, user.clone()).await;

        assert_eq!(response.status, ResponseStatus::Success);
        let payload: serde_json::Value =
            serde_json::from_str(&payload_string(&response)).unwrap();
        assert!(!payload["docId"].as_str().unwrap().is_empty());

        // o registro gravado é igual ao enviado, e um fetch por uid o encontra
        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].1, user);

        let fetched = get_user_profile_by_uid(&store, "user-1").await;
        assert_eq!(fetched.status, ResponseStatus::Success);
        let roundtrip: UserProfile =
            serde_json::from_str(&payload_string(&fetched)).unwrap();
        assert_eq!(roundtrip, user);
    }

    #[tokio::test]
    async fn test_update_without_uid_never_touches_store() {
        let store = MemoryUserStore::default();

        let response = update_user_profile(&store, sample_user("")).await;

        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "O objeto do usuário não tem um ID válido.");
        assert!(response.payload.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_echoes_record_in_payload() {
        let store = MemoryUserStore::default();
        let mut user = sample_user("user-1");
        set_user_profile_uid(&store, user.clone()).await;

        user.phone = "11911112222".to_string();
        let response = update_user_profile(&store, user.clone()).await;

        assert_eq!(response.status, ResponseStatus::Success);
        let echoed: UserProfile = serde_json::from_str(&payload_string(&response)).unwrap();
        assert_eq!(echoed, user);
    }

    #[tokio::test]
    async fn test_update_missing_document_is_operation_failure() {
        let store = MemoryUserStore::default();

        let response = update_user_profile(&store, sample_user("user-1")).await;

        assert_eq!(response.status, ResponseStatus::Error);
        // falha de operação: payload null presente no envelope
        assert_eq!(response.payload, Some(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_upsert_replaces_instead_of_accumulating() {
        let store = MemoryUserStore::default();
        let mut user = sample_user("abc");

        let first = set_user_profile_uid(&store, user.clone()).await;
        assert_eq!(first.status, ResponseStatus::Success);

        user.mini_resume = "Ortodontista".to_string();
        let second = set_user_profile_uid(&store, user.clone()).await;
        assert_eq!(second.status, ResponseStatus::Success);

        let payload: serde_json::Value =
            serde_json::from_str(&payload_string(&second)).unwrap();
        assert!(payload["docId"].is_i64());

        // exatamente um documento na chave "abc", com os campos novos
        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].0, "abc");
        assert_eq!(stored[0].1.mini_resume, "Ortodontista");
    }

    #[tokio::test]
    async fn test_upsert_without_uid_reports_detail_and_skips_store() {
        let store = MemoryUserStore::default();

        let response = set_user_profile_uid(&store, sample_user("")).await;

        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "Usuário não autenticado");
        let detail: serde_json::Value =
            serde_json::from_str(&payload_string(&response)).unwrap();
        assert_eq!(detail["errorDetail"], "uid");
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_missing_profile_is_not_found_without_payload() {
        let store = MemoryUserStore::default();

        let response = get_user_profile_by_uid(&store, "nope").await;

        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "Perfil de usuário não encontrado");
        assert!(response.payload.is_none());
    }
}
