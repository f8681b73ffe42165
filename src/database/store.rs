// ==================== STORE TRAITS ====================
// Fronteira entre os serviços e o MongoDB. Os handlers recebem o cliente
// construído em main (injeção explícita, sem singleton de processo) e os
// serviços enxergam só estes traits, o que permite testá-los com stores em
// memória.

use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{self, doc};

use super::{MongoDB, EMERGENCY_COLLECTION, USERS_COLLECTION};
use crate::models::{Emergency, UserProfile};
use crate::utils::AppError;

/// Persistência de perfis de usuário
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insere um documento novo com chave gerada pelo banco; retorna a chave
    async fn insert_profile(&self, user: &UserProfile) -> Result<String, AppError>;

    /// Merge-update do documento cuja chave é `user.uid`
    async fn update_profile(&self, user: &UserProfile) -> Result<(), AppError>;

    /// Grava (ou sobrescreve por inteiro) o documento na chave `user.uid`;
    /// retorna o instante da escrita em segundos
    async fn replace_profile(&self, user: &UserProfile) -> Result<i64, AppError>;

    /// Primeiro documento cujo campo `uid` é igual ao informado
    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    /// Todos os perfis com status ativo, na ordem retornada pelo banco
    async fn find_active_profiles(&self) -> Result<Vec<UserProfile>, AppError>;
}

/// Leitura de registros de emergência
#[async_trait]
pub trait EmergencyStore: Send + Sync {
    /// Primeiro documento cujo campo `uid` é igual ao informado
    async fn find_emergency_by_uid(&self, uid: &str) -> Result<Option<Emergency>, AppError>;

    /// Toda a coleção, sem filtro
    async fn find_all_emergencies(&self) -> Result<Vec<Emergency>, AppError>;

    /// Quantidade de emergências com o status informado
    async fn count_emergencies_by_status(&self, status: &str) -> Result<u64, AppError>;
}

#[async_trait]
impl UserStore for MongoDB {
    async fn insert_profile(&self, user: &UserProfile) -> Result<String, AppError> {
        let collection = self.collection::<UserProfile>(USERS_COLLECTION);

        let result = collection
            .insert_one(user)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert profile: {}", e)))?;

        let doc_id = match result.inserted_id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        };

        Ok(doc_id)
    }

    async fn update_profile(&self, user: &UserProfile) -> Result<(), AppError> {
        let collection = self.collection::<UserProfile>(USERS_COLLECTION);

        let fields = bson::to_document(user)
            .map_err(|e| AppError::DatabaseError(format!("Failed to encode profile: {}", e)))?;

        let result = collection
            .update_one(doc! { "_id": &user.uid }, doc! { "$set": fields })
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to update profile: {}", e)))?;

        // Atualizar documento inexistente é falha, como no armazenamento original
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "No profile stored under key {}",
                user.uid
            )));
        }

        Ok(())
    }

    async fn replace_profile(&self, user: &UserProfile) -> Result<i64, AppError> {
        let collection = self.collection::<UserProfile>(USERS_COLLECTION);

        collection
            .replace_one(doc! { "_id": &user.uid }, user)
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to replace profile: {}", e)))?;

        Ok(chrono::Utc::now().timestamp())
    }

    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let collection = self.collection::<UserProfile>(USERS_COLLECTION);

        collection
            .find_one(doc! { "uid": uid })
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to query profile: {}", e)))
    }

    async fn find_active_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        let collection = self.collection::<UserProfile>(USERS_COLLECTION);

        let mut cursor = collection
            .find(doc! { "status": true })
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to query profiles: {}", e)))?;

        let mut profiles = Vec::new();

        while let Some(result) = cursor.next().await {
            match result {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    log::error!("❌ Error reading user document: {}", e);
                }
            }
        }

        Ok(profiles)
    }
}

#[async_trait]
impl EmergencyStore for MongoDB {
    async fn find_emergency_by_uid(&self, uid: &str) -> Result<Option<Emergency>, AppError> {
        let collection = self.collection::<Emergency>(EMERGENCY_COLLECTION);

        collection
            .find_one(doc! { "uid": uid })
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to query emergency: {}", e)))
    }

    async fn find_all_emergencies(&self) -> Result<Vec<Emergency>, AppError> {
        let collection = self.collection::<Emergency>(EMERGENCY_COLLECTION);

        let mut cursor = collection
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to query emergencies: {}", e)))?;

        let mut emergencies = Vec::new();

        while let Some(result) = cursor.next().await {
            match result {
                Ok(emergency) => emergencies.push(emergency),
                Err(e) => {
                    log::error!("❌ Error reading emergency document: {}", e);
                }
            }
        }

        Ok(emergencies)
    }

    async fn count_emergencies_by_status(&self, status: &str) -> Result<u64, AppError> {
        let collection = self.collection::<Emergency>(EMERGENCY_COLLECTION);

        collection
            .count_documents(doc! { "status": status })
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count emergencies: {}", e)))
    }
}
