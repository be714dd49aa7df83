use promo_admin::{AdminService, OperatorGate};
use promo_core::{CodeGenerator, FileParticipantStore, ParticipantStore};
use session_manager::RegistrationManager;
use std::sync::Arc;

use crate::config::Settings;
use crate::dispatch::Dispatcher;

pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let store: Arc<dyn ParticipantStore> =
            Arc::new(FileParticipantStore::new(&settings.data_file));
        Self::with_store(settings, store)
    }

    /// Build the state over any participant store.
    pub fn with_store(settings: &Settings, store: Arc<dyn ParticipantStore>) -> Self {
        let registrations = RegistrationManager::new(store.clone())
            .with_code_generator(CodeGenerator::new(settings.code_prefix.clone()))
            .with_timezone(settings.timezone)
            .with_operator_contact(settings.operator_contact.clone());
        let admin = AdminService::new(store, OperatorGate::new(settings.operator_id.clone()));

        Self {
            dispatcher: Dispatcher::new(registrations, admin),
        }
    }
}
