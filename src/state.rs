use crate::errors::PortalError;
use crate::gate::Gate;
use crate::models::PortalView;
use crate::portal::{PendingSave, Portal};
use crate::store::StoreClient;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
    pub gate: Gate,
    pub portal: Arc<Mutex<Portal>>,
}

impl AppState {
    pub fn new(store: StoreClient, gate: Gate) -> Self {
        Self {
            store,
            gate,
            portal: Arc::new(Mutex::new(Portal::new())),
        }
    }

    pub async fn view(&self) -> PortalView {
        let open = self.gate.is_open();
        let portal = self.portal.lock().await;
        portal.view_at(Utc::now(), open, self.gate.closes_at())
    }

    fn ensure_open(&self) -> Result<(), PortalError> {
        if self.gate.is_open() {
            Ok(())
        } else {
            Err(PortalError::Closed)
        }
    }

    /// Replaces roster and centres with a fresh copy from the store.
    ///
    /// The round trip runs on its own task so a dropped request still clears
    /// the loading flag.
    pub async fn load(&self) -> Result<(), PortalError> {
        self.portal.lock().await.begin_load()?;
        info!(store = %self.store.url(), "loading roster");
        let state = self.clone();
        let task = tokio::spawn(async move {
            let result = state.store.fetch_all().await;
            state.portal.lock().await.finish_load(result);
        });
        if let Err(err) = task.await {
            error!("roster load task failed: {err}");
        }
        Ok(())
    }

    pub async fn reload(&self) -> Result<(), PortalError> {
        self.ensure_open()?;
        self.load().await
    }

    pub async fn search(&self, code: &str) -> Result<(), PortalError> {
        self.ensure_open()?;
        self.portal.lock().await.search(code);
        Ok(())
    }

    pub async fn choose(&self, centre: &str) -> Result<(), PortalError> {
        self.ensure_open()?;
        self.portal.lock().await.choose_centre(centre)
    }

    /// Persists an assignment for any code and reconciles the local roster.
    pub async fn save(&self, hrms_code: &str, centre: &str) -> Result<(), PortalError> {
        self.ensure_open()?;
        let pending = self.portal.lock().await.begin_save(hrms_code, centre)?;
        self.complete(pending).await;
        Ok(())
    }

    /// Persists the centre chosen in the editor for the selected teacher.
    pub async fn save_selection(&self, centre: &str) -> Result<(), PortalError> {
        self.ensure_open()?;
        let pending = {
            let mut portal = self.portal.lock().await;
            portal.choose_centre(centre)?;
            portal.begin_selection_save()?
        };
        self.complete(pending).await;
        Ok(())
    }

    async fn complete(&self, pending: PendingSave) {
        let state = self.clone();
        let task = tokio::spawn(async move {
            let result = state
                .store
                .update_centre(&pending.hrms_code, &pending.centre)
                .await;
            state
                .portal
                .lock()
                .await
                .finish_save(pending, result, Utc::now());
        });
        if let Err(err) = task.await {
            error!("save task failed: {err}");
        }
    }

    pub async fn dismiss(&self) {
        self.portal.lock().await.dismiss();
    }
}
