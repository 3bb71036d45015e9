use crate::errors::{ErrorSeverity, IntoErrorResponse};
use seatread_engine::board::CommunityCards;
use seatread_engine::errors::{AdvisorError, ErrorKind};
use seatread_engine::logger::{PromptLogger, PromptRecord};
use seatread_engine::player::Player;
use seatread_engine::prompt::{PromptPhase, SceneBuilder};
use seatread_engine::session::{Advice, HandAdvisor};
use seatread_engine::stage::Stage;
use seatread_engine::validation::TableSummary;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;
use warp::http::StatusCode;

pub type TableId = String;

/// Idle time after which a sweep drops a table.
pub const DEFAULT_TABLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Read-only view of one table for `GET /api/tables/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub table_id: TableId,
    pub active: bool,
    pub stage: Option<Stage>,
    pub phase: Option<PromptPhase>,
    pub pot: u64,
    pub players: Vec<Player>,
}

#[derive(Debug)]
struct TableSlot {
    advisor: HandAdvisor,
    last_active: Instant,
}

impl TableSlot {
    fn new(advisor: HandAdvisor) -> Self {
        Self {
            advisor,
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut HandAdvisor {
        self.last_active = Instant::now();
        &mut self.advisor
    }
}

/// Every table's advisor, keyed by a generated id.
///
/// The map lock is held only to look a table up; work on a table happens
/// under that table's own mutex, so requests for different tables never
/// wait on each other.
///
/// A table lives until it is deleted or, once [`cleanup_expired_tables`]
/// runs, until it has been idle for the configured TTL.
///
/// [`cleanup_expired_tables`]: TableRegistry::cleanup_expired_tables
#[derive(Debug)]
pub struct TableRegistry {
    tables: RwLock<HashMap<TableId, Arc<Mutex<TableSlot>>>>,
    builder: SceneBuilder,
    prompt_log: Option<Arc<Mutex<PromptLogger>>>,
    table_ttl: Duration,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::with_builder(SceneBuilder::new())
    }

    pub fn with_builder(builder: SceneBuilder) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            builder,
            prompt_log: None,
            table_ttl: DEFAULT_TABLE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.table_ttl = ttl;
        self
    }

    pub fn table_ttl(&self) -> Duration {
        self.table_ttl
    }

    pub fn with_prompt_log(mut self, logger: Arc<Mutex<PromptLogger>>) -> Self {
        self.prompt_log = Some(logger);
        self
    }

    /// Validates `players` and registers a new table with a fresh hand.
    pub fn create_table(
        &self,
        players: Vec<Player>,
    ) -> Result<(TableId, TableSummary), TableError> {
        let mut advisor = HandAdvisor::with_builder(self.builder.clone());
        let summary = advisor.setup(players)?;
        let id = Uuid::new_v4().to_string();

        {
            let mut guard = self
                .tables
                .write()
                .map_err(|_| TableError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::new(Mutex::new(TableSlot::new(advisor))));
        }

        tracing::info!(
            table_id = %id,
            players = summary.total_players,
            dealer_seat = summary.dealer_seat,
            "table created"
        );
        Ok((id, summary))
    }

    /// Starts a new hand on an existing table.
    pub fn setup_table(
        &self,
        id: &TableId,
        players: Vec<Player>,
    ) -> Result<TableSummary, TableError> {
        let table = self.get_table(id)?;
        let summary = lock(&table)?.touch().setup(players)?;
        tracing::info!(table_id = %id, players = summary.total_players, "new hand set up");
        Ok(summary)
    }

    /// Renders the scene description for the table's current data and
    /// appends it to the prompt log when one is configured.
    ///
    /// The table stays locked until the record is written, so log lines for
    /// one table are in render order.
    pub fn advise(
        &self,
        id: &TableId,
        players: Vec<Player>,
        cards: &CommunityCards,
    ) -> Result<Advice, TableError> {
        let table = self.get_table(id)?;
        let mut slot = lock(&table)?;
        let advice = slot.touch().advise(players, cards)?;

        tracing::debug!(
            table_id = %id,
            stage = advice.stage.as_str(),
            first_prompt = advice.first_prompt,
            "advice rendered"
        );
        self.log_prompt(id, &advice);
        drop(slot);
        Ok(advice)
    }

    pub fn reset(&self, id: &TableId) -> Result<(), TableError> {
        let table = self.get_table(id)?;
        lock(&table)?.touch().reset();
        tracing::info!(table_id = %id, "table reset");
        Ok(())
    }

    pub fn status(&self, id: &TableId) -> Result<TableStatus, TableError> {
        let table = self.get_table(id)?;
        let slot = lock(&table)?;
        let advisor = &slot.advisor;
        let session = advisor.state().session();
        Ok(TableStatus {
            table_id: id.clone(),
            active: advisor.is_active(),
            stage: session.map(|s| s.stage()),
            phase: session.map(|s| s.phase()),
            pot: session.map_or(0, |s| s.pot()),
            players: session.map(|s| s.players().to_vec()).unwrap_or_default(),
        })
    }

    pub fn delete_table(&self, id: &TableId) -> Result<(), TableError> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        if guard.remove(id).is_none() {
            return Err(TableError::NotFound(id.clone()));
        }
        tracing::info!(table_id = %id, "table deleted");
        Ok(())
    }

    pub fn active_tables(&self) -> Vec<TableId> {
        self.tables
            .read()
            .map(|guard| guard.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Drops every table idle for longer than the TTL and returns how many
    /// were removed. A table locked by a request in flight is never idle.
    pub fn cleanup_expired_tables(&self) -> usize {
        let mut expired = Vec::new();
        {
            let mut guard = match self.tables.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, table| {
                let idle = match table.try_lock() {
                    Ok(slot) => slot.last_active.elapsed() >= self.table_ttl,
                    Err(_) => false,
                };
                if idle {
                    expired.push(id.clone());
                }
                !idle
            });
        }

        for id in &expired {
            tracing::info!(table_id = %id, "table expired");
        }
        expired.len()
    }

    fn get_table(&self, id: &TableId) -> Result<Arc<Mutex<TableSlot>>, TableError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.clone()))
    }

    // A failed write never fails the request; the prompt was rendered.
    fn log_prompt(&self, id: &TableId, advice: &Advice) {
        let Some(logger) = &self.prompt_log else {
            return;
        };
        let record = PromptRecord::from_advice(Some(id), advice);
        let result = match logger.lock() {
            Ok(mut logger) => logger.write(&record),
            Err(_) => Err(std::io::Error::other("prompt log lock poisoned")),
        };
        if let Err(err) = result {
            tracing::warn!(table_id = %id, error = %err, "prompt log write failed");
        }
    }
}

fn lock(table: &Mutex<TableSlot>) -> Result<MutexGuard<'_, TableSlot>, TableError> {
    table.lock().map_err(|_| TableError::StoragePoisoned)
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table not found: {0}")]
    NotFound(TableId),
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
    #[error("Table storage poisoned")]
    StoragePoisoned,
    #[error("Table worker failed: {0}")]
    Worker(String),
}

impl IntoErrorResponse for TableError {
    fn status_code(&self) -> StatusCode {
        match self {
            TableError::NotFound(_) => StatusCode::NOT_FOUND,
            TableError::Advisor(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Resolution | ErrorKind::Render => StatusCode::UNPROCESSABLE_ENTITY,
            },
            TableError::StoragePoisoned | TableError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TableError::NotFound(_) => "table_not_found",
            TableError::Advisor(err) => match err.kind() {
                ErrorKind::Validation => "validation_failed",
                ErrorKind::Resolution => "position_unresolved",
                ErrorKind::Render => "render_failed",
            },
            TableError::StoragePoisoned => "table_storage_error",
            TableError::Worker(_) => "table_worker_failed",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            TableError::NotFound(id) => Some(serde_json::json!({ "table_id": id })),
            TableError::Advisor(err) => Some(serde_json::json!({ "kind": err.kind() })),
            TableError::StoragePoisoned | TableError::Worker(_) => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::StoragePoisoned => ErrorSeverity::Critical,
            TableError::Worker(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
