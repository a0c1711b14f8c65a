//! Application state for the Attendance Evaluation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::evaluate::EngineOptions;
use crate::session::SessionCache;
use crate::store::{EmployeeDirectory, ManualMappingStore, MemoryStore, ScheduleStore};

/// Shared application state.
///
/// Holds the persistence collaborators behind trait objects, the session
/// cache and the engine options for the deployment.
#[derive(Clone)]
pub struct AppState {
    schedules: Arc<dyn ScheduleStore>,
    directory: Arc<dyn EmployeeDirectory>,
    mappings: Arc<dyn ManualMappingStore>,
    sessions: Arc<SessionCache>,
    options: EngineOptions,
}

impl AppState {
    /// Creates a new application state from the given collaborators.
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        directory: Arc<dyn EmployeeDirectory>,
        mappings: Arc<dyn ManualMappingStore>,
        options: EngineOptions,
    ) -> Self {
        Self {
            schedules,
            directory,
            mappings,
            sessions: Arc::new(SessionCache::new()),
            options,
        }
    }

    /// Creates an application state backed entirely by one in-memory store.
    pub fn in_memory(store: MemoryStore, options: EngineOptions) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store, options)
    }

    /// Returns the schedule store collaborator.
    pub fn schedules(&self) -> &dyn ScheduleStore {
        self.schedules.as_ref()
    }

    /// Returns the employee directory collaborator.
    pub fn directory(&self) -> &dyn EmployeeDirectory {
        self.directory.as_ref()
    }

    /// Returns the manual mapping collaborator.
    pub fn mappings(&self) -> &dyn ManualMappingStore {
        self.mappings.as_ref()
    }

    /// Returns the session cache.
    pub fn sessions(&self) -> &SessionCache {
        &self.sessions
    }

    /// Returns the engine options for this deployment.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}
