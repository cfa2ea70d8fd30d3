use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gosterge_core::{
    GostergeError, Observation, ObservationRequest, ObservationSource, ObservationTable,
};

/// Instruction for how a symbol should be answered.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value.
    Return(T),
    /// Fail the whole request with the provided error.
    Fail(GostergeError),
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior<Vec<Observation>>>,
    requests: Vec<ObservationRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for a specific symbol.
    pub async fn set_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<Vec<Observation>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(symbol.into(), behavior);
    }

    /// Return a copy of every request received so far.
    pub async fn requests(&self) -> Vec<ObservationRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Symbols without a configured behavior are left out of the table.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ObservationSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn ObservationSource>, controller)
    }
}

#[async_trait]
impl ObservationSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn observations(
        &self,
        req: &ObservationRequest,
    ) -> Result<ObservationTable, GostergeError> {
        let rules: Vec<(String, MockBehavior<Vec<Observation>>)> = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            req.symbols
                .iter()
                .filter_map(|s| guard.rules.get(s).map(|b| (s.clone(), b.clone())))
                .collect()
        };

        let mut table = ObservationTable::new();
        for (symbol, behavior) in rules {
            match behavior {
                MockBehavior::Return(bars) => table.insert(symbol, bars),
                MockBehavior::Fail(e) => return Err(e),
            }
        }
        Ok(table)
    }
}
