//! Background fetches against the employee source.
//!
//! Each request runs on its own thread and reports back through a channel.
//! The UI loop drains completed fetches with [`Fetcher::try_next`]; nothing
//! blocks the loop while a request is in flight.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{info, warn};

use crate::domain::{EmployeeDetailRecord, EmployeeRecord, EmployeeSource, FetchResult};

/// Sequence number attached to each request.
pub type RequestId = u64;

#[derive(Debug)]
pub enum FetchEvent {
    Employees {
        request: RequestId,
        result: FetchResult<Vec<EmployeeRecord>>,
    },
    Detail {
        request: RequestId,
        id: u32,
        result: FetchResult<EmployeeDetailRecord>,
    },
}

pub struct Fetcher {
    source: Arc<dyn EmployeeSource>,
    tx: Sender<FetchEvent>,
    rx: Receiver<FetchEvent>,
    next_request: RequestId,
}

impl Fetcher {
    pub fn new(source: Arc<dyn EmployeeSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            next_request: 1,
        }
    }

    fn allocate(&mut self) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        request
    }

    pub fn fetch_employees(&mut self, limit: usize) -> RequestId {
        let request = self.allocate();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        info!(request, limit, "fetching employee list");
        thread::spawn(move || {
            let result = source.list_employees(limit);
            if let Err(err) = &result {
                warn!(request, %err, "employee list fetch failed");
            }
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(FetchEvent::Employees { request, result });
        });
        request
    }

    pub fn fetch_detail(&mut self, id: u32) -> RequestId {
        let request = self.allocate();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        info!(request, id, "fetching employee detail");
        thread::spawn(move || {
            let result = source.employee_detail(id);
            if let Err(err) = &result {
                warn!(request, id, %err, "employee detail fetch failed");
            }
            let _ = tx.send(FetchEvent::Detail { request, id, result });
        });
        request
    }

    /// A completed fetch, if one is waiting.
    pub fn try_next(&self) -> Option<FetchEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
