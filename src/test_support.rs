use crate::capability::chat::{ChatCapability, Health, RequestError};
use crate::capability::storage::{StorageCapability, StorageError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the backend and the storage file. Replies are
/// queued up front and handed out in order.
#[derive(Default)]
pub struct FakeWorker {
    items: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    health_replies: Mutex<VecDeque<Result<Health, RequestError>>>,
    answers: Mutex<VecDeque<Result<String, RequestError>>>,
    questions: Mutex<Vec<String>>,
    health_checks: Mutex<usize>,
}

impl FakeWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn reply_health(&self, reply: Result<Health, RequestError>) {
        self.health_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_answer(&self, reply: Result<String, RequestError>) {
        self.answers.lock().unwrap().push_back(reply);
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn health_checks(&self) -> usize {
        *self.health_checks.lock().unwrap()
    }
}

impl ChatCapability for FakeWorker {
    async fn check_health(&self) -> Result<Health, RequestError> {
        *self.health_checks.lock().unwrap() += 1;
        self.health_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RequestError::Network("no reply queued".to_string())))
    }

    async fn ask(&self, question: &str) -> Result<String, RequestError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RequestError::Network("no reply queued".to_string())))
    }
}

impl StorageCapability for FakeWorker {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.put(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn healthy(agent_ready: bool) -> Health {
    Health {
        status: "healthy".to_string(),
        agent_ready: Some(agent_ready),
    }
}
