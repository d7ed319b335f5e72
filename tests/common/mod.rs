#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use snowform::QueryExecutor;

/// Stands in for the warehouse: records every statement it is asked to run,
/// optionally failing instead.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    fail: bool,
}

impl RecordingExecutor {
    pub fn failing() -> Self {
        RecordingExecutor {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str, bindings: &[String]) -> anyhow::Result<()> {
        if self.fail {
            bail!("simulated warehouse failure");
        }
        self.calls.lock().unwrap().push((sql.to_string(), bindings.to_vec()));
        Ok(())
    }
}

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
