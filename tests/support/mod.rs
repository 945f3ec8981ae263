use anyhow::{Context, Result, bail};
use filterwire::{CapabilityInterface, FilterTarget, ParamType, ParameterSpec};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

/// One call observed by a [`RecordingFilter`].
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub filter: String,
    pub operation: String,
    pub arguments: Vec<Value>,
}

/// Call log shared between filters so tests can assert delivery order.
pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap_or_else(|err| err.into_inner()).clone()
}

/// Filter that records every call and optionally fails on one operation.
pub struct RecordingFilter {
    name: String,
    interfaces: Vec<Arc<CapabilityInterface>>,
    log: CallLog,
    fail_on: Option<String>,
}

impl RecordingFilter {
    pub fn new(name: &str, interfaces: Vec<Arc<CapabilityInterface>>, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            interfaces,
            log: Arc::clone(log),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, operation: &str) -> Self {
        self.fail_on = Some(operation.to_string());
        self
    }

    pub fn shared(self) -> Arc<dyn FilterTarget> {
        Arc::new(self)
    }
}

impl FilterTarget for RecordingFilter {
    fn interfaces(&self) -> &[Arc<CapabilityInterface>] {
        &self.interfaces
    }

    fn invoke(&self, operation: &str, arguments: &[Value]) -> Result<()> {
        self.log
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(Call {
                filter: self.name.clone(),
                operation: operation.to_string(),
                arguments: arguments.to_vec(),
            });
        if self.fail_on.as_deref() == Some(operation) {
            bail!("{} refused {operation}", self.name);
        }
        Ok(())
    }
}

/// Interface whose operations all take string parameters named `p0`, `p1`, ...
pub fn string_interface(id: &str, operations: &[(&str, usize)]) -> Arc<CapabilityInterface> {
    let mut builder = CapabilityInterface::builder(id);
    for (name, arity) in operations {
        builder = builder.operation(
            *name,
            (0..*arity).map(|i| ParameterSpec::new(ParamType::String).named(format!("p{i}"))),
        );
    }
    Arc::new(builder.build())
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// `filter-describe` with no catalog flag and no inherited catalog override.
pub fn describe_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_filter-describe"));
    cmd.env_remove("FILTERWIRE_CATALOG");
    cmd
}

pub fn describe_command(catalog: &Path) -> Command {
    let mut cmd = describe_binary();
    cmd.arg("--catalog").arg(catalog);
    cmd
}
