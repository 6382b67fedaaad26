//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::env;
use std::ffi::OsString;
use std::io;
use std::rc::Rc;

use tokio::sync::{Mutex, MutexGuard};

use crate::aws::ProviderError;
use crate::command::{CommandError, CommandOutput, CommandRunner};
use crate::confirm::{Confirmation, is_affirmative};
use crate::volume::{Volume, VolumeInventory};

/// Scripted command runner that returns pre-seeded outputs in FIFO order.
///
/// Used to drive deterministic command outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRunner {
    responses: Rc<RefCell<VecDeque<CommandOutput>>>,
    invocations: Rc<RefCell<Vec<CommandInvocation>>>,
}

/// Records a single invocation made through [`ScriptedRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandInvocation {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<OsString>,
}

impl CommandInvocation {
    /// Returns a shell-like command string for assertions.
    #[must_use]
    pub fn command_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(
            self.args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }
}

impl ScriptedRunner {
    /// Creates a new runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.borrow().clone()
    }

    /// Pushes a successful exit status with empty output.
    pub fn push_success(&self) {
        self.push_output(Some(0), "", "");
    }

    /// Pushes an `aws` style API error for the given operation.
    pub fn push_api_error(&self, code: &str, operation: &str, message: &str) {
        self.push_output(
            Some(254),
            "",
            format!("\nAn error occurred ({code}) when calling the {operation} operation: {message}\n"),
        );
    }

    /// Pushes an explicit command output response.
    pub fn push_output(
        &self,
        code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        self.responses.borrow_mut().push_back(CommandOutput {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, CommandError> {
        self.invocations.borrow_mut().push(CommandInvocation {
            program: program.to_owned(),
            args: args.to_vec(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_owned(),
                message: String::from("no scripted response available"),
            })
    }
}

/// Produces a minimal JSON payload matching `aws ec2 describe-volumes`.
#[must_use]
pub fn json_volumes(volumes: &[(&str, u32, &str)]) -> String {
    let items = volumes
        .iter()
        .map(|(id, size, zone)| {
            format!(
                "{{\"VolumeId\":\"{id}\",\"Size\":{size},\"AvailabilityZone\":\"{zone}\",\
                 \"State\":\"available\",\"VolumeType\":\"gp3\",\"Attachments\":[]}}"
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("{{\"Volumes\":[{items}]}}")
}

/// Builds an `available` volume record.
#[must_use]
pub fn available_volume(id: &str, size_gib: u32, zone: &str) -> Volume {
    Volume::new(id, size_gib, zone, crate::volume::AVAILABLE_STATUS)
}

/// In-memory [`VolumeInventory`] with scripted listing and per-volume delete
/// failures. Clones share state so tests can inspect calls afterwards.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInventory {
    listing: Rc<RefCell<Option<Result<Vec<Volume>, ProviderError>>>>,
    failures: Rc<RefCell<HashMap<String, ProviderError>>>,
    list_calls: Rc<RefCell<Vec<String>>>,
    delete_calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl ScriptedInventory {
    /// Creates an inventory that lists `volumes`.
    #[must_use]
    pub fn with_volumes(volumes: Vec<Volume>) -> Self {
        let inventory = Self::default();
        *inventory.listing.borrow_mut() = Some(Ok(volumes));
        inventory
    }

    /// Creates an inventory whose listing fails with `err`.
    #[must_use]
    pub fn failing(err: ProviderError) -> Self {
        let inventory = Self::default();
        *inventory.listing.borrow_mut() = Some(Err(err));
        inventory
    }

    /// Makes deletion of `volume_id` fail with `err`.
    pub fn fail_delete(&self, volume_id: &str, err: ProviderError) {
        self.failures.borrow_mut().insert(volume_id.to_owned(), err);
    }

    /// Regions passed to `list_available`, in call order.
    #[must_use]
    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.borrow().clone()
    }

    /// Volume identifiers passed to `delete_volume`, in call order.
    #[must_use]
    pub fn deleted_ids(&self) -> Vec<String> {
        self.delete_calls
            .borrow()
            .iter()
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// `(region, volume_id)` pairs passed to `delete_volume`.
    #[must_use]
    pub fn delete_calls(&self) -> Vec<(String, String)> {
        self.delete_calls.borrow().clone()
    }
}

impl VolumeInventory for ScriptedInventory {
    type Error = ProviderError;

    fn list_available(&self, region: &str) -> Result<Vec<Volume>, Self::Error> {
        self.list_calls.borrow_mut().push(region.to_owned());
        self.listing
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn delete_volume(&self, region: &str, volume_id: &str) -> Result<(), Self::Error> {
        self.delete_calls
            .borrow_mut()
            .push((region.to_owned(), volume_id.to_owned()));
        self.failures
            .borrow()
            .get(volume_id)
            .cloned()
            .map_or(Ok(()), Err)
    }
}

/// [`Confirmation`] that answers every prompt with a fixed operator reply.
#[derive(Clone, Debug, Default)]
pub struct ScriptedConfirmation {
    reply: String,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirmation {
    /// Creates a confirmation that replies with `reply` as typed.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Rc::default(),
        }
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_owned());
        Ok(is_affirmative(&self.reply))
    }
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::const_new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    pub async fn set_vars(pairs: &[(&str, &str)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
