use crate::data::SpeechSettings;
use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Something that can say a phrase out loud.
pub trait Speaker {
    fn speak(&mut self, text: &str, language: &str) -> Result<()>;

    /// Collects finished background work. Called on every event-loop tick.
    fn reap(&mut self) {}
}

/// Speaks by spawning an external synthesizer such as `espeak-ng` or `say`.
/// Speech plays in the background; finished children are waited on by `reap`.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    running: Vec<Child>,
}

impl CommandSpeaker {
    pub fn from_settings(settings: &SpeechSettings) -> Self {
        CommandSpeaker {
            program: settings.command.clone(),
            args: settings.args.clone(),
            running: Vec::new(),
        }
    }

    /// Children spawned by `speak` that have not been reaped yet.
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// The argument list with `{text}` and `{lang}` filled in.
    pub(crate) fn render_args(&self, text: &str, language: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace("{text}", text).replace("{lang}", language))
            .collect()
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        self.reap();
        let args = self.render_args(text, language);
        let spawned = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run speech command '{}'", self.program));
        match spawned {
            Ok(child) => {
                let pid = child.id();
                self.running.push(child);
                info!(
                    program = %self.program,
                    pid,
                    language,
                    in_flight = self.running(),
                    "speech started"
                );
                Ok(())
            }
            Err(e) => {
                warn!(program = %self.program, "speech failed: {e:#}");
                Err(e)
            }
        }
    }

    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "speech finished");
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid = child.id(), "speech wait failed: {e}");
                false
            }
        });
    }
}

/// Keeps every request instead of producing sound. Clone `spoken` before
/// boxing the speaker to inspect it afterwards.
#[cfg(test)]
#[derive(Default, Debug)]
pub struct RecordingSpeaker {
    pub spoken: std::rc::Rc<std::cell::RefCell<Vec<(String, String)>>>,
    pub reaps: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        self.spoken
            .borrow_mut()
            .push((text.to_string(), language.to_string()));
        Ok(())
    }

    fn reap(&mut self) {
        self.reaps.set(self.reaps.get() + 1);
    }
}
