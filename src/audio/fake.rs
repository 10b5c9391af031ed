//! In-memory voices for tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};

use super::types::RequestToken;
use super::voice::{PlaybackVoice, Voice};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Pause,
    Rewind,
    Volume(f32),
    Load(String),
    Start(RequestToken),
    Resume,
}

/// Records every call; start requests are answered by the test.
#[derive(Debug, Default)]
pub struct FakeVoice {
    pub calls: Vec<Call>,
    pub source: Option<String>,
    pub volume: Option<f32>,
    /// Make `start` fail to dispatch.
    pub refuse_start: bool,
    pub refuse_resume: bool,
}

impl FakeVoice {
    pub fn starts(&self) -> Vec<RequestToken> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Start(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn last_start(&self) -> Option<RequestToken> {
        self.starts().last().copied()
    }
}

impl Voice for FakeVoice {
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn rewind(&mut self) {
        self.calls.push(Call::Rewind);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = Some(volume);
        self.calls.push(Call::Volume(volume));
    }
}

impl PlaybackVoice for FakeVoice {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.calls.push(Call::Load(source.to_string()));
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn start(&mut self, token: RequestToken) -> Result<()> {
        if self.refuse_start {
            return Err(Error::ChannelClosed);
        }
        self.calls.push(Call::Start(token));
        Ok(())
    }

    fn resume_output(&mut self) -> Result<()> {
        self.calls.push(Call::Resume);
        if self.refuse_resume {
            return Err(Error::AudioOutput("suspended".to_string()));
        }
        Ok(())
    }
}

/// A legacy voice whose calls stay observable after boxing.
#[derive(Debug, Clone, Default)]
pub struct SharedVoice(pub Rc<RefCell<Vec<Call>>>);

impl SharedVoice {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }
}

impl Voice for SharedVoice {
    fn pause(&mut self) {
        self.0.borrow_mut().push(Call::Pause);
    }

    fn rewind(&mut self) {
        self.0.borrow_mut().push(Call::Rewind);
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().push(Call::Volume(volume));
    }
}
