/// Which UI control produced an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    TrackSelector,
    VolumeSlider,
}

/// A change/input event from a UI control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlEvent {
    pub control: Control,
    pub value: String,
}

impl ControlEvent {
    pub fn selector(id: impl Into<String>) -> Self {
        Self {
            control: Control::TrackSelector,
            value: id.into(),
        }
    }

    /// Carries `value` at full precision so fine steps still move.
    pub fn slider(value: f32) -> Self {
        Self {
            control: Control::VolumeSlider,
            value: value.to_string(),
        }
    }
}

/// A value handed to the adapter: either raw or wrapped in a control event.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlInput {
    Text(String),
    Number(f64),
    Event(ControlEvent),
}

impl ControlInput {
    /// The value as text, trimmed.
    pub fn text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Event(e) => e.value.trim().to_string(),
        }
    }

    /// The value as a volume, if it is numeric at all. Not clamped.
    pub fn volume(&self) -> Option<f32> {
        let v = match self {
            Self::Number(n) => *n as f32,
            Self::Text(s) => s.trim().parse::<f32>().ok()?,
            Self::Event(e) => e.value.trim().parse::<f32>().ok()?,
        };
        (!v.is_nan()).then_some(v)
    }
}

impl From<&str> for ControlInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ControlInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ControlInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for ControlInput {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<ControlEvent> for ControlInput {
    fn from(e: ControlEvent) -> Self {
        Self::Event(e)
    }
}
