use std::collections::HashMap;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::config::AudioSettings;

use super::sink::{create_sink, open_decoder};
use super::types::{AudioCmd, LegacyOp, VoiceEvent};

/// The main voice's current sink.
struct Loaded {
    sink: Sink,
    source: String,
    ended: bool,
}

fn open_stream() -> Option<OutputStream> {
    match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
            // but noisy for a TUI app.
            stream.log_on_drop(false);
            info!("audio output opened");
            Some(stream)
        }
        Err(e) => {
            error!("no audio output device: {e}");
            None
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<VoiceEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = open_stream();
        let mut main: Option<Loaded> = None;
        let mut volume: f32 = 1.0;
        let mut legacy: HashMap<usize, Sink> = HashMap::new();

        let emit = |ev: VoiceEvent| {
            let _ = events.send(ev);
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Start {
                        token,
                        source,
                        volume: v,
                    } => {
                        // Never two sources in the main voice.
                        if let Some(old) = main.take() {
                            old.sink.stop();
                        }
                        volume = v;

                        let Some(out) = stream.as_ref() else {
                            emit(VoiceEvent::Rejected {
                                token,
                                reason: "no audio output device".to_string(),
                            });
                            continue;
                        };

                        match create_sink(out, &source, volume) {
                            Ok(sink) => {
                                sink.play();
                                debug!(token, source = %source, "voice started");
                                main = Some(Loaded {
                                    sink,
                                    source: source.clone(),
                                    ended: false,
                                });
                                emit(VoiceEvent::Started { token, source });
                            }
                            Err(e) => emit(VoiceEvent::Rejected {
                                token,
                                reason: e.to_string(),
                            }),
                        }
                    }
                    AudioCmd::Pause => {
                        if let Some(l) = main.as_ref() {
                            if !l.sink.is_paused() && !l.ended {
                                l.sink.pause();
                                emit(VoiceEvent::Paused {
                                    source: l.source.clone(),
                                });
                            }
                        }
                    }
                    AudioCmd::Rewind => {
                        if let Some(l) = main.as_ref() {
                            if let Err(e) = l.sink.try_seek(Duration::ZERO) {
                                debug!("rewind failed: {e}");
                            }
                        }
                    }
                    AudioCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(l) = main.as_ref() {
                            l.sink.set_volume(v);
                        }
                    }
                    AudioCmd::ResumeOutput => {
                        if stream.is_none() {
                            stream = open_stream();
                        }
                    }
                    AudioCmd::Preload {
                        slot,
                        source,
                        autoplay,
                    } => {
                        let Some(out) = stream.as_ref() else {
                            continue;
                        };
                        match create_sink(out, &source, 1.0) {
                            Ok(sink) => {
                                if autoplay {
                                    sink.play();
                                }
                                legacy.insert(slot, sink);
                            }
                            Err(e) => debug!(slot, "legacy voice not created: {e}"),
                        }
                    }
                    AudioCmd::Legacy { slot, op } => {
                        let Some(sink) = legacy.get(&slot) else {
                            continue;
                        };
                        match op {
                            LegacyOp::Pause => sink.pause(),
                            LegacyOp::Rewind => {
                                if let Err(e) = sink.try_seek(Duration::ZERO) {
                                    debug!(slot, "legacy rewind failed: {e}");
                                }
                            }
                            LegacyOp::SetVolume(v) => sink.set_volume(v),
                        }
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(l) = main.take() {
                            if !l.sink.is_paused() {
                                fade_out_sink(&l.sink, volume, fade_out_ms);
                            }
                            l.sink.stop();
                        }
                        for sink in legacy.values() {
                            sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    let Some(l) = main.as_mut() else {
                        continue;
                    };
                    if l.ended || l.sink.is_paused() || !l.sink.empty() {
                        continue;
                    }
                    if audio_settings.loop_track {
                        match open_decoder(&l.source) {
                            Ok(decoder) => {
                                l.sink.append(decoder);
                                continue;
                            }
                            Err(e) => warn!(source = %l.source, "cannot loop track: {e}"),
                        }
                    }
                    l.ended = true;
                    emit(VoiceEvent::Ended {
                        source: l.source.clone(),
                    });
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
