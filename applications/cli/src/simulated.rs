//! Simulated audio output
//!
//! The terminal has no speaker, so each element is a clock task that advances
//! a playhead and reports progress the way a real media element would.

use groupcast_core::types::Track;
use groupcast_playback::{gain_for, AudioBackend, AudioElement, AudioEvent, AudioEventSink};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace};

const TICK: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum Control {
    Play,
    Pause,
    Seek(f64),
    Volume(u8),
}

/// Backend whose elements play silence in real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedBackend;

impl AudioBackend for SimulatedBackend {
    fn create(&self, track: &Track, sink: AudioEventSink) -> Result<Box<dyn AudioElement>, String> {
        if track.source_locator.is_empty() {
            return Err(format!("track {} has no stream locator", track.id));
        }

        debug!(track_id = %track.id, epoch = sink.epoch(), "opening simulated stream");

        let (tx, rx) = mpsc::unbounded_channel();
        let duration = f64::from(track.duration_seconds);
        let handle = tokio::spawn(run_clock(duration, sink, rx));

        Ok(Box::new(SimulatedElement {
            control: Some(tx),
            handle: Some(handle),
        }))
    }
}

struct SimulatedElement {
    control: Option<mpsc::UnboundedSender<Control>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SimulatedElement {
    fn send(&self, control: Control) {
        if let Some(tx) = &self.control {
            let _ = tx.send(control);
        }
    }
}

impl AudioElement for SimulatedElement {
    fn play(&mut self) {
        self.send(Control::Play);
    }

    fn pause(&mut self) {
        self.send(Control::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.send(Control::Seek(seconds));
    }

    fn set_volume(&mut self, level: u8) {
        self.send(Control::Volume(level));
    }

    fn dispose(&mut self) {
        self.control = None;
        // Aborting guarantees the clock cannot emit after we return
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SimulatedElement {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_clock(
    duration: f64,
    sink: AudioEventSink,
    mut control: mpsc::UnboundedReceiver<Control>,
) {
    let mut playing = false;
    let mut position = 0.0_f64;
    let mut ticker = tokio::time::interval(TICK);

    if !sink.emit(AudioEvent::CanPlay) {
        return;
    }

    loop {
        tokio::select! {
            message = control.recv() => {
                let Some(message) = message else { break };
                match message {
                    Control::Play => {
                        if position >= duration {
                            position = 0.0;
                        }
                        playing = true;
                    }
                    Control::Pause => playing = false,
                    Control::Seek(seconds) => {
                        position = seconds.clamp(0.0, duration);
                        if !sink.emit(AudioEvent::TimeUpdate(position)) {
                            break;
                        }
                    }
                    Control::Volume(level) => {
                        trace!(level, gain = gain_for(level), "simulated output gain");
                    }
                }
            }
            _ = ticker.tick(), if playing => {
                position = (position + TICK.as_secs_f64()).min(duration);
                if !sink.emit(AudioEvent::TimeUpdate(position)) {
                    break;
                }
                if position >= duration {
                    playing = false;
                    if !sink.emit(AudioEvent::Ended) {
                        break;
                    }
                }
            }
        }
    }
}
