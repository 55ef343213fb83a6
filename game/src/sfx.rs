use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{info, warn};

use crate::settings::AudioSettings;

/// Default tick volume (0.0..=1.0).
pub const TICK_SFX_VOLUME: f32 = 0.35;
pub const TICK_FREQUENCY_HZ: f32 = 880.0;
pub const TICK_LENGTH: Duration = Duration::from_millis(40);

/// The countdown's audio cue. Playing is best-effort: implementations swallow their own
/// failures and must not block the caller.
pub trait TickCue {
    fn play(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl TickCue for SilentCue {
    fn play(&self) {}
}

/// Plays a short sine blip on the default output device.
///
/// The device is opened once; each `play` hands a detached sink to rodio's mixer thread.
pub struct RodioTickCue {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
}

impl RodioTickCue {
    pub fn try_new(volume: f32) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl TickCue for RodioTickCue {
    fn play(&self) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(self.volume);
        sink.append(SineWave::new(TICK_FREQUENCY_HZ).take_duration(TICK_LENGTH));
        sink.detach();
    }
}

/// Builds the cue for the configured audio settings, going silent when muted or when no
/// output device can be opened.
pub fn cue_from_settings(audio: &AudioSettings) -> Box<dyn TickCue> {
    let gain = audio.effective_tick_gain();
    if gain <= 0.0 {
        info!("tick sound muted");
        return Box::new(SilentCue);
    }
    match RodioTickCue::try_new(gain) {
        Ok(cue) => Box::new(cue),
        Err(err) => {
            warn!("no audio output, tick sound disabled: {err}");
            Box::new(SilentCue)
        }
    }
}
