/// Audio sign cue
///
/// The cue is an external collaborator of the draw: it plays after a
/// successful sign, fire-and-forget. Playback failure is logged and
/// swallowed; it never affects the draw's result and is never awaited.
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::CueError;

/// Something that can sound a cue when a sign is drawn
pub trait SignCue {
    fn play(&self);
}

/// No-op cue for headless runs, tests, or when audio init fails
#[derive(Debug, Default)]
pub struct SilentCue;

impl SignCue for SilentCue {
    fn play(&self) {}
}

/// Short synthesized tone, the default cue
pub struct BeepCue {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    volume: f32,
}

impl BeepCue {
    const FREQUENCY_HZ: f32 = 880.0;
    const DURATION_MS: u64 = 150;

    pub fn new(volume: f32) -> Result<Self, CueError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| CueError::StreamInitFailed(Box::new(e)))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl SignCue for BeepCue {
    fn play(&self) {
        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("Cue couldn't play: {}", e);
                return;
            }
        };

        let source = SineWave::new(Self::FREQUENCY_HZ)
            .take_duration(Duration::from_millis(Self::DURATION_MS))
            .amplify(self.volume);

        sink.append(source);
        sink.detach();
    }
}

/// User-supplied cue audio file, preloaded into memory and decode-verified
/// at construction so playback never touches the filesystem
pub struct FileCue {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    audio_data: Vec<u8>,
    volume: f32,
}

impl FileCue {
    pub fn new<P: AsRef<Path>>(path: P, volume: f32) -> Result<Self, CueError> {
        let path = path.as_ref();
        let audio_data = std::fs::read(path).map_err(|e| CueError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        // Verify the audio can be decoded before accepting it
        let cursor = std::io::Cursor::new(audio_data.clone());
        let decoder = Decoder::new(cursor).map_err(|e| CueError::DecodeFailed(Box::new(e)))?;
        let _ = decoder.count();

        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| CueError::StreamInitFailed(Box::new(e)))?;

        tracing::info!(
            "Preloaded cue audio file: {} ({} bytes)",
            path.display(),
            audio_data.len()
        );

        Ok(Self {
            _stream: stream,
            stream_handle,
            audio_data,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl SignCue for FileCue {
    fn play(&self) {
        // rodio's Decoder requires owned data with 'static lifetime
        let cursor = std::io::Cursor::new(self.audio_data.clone());
        let decoder = match Decoder::new(cursor) {
            Ok(decoder) => decoder,
            Err(e) => {
                tracing::warn!("Cue couldn't play: {}", e);
                return;
            }
        };

        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("Cue couldn't play: {}", e);
                return;
            }
        };

        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Audible cues need real audio hardware, so tests cover the silent path
    // and construction failures only.

    #[test]
    fn test_silent_cue_is_noop() {
        let cue = SilentCue;
        cue.play();
    }

    #[test]
    fn test_file_cue_missing_file() {
        let result = FileCue::new("/does/not/exist.mp3", 0.3);
        assert!(matches!(result, Err(CueError::LoadFailed { .. })));
    }
}
