//! Background music, looped forever through the default audio device.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr as _};
use rodio::{Decoder, OutputStream, Sink, Source as _};

pub type Track = Decoder<BufReader<File>>;

/// A single looping track that can be paused and resumed where it left off.
/// Without a track or an audio device it stays silent.
pub struct Music {
    // Dropping the stream closes the device, so it lives as long as the sink.
    _stream: Option<OutputStream>,
    sink: Option<Sink>,
}

impl Music {
    pub const fn silent() -> Self {
        Self {
            _stream: None,
            sink: None,
        }
    }

    /// Start looping `track` on the default output. Any failure is logged and
    /// leaves the music off.
    pub fn open(track: Option<&Path>) -> Self {
        let Some(path) = track else {
            return Self::silent();
        };
        match Self::try_open(path) {
            Ok(music) => {
                tracing::info!("Playing {}", path.display());
                music
            }
            Err(error) => {
                tracing::warn!("Could not start music, continuing without it: {error:?}");
                Self::silent()
            }
        }
    }

    fn try_open(path: &Path) -> Result<Self> {
        let source = decode(path)?;
        let mut stream = rodio::OutputStreamBuilder::open_default_stream()
            .wrap_err("Couldn't open the default audio output")?;
        // rodio otherwise prints to stderr on drop, straight over the scene.
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        Ok(Self::looping(Some(stream), sink, source))
    }

    fn looping(stream: Option<OutputStream>, sink: Sink, source: Track) -> Self {
        sink.append(source.repeat_infinite());
        sink.play();
        Self {
            _stream: stream,
            sink: Some(sink),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.sink.as_ref().is_some_and(Sink::is_paused)
    }

    /// Pause, or resume from where the pause happened. Does nothing when no
    /// music is loaded.
    pub fn toggle(&mut self) {
        let paused = self.is_paused();
        let Some(sink) = &self.sink else {
            return;
        };
        if paused {
            sink.play();
            tracing::info!("Music resumed");
        } else {
            sink.pause();
            tracing::info!("Music paused");
        }
    }
}

/// Open and decode an audio file.
pub fn decode(path: &Path) -> Result<Track> {
    let file =
        File::open(path).wrap_err_with(|| format!("Couldn't open {}", path.display()))?;
    Decoder::try_from(file).wrap_err_with(|| format!("Couldn't decode {}", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;
    use rodio::Source as _;

    /// A mono 16-bit PCM WAV file.
    fn write_wav(path: &Path, samples: &[i16]) {
        let data_len = (samples.len() * 2) as u32;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        std::fs::write(path, bytes).unwrap();
    }

    fn tune(directory: &Path) -> Track {
        let path = directory.join("tune.wav");
        write_wav(&path, &[0, 1000, -1000, 0].repeat(200));
        decode(&path).unwrap()
    }

    #[test]
    fn decodes_wav_files() {
        let directory = tempfile::tempdir().unwrap();
        let track = tune(directory.path());
        assert_eq!(track.channels(), 1);
        assert_eq!(track.sample_rate(), 8000);
    }

    #[test]
    fn undecodable_files_are_errors() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("song.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();
        assert!(decode(&path).is_err());
        assert!(decode(&directory.path().join("missing.ogg")).is_err());
    }

    #[test]
    fn toggling_without_music_does_nothing() {
        let mut music = Music::open(None);
        music.toggle();
        assert!(!music.is_paused());
        music.toggle();
        assert!(!music.is_paused());
    }

    #[test]
    fn pause_and_resume_keep_the_same_queued_track() {
        let directory = tempfile::tempdir().unwrap();
        let (sink, _output) = Sink::new();
        let mut music = Music::looping(None, sink, tune(directory.path()));
        assert!(!music.is_paused());

        music.toggle();
        assert!(music.is_paused());
        let sink = music.sink.as_ref().unwrap();
        assert_eq!(sink.len(), 1);

        music.toggle();
        assert!(!music.is_paused());
        // Resuming continues the queued loop rather than appending a new copy.
        assert_eq!(music.sink.as_ref().unwrap().len(), 1);
    }
}
