//! Background music and sound effects.
//!
//! Clips are read and test-decoded once when the game starts, so a missing
//! or broken file is reported right away with its path instead of the
//! first time the snake eats an apple. Playback itself is fire-and-forget:
//! a failure to start a sound is logged and the game goes on.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::conf::AssetConf;
use crate::error::{GameError, GameResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The snake ate an apple.
    Ding,
    /// The snake hit a wall or itself.
    Crash,
}

pub trait Audio {
    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn play_effect(&mut self, effect: Effect);
    fn stop(&mut self);
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn play_music(&mut self) {
        (**self).play_music()
    }

    fn pause_music(&mut self) {
        (**self).pause_music()
    }

    fn resume_music(&mut self) {
        (**self).resume_music()
    }

    fn play_effect(&mut self, effect: Effect) {
        (**self).play_effect(effect)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Opens the audio backend described by `assets`.
///
/// Missing or undecodable clips are an error. A machine without an output
/// device gets a `Silent` backend and a warning in the log.
pub fn open(assets: &AssetConf) -> GameResult<Box<dyn Audio>> {
    if !assets.audio {
        info!("Audio disabled in config");
        return Ok(Box::new(Silent));
    }

    let clips = Clips {
        music: Clip::load(&assets.background_music)?,
        ding: Clip::load(&assets.ding)?,
        crash: Clip::load(&assets.crash)?,
    };

    match RodioAudio::new(clips) {
        Ok(audio) => {
            info!("Audio output opened");
            Ok(Box::new(audio))
        }
        Err(e) => {
            warn!("{}; continuing without sound", e);
            Ok(Box::new(Silent))
        }
    }
}

/// An encoded audio file kept in memory.
struct Clip {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl Clip {
    fn load(path: &Path) -> GameResult<Clip> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GameError::ResourceNotFound(path.to_owned()),
            _ => GameError::ResourceLoadError(path.to_owned(), e.to_string()),
        })?;

        let clip = Clip { path: path.to_owned(), bytes: Arc::from(bytes) };
        clip.decoder()?;
        Ok(clip)
    }

    fn decoder(&self) -> GameResult<Decoder<Cursor<Arc<[u8]>>>> {
        Decoder::new(Cursor::new(self.bytes.clone()))
            .map_err(|e| GameError::ResourceLoadError(self.path.clone(), e.to_string()))
    }
}

struct Clips {
    music: Clip,
    ding: Clip,
    crash: Clip,
}

pub struct RodioAudio {
    // Dropping the stream silences every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    clips: Clips,
}

impl RodioAudio {
    fn new(clips: Clips) -> GameResult<RodioAudio> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;
        Ok(RodioAudio { _stream: stream, handle, music, clips })
    }
}

impl Audio for RodioAudio {
    fn play_music(&mut self) {
        match self.clips.music.decoder() {
            Ok(source) => {
                self.music.stop();
                self.music = match Sink::try_new(&self.handle) {
                    Ok(sink) => sink,
                    Err(e) => {
                        warn!("Unable to play background music: {}", e);
                        return;
                    }
                };
                self.music.append(source);
            }
            Err(e) => warn!("{}", e),
        }
    }

    fn pause_music(&mut self) {
        self.music.pause();
    }

    fn resume_music(&mut self) {
        self.music.play();
    }

    fn play_effect(&mut self, effect: Effect) {
        let clip = match effect {
            Effect::Ding => &self.clips.ding,
            Effect::Crash => &self.clips.crash,
        };

        let source = match clip.decoder() {
            Ok(source) => source,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => warn!("Unable to play {:?}: {}", effect, e),
        }
    }

    fn stop(&mut self) {
        self.music.stop();
    }
}

/// Plays nothing.
pub struct Silent;

impl Audio for Silent {
    fn play_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn play_effect(&mut self, _effect: Effect) {}
    fn stop(&mut self) {}
}
