//! Rodio-based playback adapter
//!
//! `rodio::OutputStream` is not `Send`, so the stream and every sink live on
//! one dedicated thread. The async side talks to it over a command channel
//! and gets each answer back on a oneshot.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::{mpsc, oneshot};

use crate::application::ports::{LoadedClip, PlaybackError, PlaybackStatus, Player, SessionId};
use crate::domain::recording::Duration;

type Reply<T> = oneshot::Sender<Result<T, PlaybackError>>;

enum Command {
    Load {
        session: SessionId,
        uri: String,
        reply: Reply<Option<Duration>>,
    },
    Play(SessionId, Reply<()>),
    Pause(SessionId, Reply<()>),
    Seek(SessionId, Duration, Reply<()>),
    Stop(SessionId, Reply<()>),
    Release(SessionId, Reply<()>),
    Status(SessionId, Reply<PlaybackStatus>),
}

/// Player backed by the default output device
pub struct RodioPlayer {
    commands: mpsc::UnboundedSender<Command>,
    next_session: AtomicU64,
}

impl RodioPlayer {
    /// Spawn the playback thread. The device is opened lazily on first load.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = std::thread::Builder::new()
            .name("playback".into())
            .spawn(move || PlaybackThread::default().run(rx));
        if let Err(e) = spawned {
            // Every request will then fail with "Playback thread is gone"
            log::error!("Failed to spawn playback thread: {}", e);
        }

        Self {
            commands: tx,
            next_session: AtomicU64::new(1),
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, PlaybackError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(build(reply))
            .map_err(|_| PlaybackError::Failed("Playback thread is gone".into()))?;
        rx.await
            .map_err(|_| PlaybackError::Failed("Playback thread dropped the request".into()))?
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Player for RodioPlayer {
    async fn load(&self, uri: &str) -> Result<LoadedClip, PlaybackError> {
        let session = SessionId(self.next_session.fetch_add(1, Ordering::SeqCst));
        let uri = uri.to_string();
        let duration = self
            .request(|reply| Command::Load {
                session,
                uri,
                reply,
            })
            .await?;
        Ok(LoadedClip { session, duration })
    }

    async fn play(&self, session: SessionId) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Play(session, reply)).await
    }

    async fn pause(&self, session: SessionId) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Pause(session, reply)).await
    }

    async fn seek(&self, session: SessionId, position: Duration) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Seek(session, position, reply))
            .await
    }

    async fn stop(&self, session: SessionId) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Stop(session, reply)).await
    }

    async fn release(&self, session: SessionId) -> Result<(), PlaybackError> {
        self.request(|reply| Command::Release(session, reply)).await
    }

    async fn status(&self, session: SessionId) -> Result<PlaybackStatus, PlaybackError> {
        self.request(|reply| Command::Status(session, reply)).await
    }
}

/// One loaded clip
struct Entry {
    uri: String,
    sink: Sink,
    /// Set once `play` was requested; cleared by stop
    started: bool,
    /// Completion already reported through `status`
    finish_reported: bool,
}

#[derive(Default)]
struct PlaybackThread {
    output: Option<(OutputStream, OutputStreamHandle)>,
    entries: HashMap<SessionId, Entry>,
}

impl PlaybackThread {
    fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = rx.blocking_recv() {
            self.handle(command);
        }
        log::debug!("Playback thread exiting");
    }

    fn handle(&mut self, command: Command) {
        // A dropped receiver only means the caller stopped waiting
        match command {
            Command::Load {
                session,
                uri,
                reply,
            } => {
                let _ = reply.send(self.load(session, uri));
            }
            Command::Play(session, reply) => {
                let _ = reply.send(self.with_entry(session, |entry| {
                    refill(entry)?;
                    entry.started = true;
                    entry.finish_reported = false;
                    entry.sink.play();
                    Ok(())
                }));
            }
            Command::Pause(session, reply) => {
                let _ = reply.send(self.with_entry(session, |entry| {
                    entry.sink.pause();
                    Ok(())
                }));
            }
            Command::Seek(session, position, reply) => {
                let _ = reply.send(self.with_entry(session, |entry| {
                    refill(entry)?;
                    entry.finish_reported = false;
                    entry
                        .sink
                        .try_seek(position.as_std())
                        .map_err(|e| PlaybackError::SeekFailed(e.to_string()))
                }));
            }
            Command::Stop(session, reply) => {
                let _ = reply.send(self.with_entry(session, |entry| {
                    entry.sink.stop();
                    entry.started = false;
                    Ok(())
                }));
            }
            Command::Release(session, reply) => {
                let result = match self.entries.remove(&session) {
                    Some(entry) => {
                        entry.sink.stop();
                        Ok(())
                    }
                    None => Err(PlaybackError::UnknownSession(session.0)),
                };
                let _ = reply.send(result);
            }
            Command::Status(session, reply) => {
                let _ = reply.send(self.with_entry(session, |entry| Ok(status_of(entry))));
            }
        }
    }

    fn load(&mut self, session: SessionId, uri: String) -> Result<Option<Duration>, PlaybackError> {
        let (source, duration) = open_source(&uri)?;
        let handle = self.output_handle()?;
        let sink = Sink::try_new(handle).map_err(|e| PlaybackError::NoOutputDevice(e.to_string()))?;
        sink.pause();
        sink.append(source);

        self.entries.insert(
            session,
            Entry {
                uri,
                sink,
                started: false,
                finish_reported: false,
            },
        );
        Ok(duration)
    }

    fn output_handle(&mut self) -> Result<&OutputStreamHandle, PlaybackError> {
        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| PlaybackError::NoOutputDevice(e.to_string()))?;
            self.output = Some(output);
        }
        self.output
            .as_ref()
            .map(|(_, handle)| handle)
            .ok_or_else(|| PlaybackError::NoOutputDevice("output stream unavailable".into()))
    }

    fn with_entry<T>(
        &mut self,
        session: SessionId,
        f: impl FnOnce(&mut Entry) -> Result<T, PlaybackError>,
    ) -> Result<T, PlaybackError> {
        let entry = self
            .entries
            .get_mut(&session)
            .ok_or(PlaybackError::UnknownSession(session.0))?;
        f(entry)
    }
}

/// Decode `uri`, returning the source and its length if the decoder knows it
fn open_source(uri: &str) -> Result<(Decoder<BufReader<File>>, Option<Duration>), PlaybackError> {
    let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
    let file = File::open(path).map_err(|e| PlaybackError::LoadFailed {
        uri: uri.to_string(),
        message: e.to_string(),
    })?;
    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::UnsupportedFormat(format!("{}: {}", uri, e)))?;
    let duration = decoder.total_duration().map(Duration::from);
    Ok((decoder, duration))
}

/// A sink that ran dry needs its source appended again before play or seek.
/// The sink is paused first so a refill never starts audio on its own.
fn refill(entry: &mut Entry) -> Result<(), PlaybackError> {
    if entry.sink.empty() {
        let (source, _) = open_source(&entry.uri)?;
        entry.sink.pause();
        entry.sink.append(source);
    }
    Ok(())
}

fn status_of(entry: &mut Entry) -> PlaybackStatus {
    let finished = entry.started && entry.sink.empty();
    let did_just_finish = finished && !entry.finish_reported;
    if did_just_finish {
        entry.finish_reported = true;
    }

    PlaybackStatus {
        position: Duration::from(entry.sink.get_pos()),
        is_playing: entry.started && !entry.sink.is_paused() && !finished,
        did_just_finish,
    }
}
