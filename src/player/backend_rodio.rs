use crate::player::{AudioEngine, AudioHandle, EngineEvent, HandleId};
use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use rodio::{
    ChannelCount, Decoder, OutputStream, OutputStreamBuilder, SampleRate, Sink, Source,
};
use std::{fs::File, io::BufReader, path::Path, time::Duration};
use tracing::{debug, trace};

pub struct RodioEngine {
    stream: OutputStream,
    events_tx: Sender<EngineEvent>,
    events_rx: Receiver<EngineEvent>,
}

impl RodioEngine {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .context("Could not open the default audio output")?;
        // Dropping the stream would otherwise print over the restored terminal
        stream.log_on_drop(false);

        let (events_tx, events_rx) = crossbeam_channel::unbounded();

        Ok(RodioEngine {
            stream,
            events_tx,
            events_rx,
        })
    }
}

impl AudioEngine for RodioEngine {
    type Handle = RodioHandle;

    fn create(&mut self, resource: &Path, id: HandleId) -> Result<RodioHandle> {
        let source = decode(resource)?;
        let duration = source.total_duration().unwrap_or_default();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(CompletionSource::new(source, id, self.events_tx.clone()));

        debug!(handle = %id, ?duration, "created sink");

        Ok(RodioHandle { id, sink, duration })
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events_rx.try_iter().collect()
    }
}

/// One sink per handle, so releasing a handle can never cut off another.
pub struct RodioHandle {
    id: HandleId,
    sink: Sink,
    duration: Duration,
}

impl AudioHandle for RodioHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn start(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.sink
            .try_seek(clamp_seek(position, self.duration))
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(())
    }

    fn release(self) {
        self.sink.stop();
    }
}

fn decode(resource: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(resource)
        .with_context(|| format!("Could not open {}", resource.display()))?;
    let len = file.metadata()?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_coarse_seek(true)
        .with_seekable(true);

    if let Some(ext) = resource.extension().and_then(|e| e.to_str()) {
        builder = builder.with_hint(&decoder_hint(ext));
    }

    builder
        .build()
        .with_context(|| format!("Could not decode {}", resource.display()))
}

// Unknown durations leave the position to the decoder
fn clamp_seek(position: Duration, duration: Duration) -> Duration {
    match duration.is_zero() {
        true => position,
        false => position.min(duration),
    }
}

fn decoder_hint(ext: &str) -> String {
    let ext = ext.to_lowercase();
    let hint = match ext.as_str() {
        "adif" | "adts" => "aac",
        "caf" => "audio/x-caf",
        "m4a" | "m4b" | "m4p" | "m4r" | "mp4" => "audio/mp4",
        "bit" | "mpga" => "mp3",
        "mka" | "mkv" => "audio/matroska",
        "oga" | "ogm" | "ogv" | "ogx" | "spx" => "audio/ogg",
        "wave" => "wav",
        other => other,
    };
    hint.to_string()
}

/// Passes samples through and reports the end of the stream once.
pub struct CompletionSource<I> {
    input: I,
    id: HandleId,
    events: Sender<EngineEvent>,
    finished: bool,
}

impl<I> CompletionSource<I> {
    pub fn new(input: I, id: HandleId, events: Sender<EngineEvent>) -> Self {
        CompletionSource {
            input,
            id,
            events,
            finished: false,
        }
    }
}

impl<I> Iterator for CompletionSource<I>
where
    I: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self.input.next() {
            Some(sample) => Some(sample),
            None => {
                if !self.finished {
                    self.finished = true;
                    trace!(handle = %self.id, "end of stream");
                    let _ = self.events.send(EngineEvent::Completed(self.id));
                }
                None
            }
        }
    }
}

impl<I> Source for CompletionSource<I>
where
    I: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.finished = false;
        self.input.try_seek(pos)
    }
}
