//! Shared event recorder for integration tests.

#![allow(dead_code)]

use h1frame_http::{FramingError, PaddedBuffer, Request, StreamHandler, StreamParser};

/// One handler event, with borrowed data copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Request {
        method: Vec<u8>,
        url: Vec<u8>,
        headers: Vec<(Vec<u8>, Vec<u8>)>,
    },
    Body(Vec<u8>, bool),
    Error(FramingError),
}

impl Event {
    pub fn url(&self) -> Option<&[u8]> {
        match self {
            Self::Request { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl StreamHandler for Recorder {
    fn on_request(&mut self, request: &Request<'_>) {
        self.events.push(Event::Request {
            method: request.method().to_vec(),
            url: request.url().to_vec(),
            headers: request
                .headers()
                .map(|h| (h.name().to_vec(), h.value().to_vec()))
                .collect(),
        });
    }

    fn on_body_chunk(&mut self, chunk: &[u8], last: bool) {
        self.events.push(Event::Body(chunk.to_vec(), last));
    }

    fn on_error(&mut self, error: FramingError) {
        self.events.push(Event::Error(error));
    }
}

impl Recorder {
    pub fn requests(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Request { .. }))
            .count()
    }

    pub fn body_chunks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Body(..)))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Error(_)))
            .count()
    }
}

/// Feeds `chunks` one read at a time through a fresh parser.
pub fn run_chunks(parser: &mut StreamParser, chunks: &[&[u8]]) -> Recorder {
    let mut recorder = Recorder::default();
    let mut buffer = PaddedBuffer::default();
    for chunk in chunks {
        buffer.extend(chunk);
        parser.consume(&mut buffer, &mut recorder);
    }
    recorder
}

/// Feeds `input` split at the given offsets.
pub fn run_split(input: &[u8], offsets: &[usize]) -> Recorder {
    let mut chunks = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    for &offset in offsets {
        chunks.push(&input[start..offset]);
        start = offset;
    }
    chunks.push(&input[start..]);
    run_chunks(&mut StreamParser::new(), &chunks)
}

/// Merges consecutive body chunks so that runs fed with different read
/// boundaries compare equal.
pub fn coalesce(events: Vec<Event>) -> Vec<Event> {
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    for event in events {
        if let (Some(Event::Body(bytes, last)), Event::Body(more, more_last)) =
            (out.last_mut(), &event)
        {
            bytes.extend_from_slice(more);
            *last = *more_last;
            continue;
        }
        out.push(event);
    }
    out
}
