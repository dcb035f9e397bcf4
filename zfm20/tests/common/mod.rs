//! Scripted in-memory transport for link tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use zfm20::{Packet, PacketKind, Transport};
use zfm20_transport::{Error, Result};

/// Largest chunk handed out per `read`, so replies arrive in pieces
const READ_CHUNK: usize = 5;

/// I/O failure injected into one of the transport calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `write` fails without recording anything
    Write,
    /// `data_available` fails
    DataAvailable,
    /// `read` fails once this many bytes of the current reply were delivered
    ReadAfter(usize),
}

#[derive(Debug, Default)]
struct State {
    baud_rate: Option<u32>,
    written: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    delivered: usize,
    fault: Option<Fault>,
}

/// Transport that answers each written packet with the next queued reply
///
/// Clones share state, so a test keeps one handle to inspect what the link
/// wrote after handing the other to the link.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<State>>,
    reject_configure: bool,
    accept_writes: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            accept_writes: true,
            ..Self::default()
        }
    }

    /// A transport whose `configure` always fails
    pub fn rejecting_configure() -> Self {
        Self {
            reject_configure: true,
            ..Self::new()
        }
    }

    /// A transport whose `write` never accepts a byte
    pub fn refusing_writes() -> Self {
        Self {
            accept_writes: false,
            ..Self::new()
        }
    }

    /// Make every later call of the matching kind fail
    pub fn fail(&self, fault: Fault) -> &Self {
        self.state.lock().unwrap().fault = Some(fault);
        self
    }

    /// Stop injecting failures
    pub fn heal(&self) -> &Self {
        self.state.lock().unwrap().fault = None;
        self
    }

    /// Put bytes straight into the receive queue, as if they arrived late
    pub fn arrive(&self, bytes: &[u8]) -> &Self {
        self.state.lock().unwrap().pending.extend(bytes);
        self
    }

    /// Queue a raw reply frame
    pub fn reply(&self, frame: Vec<u8>) -> &Self {
        self.state.lock().unwrap().replies.push_back(frame);
        self
    }

    /// Queue a well-formed ACK frame from the default address
    pub fn ack(&self, payload: &[u8]) -> &Self {
        self.reply(ack_frame(payload))
    }

    /// Every packet written so far
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().written.clone()
    }

    /// Last packet written
    pub fn last_written(&self) -> Vec<u8> {
        self.written().last().cloned().expect("nothing written")
    }

    /// Instruction codes of every packet written so far
    pub fn commands(&self) -> Vec<u8> {
        self.written().iter().map(|frame| frame[9]).collect()
    }

    /// Baud rate passed to `configure`
    pub fn baud_rate(&self) -> Option<u32> {
        self.state.lock().unwrap().baud_rate
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn configure(&mut self, baud_rate: u32) -> Result<()> {
        if self.reject_configure {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unsupported baud rate",
            )));
        }

        self.state.lock().unwrap().baud_rate = Some(baud_rate);
        Ok(())
    }

    fn discard_input(&mut self) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let dropped = state.pending.len();
        state.pending.clear();
        Ok(dropped)
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        if !self.accept_writes {
            return Ok(0);
        }

        let mut state = self.state.lock().unwrap();
        if state.fault == Some(Fault::Write) {
            return Err(injected(io::ErrorKind::BrokenPipe));
        }

        state.written.push(data.to_vec());
        state.delivered = 0;

        if let Some(reply) = state.replies.pop_front() {
            state.pending.extend(reply);
        }

        Ok(data.len())
    }

    async fn data_available(&mut self, wait: Duration) -> Result<bool> {
        let ready = {
            let state = self.state.lock().unwrap();
            if state.fault == Some(Fault::DataAvailable) {
                return Err(injected(io::ErrorKind::NotConnected));
            }
            !state.pending.is_empty()
        };
        if ready {
            return Ok(true);
        }

        tokio::time::sleep(wait).await;
        Ok(false)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let mut n = buf.len().min(READ_CHUNK).min(state.pending.len());

        if let Some(Fault::ReadAfter(limit)) = state.fault {
            if state.delivered >= limit {
                return Err(injected(io::ErrorKind::UnexpectedEof));
            }
            n = n.min(limit - state.delivered);
        }

        for slot in buf.iter_mut().take(n) {
            *slot = state.pending.pop_front().unwrap_or_default();
        }
        state.delivered += n;

        Ok(n)
    }

    fn name(&self) -> String {
        "scripted".to_string()
    }
}

fn injected(kind: io::ErrorKind) -> Error {
    Error::Io(io::Error::new(kind, "injected fault"))
}

/// ACK frame from the default address carrying `payload`
pub fn ack_frame(payload: &[u8]) -> Vec<u8> {
    Packet::with_payload(PacketKind::Ack, 0xFFFF_FFFF, payload.to_vec())
        .encode()
        .unwrap()
        .to_vec()
}
