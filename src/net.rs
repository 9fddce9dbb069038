//! Telemetry uploader: one HTTP/1.1 GET per reading, no keep-alive.
//!
//! The upload pipeline is a linear state machine: resolve the upload
//! host, connect, write the fixed request, wait for the first response
//! bytes, close. Failures are terminal for the current attempt only; the
//! next timer tick or button press starts over from `Idle`.

use core::fmt::Write;

use embassy_net::{Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer};
use embedded_io_async::Write as AsyncWrite;
use heapless::String;

use crate::config;

pub const REQUEST_MAX: usize = 256;

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    ResolvingDns,
    Connecting,
    Sending,
    AwaitingResponse,
    Closed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    DnsFailed,
    ConnectFailed,
    ConnectionLost,
}

impl UploadError {
    /// Status text shown on the OLED.
    pub fn message(self) -> &'static str {
        match self {
            UploadError::DnsFailed => "DNS not resolved",
            UploadError::ConnectFailed => "TCP connect error",
            UploadError::ConnectionLost => "Connection lost",
        }
    }
}

/// Render the fixed upload request.
///
/// The reading is rounded to two decimals; the server closes the
/// connection after one response (`Connection: close`).
pub fn format_request(api_key: &str, temperature: f32, host: &str) -> String<REQUEST_MAX> {
    let mut request = String::new();
    let _ = write!(
        request,
        "GET /update?api_key={}&field1={:.2} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        api_key, temperature, host
    );
    request
}

/// Owns the socket buffers and the current pipeline phase.
///
/// `upload` takes `&mut self` and the socket never outlives the call, so
/// at most one connection exists at any time.
pub struct Uploader<'a> {
    stack: Stack<'a>,
    phase: UploadPhase,
    rx_buffer: [u8; RX_BUFFER_SIZE],
    tx_buffer: [u8; TX_BUFFER_SIZE],
}

impl<'a> Uploader<'a> {
    pub fn new(stack: Stack<'a>) -> Self {
        Self {
            stack,
            phase: UploadPhase::Idle,
            rx_buffer: [0; RX_BUFFER_SIZE],
            tx_buffer: [0; TX_BUFFER_SIZE],
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Run one upload attempt to completion.
    ///
    /// No retry and no backoff: a DNS or connect failure surfaces
    /// immediately and no socket is left open.
    pub async fn upload(&mut self, temperature: f32) -> Result<(), UploadError> {
        self.phase = UploadPhase::ResolvingDns;
        let addresses = self
            .stack
            .dns_query(config::UPLOAD_HOST, DnsQueryType::A)
            .await
            .map_err(|_| self.fail(UploadError::DnsFailed))?;
        let address = addresses
            .first()
            .copied()
            .ok_or_else(|| self.fail(UploadError::DnsFailed))?;

        self.phase = UploadPhase::Connecting;
        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        if socket.connect((address, config::UPLOAD_PORT)).await.is_err() {
            drop(socket);
            return Err(self.fail(UploadError::ConnectFailed));
        }

        self.phase = UploadPhase::Sending;
        let request = format_request(config::API_KEY, temperature, config::UPLOAD_HOST);
        // Write completion is not separately observed; a short response
        // read follows either way.
        let _ = socket.write_all(request.as_bytes()).await;
        let _ = socket.flush().await;

        self.phase = UploadPhase::AwaitingResponse;
        let mut response = [0u8; 256];
        // Any received data counts as a delivered upload, and a clean
        // remote close (read of zero) is the normal end of response. A
        // socket error (reset, aborted connection) is neither. The
        // status line is not parsed, so an HTTP error still reads as
        // sent; see DESIGN.md.
        let outcome = socket.read(&mut response).await;

        Timer::after(Duration::from_millis(50)).await;
        socket.close();
        Timer::after(Duration::from_millis(50)).await;
        socket.abort();
        drop(socket);

        if outcome.is_err() {
            return Err(self.fail(UploadError::ConnectionLost));
        }

        self.phase = UploadPhase::Closed;
        Ok(())
    }

    fn fail(&mut self, error: UploadError) -> UploadError {
        self.phase = UploadPhase::Failed;
        error
    }
}
