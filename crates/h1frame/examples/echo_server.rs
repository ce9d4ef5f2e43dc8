//! Blocking echo server.
//!
//! Answers every request with its URL and closes the connection when the
//! request stream cannot be framed.
//!
//! ```bash
//! cargo run -p h1frame --example echo_server
//! curl http://127.0.0.1:8080/hello?x=1
//! ```

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

use h1frame::prelude::*;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

const READ_SIZE: usize = 16 * 1024;

/// Queues one response per request until the read has been consumed.
#[derive(Default)]
struct EchoConnection {
    responses: Vec<u8>,
    closed: bool,
}

impl StreamHandler for EchoConnection {
    fn on_request(&mut self, request: &Request<'_>) {
        let url = request.url();
        self.responses.extend_from_slice(
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n",
                url.len()
            )
            .as_bytes(),
        );
        self.responses.extend_from_slice(url);
    }

    fn on_body_chunk(&mut self, _chunk: &[u8], _last: bool) {}

    fn on_error(&mut self, error: FramingError) {
        warn!(%error, "closing connection");
        self.closed = true;
    }
}

fn serve(mut stream: TcpStream) -> io::Result<()> {
    let mut parser = StreamParser::new();
    let mut conn = EchoConnection::default();
    let mut buffer = PaddedBuffer::with_capacity(READ_SIZE);

    loop {
        let n = stream.read(buffer.spare_mut())?;
        if n == 0 {
            return Ok(());
        }
        buffer.advance(n);
        parser.consume(&mut buffer, &mut conn);

        if !conn.responses.is_empty() {
            stream.write_all(&conn.responses)?;
            conn.responses.clear();
        }
        if conn.closed {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    let listener = TcpListener::bind("127.0.0.1:8080")?;
    info!(addr = %listener.local_addr()?, "listening");

    for stream in listener.incoming() {
        let stream = stream?;
        let peer = stream.peer_addr().ok();
        if let Err(error) = serve(stream) {
            warn!(?peer, %error, "connection error");
        }
    }
    Ok(())
}
