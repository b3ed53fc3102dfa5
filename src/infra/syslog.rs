//! Syslog sink: one UDP datagram per formatted event, RFC 3164 style
//! (`<PRI>program: message`).

use std::{
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket},
};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::infra::{config::SyslogConfig, error::AppError};

const FACILITY_USER: u8 = 1;

#[derive(Debug)]
pub struct SyslogSink {
    socket: UdpSocket,
    program: String,
}

impl SyslogSink {
    pub fn connect(config: &SyslogConfig) -> Result<Self, AppError> {
        let target = format!("{}:{}", config.server, config.port);
        let socket = open_socket(&target).map_err(|source| AppError::LogSink {
            target: target.clone(),
            source,
        })?;

        Ok(Self {
            socket,
            program: config.program_name.clone(),
        })
    }

    fn datagram(&self, level: &Level) -> SyslogDatagram<'_> {
        SyslogDatagram {
            sink: self,
            priority: priority(level),
            buf: Vec::new(),
        }
    }
}

fn open_socket(target: &str) -> io::Result<UdpSocket> {
    let addr = target.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "syslog server did not resolve")
    })?;

    let local: SocketAddr = if addr.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(local)?;
    socket.connect(addr)?;
    Ok(socket)
}

/// `facility * 8 + severity`, facility fixed to `user`.
pub fn priority(level: &Level) -> u8 {
    let severity = match *level {
        Level::ERROR => 3,
        Level::WARN => 4,
        Level::INFO => 6,
        Level::DEBUG | Level::TRACE => 7,
    };

    FACILITY_USER * 8 + severity
}

impl<'a> MakeWriter<'a> for SyslogSink {
    type Writer = SyslogDatagram<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.datagram(&Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.datagram(meta.level())
    }
}

/// Buffers one formatted event and sends it when dropped.
pub struct SyslogDatagram<'a> {
    sink: &'a SyslogSink,
    priority: u8,
    buf: Vec<u8>,
}

impl Write for SyslogDatagram<'_> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SyslogDatagram<'_> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let line = String::from_utf8_lossy(&self.buf);
        let packet = format!(
            "<{}>{}: {}",
            self.priority,
            self.sink.program,
            line.trim()
        );

        // Delivery is best effort.
        let _ = self.sink.socket.send(packet.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tracing_subscriber::{layer::SubscriberExt, Registry};

    use super::*;

    #[test]
    fn priority_combines_user_facility_and_severity() {
        assert_eq!(priority(&Level::ERROR), 11);
        assert_eq!(priority(&Level::WARN), 12);
        assert_eq!(priority(&Level::INFO), 14);
        assert_eq!(priority(&Level::DEBUG), 15);
    }

    #[test]
    fn events_are_sent_as_prefixed_datagrams() {
        let receiver = UdpSocket::bind("127.0.0.1:0").expect("receiver should bind");
        receiver
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("timeout should be settable");
        let port = receiver.local_addr().expect("receiver address").port();

        let sink = SyslogSink::connect(&SyslogConfig {
            server: "127.0.0.1".to_owned(),
            port,
            program_name: "appbase-test".to_owned(),
        })
        .expect("sink should connect");

        let subscriber = Registry::default().with(
            tracing_subscriber::fmt::layer()
                .with_writer(sink)
                .with_ansi(false)
                .without_time()
                .with_level(false)
                .with_target(false),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("disk almost full");
        });

        let mut buf = [0u8; 512];
        let len = receiver.recv(&mut buf).expect("datagram should arrive");
        let packet = std::str::from_utf8(&buf[..len]).expect("datagram should be utf-8");

        assert_eq!(packet, "<12>appbase-test: disk almost full");
    }

    #[test]
    fn unresolvable_server_is_a_sink_error() {
        let error = SyslogSink::connect(&SyslogConfig {
            server: "no-such-host.invalid".to_owned(),
            port: 514,
            program_name: "appbase".to_owned(),
        })
        .expect_err("invalid host must fail");

        assert!(matches!(error, AppError::LogSink { .. }));
    }
}
