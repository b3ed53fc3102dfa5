use std::{ffi::OsStr, panic};

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 5] = ["password", "passwd", "pwd", "secret", "token"];

pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Command line as a single loggable string. Non-UTF-8 bytes are replaced
/// with U+FFFD.
pub fn redact_args<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .map(|arg| redact_chunk(&arg.as_ref().to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "appbase panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("appbase panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return match chunk.find(['=', ':']) {
            Some(split) => format!("{}{}", &chunk[..=split], REDACTED),
            None => REDACTED.to_owned(),
        };
    }

    redact_credential_pair(chunk).unwrap_or_else(|| chunk.to_owned())
}

/// `user/password@host...` keeps the user and host.
fn redact_credential_pair(chunk: &str) -> Option<String> {
    let at = chunk.find('@')?;
    let slash = chunk[..at].find('/')?;
    if slash == 0 || chunk[..slash].contains(':') {
        return None;
    }

    Some(format!("{}/{}{}", &chunk[..slash], REDACTED, &chunk[at..]))
}
