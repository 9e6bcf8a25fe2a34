use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 5] = ["password", "passwd", "secret", "token", "jwt"];

/// Replaces whitespace-separated fragments that look like credentials.
pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(|chunk| {
            if is_sensitive(chunk) {
                REDACTED
            } else {
                chunk
            }
        })
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

        match panic_info.location() {
            Some(location) => eprintln!(
                "chatterm panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            ),
            None => eprintln!("chatterm panic: {scrubbed}"),
        }
    }));
}

fn is_sensitive(chunk: &str) -> bool {
    let lowered = chunk.to_ascii_lowercase();
    SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
