use std::{
    fs::{self, OpenOptions},
    io::Write,
    sync::Mutex,
};

pub const DEFAULT_LOG_PATH: &str = "/tmp/apple2.log";

static LOG_PATH: Mutex<Option<String>> = Mutex::new(None);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Info,
    Warn,
    Crit,
}

impl Severity {
    fn tag(self) -> &'static str {
        match self {
            Severity::Ok => "[ok]",
            Severity::Info => "[info]",
            Severity::Warn => "[warn]",
            Severity::Crit => "[crit]",
        }
    }
}

/// Open (creating if needed) the log file at `path`. Subsequent `log` calls
/// append to it; the file is never truncated across runs.
pub fn init_log(path: &str) {
    if fs::metadata(path).is_err() {
        // Ignore failures; `log` will surface them on the first write attempt.
        let _ = fs::File::create(path);
    }
    *LOG_PATH.lock().unwrap() = Some(path.to_string());
}

pub fn log(severity: Severity, text: &str) {
    let path = LOG_PATH
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

    let file = OpenOptions::new().create(true).write(true).append(true).open(&path);
    let mut file = match file {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = file.write_all(severity.tag().as_bytes());
    let _ = file.write_all(b" ");
    let _ = file.write_all(text.as_bytes());
    let _ = file.write_all(b"\n");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_severity_tag_and_message() {
        let path = std::env::temp_dir().join("apple2-core-test.log");
        let path = path.to_str().unwrap();
        let _ = std::fs::remove_file(path);

        init_log(path);
        log(Severity::Warn, "disk save failed");

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("[warn] disk save failed"));
    }
}
