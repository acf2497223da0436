use std::io::Write;

/// The process environment a command runs in.
///
/// Commands never touch stdout, stderr or the exit status directly, so they can be driven from
/// tests.
pub trait Host: Send + Sync {
    /// Where exposition text, JSON views and verdicts go.
    fn output(&mut self) -> impl Write;

    /// Where warnings and failures go.
    fn error(&mut self) -> impl Write;

    /// End the process with `code`. Hosts that cannot exit record the code instead.
    fn exit(&mut self, code: i32);
}

/// Captures everything in memory and remembers the requested exit code.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
