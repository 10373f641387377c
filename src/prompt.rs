use std::io::{self, BufRead, Write};

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        ShellPrompt { prompt: prompt.into() }
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.prompt)?;
        out.flush()
    }

    /// Reads one line as raw bytes, keeping its trailing newline. `None` on
    /// EOF. Reads interrupted by a signal are retried.
    pub fn read_line<R: BufRead>(&self, input: &mut R) -> io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        loop {
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
