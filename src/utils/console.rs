use std::io::{self, BufRead, Write};

/// Line-oriented terminal wrapper shared by the interactive programs.
///
/// Generic over reader and writer so sessions can be driven from memory in
/// tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` (no newline) and read one line.
    ///
    /// Returns None once input is exhausted. The trailing line break is
    /// stripped.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Writer for free-form output via `writeln!`
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console over the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_lines_until_eof() {
        let mut console = Console::new(Cursor::new("first\r\nsecond\n"), Vec::new());

        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.prompt("> ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "> > > ");
    }

    #[test]
    fn test_blank_line_is_not_eof() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new());
        assert_eq!(console.prompt("").unwrap().as_deref(), Some(""));
    }
}
