//! Interactive menu shell.
//!
//! Reads menu choices and custom verifiers line by line and writes results
//! to any `Write`, so the same loop drives stdin/stdout and the tests.
//! Only user input errors are re-prompted; anything else is returned.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::Settings;
use crate::pkce::{validate, CodeVerifier, PkcePair};
use crate::Result;

/// Label printed before the verifier
pub const VERIFIER_LABEL: &str = "codeVerifier = ";
/// Label printed before the challenge
pub const CHALLENGE_LABEL: &str = "challenge    = ";

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Exit,
    Generate,
    Custom,
}

impl Choice {
    fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(Choice::Exit),
            1 => Some(Choice::Generate),
            2 => Some(Choice::Custom),
            _ => None,
        }
    }
}

/// How a shell session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// User picked exit, or input ran out
    Exited,
    /// A pair was printed
    Completed(PkcePair),
}

/// Interactive shell over a line reader and a writer.
pub struct Shell<R: BufRead, W: Write> {
    input: R,
    output: W,
    settings: Settings,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Run one session: banner, menu, one operation.
    pub fn run(&mut self) -> Result<Outcome> {
        self.print_menu()?;

        let choice = match self.read_choice()? {
            Some(choice) => choice,
            None => return Ok(Outcome::Exited),
        };
        debug!(?choice, "Menu choice");

        let pair = match choice {
            Choice::Exit => return Ok(Outcome::Exited),
            Choice::Generate => PkcePair::generate_with_entropy(self.settings.entropy_bytes)?,
            Choice::Custom => match self.read_verifier()? {
                Some(verifier) => PkcePair::from_verifier(verifier),
                None => return Ok(Outcome::Exited),
            },
        };

        write_pair(&mut self.output, &pair)?;
        Ok(Outcome::Completed(pair))
    }

    /// Give back the writer, mostly for inspecting output in tests.
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{} - v{}\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(self.output, "0. Exit")?;
        writeln!(self.output, "1. Generate a codeVerifier and S256 hash")?;
        writeln!(self.output, "2. Calculate hash from codeVerifier")?;
        Ok(())
    }

    /// Prompt until a known menu number is entered. `None` on EOF.
    fn read_choice(&mut self) -> Result<Option<Choice>> {
        loop {
            write!(self.output, "\nChoice ? ")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<i64>() {
                Ok(n) => match Choice::from_number(n) {
                    Some(choice) => return Ok(Some(choice)),
                    None => writeln!(self.output, "Unknown choice")?,
                },
                Err(_) => writeln!(self.output, "Number expected")?,
            }
        }
    }

    /// Prompt until the line is a valid verifier. `None` on EOF.
    fn read_verifier(&mut self) -> Result<Option<CodeVerifier>> {
        loop {
            write!(self.output, "\ncodeVerifier ? ")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            match validate(&line) {
                Ok(verifier) => return Ok(Some(verifier)),
                Err(e) => {
                    debug!(error = %e, "Rejected custom code verifier");
                    writeln!(self.output, "{}\n", e)?;
                }
            }
        }
    }

    /// Read one line with only the terminator removed.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, which the menu and the
    /// validator both reject as ordinary bad input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Print a pair with the fixed labels.
pub fn write_pair<W: Write>(out: &mut W, pair: &PkcePair) -> Result<()> {
    writeln!(out, "{}{}", VERIFIER_LABEL, pair.verifier)?;
    writeln!(out, "{}{}", CHALLENGE_LABEL, pair.challenge)?;
    Ok(())
}
