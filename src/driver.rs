//! Line-oriented command interpreter used by the `qtest` binary.
//!
//! ```text
//! new            create a queue, releasing any existing one
//! free           release the queue
//! ih str [n]     insert `str` at the head `n` times (default 1)
//! it str [n]     insert `str` at the tail `n` times (default 1)
//! rh [expected]  remove the head, optionally checking its value
//! rhq            remove the head without reading it
//! size           print the number of elements
//! reverse        reverse the queue in place
//! show           print the queue
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::buffer::terminated;
use crate::deque::LinkedQueue;
use crate::handle;

use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// Capacity of the buffer `rh` removes into.
pub const REMOVE_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Free,
    InsertHead { value: String, count: usize },
    InsertTail { value: String, count: usize },
    RemoveHead { expected: Option<String> },
    RemoveHeadQuiet,
    Size,
    Reverse,
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{0}' needs a string argument")]
    MissingArgument(&'static str),

    #[error("invalid repeat count '{0}'")]
    InvalidCount(String),

    #[error("too many arguments to '{0}'")]
    TooManyArguments(&'static str),
}

fn parse_insert<'a>(
    name: &'static str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<(String, usize), ParseError> {
    let value = args.next().ok_or(ParseError::MissingArgument(name))?;
    let count = match args.next() {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidCount(n.to_owned()))?,
        None => 1,
    };
    if args.next().is_some() {
        return Err(ParseError::TooManyArguments(name));
    }
    Ok((value.to_owned(), count))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let cmd = match name {
            "ih" => {
                let (value, count) = parse_insert("ih", words)?;
                return Ok(Command::InsertHead { value, count });
            }
            "it" => {
                let (value, count) = parse_insert("it", words)?;
                return Ok(Command::InsertTail { value, count });
            }
            "rh" => {
                let expected = words.next().map(str::to_owned);
                if words.next().is_some() {
                    return Err(ParseError::TooManyArguments("rh"));
                }
                return Ok(Command::RemoveHead { expected });
            }
            "new" => Command::New,
            "free" => Command::Free,
            "rhq" => Command::RemoveHeadQuiet,
            "size" => Command::Size,
            "reverse" => Command::Reverse,
            "show" => Command::Show,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        match words.next() {
            Some(_) => Err(ParseError::TooManyArguments(static_name(&cmd))),
            None => Ok(cmd),
        }
    }
}

fn static_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::New => "new",
        Command::Free => "free",
        Command::InsertHead { .. } => "ih",
        Command::InsertTail { .. } => "it",
        Command::RemoveHead { .. } => "rh",
        Command::RemoveHeadQuiet => "rhq",
        Command::Size => "size",
        Command::Reverse => "reverse",
        Command::Show => "show",
    }
}

/// Parses one script line. Blank and comment lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Holds the queue a script operates on and counts failed checks.
#[derive(Debug, Default)]
pub struct Session {
    queue: Option<Box<LinkedQueue>>,
    failures: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn queue(&self) -> Option<&LinkedQueue> {
        self.queue.as_deref()
    }

    /// Counts a failure that happened outside `execute`, such as a bad line.
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn execute<W: Write>(&mut self, cmd: &Command, out: &mut W) -> io::Result<()> {
        match cmd {
            Command::New => {
                handle::destroy(self.queue.take());
                self.queue = handle::create();
                if self.queue.is_none() {
                    writeln!(out, "ERROR: couldn't create queue")?;
                    self.failures += 1;
                }
            }
            Command::Free => handle::destroy(self.queue.take()),
            Command::InsertHead { value, count } => {
                self.insert(value, *count, handle::insert_head, out)?
            }
            Command::InsertTail { value, count } => {
                self.insert(value, *count, handle::insert_tail, out)?
            }
            Command::RemoveHead { expected } => {
                let mut buf = [0_u8; REMOVE_BUFFER_SIZE];
                if handle::remove_head(self.queue.as_deref_mut(), Some(&mut buf)) {
                    let removed = String::from_utf8_lossy(terminated(&buf));
                    writeln!(out, "Removed {} from queue", removed)?;
                    if let Some(expected) = expected {
                        if removed != expected.as_str() {
                            writeln!(
                                out,
                                "ERROR: removed value {} != expected value {}",
                                removed, expected
                            )?;
                            self.failures += 1;
                        }
                    }
                } else {
                    self.removal_failed(out)?;
                }
            }
            Command::RemoveHeadQuiet => {
                if !handle::remove_head(self.queue.as_deref_mut(), None) {
                    self.removal_failed(out)?;
                }
            }
            Command::Size => {
                writeln!(out, "Queue size = {}", handle::size(self.queue()))?;
                return Ok(());
            }
            Command::Reverse => handle::reverse(self.queue.as_deref_mut()),
            Command::Show => {}
        }
        self.show(out)
    }

    fn insert<W: Write>(
        &mut self,
        value: &str,
        count: usize,
        op: fn(Option<&mut LinkedQueue>, &str) -> bool,
        out: &mut W,
    ) -> io::Result<()> {
        for _ in 0..count {
            if !op(self.queue.as_deref_mut(), value) {
                writeln!(out, "ERROR: insertion of {} failed", value)?;
                self.failures += 1;
                break;
            }
        }
        Ok(())
    }

    fn removal_failed<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let reason = match self.queue() {
            None => "queue doesn't exist",
            Some(_) => "queue is empty",
        };
        writeln!(out, "ERROR: removal failed, {}", reason)?;
        self.failures += 1;
        Ok(())
    }

    pub fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.queue() {
            None => writeln!(out, "q = NULL"),
            Some(queue) => {
                write!(out, "q = [")?;
                for (i, s) in queue.iter().enumerate() {
                    if i > 0 {
                        write!(out, " ")?;
                    }
                    write!(out, "{}", s)?;
                }
                writeln!(out, "]")
            }
        }
    }

    /// Releases the queue, if any.
    pub fn finish(&mut self) {
        handle::destroy(self.queue.take());
    }
}
