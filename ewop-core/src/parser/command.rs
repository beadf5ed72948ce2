//! External-process dependency parser

use super::{conllu, Dependency, DependencyParser};
use crate::config::ParserConfig;
use crate::error::{EwopError, Result};
use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs a parser program once per sentence
///
/// The sentence is written to the program's stdin followed by a newline;
/// its stdout must be a CoNLL-U document. Any spawn failure, non-zero exit
/// or undecodable output is reported as a parser error.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    /// Create a parser from an argv vector
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| EwopError::Config("parser.command is empty".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Create a parser from the `parser` configuration section
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Self::new(&config.command)
    }

    /// The program being run
    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, sentence: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EwopError::parser(sentence, format!("cannot run {}: {e}", self.program)))?;

        // stdin is fed from its own thread while stdout is drained here; a
        // parser may emit output before it has read all of its input.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(sentence.as_bytes())?;
                    stdin.write_all(b"\n")?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        match written {
            // The program may exit without reading; its status decides.
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(EwopError::parser(
                    sentence,
                    format!("cannot write input: {e}"),
                ));
            }
            Err(_) => {
                return Err(EwopError::parser(sentence, "stdin writer panicked"));
            }
            _ => {}
        }

        let output = output.map_err(|e| EwopError::parser(sentence, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EwopError::parser(
                sentence,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| EwopError::parser(sentence, format!("output is not UTF-8: {e}")))
    }
}

impl DependencyParser for CommandParser {
    fn parse(&self, sentence: &str) -> Result<Vec<Dependency>> {
        let stdout = self.run(sentence)?;
        let sentences =
            conllu::parse(&stdout).map_err(|e| EwopError::parser(sentence, e.to_string()))?;

        Ok(sentences.iter().flat_map(|s| s.dependencies()).collect())
    }
}
