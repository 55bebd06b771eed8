use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use engine::{Evaluator, Score};

use super::output_parser::{is_bestmove, parse_info_score};

/// Client for a UCI chess engine subprocess, used as the positional
/// evaluator oracle.
///
/// The subprocess is a scoped resource: `launch` performs the full
/// `uci`/`isready` handshake and fails rather than hand back a half-started
/// engine, `quit` shuts it down gracefully, and `Drop` covers every other
/// exit path with a quit attempt followed by a kill.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    stopped: bool,
}

impl UciEngine {
    pub fn launch(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch UCI engine at {:?}", path))?;

        let stdin = child
            .stdin
            .take()
            .context("UCI engine has no stdin handle")?;
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .context("UCI engine has no stdout handle")?;

        let mut engine = Self {
            child,
            stdin,
            stdout,
            stopped: false,
        };

        engine.send("uci")?;
        engine.wait_for("uciok")?;
        engine.send("isready")?;
        engine.wait_for("readyok")?;

        info!("UCI engine launched from {:?}", path);

        Ok(engine)
    }

    /// Graceful shutdown. Idempotent; also invoked by `Drop` if the caller
    /// never reached it.
    pub fn quit(&mut self) -> Result<()> {
        if self.stopped {
            return Ok(());
        }

        self.stopped = true;
        self.send("quit")?;
        self.child.wait()?;

        Ok(())
    }

    fn send(&mut self, command: &str) -> Result<()> {
        debug!("> {}", command);
        writeln!(self.stdin, "{}", command)?;
        self.stdin.flush()?;

        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes = self.stdout.read_line(&mut line)?;

        if bytes == 0 {
            bail!("UCI engine closed its output stream");
        }

        debug!("< {}", line.trim_end());

        Ok(line.trim().to_string())
    }

    fn wait_for(&mut self, token: &str) -> Result<()> {
        loop {
            if self.read_line()? == token {
                return Ok(());
            }
        }
    }
}

impl Evaluator for UciEngine {
    /// Scores the position with `go movetime`, reading info lines until the
    /// `bestmove` fence and keeping the last reported score.
    fn analyze(&mut self, state_key: &str, limit: Duration) -> Result<Option<Score>> {
        self.send(&format!("position fen {}", state_key))?;
        self.send(&format!("go movetime {}", limit.as_millis()))?;

        let mut last_score = None;

        loop {
            let line = self.read_line()?;

            if let Some(score) = parse_info_score(&line) {
                last_score = Some(score);
            }

            if is_bestmove(&line) {
                return Ok(last_score);
            }
        }
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            let _ = writeln!(self.stdin, "quit");
            let _ = self.stdin.flush();
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
