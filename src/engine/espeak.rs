//! espeak-ng backend
//!
//! Drives the espeak-ng command-line program in quiet IPA mode. One
//! process is spawned per batch; every speech segment of the batch goes
//! in as one stdin line and comes back as one phoneme line.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng,
//!   or on macOS: brew install espeak-ng)

use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::{EngineConfig, EngineVersion, G2p, LanguageSwitch, WordsMismatch};
use crate::{Result, TtsPrepError};

/// Punctuation carried around the engine call when
/// `preserve_punctuation` is set. espeak-ng drops punctuation from its
/// IPA output, so punctuated runs are split off beforehand and stitched
/// back in afterwards.
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\s*[;:,.!?¡¿—…"«»“”(){}\[\]]+\s*)+"#).unwrap()
});

/// Language-switch flags like `(en)` or `(fr-fr)` embedded in the output
static FLAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([a-z]{2,3}(?:-[a-z0-9]+)*\)\s*").unwrap());

/// One piece of an input text after punctuation splitting
enum Piece {
    /// Verbatim punctuation run
    Punct(String),
    /// Index into the flat list of speech segments sent to the engine
    Speech(usize),
}

/// G2P engine backed by the espeak-ng executable
pub struct EspeakEngine {
    language: String,
    config: EngineConfig,
    espeak_path: String,
    version: Option<EngineVersion>,
}

impl EspeakEngine {
    /// Create an engine for one language
    ///
    /// Locates espeak-ng, probes it for its version, and fails if the
    /// executable cannot be found or run.
    pub fn new(language: &str, config: EngineConfig) -> Result<Self> {
        if language.is_empty() {
            return Err(TtsPrepError::Config(
                "a language code must be provided".to_string(),
            ));
        }

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        let version = Self::probe_version(&espeak_path)?;
        match version {
            Some(v) => debug!("espeak-ng version {}", v),
            None => warn!("Could not parse espeak-ng version banner"),
        }

        Ok(Self {
            language: language.to_string(),
            config,
            espeak_path,
            version,
        })
    }

    /// Candidate espeak-ng locations, most specific first
    ///
    /// On macOS the Homebrew install locations are probed explicitly
    /// because they are often missing from PATH; everywhere else the
    /// PATH lookup plus the stock distro path is enough. A miss here is
    /// not an error - the next candidate is tried.
    fn candidate_paths() -> Vec<String> {
        let mut paths = Vec::new();

        if cfg!(target_os = "macos") {
            for fixed in [
                "/opt/homebrew/bin/espeak-ng",
                "/usr/local/bin/espeak-ng",
                "/opt/local/bin/espeak-ng",
            ] {
                paths.push(fixed.to_string());
            }
            // Homebrew keeps versioned install dirs under Cellar
            for cellar in ["/opt/homebrew/Cellar/espeak-ng", "/usr/local/Cellar/espeak-ng"] {
                if let Ok(entries) = std::fs::read_dir(cellar) {
                    for entry in entries.flatten() {
                        let bin = entry.path().join("bin/espeak-ng");
                        if let Some(p) = bin.to_str() {
                            paths.push(p.to_string());
                        }
                    }
                }
            }
        }

        paths.push("espeak-ng".to_string());
        paths.push("/usr/bin/espeak-ng".to_string());
        paths
    }

    /// Find a working espeak-ng executable
    fn find_espeak() -> Result<String> {
        for path in Self::candidate_paths() {
            if let Ok(status) = Command::new(&path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path);
                }
            }
        }

        Err(TtsPrepError::Engine(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Run `espeak-ng --version` and parse the banner
    fn probe_version(espeak_path: &str) -> Result<Option<EngineVersion>> {
        let output = Command::new(espeak_path)
            .arg("--version")
            .output()
            .map_err(|e| {
                TtsPrepError::Engine(format!("Failed to run {}: {}", espeak_path, e))
            })?;

        if !output.status.success() {
            return Err(TtsPrepError::Engine(format!(
                "{} --version exited with {}",
                espeak_path, output.status
            )));
        }

        let banner = String::from_utf8_lossy(&output.stdout);
        Ok(EngineVersion::parse(&banner))
    }

    /// Split one input text into punctuation and speech pieces
    ///
    /// Speech pieces are appended to `speech` (one engine input line
    /// each); punctuation pieces are carried through verbatim.
    fn split_pieces(&self, text: &str, speech: &mut Vec<String>) -> Vec<Piece> {
        let mut pieces = Vec::new();

        if !self.config.preserve_punctuation {
            pieces.push(Piece::Speech(speech.len()));
            speech.push(sanitize_line(text));
            return pieces;
        }

        let mut last = 0;
        for m in PUNCT_RE.find_iter(text) {
            if m.start() > last {
                pieces.push(Piece::Speech(speech.len()));
                speech.push(sanitize_line(&text[last..m.start()]));
            }
            pieces.push(Piece::Punct(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            pieces.push(Piece::Speech(speech.len()));
            speech.push(sanitize_line(&text[last..]));
        }

        pieces
    }

    /// Run espeak-ng over all speech segments in one invocation
    fn run_engine(&self, speech: &[String]) -> Result<Vec<String>> {
        if speech.is_empty() {
            return Ok(Vec::new());
        }

        let mut child = Command::new(&self.espeak_path)
            .arg("-q")
            .arg("--ipa")
            .arg("-v")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TtsPrepError::Engine(format!("Failed to spawn espeak-ng: {}", e))
            })?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                TtsPrepError::Engine("Failed to open espeak-ng stdin".to_string())
            })?;
            for line in speech {
                stdin.write_all(line.as_bytes())?;
                stdin.write_all(b"\n")?;
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(TtsPrepError::Engine(format!(
                "espeak-ng exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)?;
        let mut lines: Vec<String> = stdout.lines().map(|l| l.trim().to_string()).collect();

        // espeak-ng occasionally collapses or splits lines (blank input,
        // multi-sentence segments). The configured mismatch tolerance
        // keeps cardinality stable regardless.
        if lines.len() != speech.len() {
            match self.config.words_mismatch {
                WordsMismatch::Ignore => debug!(
                    "espeak-ng returned {} lines for {} inputs",
                    lines.len(),
                    speech.len()
                ),
                WordsMismatch::Warn => warn!(
                    "espeak-ng returned {} lines for {} inputs",
                    lines.len(),
                    speech.len()
                ),
            }
            lines.resize(speech.len(), String::new());
        }

        Ok(lines)
    }

    /// Post-process one engine output line per the engine config
    fn postprocess(&self, line: &str) -> String {
        let mut out = match self.config.language_switch {
            LanguageSwitch::RemoveFlags => FLAG_RE.replace_all(line, "").into_owned(),
            LanguageSwitch::Keep => line.to_string(),
        };
        if !self.config.with_stress {
            out.retain(|c| c != 'ˈ' && c != 'ˌ');
        }
        out
    }
}

impl G2p for EspeakEngine {
    fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut speech = Vec::new();
        let plans: Vec<Vec<Piece>> = texts
            .iter()
            .map(|t| self.split_pieces(t, &mut speech))
            .collect();

        let lines = self.run_engine(&speech)?;

        let results = plans
            .iter()
            .map(|pieces| {
                let mut out = String::new();
                for piece in pieces {
                    match piece {
                        Piece::Punct(p) => out.push_str(p),
                        Piece::Speech(i) => out.push_str(&self.postprocess(&lines[*i])),
                    }
                }
                out.trim().to_string()
            })
            .collect();

        Ok(results)
    }

    fn version(&self) -> Option<EngineVersion> {
        self.version
    }
}

/// Flatten a speech segment onto a single engine input line
fn sanitize_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}
