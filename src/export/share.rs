use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::types::Palette;

use super::Capability;

pub const SHARE_TITLE: &str = "Check out my color palette!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_palette(palette: &Palette, url: &str) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!("Here’s a color palette I generated: {}", palette.join(", ")),
            url: url.to_string(),
        }
    }
}

/// A native share target of the host.
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<()>;
}

pub type ShareCapability = Capability<Box<dyn ShareTarget>>;

/// Shares by running a configured program with `title`, `text` and `url` appended as arguments.
/// The child gets no terminal: stdin and stdout are null, stderr is captured for the error.
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl ShareTarget for CommandShare {
    fn share(&mut self, payload: &SharePayload) -> Result<()> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&payload.title)
            .arg(&payload.text)
            .arg(&payload.url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("running share command '{}'", self.program))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("share command '{}' exited with {}", self.program, output.status);
            }
            bail!(
                "share command '{}' exited with {}: {stderr}",
                self.program,
                output.status
            );
        }
        Ok(())
    }
}

/// Builds the share capability from the configured command line, if any.
pub fn detect_share(command: &[String]) -> ShareCapability {
    match command.split_first() {
        Some((program, args)) if !program.trim().is_empty() => Capability::Available(Box::new(
            CommandShare::new(program.clone(), args.to_vec()),
        )),
        _ => Capability::Unavailable("no share command configured".to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Failed(String),
    Unsupported,
}

pub fn share_palette(share: &mut ShareCapability, palette: &Palette, url: &str) -> ShareOutcome {
    let Capability::Available(target) = share else {
        return ShareOutcome::Unsupported;
    };
    let payload = SharePayload::for_palette(palette, url);
    match target.share(&payload) {
        Ok(()) => {
            info!("Thanks for sharing!");
            ShareOutcome::Shared
        }
        Err(err) => {
            let detail = format!("{err:#}");
            warn!(error = %detail, "Error sharing");
            ShareOutcome::Failed(detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::Color;

    #[derive(Clone, Default)]
    struct RecordingShare {
        payloads: Rc<RefCell<Vec<SharePayload>>>,
    }

    impl ShareTarget for RecordingShare {
        fn share(&mut self, payload: &SharePayload) -> Result<()> {
            self.payloads.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    struct FailingShare;

    impl ShareTarget for FailingShare {
        fn share(&mut self, _payload: &SharePayload) -> Result<()> {
            bail!("share sheet dismissed")
        }
    }

    #[test]
    fn payload_embeds_comma_joined_palette() {
        let palette = Palette::new(vec![Color::new(1, 2, 3), Color::new(4, 5, 6)]);
        let payload = SharePayload::for_palette(&palette, "https://example.com/palettr");
        assert_eq!(payload.title, SHARE_TITLE);
        assert_eq!(
            payload.text,
            "Here’s a color palette I generated: rgb(1, 2, 3), rgb(4, 5, 6)"
        );
        assert_eq!(payload.url, "https://example.com/palettr");
    }

    #[test]
    fn available_target_receives_payload() {
        let recorder = RecordingShare::default();
        let mut share: ShareCapability = Capability::Available(Box::new(recorder.clone()));
        let outcome = share_palette(&mut share, &Palette::default(), "u");
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(recorder.payloads.borrow().len(), 1);
    }

    #[test]
    fn failures_and_missing_capability_are_distinct() {
        let mut failing: ShareCapability = Capability::Available(Box::new(FailingShare));
        assert_eq!(
            share_palette(&mut failing, &Palette::default(), "u"),
            ShareOutcome::Failed("share sheet dismissed".to_string())
        );
        let mut missing: ShareCapability = Capability::Unavailable("none".into());
        assert_eq!(
            share_palette(&mut missing, &Palette::default(), "u"),
            ShareOutcome::Unsupported
        );
    }

    #[cfg(unix)]
    fn shell(script: &str) -> CommandShare {
        // $0 is a placeholder; title, text and url become $1..$3
        CommandShare::new(
            "sh".to_string(),
            vec!["-c".to_string(), script.to_string(), "share".to_string()],
        )
    }

    #[cfg(unix)]
    #[test]
    fn command_share_passes_payload_as_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("args.txt");
        let script = format!("printf '%s\\n' \"$1\" \"$2\" \"$3\" > '{}'", out.display());
        let palette = Palette::new(vec![Color::new(1, 2, 3)]);
        let payload = SharePayload::for_palette(&palette, "https://example.com/p");
        shell(&script).share(&payload).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            [
                SHARE_TITLE,
                "Here’s a color palette I generated: rgb(1, 2, 3)",
                "https://example.com/p"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_share_keeps_output_off_the_terminal() {
        let payload = SharePayload::for_palette(&Palette::default(), "u");
        // stdout is discarded; a failing command reports its stderr
        shell("echo chatter").share(&payload).unwrap();

        let err = shell("echo chatter; echo 'no share daemon' >&2; exit 3")
            .share(&payload)
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("no share daemon"), "{message}");
        assert!(!message.contains("chatter"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn command_share_does_not_read_the_terminal() {
        // `cat` ends at once on a null stdin instead of waiting for keys
        let payload = SharePayload::for_palette(&Palette::default(), "u");
        shell("cat > /dev/null").share(&payload).unwrap();
    }

    #[test]
    fn detect_share_needs_a_program() {
        assert!(!detect_share(&[]).is_available());
        assert!(!detect_share(&[" ".to_string()]).is_available());
        assert!(detect_share(&["xdg-open".to_string()]).is_available());
    }
}
