//! Line input from the terminal
//!
//! Reads stdin on a detached thread instead of `tokio::io::stdin`, whose
//! pending read would hold up runtime shutdown until the next line arrives.

use std::io::BufRead;

use tokio::sync::mpsc;

/// Spawn the reader. The channel closes at end of input.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::debug!("stdin closed: {}", e);
                        break;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        log::warn!("Failed to spawn stdin reader: {}", e);
    }
    rx
}

/// Affirmative answer to a y/N prompt
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
