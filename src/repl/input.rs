//! Input handler for the interactive session using rustyline
//!
//! Provides readline functionality with persistent history and graceful
//! interrupt handling.

use crate::errors::{AssistantError, Result};
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Readline interface with optional on-disk history.
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| AssistantError::Generic(e.to_string()))?;

        Ok(InputHandler {
            editor,
            history_path: None,
        })
    }

    /// History file: ~/.deskbuddy/history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new().map_err(|e| AssistantError::Generic(e.to_string()))?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
        })
    }

    /// Read one trimmed line.
    ///
    /// Returns:
    /// - `Ok(Some(input))` for normal input
    /// - `Ok(None)` for EOF (Ctrl-D)
    /// - `Err(Interrupted)` on Ctrl-C
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Err(AssistantError::Interrupted),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(AssistantError::Generic(format!("readline error: {}", err))),
        }
    }

    /// Save history to disk. Called on graceful shutdown.
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor
                .save_history(path)
                .map_err(|e| AssistantError::Generic(e.to_string()))?;
        }
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_handler_creation() {
        let handler = InputHandler::new();
        assert!(handler.is_ok());
    }

    #[test]
    fn test_input_handler_with_history() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history");

        let handler = InputHandler::with_history(history_path.clone());
        assert!(handler.is_ok());
        assert_eq!(handler.unwrap().history_path, Some(history_path));
    }

    #[test]
    fn test_history_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history");

        {
            let mut handler = InputHandler::with_history(history_path.clone()).unwrap();
            let _ = handler.editor.add_history_entry("vpn not connecting");
            handler.save_history().unwrap();
        }

        assert!(history_path.exists());

        {
            let handler = InputHandler::with_history(history_path).unwrap();
            assert_eq!(handler.history_len(), 1);
        }
    }
}
