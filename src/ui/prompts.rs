//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{InstallerError, Result};

use super::{is_affirmative, Prompt, PromptType};

/// Convert dialoguer errors to InstallerError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallerError {
    InstallerError::Io(e.into())
}

/// Prompt the user for input.
///
/// Confirmations are answered with `"yes"` or `"no"`.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    match prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<String> {
    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(is_affirmative(&prompt.default))
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(if result { "yes" } else { "no" }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_become_io_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        let err = map_dialoguer_err(dialoguer::Error::IO(io));
        assert!(matches!(err, InstallerError::Io(_)));
    }
}
