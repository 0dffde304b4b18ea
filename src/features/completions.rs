//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::SerenityError;

const BIN_NAME: &str = "serenity";

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, SerenityError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| SerenityError::InvalidInput(format!("completion script is not UTF-8: {e}")))
}

/// How to load the completion script for `shell`.
#[must_use]
pub fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "# Add to ~/.bashrc:\nsource <({BIN_NAME} completions bash)\n"
        ),
        Shell::Zsh => format!(
            "# Save into a directory on your fpath:\n\
             {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}\n\
             # Then in ~/.zshrc:\n\
             fpath=(~/.zsh/completions $fpath)\n\
             autoload -Uz compinit && compinit\n"
        ),
        Shell::Fish => format!(
            "{BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish\n"
        ),
        Shell::PowerShell => format!(
            "# Add to $PROFILE:\n{BIN_NAME} completions powershell | Out-String | Invoke-Expression\n"
        ),
        Shell::Elvish => format!(
            "{BIN_NAME} completions elvish > ~/.config/elvish/lib/{BIN_NAME}.elv\n\
             # Then in rc.elv:\nuse {BIN_NAME}\n"
        ),
        _ => format!("Run `{BIN_NAME} completions {shell}` and load the output in your shell.\n"),
    }
}
