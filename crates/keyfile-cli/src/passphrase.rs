//! Interactive passphrase entry

use std::io;

use keyfile_core::{KeyfileError, Result};
use zeroize::Zeroizing;

/// Passphrase as entered by the user
pub type Passphrase = Zeroizing<String>;

/// Prompts and policy for reading a passphrase from the terminal
#[derive(Debug, Clone, Copy)]
pub struct PassphrasePrompt {
    /// Prefix for the prompt, e.g. "Old " or "New "
    pub tag: &'static str,
    /// Ask twice and require both entries to match
    pub confirm: bool,
    /// Accept an empty passphrase
    pub empty_ok: bool,
}

impl PassphrasePrompt {
    /// Read the passphrase from the controlling terminal
    pub fn read(&self) -> Result<Passphrase> {
        self.read_with(|prompt| rpassword::prompt_password(prompt))
    }

    /// Read the passphrase using `ask` to answer each prompt
    ///
    /// An empty passphrase is rejected before confirmation is requested.
    pub fn read_with<F>(&self, mut ask: F) -> Result<Passphrase>
    where
        F: FnMut(&str) -> io::Result<String>,
    {
        let entered = Zeroizing::new(
            ask(&format!("{}Passphrase: ", self.tag))
                .map_err(|e| KeyfileError::Passphrase(e.to_string()))?,
        );
        self.check_entered(&entered)?;

        if self.confirm {
            let prompt = format!("Confirm {}passphrase: ", self.tag.to_lowercase());
            let again = Zeroizing::new(
                ask(&prompt)
                    .map_err(|e| KeyfileError::Passphrase(format!("read confirmation: {}", e)))?,
            );
            if *again != *entered {
                return Err(KeyfileError::Passphrase(
                    "passphrases do not match".to_string(),
                ));
            }
        }

        Ok(entered)
    }

    fn check_entered(&self, entered: &str) -> Result<()> {
        if entered.is_empty() && !self.empty_ok {
            return Err(KeyfileError::Passphrase("empty passphrase".to_string()));
        }
        Ok(())
    }
}
