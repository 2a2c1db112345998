//! keyfile - create, read, or modify the contents of a keyfile
//!
//! A keyfile holds one secret encrypted under a passphrase. Keys given on
//! the command line may be written as:
//! - `#x12ab` for hexadecimal digits
//! - `@Eqs=` for standard base64
//! - `-` to read the key from stdin
//! - anything else is taken verbatim

mod key_arg;
mod passphrase;
mod save;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyfile_core::{load_key, read_keyfile, rekey, Keyfile};
use tracing::info;

use passphrase::{Passphrase, PassphrasePrompt};
use save::save_keyfile;

/// Create, read, or modify the contents of a passphrase-protected keyfile
#[derive(Parser, Debug)]
#[command(name = "keyfile")]
#[command(version)]
#[command(about = "Create, read, or modify the contents of a keyfile")]
struct Args {
    /// Allow an empty passphrase (not recommended)
    #[arg(long, global = true, env = "KEYFILE_EMPTY_OK")]
    empty_ok: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contents of the key file to stdout
    Get {
        /// Write key output as binary instead of base64
        #[arg(long)]
        raw: bool,

        key_file: PathBuf,
    },

    /// Create or replace the contents of the key file with the given key
    Set { key_file: PathBuf, key: String },

    /// Change the passphrase on an existing key file
    Rekey { key_file: PathBuf },

    /// Write a randomly-generated key of n bytes to the key file
    Random {
        key_file: PathBuf,

        /// Key length in bytes (must be positive)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries key output only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let empty_ok = args.empty_ok;
    let prompt = |tag: &'static str, confirm: bool| PassphrasePrompt {
        tag,
        confirm,
        empty_ok,
    };

    match args.command {
        Command::Get { raw, key_file } => {
            let key = load_key(&key_file, || prompt("", false).read())
                .context("load key file")?;

            let mut stdout = std::io::stdout().lock();
            if raw {
                stdout.write_all(key.expose())?;
            } else {
                writeln!(stdout, "{}", key_arg::encode_key(key.expose()))?;
            }
            stdout.flush()?;
        }

        Command::Set { key_file, key } => {
            let key = key_arg::decode_key(&key, std::io::stdin().lock())
                .context("decoding key")?;
            let passphrase = prompt("", true).read()?;

            let mut kf = Keyfile::new();
            kf.set(&passphrase, &key).context("encrypt key")?;
            write_keyfile(&key_file, &kf)?;
        }

        Command::Rekey { key_file } => {
            let kf = read_keyfile(&key_file).context("load key file")?;
            let old: Passphrase = prompt("Old ", false).read()?;

            let rekeyed = rekey(&kf, &old, || prompt("New ", true).read())
                .context("rekey key file")?;
            write_keyfile(&key_file, &rekeyed)?;
        }

        Command::Random { key_file, n } => {
            let passphrase = prompt("", true).read()?;

            let mut kf = Keyfile::new();
            kf.random(&passphrase, n as usize)
                .context("generate random key")?;
            write_keyfile(&key_file, &kf)?;
        }
    }

    Ok(())
}

fn write_keyfile(path: &Path, keyfile: &Keyfile) -> Result<()> {
    save_keyfile(path, keyfile).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote keyfile {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_get() {
        let args = Args::try_parse_from(["keyfile", "get", "--raw", "k.key"]).unwrap();
        assert!(!args.empty_ok);
        match args.command {
            Command::Get { raw, key_file } => {
                assert!(raw);
                assert_eq!(key_file, PathBuf::from("k.key"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_random_rejects_non_positive() {
        assert!(Args::try_parse_from(["keyfile", "random", "k.key", "0"]).is_err());
        assert!(Args::try_parse_from(["keyfile", "random", "k.key", "-3"]).is_err());
        assert!(Args::try_parse_from(["keyfile", "random", "k.key", "many"]).is_err());

        let args = Args::try_parse_from(["keyfile", "random", "k.key", "48"]).unwrap();
        assert!(matches!(args.command, Command::Random { n: 48, .. }));
    }

    #[test]
    fn test_parse_empty_ok_flag() {
        let args = Args::try_parse_from(["keyfile", "--empty-ok", "rekey", "k.key"]).unwrap();
        assert!(args.empty_ok);
        assert!(matches!(args.command, Command::Rekey { .. }));
    }
}
